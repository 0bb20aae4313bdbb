//! dig-style text report of a DNS message.
//!
//! Output goes to any `io::Write`; the first decode failure aborts the report
//! and whatever was written before it stays written.

use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::error::ParseError;
use crate::format;
use crate::mnemonics;
use crate::parser::Parser;
use crate::structure::{DnsHeader, DnsRecord, QueryType, RecordBody};

/// Parses `msg` and writes the full report: header, question section, then
/// answer, authority and additional sections.
pub fn render<W: Write>(msg: &[u8], out: &mut W) -> Result<()> {
    let (header, mut parser) = Parser::start(msg)?;

    write_header(out, &header)?;
    write_question_section(out, &mut parser)?;
    write_resource_section(out, "ANSWER", || parser.next_answer())?;
    write_resource_section(out, "AUTHORITY", || parser.next_authority())?;
    write_resource_section(out, "ADDITIONAL", || parser.next_additional())?;

    Ok(())
}

pub fn write_header<W: Write>(out: &mut W, h: &DnsHeader) -> Result<()> {
    writeln!(
        out,
        ";; opcode: {}, status: {}, id: {}",
        mnemonics::opcode(h.opcode),
        mnemonics::rcode(h.rcode),
        h.id
    )?;
    writeln!(out, ";; flags: {}", mnemonics::flags(h).join(" "))?;
    writeln!(out)?;
    Ok(())
}

pub fn write_question_section<W: Write>(out: &mut W, parser: &mut Parser<'_>) -> Result<()> {
    writeln!(out, ";; QUESTION SECTION:")?;
    while let Some(q) = parser.next_question()? {
        writeln!(
            out,
            ";{}\t\t{}\t{}",
            q.name,
            mnemonics::class(q.class),
            mnemonics::rtype(q.qtype.to_num())
        )?;
    }
    writeln!(out)?;
    Ok(())
}

/// Writes one record section. OPT records are held back and printed as an
/// EDNS pseudosection once the ordinary records of this section are done.
pub fn write_resource_section<W, F>(out: &mut W, name: &str, mut next: F) -> Result<()>
where
    W: Write,
    F: FnMut() -> std::result::Result<Option<DnsRecord>, ParseError>,
{
    let mut present = false;
    let mut opts = Vec::new();

    while let Some(r) = next()? {
        if r.qtype == QueryType::OPT {
            opts.push(r);
            continue;
        }
        if !present {
            present = true;
            writeln!(out, ";; {} SECTION:", name)?;
        }
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            r.domain,
            r.ttl,
            mnemonics::class(r.class),
            mnemonics::rtype(r.qtype.to_num()),
            format::body(&r.body)
        )?;
    }
    if present {
        writeln!(out)?;
    }

    debug!(section = name, opt_records = opts.len(), "section rendered");
    for r in &opts {
        write_pseudosection(out, r)?;
    }

    Ok(())
}

fn write_pseudosection<W: Write>(out: &mut W, r: &DnsRecord) -> Result<()> {
    writeln!(out, ";; EDNS PSEUDOSECTION:")?;
    writeln!(
        out,
        ";; Version: {}, ext-rcode: {}; udp size: {}",
        r.ttl & 0xf,
        r.ttl >> 8,
        r.class
    )?;
    if let RecordBody::OPT(options) = &r.body {
        for opt in options {
            writeln!(out, ";; {}", format::edns_option(opt))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{DomainName, EdnsOption, ResultCode};
    use std::net::Ipv4Addr;

    fn name(s: &str) -> DomainName {
        DomainName::from_labels(s.split('.').map(String::from).collect())
    }

    fn a(owner: &str, ttl: u32, ip: [u8; 4]) -> DnsRecord {
        DnsRecord {
            domain: name(owner),
            qtype: QueryType::A,
            class: 1,
            ttl,
            body: RecordBody::A(Ipv4Addr::from(ip)),
        }
    }

    fn opt(udp: u16, ttl: u32, options: Vec<EdnsOption>) -> DnsRecord {
        DnsRecord {
            domain: DomainName::root(),
            qtype: QueryType::OPT,
            class: udp,
            ttl,
            body: RecordBody::OPT(options),
        }
    }

    fn section(name: &str, records: Vec<DnsRecord>) -> String {
        let mut out = Vec::new();
        let mut it = records.into_iter();
        write_resource_section(&mut out, name, || Ok(it.next())).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_block() {
        let mut h = DnsHeader::new();
        h.id = 4242;
        h.opcode = 2;
        h.rcode = ResultCode::NXDOMAIN;
        h.rec_des = true;
        h.rec_ava = true;

        let mut out = Vec::new();
        write_header(&mut out, &h).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            ";; opcode: STATUS, status: NAME_ERROR, id: 4242\n;; flags: rd ra\n\n"
        );
    }

    #[test]
    fn header_without_flags() {
        let mut out = Vec::new();
        write_header(&mut out, &DnsHeader::new()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            ";; opcode: QUERY, status: SUCCESS, id: 0\n;; flags: \n\n"
        );
    }

    #[test]
    fn empty_section_prints_nothing() {
        assert_eq!(section("ANSWER", vec![]), "");
    }

    #[test]
    fn ordinary_records_get_header_and_blank_line() {
        let text = section(
            "AUTHORITY",
            vec![a("a.example", 60, [10, 0, 0, 1]), a("b.example", 0, [10, 0, 0, 2])],
        );

        assert_eq!(
            text,
            ";; AUTHORITY SECTION:\n\
             a.example.\t60\tIN\tA\t10.0.0.1\n\
             b.example.\t0\tIN\tA\t10.0.0.2\n\
             \n"
        );
    }

    #[test]
    fn opt_only_section_has_no_section_header() {
        let text = section(
            "ADDITIONAL",
            vec![opt(4096, 0, vec![EdnsOption::new(3, vec![0x41])])],
        );

        assert_eq!(
            text,
            ";; EDNS PSEUDOSECTION:\n\
             ;; Version: 0, ext-rcode: 0; udp size: 4096\n\
             ;; NSID: 41\n"
        );
    }

    #[test]
    fn opt_follows_ordinary_records_wherever_it_sits() {
        let text = section(
            "ADDITIONAL",
            vec![
                opt(1232, 0, vec![]),
                a("ns.example", 300, [192, 0, 2, 53]),
            ],
        );

        assert_eq!(
            text,
            ";; ADDITIONAL SECTION:\n\
             ns.example.\t300\tIN\tA\t192.0.2.53\n\
             \n\
             ;; EDNS PSEUDOSECTION:\n\
             ;; Version: 0, ext-rcode: 0; udp size: 1232\n"
        );
    }

    #[test]
    fn each_opt_record_gets_its_own_block() {
        let text = section(
            "ANSWER",
            vec![
                opt(512, 0x0000_0102, vec![EdnsOption::new(0xC, vec![0; 4])]),
                opt(1400, 0x0001_8000, vec![]),
            ],
        );

        assert_eq!(
            text,
            ";; EDNS PSEUDOSECTION:\n\
             ;; Version: 2, ext-rcode: 1; udp size: 512\n\
             ;; PADDING: 4 B\n\
             ;; EDNS PSEUDOSECTION:\n\
             ;; Version: 0, ext-rcode: 384; udp size: 1400\n"
        );
    }

    #[test]
    fn decode_failure_stops_the_section() {
        let mut out = Vec::new();
        let mut calls = 0;
        let result = write_resource_section(&mut out, "ANSWER", || {
            calls += 1;
            match calls {
                1 => Ok(Some(a("ok.example", 1, [1, 2, 3, 4]))),
                _ => Err(ParseError::UnexpectedEnd(99)),
            }
        });

        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ParseError>(),
            Some(&ParseError::UnexpectedEnd(99))
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ";; ANSWER SECTION:\nok.example.\t1\tIN\tA\t1.2.3.4\n"
        );
    }
}
