#![allow(clippy::upper_case_acronyms)]
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use tracing::trace;

use crate::byte_packet_buffer::BytePacketBuffer;
use crate::error::ParseError;

type Result<T> = std::result::Result<T, ParseError>;

/// A domain name as a list of labels, printed in absolute form (`example.com.`).
#[derive(PartialEq, Eq, Debug, Clone, Hash, Default)]
pub struct DomainName {
    labels: Vec<String>,
}

impl DomainName {
    pub fn from_labels(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn root() -> Self {
        Self::default()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        for label in &self.labels {
            write!(f, "{}.", label)?;
        }
        Ok(())
    }
}

/// Header response codes. Only the six base codes are named; everything
/// else is carried and printed as its number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResultCode {
    NOERROR,
    FORMERR,
    SERVFAIL,
    NXDOMAIN,
    NOTIMP,
    REFUSED,
    UNKNOWN(u8),
}

impl ResultCode {
    pub fn from_num(n: u8) -> Self {
        match n {
            0 => ResultCode::NOERROR,
            1 => ResultCode::FORMERR,
            2 => ResultCode::SERVFAIL,
            3 => ResultCode::NXDOMAIN,
            4 => ResultCode::NOTIMP,
            5 => ResultCode::REFUSED,
            _ => ResultCode::UNKNOWN(n),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultCode::UNKNOWN(n) => write!(f, "{}", n),
            known => fmt::Debug::fmt(known, f),
        }
    }
}

// header structure
// 86 2a 01 20 00 01 00 00 00 00 00 00
// 86 2a is the id, 01 20 the flags from query_res to rcode,
// then the four u16 section counts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DnsHeader {
    pub id: u16,
    pub query_res: bool,
    pub opcode: u8, // low nibble only
    pub auth_ans: bool,
    pub trunc_msg: bool,
    pub rec_des: bool,
    pub rec_ava: bool,
    pub z: bool,
    pub authed_data: bool,
    pub checking_disabled: bool,
    pub rcode: ResultCode,
    pub qdcount: u16,
    pub anscount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl DnsHeader {
    pub const SIZE: usize = 12;

    pub fn new() -> Self {
        Self {
            id: 0,
            query_res: false,
            opcode: 0,
            auth_ans: false,
            trunc_msg: false,
            rec_des: false,
            rec_ava: false,
            z: false,
            authed_data: false,
            checking_disabled: false,
            rcode: ResultCode::NOERROR,
            qdcount: 0,
            anscount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    pub fn read(&mut self, buf: &mut BytePacketBuffer<'_>) -> Result<()> {
        self.id = buf.read_u16()?;

        // Q  OPCODE  A T R   R Z A C  RCODE
        // R          A C D   A   D D
        let a = buf.read()?;
        let b = buf.read()?;

        self.query_res = (a & 0x80) != 0;
        self.opcode = (a & 0x78) >> 3;
        self.auth_ans = (a & 0x4) != 0;
        self.trunc_msg = (a & 0x2) != 0;
        self.rec_des = (a & 0x1) != 0;

        self.rec_ava = (b & 0x80) != 0;
        self.z = (b & 0x40) != 0;
        self.authed_data = (b & 0x20) != 0;
        self.checking_disabled = (b & 0x10) != 0;
        self.rcode = ResultCode::from_num(b & 0xF);

        self.qdcount = buf.read_u16()?;
        self.anscount = buf.read_u16()?;
        self.nscount = buf.read_u16()?;
        self.arcount = buf.read_u16()?;

        Ok(())
    }
}

/// Record types whose bodies are decoded; everything else stays raw.
#[derive(PartialEq, Eq, Debug, Clone, Hash, Copy)]
pub enum QueryType {
    UNKNOWN(u16),
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    MX,
    TXT,
    AAAA,
    SRV,
    OPT,
}

impl QueryType {
    pub fn from_num(num: u16) -> QueryType {
        match num {
            1 => QueryType::A,
            2 => QueryType::NS,
            5 => QueryType::CNAME,
            6 => QueryType::SOA,
            12 => QueryType::PTR,
            15 => QueryType::MX,
            16 => QueryType::TXT,
            28 => QueryType::AAAA,
            33 => QueryType::SRV,
            41 => QueryType::OPT,
            _ => QueryType::UNKNOWN(num),
        }
    }

    pub fn to_num(self) -> u16 {
        match self {
            QueryType::A => 1,
            QueryType::NS => 2,
            QueryType::CNAME => 5,
            QueryType::SOA => 6,
            QueryType::PTR => 12,
            QueryType::MX => 15,
            QueryType::TXT => 16,
            QueryType::AAAA => 28,
            QueryType::SRV => 33,
            QueryType::OPT => 41,
            QueryType::UNKNOWN(num) => num,
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct DnsQuestion {
    pub name: DomainName,
    pub qtype: QueryType,
    pub class: u16,
}

impl DnsQuestion {
    pub fn new() -> Self {
        Self {
            name: DomainName::root(),
            qtype: QueryType::UNKNOWN(0),
            class: 1,
        }
    }

    pub fn read(&mut self, buffer: &mut BytePacketBuffer<'_>) -> Result<()> {
        self.name = buffer.read_qname()?;
        self.qtype = QueryType::from_num(buffer.read_u16()?);
        self.class = buffer.read_u16()?;

        Ok(())
    }
}

/// One (code, payload) pair carried by an OPT record.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct EdnsOption {
    pub code: u16,
    pub data: Vec<u8>,
}

impl EdnsOption {
    pub fn new(code: u16, data: Vec<u8>) -> Self {
        Self { code, data }
    }
}

/// Type-specific payload of a resource record. The variant always agrees
/// with the record's `QueryType`.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub enum RecordBody {
    A(Ipv4Addr),
    NS(DomainName),
    CNAME(DomainName),
    SOA {
        ns: DomainName,
        mbox: DomainName,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        min_ttl: u32,
    },
    PTR(DomainName),
    MX {
        pref: u16,
        mx: DomainName,
    },
    TXT(Vec<String>),
    AAAA(Ipv6Addr),
    SRV {
        priority: u16,
        weight: u16,
        port: u16,
        target: DomainName,
    },
    OPT(Vec<EdnsOption>),
    UNKNOWN {
        rtype: u16,
        data: Vec<u8>,
    },
}

impl RecordBody {
    /// Decodes a body occupying `buf.pos()..end`.
    fn read(buf: &mut BytePacketBuffer<'_>, qtype: QueryType, end: usize) -> Result<Self> {
        let body = match qtype {
            QueryType::A => {
                let raw = buf.read_range(4)?;
                RecordBody::A(Ipv4Addr::new(raw[0], raw[1], raw[2], raw[3]))
            }
            QueryType::NS => RecordBody::NS(buf.read_qname()?),
            QueryType::CNAME => RecordBody::CNAME(buf.read_qname()?),
            QueryType::SOA => RecordBody::SOA {
                ns: buf.read_qname()?,
                mbox: buf.read_qname()?,
                serial: buf.read_u32()?,
                refresh: buf.read_u32()?,
                retry: buf.read_u32()?,
                expire: buf.read_u32()?,
                min_ttl: buf.read_u32()?,
            },
            QueryType::PTR => RecordBody::PTR(buf.read_qname()?),
            QueryType::MX => RecordBody::MX {
                pref: buf.read_u16()?,
                mx: buf.read_qname()?,
            },
            QueryType::TXT => {
                let mut txt = Vec::new();
                while buf.pos() < end {
                    let len = buf.read()? as usize;
                    let raw = buf.read_range(len)?;
                    txt.push(String::from_utf8_lossy(raw).into_owned());
                }
                RecordBody::TXT(txt)
            }
            QueryType::AAAA => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(buf.read_range(16)?);
                RecordBody::AAAA(Ipv6Addr::from(octets))
            }
            QueryType::SRV => RecordBody::SRV {
                priority: buf.read_u16()?,
                weight: buf.read_u16()?,
                port: buf.read_u16()?,
                target: buf.read_qname()?,
            },
            QueryType::OPT => {
                let mut options = Vec::new();
                while buf.pos() < end {
                    let code = buf.read_u16()?;
                    let len = buf.read_u16()? as usize;
                    if buf.pos() + len > end {
                        return Err(ParseError::OptionOverrun(code));
                    }
                    options.push(EdnsOption::new(code, buf.read_range(len)?.to_vec()));
                }
                RecordBody::OPT(options)
            }
            QueryType::UNKNOWN(rtype) => RecordBody::UNKNOWN {
                rtype,
                data: buf.read_range(end - buf.pos())?.to_vec(),
            },
        };

        Ok(body)
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct DnsRecord {
    pub domain: DomainName,
    pub qtype: QueryType,
    pub class: u16,
    pub ttl: u32,
    pub body: RecordBody,
}

impl DnsRecord {
    pub fn from(buf: &mut BytePacketBuffer<'_>) -> Result<Self> {
        let domain = buf.read_qname()?;

        let qtype = QueryType::from_num(buf.read_u16()?);
        let class = buf.read_u16()?;
        let ttl = buf.read_u32()?;
        let len = buf.read_u16()?;

        if buf.remaining() < len as usize {
            return Err(ParseError::UnexpectedEnd(buf.pos() + buf.remaining()));
        }
        let end = buf.pos() + len as usize;

        let body = RecordBody::read(buf, qtype, end)?;
        if buf.pos() != end {
            return Err(ParseError::BadRdLength {
                rtype: qtype.to_num(),
                rdlength: len,
            });
        }
        trace!(%domain, rtype = qtype.to_num(), class, ttl, "decoded record");

        Ok(DnsRecord {
            domain,
            qtype,
            class,
            ttl,
            body,
        })
    }
}
