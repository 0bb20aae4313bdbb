//! Numeric protocol codes to the labels the report prints.

use std::borrow::Cow;

use crate::structure::{DnsHeader, ResultCode};

pub fn opcode(op: u8) -> Cow<'static, str> {
    match op {
        0 => "QUERY".into(),
        1 => "IQUERY".into(),
        2 => "STATUS".into(),
        n => n.to_string().into(),
    }
}

pub fn rcode(rc: ResultCode) -> Cow<'static, str> {
    match rc {
        ResultCode::NOERROR => "SUCCESS".into(),
        ResultCode::FORMERR => "FORMAT_ERROR".into(),
        ResultCode::SERVFAIL => "SERVER_FAILURE".into(),
        ResultCode::NXDOMAIN => "NAME_ERROR".into(),
        ResultCode::NOTIMP => "NOT_IMPLEMENTED".into(),
        ResultCode::REFUSED => "REFUSED".into(),
        other => other.to_string().into(),
    }
}

/// Set flags in aa, tr, rd, ra order. QR and the DNSSEC bits are not shown.
pub fn flags(h: &DnsHeader) -> Vec<&'static str> {
    [
        (h.auth_ans, "aa"),
        (h.trunc_msg, "tr"),
        (h.rec_des, "rd"),
        (h.rec_ava, "ra"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect()
}

pub fn class(c: u16) -> &'static str {
    match c {
        1 => "IN",
        2 => "CS",
        3 => "CH",
        4 => "HESIOD",
        255 => "ANY",
        _ => "?",
    }
}

pub fn rtype(t: u16) -> Cow<'static, str> {
    let name = match t {
        1 => "A",
        2 => "NS",
        5 => "CNAME",
        6 => "SOA",
        11 => "WKS",
        12 => "PTR",
        13 => "HINFO",
        14 => "MINFO",
        15 => "MX",
        16 => "TXT",
        28 => "AAAA",
        33 => "SRV",
        41 => "OPT",
        252 => "AXFR",
        255 => "ALL",
        n => return n.to_string().into(),
    };
    name.into()
}
