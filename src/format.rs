use std::net::{Ipv4Addr, Ipv6Addr};

use crate::structure::{EdnsOption, RecordBody};

/// One-line text of a record body.
pub fn body(b: &RecordBody) -> String {
    match b {
        RecordBody::A(ip) => ip.to_string(),
        RecordBody::NS(ns) => ns.to_string(),
        RecordBody::CNAME(cname) => cname.to_string(),
        RecordBody::SOA {
            ns,
            mbox,
            serial,
            refresh,
            retry,
            expire,
            min_ttl,
        } => format!(
            "{} {} {} {} {} {} {}",
            ns, mbox, serial, refresh, retry, expire, min_ttl
        ),
        RecordBody::PTR(ptr) => ptr.to_string(),
        RecordBody::MX { pref, mx } => format!("{} {}", pref, mx),
        RecordBody::TXT(txt) => txt.join(" "),
        RecordBody::AAAA(ip) => ip_literal(&ip.octets()),
        RecordBody::SRV {
            priority,
            weight,
            port,
            target,
        } => format!("{} {} {} {}", priority, weight, port, target),
        other => format!("{:?}", other),
    }
}

/// Text of one EDNS option as it appears after the `;; ` prefix.
pub fn edns_option(opt: &EdnsOption) -> String {
    let data = opt.data.as_slice();
    match opt.code {
        // long lived queries
        0x1 => "LLQ".into(),
        // update lease
        0x2 => "UL".into(),
        0x3 => format!("NSID: {}", hex::encode(data)),
        0x5 => "DAU".into(),
        0x6 => "DHU".into(),
        0x7 => "N3U".into(),
        // client subnet, RFC 7871. the address is taken as-is, with no
        // family check and no padding to a full address.
        0x8 => {
            if data.len() < 8 {
                return "SUBNET (invalid)".into();
            }
            let source = data[2];
            let scope = data[3];
            format!("SUBNET: {}/{}/{}", ip_literal(&data[4..]), source, scope)
        }
        0x9 => {
            let expire = match data {
                [a, b, c, d] => u32::from_be_bytes([*a, *b, *c, *d]),
                _ => 0,
            };
            format!("EXPIRE: {}ms", expire)
        }
        0xA => {
            let (client, server) = if data.len() >= 8 {
                data.split_at(8)
            } else {
                (&data[..0], &data[..0])
            };
            format!("COOKIE: {} {}", hex::encode(client), hex::encode(server))
        }
        // tcp keepalive, RFC 7828. units of 100ms, multiplied in 8 bits
        0xB => {
            let timeout = match data {
                [t] => t.wrapping_mul(100),
                _ => 0,
            };
            format!("TCPKEEPALIVE: {}ms", timeout)
        }
        0xC => format!("PADDING: {} B", data.len()),
        // local/experimental range, RFC 6891
        0xFDE9 => "LOCALSTART".into(),
        0xFFFE => "LOCALEND".into(),
        code => format!("{}\t {}", code, byte_list(data)),
    }
}

// decimal bytes, space separated, in brackets: `[0 1 255]`
fn byte_list(data: &[u8]) -> String {
    let bytes: Vec<String> = data.iter().map(|b| b.to_string()).collect();
    format!("[{}]", bytes.join(" "))
}

/// Renders raw address bytes. Lengths other than 4 or 16 still produce
/// text: `<nil>` when empty, `?` and hex otherwise.
pub fn ip_literal(bytes: &[u8]) -> String {
    match bytes.len() {
        0 => "<nil>".into(),
        4 => Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]).to_string(),
        16 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(bytes);
            let ip = Ipv6Addr::from(octets);
            match ip.to_ipv4_mapped() {
                Some(v4) => v4.to_string(),
                None => ip.to_string(),
            }
        }
        _ => format!("?{}", hex::encode(bytes)),
    }
}
