//! Type-specific parameter normalization.
//!
//! Route 53 stores character-string data (TXT, SPF, CAA values) quoted. Every
//! function here is idempotent: an already-quoted value is returned untouched.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::types::RecordType;

/// Longest character-string Route 53 accepts inside one TXT value.
pub const TXT_CHUNK_LEN: usize = 255;

/// Normalize `parameter` for `rr`. Empty parameters (lookup probes) pass through.
pub fn normalize_parameter(rr: RecordType, parameter: &str) -> String {
    let parameter = parameter.trim();
    if parameter.is_empty() {
        return String::new();
    }
    match rr {
        RecordType::Caa => quote_caa(parameter),
        RecordType::Txt | RecordType::Spf => quote_txt(parameter),
        _ => parameter.to_string(),
    }
}

/// Comparison form of `parameter`.
///
/// Route 53 lists hostname targets fully qualified (`target.example.net.`) and
/// addresses as entered, while panel input arrives without the trailing dot.
/// Both sides compare equal once passed through here. Never sent to the API.
pub fn parameter_key(rr: RecordType, parameter: &str) -> String {
    let parameter = parameter.trim();
    match rr {
        RecordType::A => parameter
            .parse::<Ipv4Addr>()
            .map_or_else(|_| parameter.to_string(), |ip| ip.to_string()),
        RecordType::Aaaa => parameter
            .parse::<Ipv6Addr>()
            .map_or_else(|_| parameter.to_string(), |ip| ip.to_string()),
        RecordType::Cname | RecordType::Ptr | RecordType::Ns => host_key(parameter),
        RecordType::Mx | RecordType::Srv => {
            let mut fields: Vec<String> =
                parameter.split_whitespace().map(str::to_string).collect();
            if let Some(target) = fields.last_mut() {
                *target = host_key(target);
            }
            fields.join(" ")
        }
        _ => parameter.to_string(),
    }
}

fn host_key(host: &str) -> String {
    host.trim_end_matches('.').to_ascii_lowercase()
}

/// `0 issue letsencrypt.org.` → `0 issue "letsencrypt.org"`
///
/// Values that do not split into `flags tag data` are returned as given.
pub fn quote_caa(parameter: &str) -> String {
    let mut parts = parameter.splitn(3, char::is_whitespace);
    let (Some(flags), Some(tag), Some(data)) = (parts.next(), parts.next(), parts.next()) else {
        return parameter.to_string();
    };
    let data = data.trim();
    if data.ends_with('"') {
        return parameter.to_string();
    }
    format!("{flags} {tag} \"{}\"", data.trim_end_matches('.'))
}

/// Wrap a TXT/SPF value in quotes, splitting long values into 255-character strings.
///
/// `v=spf1 -all` → `"v=spf1 -all"`
pub fn quote_txt(parameter: &str) -> String {
    if parameter.ends_with('"') {
        return parameter.to_string();
    }
    let chars: Vec<char> = parameter.chars().collect();
    if chars.len() <= TXT_CHUNK_LEN {
        return format!("\"{parameter}\"");
    }
    chars
        .chunks(TXT_CHUNK_LEN)
        .map(|chunk| format!("\"{}\"", chunk.iter().collect::<String>()))
        .collect::<Vec<_>>()
        .join(" ")
}
