//! Domain name helpers

/// Remove trailing dots and lowercase.
///
/// `Example.COM.` → `example.com`
pub fn normalize_domain_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_lowercase()
}

/// Decode the `\DDD` octal escapes Route 53 uses in returned names.
///
/// `\052.example.com.` → `*.example.com.`
pub fn decode_escapes(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && i + 3 < bytes.len()
            && bytes[i + 1..=i + 3].iter().all(|b| (b'0'..=b'7').contains(b))
        {
            let value = bytes[i + 1..=i + 3]
                .iter()
                .fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
            if let Ok(byte) = u8::try_from(value) {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Full name to a zone-relative label; the apex becomes `""`.
///
/// `www.example.com` + `example.com` → `www`
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = full_name.trim_end_matches('.');
    let zone = zone_name.trim_end_matches('.');

    if full.eq_ignore_ascii_case(zone) {
        return String::new();
    }
    if full.len() > zone.len() + 1 {
        let split = full.len() - zone.len();
        if full.as_bytes()[split - 1] == b'.' && full[split..].eq_ignore_ascii_case(zone) {
            return full[..split - 1].to_string();
        }
    }
    full.to_string()
}

/// Zone-relative label to a full name (no trailing dot). `""` and `@` are the apex.
///
/// `www` + `example.com` → `www.example.com`
pub fn relative_to_full_name(relative_name: &str, zone_name: &str) -> String {
    let zone = zone_name.trim_end_matches('.');

    if relative_name == "@" || relative_name.is_empty() {
        zone.to_string()
    } else {
        format!("{relative_name}.{zone}")
    }
}
