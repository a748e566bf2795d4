/// Minor units to the gateway's decimal string, e.g. `19900` to `"199.00"`.
pub fn format_amount(minor_units: i64) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Inverse of [`format_amount`]. Accepts `"199"`, `"199.5"` and `"199.00"`.
pub fn parse_amount(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (major, minor) = match raw.split_once('.') {
        Some((major, minor)) => (major, minor),
        None => (raw, ""),
    };
    if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if minor.len() > 2 || !minor.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let major: i64 = major.parse().ok()?;
    let minor: i64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<i64>().ok()? * 10,
        _ => minor.parse().ok()?,
    };
    major.checked_mul(100)?.checked_add(minor)
}
