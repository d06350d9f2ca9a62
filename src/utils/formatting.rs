//! Formatting utilities used for CLI and export outputs.

/// Insert thousands separators into the integer part of a number string.
fn group_thousands(int_part: &str) -> String {
    let mut out = String::new();
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234.5` → `$1,234.50`, negatives as `-$12.00`.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    format!("{sign}{symbol}{}.{dec_part}", group_thousands(int_part))
}

/// `12345.5` → `12,345.5` (at most two decimals, trailing zeros trimmed).
pub fn format_number(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let dec = dec_part.trim_end_matches('0');
    if dec.is_empty() {
        format!("{sign}{}", group_thousands(int_part))
    } else {
        format!("{sign}{}.{dec}", group_thousands(int_part))
    }
}

/// Display name "First L." used in greetings.
pub fn format_user_greeting(first_name: &str, last_name: &str) -> String {
    let (first, last) = (first_name.trim(), last_name.trim());
    match last.chars().next() {
        Some(initial) if !first.is_empty() => {
            format!("{first} {}.", initial.to_uppercase())
        }
        _ => "User".to_string(),
    }
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_and_numbers() {
        assert_eq!(format_currency(1234.5, "$"), "$1,234.50");
        assert_eq!(format_currency(-12.0, "$"), "-$12.00");
        assert_eq!(format_currency(0.0, "€"), "€0.00");
        assert_eq!(format_number(12345.5), "12,345.5");
        assert_eq!(format_number(100.0), "100");
    }

    #[test]
    fn greeting() {
        assert_eq!(format_user_greeting("Ana", "lopez"), "Ana L.");
        assert_eq!(format_user_greeting("", "Lopez"), "User");
    }
}
