//! Value formatting shared by tables and detail views.

use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

const EMPTY_CELL: &str = "-";

/// Two-decimal amount with thousands separators, e.g. `12,345.50`.
pub fn amount(value: f64) -> String {
    if !value.is_finite() {
        return EMPTY_CELL.to_string();
    }
    let rendered = format!("{:.2}", value.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && rendered != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

pub fn count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn timestamp(value: Option<OffsetDateTime>) -> String {
    value
        .and_then(|ts| ts.format(TIMESTAMP_FORMAT).ok())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

pub fn optional(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}

/// Shorten to `width` characters, marking the cut with `…`.
pub fn truncate(value: &str, width: usize) -> String {
    let value = value.trim();
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept: String = value.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(amount(0.0), "0.00");
        assert_eq!(amount(999.5), "999.50");
        assert_eq!(amount(1234567.891), "1,234,567.89");
        assert_eq!(amount(-1500.0), "-1,500.00");
        assert_eq!(amount(f64::NAN), "-");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(count(7), "7");
        assert_eq!(count(12_000), "12,000");
    }

    #[test]
    fn timestamps_and_placeholders() {
        assert_eq!(timestamp(Some(datetime!(2025-03-04 05:06 UTC))), "2025-03-04 05:06");
        assert_eq!(timestamp(None), "-");
        assert_eq!(optional(Some("  ")), "-");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
