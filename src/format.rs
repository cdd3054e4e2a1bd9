//! Numeric presentation helpers shared by rendering collaborators.

/// Formats an integer currency value with thousands grouping and no
/// fractional digits, e.g. `35_000_000` -> `"$35,000,000"`.
pub fn format_currency(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Abbreviated magnitude with at most one fractional digit, e.g. `"1.2M"`.
pub fn format_compact(value: f64) -> String {
    let magnitude = value.abs();
    let (scaled, suffix) = if magnitude >= 1e9 {
        (value / 1e9, "B")
    } else if magnitude >= 1e6 {
        (value / 1e6, "M")
    } else if magnitude >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };

    let text = format!("{scaled:.1}");
    let trimmed = text.strip_suffix(".0").unwrap_or(&text);
    format!("{trimmed}{suffix}")
}

/// Signed percentage with one fractional digit, e.g. `"+10.0%"`.
pub fn format_percent(value: f64) -> String {
    // Keep a tiny negative change from rendering as "-0.0%".
    let normalized = if value.abs() < 0.05 { 0.0 } else { value };
    format!("{normalized:+.1}%")
}
