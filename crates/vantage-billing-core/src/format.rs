//! Currency and date formatting helpers

use chrono::{DateTime, Utc};

/// Format cents as a USD amount with grouped thousands, e.g. `$1,234.56`
pub fn format_usd(cents: i64) -> String {
    format_usd_inner(cents, true)
}

/// Format cents as a whole-dollar USD amount, e.g. `$1,235`
///
/// Used for the credit balance, which the backend only grants in whole
/// dollars. Rounds half away from zero.
pub fn format_usd_whole(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let dollars = (cents.abs() + 50) / 100;
    format!("{sign}${}", group_thousands(dollars))
}

fn format_usd_inner(cents: i64, with_cents: bool) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    let dollars = abs / 100;
    let remainder = abs % 100;
    if with_cents {
        format!("{sign}${}.{remainder:02}", group_thousands(dollars))
    } else {
        format!("{sign}${}", group_thousands(dollars))
    }
}

/// Insert comma separators into a non-negative integer
fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a timestamp as a long date, e.g. `August 24, 2026`
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y").to_string()
}

/// Capitalize the first letter and replace underscores with spaces,
/// e.g. `paid` -> `Paid`, `platform_and_support` -> `Platform and support`
pub fn to_sentence_case(s: &str) -> String {
    let spaced = s.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
