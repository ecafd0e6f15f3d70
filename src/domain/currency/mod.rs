//! Indian-notation currency and BHK normalization.
//!
//! Spreadsheet rows and user messages carry prices as free text:
//! "1.5cr", "80L", "₹45,00,000". Everything is normalized to a plain
//! rupee integer at the edge so the rest of the domain deals only with
//! typed amounts.

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

/// Parses a free-text amount into whole rupees.
///
/// Rules, checked in order:
/// 1. contains "cr" - remainder parsed as float, times one crore
/// 2. contains "l" / "lakh" / "lac" - remainder parsed as float, times one lakh
/// 3. otherwise - thousands separators stripped, parsed as float
///
/// The result is truncated to an integer. Any parse failure yields 0,
/// which callers treat as "invalid amount"; this function never errors.
///
/// Known imprecision: a literal letter "l" inside other words is read as
/// the lakh marker. Accepted, since budget messages are short numeric
/// strings in practice.
pub fn parse_amount(text: &str) -> i64 {
    let normalized = text
        .trim()
        .to_lowercase()
        .replace('₹', "")
        .replace(' ', "");

    if normalized.contains("cr") {
        let number = strip_tokens(&normalized, &["crores", "crore", "crs", "cr"]);
        scaled(&number, CRORE)
    } else if normalized.contains('l') {
        let number = strip_tokens(&normalized, &["lakhs", "lakh", "lacs", "lac", "l"]);
        scaled(&number, LAKH)
    } else {
        scaled(&normalized.replace(',', ""), 1.0)
    }
}

fn strip_tokens(text: &str, tokens: &[&str]) -> String {
    let mut out = text.to_string();
    for token in tokens {
        out = out.replace(token, "");
    }
    out.replace(',', "")
}

fn scaled(number: &str, factor: f64) -> i64 {
    match number.trim().parse::<f64>() {
        Ok(value) => (value * factor) as i64,
        Err(_) => 0,
    }
}

/// Parses a BHK column value ("3BHK", "3 bhk", "3") into a room count.
///
/// Returns 0 on anything non-numeric, matching the amount policy.
pub fn parse_bhk(text: &str) -> u32 {
    text.trim()
        .to_lowercase()
        .replace("bhk", "")
        .trim()
        .parse::<u32>()
        .unwrap_or(0)
}

/// Formats whole rupees back into display notation.
///
/// Amounts at or above one crore render as "₹x Cr", above one lakh as
/// "₹x L", smaller amounts with Indian digit grouping. Done once at
/// catalog load time; downstream code only ever shows the result.
pub fn format_inr(amount: i64) -> String {
    if amount < 0 {
        return format!("-{}", format_inr(-amount));
    }
    let amount_f = amount as f64;
    if amount_f >= CRORE {
        format!("₹{} Cr", trim_decimal(amount_f / CRORE))
    } else if amount_f >= LAKH {
        format!("₹{} L", trim_decimal(amount_f / LAKH))
    } else {
        format!("₹{}", group_indian(amount))
    }
}

fn trim_decimal(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

// Indian grouping: last three digits, then pairs ("4500000" -> "45,00,000").
fn group_indian(amount: i64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let head_bytes = head.as_bytes();
    let mut i = head_bytes.len();
    while i > 0 {
        let start = i.saturating_sub(2);
        groups.push(&head[start..i]);
        i = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
