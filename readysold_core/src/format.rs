//! en-GB number and currency formatting

/// Largest magnitude an `f64` holds with every whole unit exact (2^53 - 1).
pub const MAX_EXACT_AMOUNT: f64 = 9_007_199_254_740_991.0;

/// `1234567` -> `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Whole pounds, rounded half away from zero: `12500.4` -> `£12,500`.
pub fn format_gbp(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    if rounded < 0.0 {
        format!("-£{}", group_digits(&digits))
    } else {
        format!("£{}", group_digits(&digits))
    }
}

/// Groups a number typed as free text, keeping up to three decimals; `None` if it is not numeric
/// or too large to show exactly.
pub fn format_numeric_text(text: &str) -> Option<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    let value: f64 = cleaned
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite() && (v * 1000.0).abs() <= MAX_EXACT_AMOUNT)?;

    let scaled = (value * 1000.0).round() as i64;
    let whole = group_thousands(scaled / 1000);
    let fraction = (scaled % 1000).unsigned_abs();

    if fraction == 0 {
        Some(whole)
    } else {
        let sign = if scaled < 0 && scaled / 1000 == 0 { "-" } else { "" };
        let digits = format!("{:03}", fraction);
        Some(format!("{}{}.{}", sign, whole, digits.trim_end_matches('0')))
    }
}
