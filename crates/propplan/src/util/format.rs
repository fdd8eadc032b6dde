use propplan_core::model::Money;

/// Insert thousands separators into a non-negative whole number
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format an amount with cents, e.g. `-$13,000.00`
pub fn format_currency(value: Money) -> String {
    let cents = value.cents().unsigned_abs();
    let sign = if value.is_negative() { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Format an amount rounded to whole dollars (for tight columns)
pub fn format_currency_short(value: Money) -> String {
    let dollars = value.as_dollars().abs().round() as u64;
    let sign = if value.is_negative() { "-" } else { "" };
    format!("{sign}${}", group_thousands(dollars))
}

/// Format a dollar input in compact form (e.g., $2.1M, $450K, $50)
pub fn format_compact_currency(value: f64) -> String {
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs_value >= 1_000_000.0 {
        format!("{}${:.1}M", sign, abs_value / 1_000_000.0)
    } else if abs_value >= 1_000.0 {
        format!("{}${:.0}K", sign, abs_value / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs_value)
    }
}

/// Format a value that is already a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}
