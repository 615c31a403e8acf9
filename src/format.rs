//! Money, count, and percentage formatting for table output.

/// Group digits with commas: 1234567 -> "1,234,567"
pub fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Whole-dollar money for table cells: "$12,340"
pub fn format_money(value: f64) -> String {
    format!("${}", format_grouped_int(value.round() as i64))
}

/// Money with cents and thousands separators: "$12,340.25"
pub fn format_amount(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let parts: Vec<&str> = rounded.split('.').collect();
    let grouped = format_grouped_int(parts[0].parse::<i64>().unwrap_or(0));
    let sign = if value < -0.005 { "-" } else { "" };
    format!("{sign}${grouped}.{}", parts[1])
}

/// Percentage with one decimal: "42.5%"
pub fn format_pct(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping() {
        assert_eq!(format_grouped_int(0), "0");
        assert_eq!(format_grouped_int(999), "999");
        assert_eq!(format_grouped_int(1_234_567), "1,234,567");
        assert_eq!(format_grouped_int(-45_000), "-45,000");
    }

    #[test]
    fn money_rounds_to_whole() {
        assert_eq!(format_money(1249.6), "$1,250");
    }

    #[test]
    fn amount_keeps_cents() {
        assert_eq!(format_amount(1234.5), "$1,234.50");
        assert_eq!(format_amount(-12.345), "-$12.35");
        assert_eq!(format_amount(0.0), "$0.00");
    }

    #[test]
    fn pct_one_decimal() {
        assert_eq!(format_pct(33.333), "33.3%");
        assert_eq!(format_pct(0.0), "0.0%");
    }
}
