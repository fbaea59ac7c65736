//! Price and percent formatting for cards and chart labels.

use crate::model::Currency;

/// Precision follows magnitude: six decimals under 0.01, four under 1,
/// otherwise two decimals with thousands separators.
pub fn format_price(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude < 0.01 {
        format!("{value:.6}")
    } else if magnitude < 1.0 {
        format!("{value:.4}")
    } else {
        group_thousands(&format!("{value:.2}"))
    }
}

pub fn format_money(currency: Currency, value: f64) -> String {
    format!("{}{}", currency.symbol(), format_price(value))
}

pub fn format_percent(value: f64) -> String {
    format!("{value:+.2}%")
}

fn group_thousands(digits: &str) -> String {
    let (sign, rest) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let (int, frac) = rest.split_once('.').unwrap_or((rest, ""));

    let mut out = String::with_capacity(digits.len() + int.len() / 3);
    out.push_str(sign);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_tiers() {
        assert_eq!(format_price(0.0001234), "0.000123");
        assert_eq!(format_price(0.5), "0.5000");
        assert_eq!(format_price(1234.5), "1,234.50");
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(format_price(0.01), "0.0100");
        assert_eq!(format_price(1.0), "1.00");
        assert_eq!(format_price(0.0), "0.000000");
    }

    #[test]
    fn groups_large_values() {
        assert_eq!(format_price(65_012.346), "65,012.35");
        assert_eq!(format_price(5_396_024.1), "5,396,024.10");
        assert_eq!(format_price(999.999), "1,000.00");
        assert_eq!(format_price(-1234.5), "-1,234.50");
        assert_eq!(format_price(123.0), "123.00");
    }

    #[test]
    fn money_and_percent() {
        assert_eq!(format_money(Currency::Usd, 65_000.0), "$65,000.00");
        assert_eq!(format_money(Currency::Inr, 0.581), "₹0.5810");
        assert_eq!(format_percent(2.456), "+2.46%");
        assert_eq!(format_percent(-1.2), "-1.20%");
    }
}
