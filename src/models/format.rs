use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Formats an amount the way the dashboard shows money: `€1 234,50`.
pub fn format_euros(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) =
        text.split_once('.').unwrap_or((text.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*c);
    }

    format!("{sign}€{grouped},{frac_part}")
}

pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}
