use chrono::NaiveDate;

/// Round half away from zero to `dec` decimal places.
pub fn round(amt: f64, dec: i32) -> f64 {
    let scaled = amt * 10_f64.powi(dec);
    if amt == 0. {
        0.
    } else if !scaled.is_finite() {
        // this large, an f64 has no fractional digits left
        amt
    } else {
        scaled.round() / 10_f64.powi(dec)
    }
}

/// Money as shown to the borrower: two decimals, `,` between thousands.
pub fn format_amount(amt: f64) -> String {
    let rounded = round(amt, 2);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.004 rounds to zero and must not print a sign
    let sign = if rounded < 0. { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Due dates are shown day first: `DD/MM/YYYY`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
