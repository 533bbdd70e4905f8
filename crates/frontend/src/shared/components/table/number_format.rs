//! Number formatting for amount cells and totals

use contracts::usecases::u501_create_devis_from_demandes::round3;

/// Formats a number with a space as thousands separator and `decimals` digits
///
/// ```ignore
/// let formatted = format_number_with_decimals(1234.567, 2);
/// assert_eq!(formatted, "1 234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Money amount in the 3-decimal minor unit, e.g. "1 234.500"
///
/// The value is rounded like the order totals first, so a cell and the
/// total it feeds never disagree on the last digit.
pub fn format_amount(value: f64) -> String {
    let rounded = round3(value);
    // avoid "-0.000"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format_number_with_decimals(rounded, 3)
}
