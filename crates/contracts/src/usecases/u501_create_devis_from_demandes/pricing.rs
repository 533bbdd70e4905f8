//! HT/TTC pricing of quote lines
//!
//! Amounts are plain `f64`. Rounding happens once, on the order aggregate,
//! to the 3-decimal minor unit used across the system.

use super::lines::QuoteLine;
use crate::domain::a002_article::ArticleCatalog;

/// FODEC levy rate applied to the tax-excluded order total
pub const FODEC_RATE: f64 = 0.01;

/// Default VAT rate for a freshly seeded line, in percent
pub const DEFAULT_VAT_PERCENT: f64 = 19.0;

/// Tax-excluded amount of one line: `max(0, pu * qty * (1 - discount/100))`
pub fn line_ht(unit_price: f64, quantity: u32, discount_percent: f64) -> f64 {
    let amount = unit_price * f64::from(quantity) * (1.0 - discount_percent / 100.0);
    // NaN also lands on 0 here
    if amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Tax-included amount of one line, from its HT amount
pub fn line_ttc(line_ht: f64, vat_percent: f64) -> f64 {
    line_ht * (1.0 + vat_percent / 100.0)
}

/// Per-line amounts, unrounded
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineAmounts {
    pub unit_price: f64,
    pub ht: f64,
    pub ttc: f64,
}

impl LineAmounts {
    pub fn of(line: &QuoteLine, catalog: &ArticleCatalog) -> Self {
        let unit_price = catalog.unit_price(&line.article_id);
        let ht = line_ht(unit_price, line.quantity, line.discount_percent);
        Self {
            unit_price,
            ht,
            ttc: line_ttc(ht, line.vat_percent),
        }
    }
}

/// Order aggregate, rounded to 3 decimals
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrderTotals {
    pub total_ht: f64,
    pub fodec: f64,
    pub total_ttc: f64,
}

impl OrderTotals {
    /// Aggregates raw line sums into rounded totals
    pub fn from_sums(sum_ht: f64, sum_ttc: f64) -> Self {
        let fodec = round3(sum_ht * FODEC_RATE);
        Self {
            total_ht: round3(sum_ht),
            fodec,
            total_ttc: round3(sum_ttc + fodec),
        }
    }
}

/// Computes the order totals for a set of lines against the loaded catalog.
///
/// Pure: same lines and catalog always give the same totals. Never fails;
/// lines pointing at unknown articles contribute 0.
pub fn compute_totals<'a, I>(lines: I, catalog: &ArticleCatalog) -> OrderTotals
where
    I: IntoIterator<Item = &'a QuoteLine>,
{
    let (sum_ht, sum_ttc) = lines
        .into_iter()
        .map(|l| LineAmounts::of(l, catalog))
        .fold((0.0, 0.0), |(ht, ttc), a| (ht + a.ht, ttc + a.ttc));
    OrderTotals::from_sums(sum_ht, sum_ttc)
}

/// Rounds to 3 decimals the way the backend and the printed quotes do:
/// the nearest 3-decimal value of the exact binary number, exact ties away
/// from zero.
pub fn round3(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let magnitude = value.abs();
    let exact = format!("{:.60}", magnitude);
    let rounded = match exact.split_once('.') {
        Some((int_part, frac)) if is_exact_tie(frac) => {
            // bump the third decimal, carrying through the integer part
            let truncated: f64 = format!("{}.{}", int_part, &frac[..3])
                .parse()
                .unwrap_or(magnitude);
            round_half_up_string(truncated)
        }
        _ => format!("{:.3}", magnitude).parse().unwrap_or(magnitude),
    };
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

/// "xyz5000…0": the digits after the third decimal are exactly one half
fn is_exact_tie(frac: &str) -> bool {
    let tail = frac.get(3..).unwrap_or("");
    let mut chars = tail.chars();
    chars.next() == Some('5') && chars.all(|c| c == '0')
}

fn round_half_up_string(truncated: f64) -> f64 {
    let thousandths = (truncated * 1000.0).round() + 1.0;
    format!("{:.3}", thousandths / 1000.0)
        .parse()
        .unwrap_or(truncated)
}
