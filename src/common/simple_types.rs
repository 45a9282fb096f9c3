use std::fmt;
use std::iter::Sum;

/// A `YYYY-MM-DD` date as the form's date input produces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderDate {
    value: String,
}

impl OrderDate {
    pub fn new(date: impl Into<String>) -> Self {
        Self { value: date.into() }
    }

    /// The `YYYYMMDD` form the intake API expects. The input is already
    /// constrained to `YYYY-MM-DD`, so no calendar validation happens here.
    pub fn to_wire(&self) -> String {
        self.value.replace('-', "")
    }
}

/// Locally generated order reference, shown as an 8-digit zero-padded number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceNumber {
    value: u64,
}

impl ReferenceNumber {
    pub fn new(value: u64) -> Self {
        Self { value }
    }
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.value)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Price {
    value: f64,
}

impl Price {
    pub fn value(&self) -> f64 {
        self.value
    }
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Parses the number a free-text amount starts with, so `"12 pcs"` is 12.
    /// Text that doesn't start with a number becomes NaN, which then renders
    /// as `NaN` in totals.
    pub fn parse(text: &str) -> Self {
        Self::new(leading_number(text).unwrap_or(f64::NAN))
    }

    pub fn times(self, quantity: Price) -> Price {
        Price::new(self.value * quantity.value)
    }
}

/// Longest prefix of `text` (after leading whitespace) that reads as a decimal
/// number with an optional sign, fraction and exponent.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits = |from: usize| {
        bytes
            .get(from..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse().ok();
    }

    let whole = digits(end);
    end += whole;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits(end + 1);
        end += 1 + fraction;
    }
    if whole + fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_at = end + 1;
        if matches!(bytes.get(exponent_at), Some(b'+' | b'-')) {
            exponent_at += 1;
        }
        let exponent = digits(exponent_at);
        if exponent > 0 {
            end = exponent_at + exponent;
        }
    }
    text[..end].parse().ok()
}

impl std::ops::Add for Price {
    type Output = Price;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value + rhs.value,
        }
    }
}

impl Sum<Self> for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::new(0.), |a, b| a + b)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BillingAmount {
    value: Price,
}

impl BillingAmount {
    pub fn value(&self) -> Price {
        self.value
    }
    pub fn sum_prices(prices: impl Iterator<Item = Price>) -> BillingAmount {
        let sum = prices.sum();
        Self { value: sum }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_dashes_from_order_date() {
        assert_eq!(OrderDate::new("2024-03-05").to_wire(), "20240305");
    }

    #[test]
    fn reference_number_is_zero_padded() {
        assert_eq!(ReferenceNumber::new(3444).to_string(), "00003444");
        assert_eq!(ReferenceNumber::new(123456789).to_string(), "123456789");
    }

    #[test]
    fn sums_line_totals_to_two_decimals() {
        let lines = [("450", "180.74"), ("670", "101.17")];
        let amount = BillingAmount::sum_prices(
            lines
                .iter()
                .map(|(qty, price)| Price::parse(price).times(Price::parse(qty))),
        );
        assert_eq!(amount.value().to_string(), "149116.90");
    }

    #[test]
    fn amounts_are_read_up_to_the_first_non_numeric_character() {
        assert_eq!(Price::parse("12 pcs").value(), 12.);
        assert_eq!(Price::parse("  180.74").value(), 180.74);
        assert_eq!(Price::parse("-1.5kg").value(), -1.5);
        assert_eq!(Price::parse(".5").value(), 0.5);
        assert_eq!(Price::parse("5.").value(), 5.);
        assert_eq!(Price::parse("3.5e2x").value(), 350.);
        assert_eq!(Price::parse("2e").value(), 2.);
        assert_eq!(Price::parse("1,000").value(), 1.);
        assert_eq!(Price::parse("Infinity").value(), f64::INFINITY);
        assert!(Price::parse("").value().is_nan());
        assert!(Price::parse("-").value().is_nan());
        assert!(Price::parse(".e5").value().is_nan());
        assert!(Price::parse("$12").value().is_nan());
    }

    #[test]
    fn unparsable_amount_renders_nan() {
        assert_eq!(Price::parse("ten").times(Price::new(2.)).to_string(), "NaN");
    }
}
