//! Formatting of landing values.

/// Placeholder for an unknown price.
pub(crate) const PRICE_ON_REQUEST: &str = "Цена по запросу";

/// Placeholder for any other unknown value.
pub(crate) const ON_REQUEST: &str = "По запросу";

/// Formats a starting price, like `от 12 500 000 ₽`.
pub(crate) fn price_from(price: f64) -> String {
    format!("от {} ₽", group_digits(&format!("{:.0}", price.abs())))
}

/// Formats a starting area, like `от 35,5 м²`.
pub(crate) fn area_from(area: f64) -> String {
    format!("от {} м²", decimal(area))
}

/// Formats a distance, like `4,2 км`.
pub(crate) fn distance(km: f64) -> String {
    format!("{km:.1} км").replace('.', ",")
}

/// Formats a number with at most one decimal digit and a comma separator,
/// dropping a zero fraction.
pub(crate) fn decimal(n: f64) -> String {
    let formatted = format!("{n:.1}");
    formatted
        .strip_suffix(".0")
        .unwrap_or(&formatted)
        .replace('.', ",")
}

/// Separates thousands in the provided string of digits with spaces.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod spec {
    use super::{area_from, decimal, distance, price_from};

    #[test]
    fn formats_prices() {
        assert_eq!(price_from(5_000_000.0), "от 5 000 000 ₽");
        assert_eq!(price_from(12_499_999.6), "от 12 500 000 ₽");
        assert_eq!(price_from(950.0), "от 950 ₽");
    }

    #[test]
    fn formats_areas_and_distances() {
        assert_eq!(area_from(35.54), "от 35,5 м²");
        assert_eq!(area_from(40.0), "от 40 м²");
        assert_eq!(decimal(25.0), "25");
        assert_eq!(distance(4.24), "4,2 км");
        assert_eq!(distance(0.0), "0,0 км");
    }
}
