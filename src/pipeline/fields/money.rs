//! Brazilian-locale monetary values.
//!
//! Statements print amounts as `1.234.567,89`: dots group thousands, the
//! comma separates exactly two decimal digits.

use std::sync::LazyLock;

use regex::Regex;

/// Matches one Brazilian-format amount. No anchors: amounts appear inline
/// in running OCR text.
pub static MONEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}(?:\.\d{3})*,\d{2}").expect("money pattern is valid"));

/// Convert a Brazilian-format amount to a plain decimal string with two
/// decimal places (`"76.871,20"` → `"76871.20"`).
///
/// Empty input yields `None`. A value that stops parsing after locale
/// conversion is passed through unchanged rather than failing: downstream
/// consumers prefer the raw capture over losing the field.
pub fn normalize_money(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let canonical = value.replace('.', "").replace(',', ".");
    match canonical.parse::<f64>() {
        Ok(amount) => Some(format!("{amount:.2}")),
        Err(_) => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_grouped_amount() {
        assert_eq!(normalize_money("76.871,20").unwrap(), "76871.20");
    }

    #[test]
    fn converts_millions() {
        assert_eq!(normalize_money("1.234.567,89").unwrap(), "1234567.89");
    }

    #[test]
    fn converts_small_amount() {
        assert_eq!(normalize_money("250,00").unwrap(), "250.00");
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(normalize_money(""), None);
    }

    #[test]
    fn unparseable_value_passes_through() {
        assert_eq!(normalize_money("12,34,56").unwrap(), "12,34,56");
    }

    #[test]
    fn pattern_finds_all_amounts_in_order() {
        let text = "VENCIDO 1.000,00 A VENCER 500,50 TOTAL 1.500,50";
        let found: Vec<&str> = MONEY_RE.find_iter(text).map(|m| m.as_str()).collect();
        assert_eq!(found, vec!["1.000,00", "500,50", "1.500,50"]);
    }

    #[test]
    fn pattern_requires_two_decimal_digits() {
        assert!(MONEY_RE.find("1.000,0").is_none());
        assert!(MONEY_RE.find("1000").is_none());
    }
}
