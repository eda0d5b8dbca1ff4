//! Text canonicalization before pattern matching.
//!
//! Field heuristics match against ASCII uppercase text so that accented
//! Portuguese spellings ("JOÃO", "REFERÊNCIA") and embedded-text/OCR case
//! differences don't break the patterns. Normalized text is internal to
//! matching only; callers always receive the original extracted text.

use unicode_normalization::UnicodeNormalization;

/// Strip diacritics and upper-case.
///
/// NFKD decomposition splits accented characters into base letter plus
/// combining marks; dropping every non-ASCII scalar then removes the marks
/// (and any symbol with no ASCII base). Pure and deterministic.
pub fn normalize_text(text: &str) -> String {
    text.nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_portuguese_diacritics() {
        assert_eq!(normalize_text("João da Conceição"), "JOAO DA CONCEICAO");
    }

    #[test]
    fn upper_cases_plain_ascii() {
        assert_eq!(normalize_text("saldo vencido"), "SALDO VENCIDO");
    }

    #[test]
    fn keeps_digits_and_punctuation() {
        assert_eq!(normalize_text("01/03/2024: 1.234,56"), "01/03/2024: 1.234,56");
    }

    #[test]
    fn drops_characters_without_ascii_base() {
        assert_eq!(normalize_text("总 total €"), " TOTAL ");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn idempotent() {
        let once = normalize_text("Referência Março");
        assert_eq!(normalize_text(&once), once);
    }
}
