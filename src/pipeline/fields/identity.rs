//! Identity-document rule set: professional registration cards carry a
//! holder name in uppercase and a short registration number.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::FieldMap;

/// Schema key whose presence selects this rule set.
pub const REGISTRATION_NUMBER: &str = "registration_number";
/// Holder name, populated alongside the registration number.
pub const NAME: &str = "name";

/// First run of an uppercase token of 3+ letters followed by up to three
/// more tokens of 2+ letters. Card holder names are printed fully
/// uppercased, so after normalization the name is the first such span.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{3,}(?: [A-Z]{2,}){0,3})\b").expect("name pattern"));

/// First standalone run of 4-6 digits. Registration numbers are short;
/// longer digit runs (CPF, phone, zip) never match standalone.
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4,6}\b").expect("number pattern"));

/// Apply the identity rules to normalized text.
pub fn extract(text: &str) -> FieldMap {
    let mut fields = FieldMap::new();

    let name = NAME_RE
        .captures(text)
        .map(|c| Value::String(c[1].to_string()))
        .unwrap_or(Value::Null);
    let number = NUMBER_RE
        .find(text)
        .map(|m| Value::String(m.as_str().to_string()))
        .unwrap_or(Value::Null);

    fields.insert(NAME.to_string(), name);
    fields.insert(REGISTRATION_NUMBER.to_string(), number);
    fields
}
