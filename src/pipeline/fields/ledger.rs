//! Ledger/statement rule set: billing screens show a reference date and a
//! short list of amounts (overdue, upcoming, total) in reading order.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::money::{normalize_money, MONEY_RE};
use super::FieldMap;

/// Schema key whose presence selects this rule set.
pub const REFERENCE_DATE: &str = "reference_date";
pub const OVERDUE_BALANCE: &str = "overdue_balance";
pub const UPCOMING_BALANCE: &str = "upcoming_balance";
pub const TOTAL: &str = "total";

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{2}/\d{2}/\d{4}\b").expect("date pattern"));

/// Apply the ledger rules to normalized text.
///
/// Amounts are assigned positionally: first match is the overdue balance,
/// second (when present) the upcoming balance, and the last match the
/// total. A single amount therefore fills both overdue balance and total.
pub fn extract(text: &str) -> FieldMap {
    let mut fields = FieldMap::new();

    let date = DATE_RE
        .find(text)
        .map(|m| Value::String(m.as_str().to_string()))
        .unwrap_or(Value::Null);

    let amounts: Vec<&str> = MONEY_RE.find_iter(text).map(|m| m.as_str()).collect();

    fields.insert(REFERENCE_DATE.to_string(), date);
    fields.insert(
        OVERDUE_BALANCE.to_string(),
        opt_value(amounts.first().and_then(|v| normalize_money(v))),
    );
    fields.insert(
        UPCOMING_BALANCE.to_string(),
        opt_value(amounts.get(1).and_then(|v| normalize_money(v))),
    );
    fields.insert(
        TOTAL.to_string(),
        opt_value(amounts.last().and_then(|v| normalize_money(v))),
    );
    fields
}

fn opt_value(value: Option<String>) -> Value {
    value.map(Value::String).unwrap_or(Value::Null)
}
