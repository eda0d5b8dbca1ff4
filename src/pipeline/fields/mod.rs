//! Schema-driven field extraction.
//!
//! A schema is an ordered JSON object of field name → human-readable
//! description. Which heuristic rule set runs is decided purely by key
//! presence (never by the description text): a `registration_number` key
//! selects the identity-document rules, otherwise a `reference_date` key
//! selects the ledger rules, otherwise nothing matches.

pub mod identity;
pub mod ledger;
pub mod money;

use serde_json::Value;

use super::normalize::normalize_text;

/// Ordered field name → description mapping.
pub type FieldSchema = serde_json::Map<String, Value>;

/// Field name → extracted string or explicit null.
pub type FieldMap = serde_json::Map<String, Value>;

/// Extract fields from raw document text according to `schema`.
///
/// Pure. Matching runs over the normalized text; the raw text is never
/// altered for the caller. Postcondition: the returned map's key set
/// exactly equals the schema's key set — unmatched fields are explicit
/// nulls, and rule outputs for keys the schema doesn't declare are
/// dropped.
pub fn extract_fields(text: &str, schema: &FieldSchema) -> FieldMap {
    let normalized = normalize_text(text);

    let candidates = if schema.contains_key(identity::REGISTRATION_NUMBER) {
        identity::extract(&normalized)
    } else if schema.contains_key(ledger::REFERENCE_DATE) {
        ledger::extract(&normalized)
    } else {
        FieldMap::new()
    };

    schema
        .keys()
        .map(|key| {
            let value = candidates.get(key).cloned().unwrap_or(Value::Null);
            (key.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_of(keys: &[&str]) -> FieldSchema {
        keys.iter()
            .map(|k| (k.to_string(), Value::String(format!("description of {k}"))))
            .collect()
    }

    #[test]
    fn identity_schema_extracts_name_and_number() {
        let schema = schema_of(&["name", "registration_number"]);
        let fields = extract_fields("nº 12 José da Silva 123456", &schema);
        // Normalization upper-cases and strips the accent before matching
        assert_eq!(fields["name"], "JOSE DA SILVA");
        assert_eq!(fields["registration_number"], "123456");
    }

    #[test]
    fn ledger_schema_extracts_date_and_amounts() {
        let schema = schema_of(&[
            "reference_date",
            "overdue_balance",
            "upcoming_balance",
            "total",
        ]);
        let fields = extract_fields(
            "Referência 01/03/2024 vencido 1.000,00 a vencer 500,50",
            &schema,
        );
        assert_eq!(fields["reference_date"], "01/03/2024");
        assert_eq!(fields["overdue_balance"], "1000.00");
        assert_eq!(fields["upcoming_balance"], "500.50");
        assert_eq!(fields["total"], "500.50");
    }

    #[test]
    fn identity_rules_win_when_both_dispatch_keys_present() {
        let schema = schema_of(&["registration_number", "reference_date"]);
        let fields = extract_fields("JOAO DA SILVA 123456 em 01/03/2024", &schema);
        assert_eq!(fields["registration_number"], "123456");
        // Ledger rules never ran, so the date stays null
        assert_eq!(fields["reference_date"], Value::Null);
    }

    #[test]
    fn unrecognized_schema_yields_all_nulls() {
        let schema = schema_of(&["invoice_id", "issuer"]);
        let fields = extract_fields("qualquer texto 123456", &schema);
        assert_eq!(fields["invoice_id"], Value::Null);
        assert_eq!(fields["issuer"], Value::Null);
    }

    #[test]
    fn output_key_set_always_equals_schema_key_set() {
        for keys in [
            vec!["registration_number"],
            vec!["name", "registration_number", "extra_key"],
            vec!["reference_date", "total"],
            vec![],
        ] {
            let schema = schema_of(&keys);
            let fields = extract_fields("JOAO DA SILVA 123456 01/03/2024 1,00", &schema);
            let out: Vec<&String> = fields.keys().collect();
            let declared: Vec<&String> = schema.keys().collect();
            assert_eq!(out, declared, "schema {keys:?}");
        }
    }

    #[test]
    fn undeclared_rule_outputs_are_dropped() {
        // Identity rules also produce a name, but the schema doesn't declare it
        let schema = schema_of(&["registration_number"]);
        let fields = extract_fields("JOAO DA SILVA 123456", &schema);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["registration_number"], "123456");
    }

    #[test]
    fn schema_key_order_is_preserved() {
        let schema = schema_of(&["total", "reference_date", "overdue_balance"]);
        let fields = extract_fields("01/03/2024 250,00", &schema);
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["total", "reference_date", "overdue_balance"]);
    }
}
