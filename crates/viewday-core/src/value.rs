//! Frontmatter value coercions.
//!
//! Frontmatter values may be missing, null, empty strings, scalars, or
//! arrays. Everything downstream (scanner, detector, indexer, write-back)
//! funnels through these helpers so the edge cases live in one place.

use crate::store::Metadata;
use serde_json::Value;

/// Frontmatter key carrying an event duration in minutes.
pub const DURATION_FIELD: &str = "duration_minutes";
/// Fallback duration key consulted when [`DURATION_FIELD`] is absent.
pub const DURATION_FALLBACK_FIELD: &str = "duration";
/// Frontmatter key holding linked external event ids (array or scalar).
pub const LINKS_FIELD: &str = "viewday_links";

/// True when a frontmatter value carries no usable content.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Coerce a scalar-or-array value into a list of string identifiers.
/// Scalars become one-element sequences; array elements that are not
/// usable identifiers are dropped.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_string).collect(),
        other => scalar_string(other).into_iter().collect(),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a numeric minute count. Accepts numbers and numeric strings.
pub fn minutes(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Duration lookup with the primary/fallback field chain. The fallback is
/// consulted only when the primary key is absent, not when it fails to
/// parse.
pub fn duration_minutes(metadata: &Metadata) -> Option<f64> {
    metadata
        .get(DURATION_FIELD)
        .or_else(|| metadata.get(DURATION_FALLBACK_FIELD))
        .and_then(minutes)
}

/// Raw date string at a rule's property, when present and non-empty.
pub fn date_value<'a>(metadata: &'a Metadata, property: &str) -> Option<&'a str> {
    let value = metadata.get(property)?;
    if is_empty(value) {
        return None;
    }
    value.as_str().map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_values() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!("   ")));
        assert!(is_empty(&json!([])));
        assert!(!is_empty(&json!("2024-03-01")));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(["evt-1"])));
    }

    #[test]
    fn scalar_coerces_to_single_element_list() {
        assert_eq!(string_list(&json!("evt-1")), vec!["evt-1".to_string()]);
        assert_eq!(string_list(&json!(["a", "b"])), vec!["a", "b"]);
        assert!(string_list(&json!(null)).is_empty());
        assert!(string_list(&json!("")).is_empty());
    }

    #[test]
    fn array_elements_are_coerced_to_strings() {
        assert_eq!(string_list(&json!([42, "x"])), vec!["42", "x"]);
        assert_eq!(string_list(&json!([null, "x", ""])), vec!["x"]);
    }

    #[test]
    fn minutes_from_number_or_numeric_string() {
        assert_eq!(minutes(&json!(90)), Some(90.0));
        assert_eq!(minutes(&json!("45")), Some(45.0));
        assert_eq!(minutes(&json!("45 minutes")), None);
        assert_eq!(minutes(&json!(true)), None);
    }

    #[test]
    fn duration_falls_back_only_when_primary_absent() {
        let mut meta = Metadata::new();
        meta.insert(DURATION_FALLBACK_FIELD.into(), json!(30));
        assert_eq!(duration_minutes(&meta), Some(30.0));

        meta.insert(DURATION_FIELD.into(), json!(90));
        assert_eq!(duration_minutes(&meta), Some(90.0));

        // Present-but-unparsable primary does not fall through.
        meta.insert(DURATION_FIELD.into(), json!("soon"));
        assert_eq!(duration_minutes(&meta), None);
    }

    #[test]
    fn date_value_skips_empty_and_null() {
        let mut meta = Metadata::new();
        assert_eq!(date_value(&meta, "due"), None);
        meta.insert("due".into(), json!(""));
        assert_eq!(date_value(&meta, "due"), None);
        meta.insert("due".into(), json!(null));
        assert_eq!(date_value(&meta, "due"), None);
        meta.insert("due".into(), json!("2024-03-01"));
        assert_eq!(date_value(&meta, "due"), Some("2024-03-01"));
    }
}
