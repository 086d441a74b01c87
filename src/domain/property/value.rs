//! Tagged field values used for dynamic, field-name keyed comparisons.

use chrono::NaiveDate;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;

/// The value of a record field looked up by name.
///
/// `Missing` covers absent fields as well as values that have no natural
/// ordering (null, arrays, objects).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
    Missing,
}

impl<'a> FieldValue<'a> {
    /// Maps a raw metadata value onto a sortable variant.
    pub fn from_json(value: Option<&'a JsonValue>) -> Self {
        match value {
            Some(JsonValue::String(s)) => FieldValue::Text(s),
            Some(JsonValue::Number(n)) => n.as_f64().map_or(FieldValue::Missing, FieldValue::Number),
            Some(JsonValue::Bool(b)) => FieldValue::Bool(*b),
            _ => FieldValue::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    // Position of each kind when two values of different kinds meet.
    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Date(_) => 2,
            FieldValue::Text(_) => 3,
            FieldValue::Bool(_) => 4,
        }
    }

    /// Ascending comparison used by the result sorter. This is a total order.
    ///
    /// Ordering rules:
    /// - missing < number < date < text < bool across kinds
    /// - text vs text compares lower-cased
    /// - numbers, dates and bools use their natural ordering
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_sorts_lowest() {
        assert_eq!(FieldValue::Missing.compare(&FieldValue::Number(-1.0)), Ordering::Less);
        assert_eq!(FieldValue::Text("a").compare(&FieldValue::Missing), Ordering::Greater);
        assert_eq!(FieldValue::Missing.compare(&FieldValue::Missing), Ordering::Equal);
    }

    #[test]
    fn test_text_compares_case_insensitively() {
        assert_eq!(FieldValue::Text("avon").compare(&FieldValue::Text("Bristol")), Ordering::Less);
        assert_eq!(FieldValue::Text("HARTFORD").compare(&FieldValue::Text("hartford")), Ordering::Equal);
    }

    #[test]
    fn test_mixed_kinds_have_fixed_order() {
        let date = FieldValue::Date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(FieldValue::Text("3").compare(&FieldValue::Number(2.0)), Ordering::Greater);
        assert_eq!(FieldValue::Number(2.0).compare(&FieldValue::Text("3")), Ordering::Less);
        assert_eq!(FieldValue::Bool(false).compare(&FieldValue::Text("z")), Ordering::Greater);
        assert_eq!(FieldValue::Number(1e12).compare(&date), Ordering::Less);
        assert_eq!(date.compare(&FieldValue::Text("a")), Ordering::Less);
    }

    #[test]
    fn test_compare_is_transitive_across_kinds() {
        let values = [
            FieldValue::Missing,
            FieldValue::Number(-4.5),
            FieldValue::Number(7.0),
            FieldValue::Date(NaiveDate::from_ymd_opt(2019, 3, 2).unwrap()),
            FieldValue::Text("Avon"),
            FieldValue::Text("10"),
            FieldValue::Bool(false),
            FieldValue::Bool(true),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(a.compare(b), b.compare(a).reverse());
                for c in &values {
                    if a.compare(b) != Ordering::Greater && b.compare(c) != Ordering::Greater {
                        assert_ne!(a.compare(c), Ordering::Greater, "{:?} {:?} {:?}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_from_json() {
        let nested = json!({"a": 1});
        assert_eq!(FieldValue::from_json(Some(&json!(3))), FieldValue::Number(3.0));
        assert_eq!(FieldValue::from_json(Some(&json!("x"))), FieldValue::Text("x"));
        assert_eq!(FieldValue::from_json(Some(&json!(null))), FieldValue::Missing);
        assert_eq!(FieldValue::from_json(Some(&nested)), FieldValue::Missing);
        assert_eq!(FieldValue::from_json(None), FieldValue::Missing);
    }
}
