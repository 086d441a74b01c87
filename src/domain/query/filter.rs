//! Predicate filtering for property search.
//!
//! All active predicates must hold (AND semantics).

use crate::domain::property::PropertyRecord;
use crate::domain::query::params::QueryParameters;
use serde::{Deserialize, Serialize};

/// How `city` and `propertyType` filters compare against record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatch {
    /// Byte-for-byte equality.
    #[default]
    Exact,
    /// Equality after lower-casing both sides.
    CaseInsensitive,
}

impl TextMatch {
    fn matches(&self, actual: Option<&str>, expected: &str) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match self {
            TextMatch::Exact => actual == expected,
            TextMatch::CaseInsensitive => actual.to_lowercase() == expected.to_lowercase(),
        }
    }
}

/// Evaluates the filter part of [`QueryParameters`] against records.
pub struct PropertyFilter<'p> {
    params: &'p QueryParameters,
    text_match: TextMatch,
}

impl<'p> PropertyFilter<'p> {
    pub fn new(params: &'p QueryParameters, text_match: TextMatch) -> Self {
        Self { params, text_match }
    }

    /// Checks whether a record satisfies every active filter.
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        if let Some(city) = self.params.city.as_deref() {
            if !self.text_match.matches(record.city.as_deref(), city) {
                return false;
            }
        }

        if let Some(property_type) = self.params.property_type.as_deref() {
            if !self.text_match.matches(record.property_type.as_deref(), property_type) {
                return false;
            }
        }

        self.price_matches(record.price)
    }

    // Missing price fails any active bound.
    fn price_matches(&self, price: Option<f64>) -> bool {
        let (min, max) = (self.params.min_price, self.params.max_price);
        if min.is_none() && max.is_none() {
            return true;
        }
        let Some(price) = price else {
            return false;
        };
        min.map_or(true, |min| price >= min) && max.map_or(true, |max| price <= max)
    }
}
