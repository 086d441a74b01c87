//! Per-request search parameters and their query-string coercion.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::IntErrorKind;
use utoipa::ToSchema;

/// Page size used when `limit` is absent or not positive.
pub const DEFAULT_LIMIT: usize = 50;

/// Field used when `sortBy` is absent.
pub const DEFAULT_SORT_FIELD: &str = "price";

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` in any case selects descending; everything else is ascending.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Search parameters as received from a caller.
///
/// `limit` and `offset` are kept as given; the processor corrects out-of-range
/// values through [`QueryParameters::effective_limit`] and
/// [`QueryParameters::effective_offset`] instead of rejecting the request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParameters {
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub property_type: Option<String>,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub limit: i64,
    pub offset: i64,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            city: None,
            min_price: None,
            max_price: None,
            property_type: None,
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            sort_order: SortOrder::Asc,
            limit: DEFAULT_LIMIT as i64,
            offset: 0,
        }
    }
}

impl QueryParameters {
    /// Builds parameters from an untrusted query-string map.
    ///
    /// Empty values count as absent and unparseable numbers fall back to their
    /// defaults. Unknown keys are ignored.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        Self {
            city: get("city").map(str::to_string),
            min_price: get("minPrice").and_then(parse_price),
            max_price: get("maxPrice").and_then(parse_price),
            property_type: get("propertyType").map(str::to_string),
            sort_by: get("sortBy").map(str::to_string).unwrap_or(defaults.sort_by),
            sort_order: get("sortOrder").map(SortOrder::parse).unwrap_or_default(),
            limit: get("limit").and_then(parse_page_value).unwrap_or(defaults.limit),
            offset: get("offset").and_then(parse_page_value).unwrap_or(defaults.offset),
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by.into();
        self.sort_order = sort_order;
        self
    }

    pub fn with_page(mut self, limit: i64, offset: i64) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    /// `limit` if positive, otherwise [`DEFAULT_LIMIT`].
    pub fn effective_limit(&self) -> usize {
        if self.limit > 0 {
            usize::try_from(self.limit).unwrap_or(usize::MAX)
        } else {
            DEFAULT_LIMIT
        }
    }

    /// `offset` if non-negative, otherwise 0.
    pub fn effective_offset(&self) -> usize {
        usize::try_from(self.offset).unwrap_or(0)
    }
}

// NaN and infinities count as absent.
fn parse_price(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|p| p.is_finite())
}

// Integers outside i64 saturate, so a huge offset still pages past the end.
fn parse_page_value(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_empty() {
        let params = QueryParameters::from_query(&HashMap::new());
        assert_eq!(params, QueryParameters::default());
        assert_eq!(params.sort_by, "price");
        assert_eq!(params.effective_limit(), 50);
        assert_eq!(params.effective_offset(), 0);
    }

    #[test]
    fn test_parses_all_keys() {
        let params = QueryParameters::from_query(&query(&[
            ("city", "Hartford"),
            ("minPrice", "100000"),
            ("maxPrice", "250000.5"),
            ("propertyType", "Condo"),
            ("sortBy", "saleDate"),
            ("sortOrder", "DESC"),
            ("limit", "10"),
            ("offset", "20"),
        ]));
        assert_eq!(params.city.as_deref(), Some("Hartford"));
        assert_eq!(params.min_price, Some(100000.0));
        assert_eq!(params.max_price, Some(250000.5));
        assert_eq!(params.property_type.as_deref(), Some("Condo"));
        assert_eq!(params.sort_by, "saleDate");
        assert_eq!(params.sort_order, SortOrder::Desc);
        assert_eq!(params.effective_limit(), 10);
        assert_eq!(params.effective_offset(), 20);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let params = QueryParameters::from_query(&query(&[
            ("city", "  "),
            ("minPrice", "cheap"),
            ("limit", "ten"),
            ("offset", "-"),
            ("sortOrder", "sideways"),
        ]));
        assert_eq!(params.city, None);
        assert_eq!(params.min_price, None);
        assert_eq!(params.limit, 50);
        assert_eq!(params.offset, 0);
        assert_eq!(params.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_oversized_paging_values_saturate() {
        let params = QueryParameters::from_query(&query(&[
            ("limit", "99999999999999999999"),
            ("offset", "99999999999999999999"),
        ]));
        assert_eq!(params.limit, i64::MAX);
        assert_eq!(params.offset, i64::MAX);
        assert_eq!(params.effective_offset(), i64::MAX as usize);

        let params = QueryParameters::from_query(&query(&[("offset", "-99999999999999999999")]));
        assert_eq!(params.effective_offset(), 0);
    }

    #[test]
    fn test_non_finite_prices_are_absent() {
        let params = QueryParameters::from_query(&query(&[
            ("minPrice", "NaN"),
            ("maxPrice", "inf"),
        ]));
        assert_eq!(params.min_price, None);
        assert_eq!(params.max_price, None);
    }

    // Out-of-range paging is corrected to defaults rather than rejected.
    #[test]
    fn test_non_positive_limit_and_negative_offset_are_defaulted() {
        let params = QueryParameters::default().with_page(0, -5);
        assert_eq!(params.effective_limit(), DEFAULT_LIMIT);
        assert_eq!(params.effective_offset(), 0);

        let params = QueryParameters::from_query(&query(&[("limit", "-3"), ("offset", "-1")]));
        assert_eq!(params.effective_limit(), DEFAULT_LIMIT);
        assert_eq!(params.effective_offset(), 0);
    }
}
