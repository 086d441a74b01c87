//! Property listing records as served by the search API.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

pub mod value;

pub use value::FieldValue;

/// A single property listing.
///
/// On the wire this is a flat camelCase object; every key that is not one of
/// the named fields is kept in `metadata` (bedrooms, bathrooms, squareFeet, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Absent or non-numeric prices decode as `None`.
    #[serde(
        default,
        deserialize_with = "lenient_number",
        serialize_with = "serialize_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub metadata: Map<String, JsonValue>,
}

impl PropertyRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: None,
            city: None,
            price: None,
            property_type: None,
            sale_date: None,
            metadata: Map::new(),
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    pub fn with_sale_date(mut self, sale_date: NaiveDate) -> Self {
        self.sale_date = Some(sale_date);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Looks up a field by its wire name. Unknown names fall through to `metadata`.
    pub fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Text(&self.id),
            "address" => self.address.as_deref().map_or(FieldValue::Missing, FieldValue::Text),
            "city" => self.city.as_deref().map_or(FieldValue::Missing, FieldValue::Text),
            "price" => self.price.map_or(FieldValue::Missing, FieldValue::Number),
            "propertyType" => self
                .property_type
                .as_deref()
                .map_or(FieldValue::Missing, FieldValue::Text),
            "saleDate" => self.sale_date.map_or(FieldValue::Missing, FieldValue::Date),
            other => FieldValue::from_json(self.metadata.get(other)),
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_f64()))
}

// Whole prices go out as integers so `300000` round-trips as `300000`, not `300000.0`.
fn serialize_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => serializer.serialize_i64(*v as i64),
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(JsonValue::as_str).and_then(parse_sale_date))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part only).
pub fn parse_sale_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}
