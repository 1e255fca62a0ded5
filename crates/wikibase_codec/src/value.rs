//! Claim payload types: data values, snaks and property data types.

use crate::error::CodecResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Precision code for a time value accurate to the day.
pub const TIME_PRECISION_DAY: u8 = 11;

/// Calendar model used for all time values (proleptic Gregorian).
pub const GREGORIAN_CALENDAR_MODEL: &str = "http://www.wikidata.org/entity/Q1985727";

/// Unit of a dimensionless quantity.
pub const UNITLESS: &str = "1";

/// A quantity payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityValue {
    /// Decimal amount as text.
    pub amount: String,
    /// Unit, `"1"` for none.
    pub unit: String,
}

/// A time payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeValue {
    /// Signed ISO-8601-like timestamp text.
    pub time: String,
    /// Offset from UTC in minutes.
    pub timezone: i32,
    /// Uncertainty before, in units of `precision`.
    pub before: i32,
    /// Uncertainty after, in units of `precision`.
    pub after: i32,
    /// Precision code.
    pub precision: u8,
    /// Calendar model entity URI.
    #[serde(rename = "calendarmodel")]
    pub calendar_model: String,
}

/// An item reference payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemValue {
    /// Always `"item"` for item references.
    #[serde(rename = "entity-type")]
    pub entity_type: String,
    /// Numeric part of the `Q` number.
    #[serde(rename = "numeric-id")]
    pub numeric_id: u64,
}

/// A typed value wrapper, encoded on the wire as `{type, value}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum DataValue {
    /// Plain text.
    #[serde(rename = "string")]
    String(String),
    /// A number with unit.
    #[serde(rename = "quantity")]
    Quantity(QuantityValue),
    /// A point in time.
    #[serde(rename = "time")]
    Time(TimeValue),
    /// A reference to another item.
    #[serde(rename = "wikibase-entityid")]
    WikibaseItem(ItemValue),
}

impl DataValue {
    /// Returns the wire `type` tag.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            DataValue::String(_) => "string",
            DataValue::Quantity(_) => "quantity",
            DataValue::Time(_) => "time",
            DataValue::WikibaseItem(_) => "wikibase-entityid",
        }
    }

    /// Renders only the inner `value` as JSON, the form expected by
    /// `wbcreateclaim` and `wbsetclaimvalue`.
    pub fn value_json(&self) -> CodecResult<String> {
        let text = match self {
            DataValue::String(s) => serde_json::to_string(s)?,
            DataValue::Quantity(q) => serde_json::to_string(q)?,
            DataValue::Time(t) => serde_json::to_string(t)?,
            DataValue::WikibaseItem(i) => serde_json::to_string(i)?,
        };
        Ok(text)
    }
}

/// The value-bearing part of a claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snak {
    /// A value is present.
    Value(DataValue),
    /// The property is deliberately recorded without a value.
    NoValue,
}

impl Snak {
    /// Returns the wire `snaktype`.
    #[must_use]
    pub const fn snak_type(&self) -> &'static str {
        match self {
            Snak::Value(_) => "value",
            Snak::NoValue => "novalue",
        }
    }

    /// Returns the data value, if any.
    #[must_use]
    pub fn data_value(&self) -> Option<&DataValue> {
        match self {
            Snak::Value(v) => Some(v),
            Snak::NoValue => None,
        }
    }

    /// Returns true for the no-value state.
    #[must_use]
    pub fn is_no_value(&self) -> bool {
        matches!(self, Snak::NoValue)
    }
}

/// Data type of a property, fixed when the property is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// `string`
    #[serde(rename = "string")]
    String,
    /// `quantity`
    #[serde(rename = "quantity")]
    Quantity,
    /// `time`
    #[serde(rename = "time")]
    Time,
    /// `wikibase-item`
    #[serde(rename = "wikibase-item")]
    WikibaseItem,
}

impl DataType {
    /// Returns the wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Quantity => "quantity",
            DataType::Time => "time",
            DataType::WikibaseItem => "wikibase-item",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
