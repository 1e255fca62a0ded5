//! Field value to snak encoding.

use crate::entity::{EntityId, EntityKind};
use crate::error::{CodecError, CodecResult};
use crate::field::{FieldKind, FieldValue};
use crate::value::{
    DataType, DataValue, ItemValue, QuantityValue, Snak, TimeValue, GREGORIAN_CALENDAR_MODEL,
    TIME_PRECISION_DAY, UNITLESS,
};
use chrono::{DateTime, Datelike, SecondsFormat, Utc};

/// Collapses runs of whitespace to single spaces and trims both ends.
///
/// Wikibase rejects strings with leading or trailing whitespace and
/// stores embedded newlines badly.
#[must_use]
pub fn normalize_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Encodes text. Text that is empty after normalization has no value.
#[must_use]
pub fn encode_text(value: &str) -> Snak {
    let normalized = normalize_text(value);
    if normalized.is_empty() {
        Snak::NoValue
    } else {
        Snak::Value(DataValue::String(normalized))
    }
}

/// Encodes a whole number as a unitless quantity.
#[must_use]
pub fn encode_integer(value: i64) -> Snak {
    Snak::Value(DataValue::Quantity(QuantityValue {
        amount: value.to_string(),
        unit: UNITLESS.to_string(),
    }))
}

/// Encodes a timestamp at day precision in the Gregorian calendar.
///
/// Only years 0 to 9999 are accepted; RFC 3339 has no form for others.
pub fn encode_time(value: &DateTime<Utc>) -> CodecResult<Snak> {
    let text = value.to_rfc3339_opts(SecondsFormat::AutoSi, true);
    if !(0..=9999).contains(&value.year()) {
        return Err(CodecError::TimeOutOfRange { value: text });
    }
    Ok(Snak::Value(DataValue::Time(TimeValue {
        time: format!("+0000000{text}"),
        timezone: 0,
        before: 0,
        after: 0,
        precision: TIME_PRECISION_DAY,
        calendar_model: GREGORIAN_CALENDAR_MODEL.to_string(),
    })))
}

/// Encodes an item reference, validating that it is a `Q` number.
pub fn encode_item(value: &str) -> CodecResult<Snak> {
    if value.is_empty() {
        return Err(CodecError::invalid_reference(
            value,
            "expected an item ID but got an empty string",
        ));
    }
    let id = EntityId::parse_as(EntityKind::Item, value)?;
    Ok(Snak::Value(DataValue::WikibaseItem(ItemValue {
        entity_type: EntityKind::Item.as_str().to_string(),
        numeric_id: id.numeric_id(),
    })))
}

/// Encodes a field value into a snak.
///
/// Unset optional fields become [`Snak::NoValue`] whatever their type.
pub fn encode_value(value: &FieldValue<'_>) -> CodecResult<Snak> {
    match value {
        FieldValue::Text(text) => Ok(encode_text(text)),
        FieldValue::Integer(n) => Ok(encode_integer(*n)),
        FieldValue::Time(t) => encode_time(t),
        FieldValue::Item(text) => encode_item(text),
        FieldValue::Absent(_) => Ok(Snak::NoValue),
        FieldValue::Unsupported(name) => Err(CodecError::unsupported_type(*name)),
    }
}

/// Encodes a field value into the JSON text sent as the `value` argument of
/// a claim call, or `None` when the claim has no value.
pub fn encode_claim_value(value: &FieldValue<'_>) -> CodecResult<Option<String>> {
    encode_value(value)?
        .data_value()
        .map(DataValue::value_json)
        .transpose()
}

/// Maps a field kind to the data type a new property should be created with.
pub fn data_type_for(kind: FieldKind) -> CodecResult<DataType> {
    match kind {
        FieldKind::Text => Ok(DataType::String),
        FieldKind::Integer => Ok(DataType::Quantity),
        FieldKind::Time => Ok(DataType::Time),
        FieldKind::Item => Ok(DataType::WikibaseItem),
        FieldKind::Unsupported(name) => Err(CodecError::unsupported_type(name)),
    }
}
