//! # Wikibase Codec
//!
//! Conversion of typed record field values into Wikibase claim payloads.
//!
//! This crate provides:
//! - [`EntityId`] and [`EntityKind`] for `Q`/`P` identifiers
//! - [`DataValue`] and [`Snak`], the `{type, value}` payloads sent to the API
//! - [`ClaimField`], implemented by every Rust type a record field may have
//! - The encoder that turns a [`FieldValue`] into a [`Snak`]
//!
//! This is a pure crate with no I/O operations.
//!
//! ## Encoding Rules
//!
//! - Text is whitespace-normalized; empty text has no value
//! - Integers are unitless quantities
//! - Timestamps are day-precision Gregorian time values
//! - Item references must be `Q` numbers
//! - Unset optional fields have no value
//!
//! ## Usage
//!
//! ```
//! use wikibase_codec::{encode_value, ClaimField, DataValue, Snak};
//!
//! let name = String::from("  Ada \n Lovelace ");
//! let snak = encode_value(&name.field_value()).unwrap();
//! assert_eq!(snak, Snak::Value(DataValue::String("Ada Lovelace".into())));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod encoder;
mod entity;
mod error;
mod field;
mod value;

pub use encoder::{
    data_type_for, encode_claim_value, encode_integer, encode_item, encode_text, encode_time,
    encode_value, normalize_text,
};
pub use entity::{EntityId, EntityKind, ItemRef};
pub use error::{CodecError, CodecResult};
pub use field::{ClaimField, FieldKind, FieldValue};
pub use value::{
    DataType, DataValue, ItemValue, QuantityValue, Snak, TimeValue, GREGORIAN_CALENDAR_MODEL,
    TIME_PRECISION_DAY, UNITLESS,
};
