//! Field type tags and borrowed field values.
//!
//! A record field is described to the codec by its [`FieldKind`] (known at
//! compile time from the field's Rust type) and its current [`FieldValue`].
//! Both come from the [`ClaimField`] implementation of the field's type.

use crate::entity::ItemRef;
use chrono::{DateTime, Utc};

/// The encoding family of a field's Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Text, sent as a `string` value.
    Text,
    /// Whole number, sent as a unitless `quantity`.
    Integer,
    /// Timestamp, sent as a `time` value.
    Time,
    /// Item reference, sent as a `wikibase-entityid` value.
    Item,
    /// A type with no Wikibase encoding.
    Unsupported(&'static str),
}

impl FieldKind {
    /// Returns a human readable name for error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Time => "time",
            FieldKind::Item => "item reference",
            FieldKind::Unsupported(name) => *name,
        }
    }
}

/// The current value of a field, borrowed from the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Text.
    Text(&'a str),
    /// Whole number.
    Integer(i64),
    /// Timestamp.
    Time(DateTime<Utc>),
    /// Unvalidated item reference text.
    Item(&'a str),
    /// An unset optional field of the given kind.
    Absent(FieldKind),
    /// A value of a type with no Wikibase encoding.
    Unsupported(&'static str),
}

impl FieldValue<'_> {
    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Time(_) => FieldKind::Time,
            FieldValue::Item(_) => FieldKind::Item,
            FieldValue::Absent(kind) => *kind,
            FieldValue::Unsupported(name) => FieldKind::Unsupported(*name),
        }
    }
}

/// A Rust type that can be stored as a claim value.
pub trait ClaimField {
    /// Encoding family of this type.
    const KIND: FieldKind;

    /// Borrows the current value.
    fn field_value(&self) -> FieldValue<'_>;
}

impl ClaimField for str {
    const KIND: FieldKind = FieldKind::Text;

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl ClaimField for String {
    const KIND: FieldKind = FieldKind::Text;

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self.as_str())
    }
}

macro_rules! integer_field {
    ($($ty:ty),*) => {
        $(
            impl ClaimField for $ty {
                const KIND: FieldKind = FieldKind::Integer;

                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::Integer(i64::from(*self))
                }
            }
        )*
    };
}

integer_field!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! unsupported_field {
    ($($ty:ty),*) => {
        $(
            impl ClaimField for $ty {
                const KIND: FieldKind = FieldKind::Unsupported(stringify!($ty));

                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::Unsupported(stringify!($ty))
                }
            }
        )*
    };
}

unsupported_field!(bool, f32, f64);

impl ClaimField for DateTime<Utc> {
    const KIND: FieldKind = FieldKind::Time;

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Time(*self)
    }
}

impl ClaimField for ItemRef {
    const KIND: FieldKind = FieldKind::Item;

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Item(self.as_str())
    }
}

impl<T: ClaimField> ClaimField for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.field_value(),
            None => FieldValue::Absent(T::KIND),
        }
    }
}
