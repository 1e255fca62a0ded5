//! Entity references.

use crate::error::{CodecError, CodecResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The kind of a Wikibase entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    /// An item, identified by a `Q` number.
    Item,
    /// A property, identified by a `P` number.
    Property,
}

impl EntityKind {
    /// Returns the identifier prefix letter.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            EntityKind::Item => 'Q',
            EntityKind::Property => 'P',
        }
    }

    /// Returns the name used by the API (`wbstype`, `new`, `entity-type`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::Item => "item",
            EntityKind::Property => "property",
        }
    }

    fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'Q' => Some(EntityKind::Item),
            'P' => Some(EntityKind::Property),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved Wikibase entity identifier such as `Q42` or `P7`.
///
/// Numeric IDs are assigned by the server and differ between deployments,
/// so they are never used as stable keys; labels are.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    kind: EntityKind,
    numeric_id: u64,
}

impl EntityId {
    /// Creates an entity ID from its parts.
    #[inline]
    #[must_use]
    pub const fn new(kind: EntityKind, numeric_id: u64) -> Self {
        Self { kind, numeric_id }
    }

    /// Creates an item ID.
    #[inline]
    #[must_use]
    pub const fn item(numeric_id: u64) -> Self {
        Self::new(EntityKind::Item, numeric_id)
    }

    /// Creates a property ID.
    #[inline]
    #[must_use]
    pub const fn property(numeric_id: u64) -> Self {
        Self::new(EntityKind::Property, numeric_id)
    }

    /// Returns the entity kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns the numeric part of the ID.
    #[inline]
    #[must_use]
    pub const fn numeric_id(&self) -> u64 {
        self.numeric_id
    }

    /// Parses `Q<digits>` or `P<digits>`.
    pub fn parse(text: &str) -> CodecResult<Self> {
        let mut chars = text.chars();
        let prefix = chars
            .next()
            .ok_or_else(|| CodecError::invalid_reference(text, "empty entity reference"))?;
        let kind = EntityKind::from_prefix(prefix).ok_or_else(|| {
            CodecError::invalid_reference(text, format!("unknown entity prefix {prefix:?}"))
        })?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::invalid_reference(
                text,
                "expected a decimal number after the prefix",
            ));
        }
        let numeric_id = digits
            .parse::<u64>()
            .map_err(|e| CodecError::invalid_reference(text, e.to_string()))?;
        Ok(Self { kind, numeric_id })
    }

    /// Parses an ID and requires it to be of the given kind.
    pub fn parse_as(kind: EntityKind, text: &str) -> CodecResult<Self> {
        if !text.starts_with(kind.prefix()) {
            return Err(CodecError::invalid_reference(
                text,
                format!("expected prefix {:?}", kind.prefix()),
            ));
        }
        Self::parse(text)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({self})")
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.numeric_id)
    }
}

impl FromStr for EntityId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// An item reference held by a record field.
///
/// Unlike [`EntityId`] this is not validated on construction; the claim
/// encoder checks it when the field is uploaded, so a record can hold
/// whatever text it was loaded with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemRef(String);

impl ItemRef {
    /// Wraps raw reference text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the reference text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no reference is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<EntityId> for ItemRef {
    fn from(id: EntityId) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ItemRef {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
