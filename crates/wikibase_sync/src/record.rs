//! Records that mirror Wikibase items.
//!
//! A record embeds an [`ItemHeader`] and implements [`WikibaseItem`], listing
//! its fields with the label of the property each one maps to:
//!
//! ```
//! use wikibase_sync::{FieldDescriptor, ItemHeader, WikibaseItem};
//!
//! struct Person {
//!     header: ItemHeader,
//!     name: String,
//!     age: i64,
//! }
//!
//! impl WikibaseItem for Person {
//!     fn header(&self) -> &ItemHeader {
//!         &self.header
//!     }
//!
//!     fn header_mut(&mut self) -> &mut ItemHeader {
//!         &mut self.header
//!     }
//!
//!     fn fields(&self) -> Vec<FieldDescriptor<'_>> {
//!         vec![
//!             FieldDescriptor::property("Name", &self.name),
//!             FieldDescriptor::property("Age,omitoncreate", &self.age),
//!         ]
//!     }
//! }
//! ```
//!
//! Properties are named by label rather than `P` number because numbers are
//! allocated by each server and differ between production, staging and test
//! instances. Labels are resolved to IDs by
//! [`Client::map_property_and_item_configuration`](crate::Client::map_property_and_item_configuration).

use crate::error::{WikibaseError, WikibaseResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wikibase_codec::{ClaimField, EntityId, FieldKind, FieldValue};

/// Sync state of a record.
///
/// Persist it with the record (it serializes as `wikibase_id` and
/// `wikibase_property_ids`) to avoid creating the same item twice across
/// runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemHeader {
    #[serde(
        rename = "wikibase_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    id: Option<EntityId>,
    #[serde(
        rename = "wikibase_property_ids",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    claim_ids: BTreeMap<EntityId, String>,
}

impl ItemHeader {
    /// Creates a header for a record that does not exist remotely yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the ID of an item created earlier.
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    /// Restores the GUID of a claim created earlier.
    pub fn with_claim_id(mut self, property: EntityId, claim: impl Into<String>) -> Self {
        self.claim_ids.insert(property, claim.into());
        self
    }

    /// Returns the item ID, or `None` if the item has not been created.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Returns true once the item exists remotely.
    pub fn is_created(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the GUID of the claim uploaded for `property`.
    pub fn claim_id(&self, property: EntityId) -> Option<&str> {
        self.claim_ids
            .get(&property)
            .map(String::as_str)
            .filter(|guid| !guid.is_empty())
    }

    /// Returns every uploaded claim GUID by property.
    pub fn claim_ids(&self) -> &BTreeMap<EntityId, String> {
        &self.claim_ids
    }

    pub(crate) fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    pub(crate) fn record_claim(&mut self, property: EntityId, claim: String) {
        self.claim_ids.insert(property, claim);
    }
}

/// A record that can be synchronized with a Wikibase item.
pub trait WikibaseItem {
    /// Returns the sync state.
    fn header(&self) -> &ItemHeader;

    /// Returns the sync state for update.
    fn header_mut(&mut self) -> &mut ItemHeader;

    /// Lists the annotated fields in declaration order.
    fn fields(&self) -> Vec<FieldDescriptor<'_>>;
}

/// A header on its own is a record with no claims.
impl WikibaseItem for ItemHeader {
    fn header(&self) -> &ItemHeader {
        self
    }

    fn header_mut(&mut self) -> &mut ItemHeader {
        self
    }

    fn fields(&self) -> Vec<FieldDescriptor<'_>> {
        Vec::new()
    }
}

/// Modifiers that may follow the label in a property tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Skip the field when creating the item; it is uploaded by a later
    /// claim sync instead.
    pub omit_on_create: bool,
}

/// A parsed `"<label>[,<modifier>...]"` property tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyTag<'a> {
    /// Property label.
    pub label: &'a str,
    /// Recognized modifiers.
    pub modifiers: Modifiers,
}

impl<'a> PropertyTag<'a> {
    /// Parses a tag. The label is everything before the first comma;
    /// unrecognized modifiers are ignored.
    pub fn parse(tag: &'a str) -> Self {
        let mut parts = tag.split(',');
        let label = parts.next().unwrap_or_default();
        let mut modifiers = Modifiers::default();
        for part in parts {
            if part == "omitoncreate" {
                modifiers.omit_on_create = true;
            }
        }
        Self { label, modifiers }
    }
}

/// One field of a record as seen by the client.
///
/// A field may map to a property (its value becomes a claim), name an item
/// that must exist, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor<'a> {
    property: Option<PropertyTag<'a>>,
    item: Option<&'a str>,
    kind: FieldKind,
    value: FieldValue<'a>,
}

impl<'a> FieldDescriptor<'a> {
    /// A field whose value is uploaded as a claim on the property labelled
    /// by `tag`.
    pub fn property<T: ClaimField + ?Sized>(tag: &'a str, value: &'a T) -> Self {
        Self {
            property: Some(PropertyTag::parse(tag)),
            item: None,
            kind: T::KIND,
            value: value.field_value(),
        }
    }

    /// A field that only names an item which must exist remotely.
    pub fn item(label: &'a str) -> Self {
        Self {
            property: None,
            item: Some(label),
            kind: FieldKind::Item,
            value: FieldValue::Absent(FieldKind::Item),
        }
    }

    /// Also names an item which must exist remotely.
    pub fn with_item(mut self, label: &'a str) -> Self {
        self.item = Some(label);
        self
    }

    /// Returns the property tag, if any.
    pub fn property_tag(&self) -> Option<&PropertyTag<'a>> {
        self.property.as_ref()
    }

    /// Returns the item label, if any.
    pub fn item_label(&self) -> Option<&'a str> {
        self.item
    }

    /// Returns the encoding family of the field's type.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the current value.
    pub fn value(&self) -> &FieldValue<'a> {
        &self.value
    }
}

/// A field that maps to a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyField<'a> {
    /// Property label.
    pub label: &'a str,
    /// Tag modifiers.
    pub modifiers: Modifiers,
    /// Encoding family of the field's type.
    pub kind: FieldKind,
    /// Current value.
    pub value: FieldValue<'a>,
}

/// The validated annotations of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedField<'a> {
    /// Property mapping, if the field has one.
    pub property: Option<PropertyField<'a>>,
    /// Item label, if the field names one.
    pub item: Option<&'a str>,
}

/// The annotated fields of a record, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Introspection<'a> {
    fields: Vec<AnnotatedField<'a>>,
}

impl<'a> Introspection<'a> {
    /// Returns the annotated fields.
    pub fn fields(&self) -> &[AnnotatedField<'a>] {
        &self.fields
    }

    /// Returns the fields that map to properties.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyField<'a>> {
        self.fields.iter().filter_map(|f| f.property.as_ref())
    }

    /// Returns the item labels.
    pub fn item_labels(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.fields.iter().filter_map(|f| f.item)
    }

    /// Consumes the introspection, returning the annotated fields.
    pub fn into_fields(self) -> Vec<AnnotatedField<'a>> {
        self.fields
    }
}

/// Lists the annotated fields of a record.
///
/// Fails if a property tag has an empty label.
pub fn introspect<R: WikibaseItem + ?Sized>(record: &R) -> WikibaseResult<Introspection<'_>> {
    let mut fields = Vec::new();
    for field in record.fields() {
        let property = match field.property {
            Some(tag) if tag.label.is_empty() => {
                return Err(WikibaseError::precondition(
                    "property tag has an empty label",
                ));
            }
            Some(tag) => Some(PropertyField {
                label: tag.label,
                modifiers: tag.modifiers,
                kind: field.kind,
                value: field.value,
            }),
            None => None,
        };
        let item = match field.item {
            Some("") => {
                return Err(WikibaseError::precondition("item tag has an empty label"));
            }
            other => other,
        };
        if property.is_some() || item.is_some() {
            fields.push(AnnotatedField { property, item });
        }
    }
    Ok(Introspection { fields })
}
