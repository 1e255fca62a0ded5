//! Label to ID maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wikibase_codec::{EntityId, EntityKind};

/// Resolved labels, one map per entity kind.
///
/// Entries are added by label resolution or seeded directly by the caller.
/// Resolving a label again always searches and replaces any earlier entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMap {
    #[serde(default)]
    properties: BTreeMap<String, EntityId>,
    #[serde(default)]
    items: BTreeMap<String, EntityId>,
}

impl LabelMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the property ID for `label`.
    pub fn property(&self, label: &str) -> Option<EntityId> {
        self.properties.get(label).copied()
    }

    /// Returns the item ID for `label`.
    pub fn item(&self, label: &str) -> Option<EntityId> {
        self.items.get(label).copied()
    }

    /// Returns the ID of the given kind for `label`.
    pub fn get(&self, kind: EntityKind, label: &str) -> Option<EntityId> {
        match kind {
            EntityKind::Property => self.property(label),
            EntityKind::Item => self.item(label),
        }
    }

    /// Records an ID, choosing the map by the ID's kind. Returns the
    /// previous ID for the label, if any.
    pub fn insert(&mut self, label: impl Into<String>, id: EntityId) -> Option<EntityId> {
        let map = match id.kind() {
            EntityKind::Property => &mut self.properties,
            EntityKind::Item => &mut self.items,
        };
        map.insert(label.into(), id)
    }

    /// Returns every resolved property.
    pub fn properties(&self) -> &BTreeMap<String, EntityId> {
        &self.properties
    }

    /// Returns every resolved item.
    pub fn items(&self) -> &BTreeMap<String, EntityId> {
        &self.items
    }

    /// Returns the total number of entries.
    pub fn len(&self) -> usize {
        self.properties.len() + self.items.len()
    }

    /// Returns true if nothing has been resolved.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_routes_by_kind() {
        let mut map = LabelMap::new();
        assert!(map.is_empty());

        map.insert("Name", EntityId::property(7));
        map.insert("Paris", EntityId::item(90));

        assert_eq!(map.property("Name"), Some(EntityId::property(7)));
        assert_eq!(map.item("Name"), None);
        assert_eq!(map.get(EntityKind::Item, "Paris"), Some(EntityId::item(90)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn same_label_in_both_maps() {
        let mut map = LabelMap::new();
        map.insert("author", EntityId::property(50));
        map.insert("author", EntityId::item(482_980));
        assert_eq!(map.property("author"), Some(EntityId::property(50)));
        assert_eq!(map.item("author"), Some(EntityId::item(482_980)));
    }

    #[test]
    fn persisted_form() {
        let mut map = LabelMap::new();
        map.insert("Name", EntityId::property(7));
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"properties":{"Name":"P7"},"items":{}}"#);
        let back: LabelMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
