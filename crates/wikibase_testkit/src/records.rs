//! Sample records.

use chrono::{DateTime, TimeZone, Utc};
use wikibase_codec::ItemRef;
use wikibase_sync::{FieldDescriptor, ItemHeader, WikibaseItem};

/// A record with one text property, `Name`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    /// Sync state.
    pub header: ItemHeader,
    /// Mapped to `Name`.
    pub name: String,
}

impl Person {
    /// Creates a person that does not exist remotely.
    pub fn new(name: &str) -> Self {
        Self {
            header: ItemHeader::new(),
            name: name.to_string(),
        }
    }
}

impl WikibaseItem for Person {
    fn header(&self) -> &ItemHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ItemHeader {
        &mut self.header
    }

    fn fields(&self) -> Vec<FieldDescriptor<'_>> {
        vec![FieldDescriptor::property("Name", &self.name)]
    }
}

/// A record using every supported field type. It also names the
/// `Scholarly article` item.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Sync state.
    pub header: ItemHeader,
    /// Mapped to `Title`.
    pub title: String,
    /// Mapped to `Pages`.
    pub pages: i64,
    /// Mapped to `Published`.
    pub published: DateTime<Utc>,
    /// Mapped to `Journal`, which must also exist as an item.
    pub journal: ItemRef,
    /// Mapped to `Retracted`, omitted when the item is created.
    pub retracted: Option<String>,
}

impl Article {
    /// A sample article published in `journal`.
    pub fn sample(journal: &str) -> Self {
        Self {
            header: ItemHeader::new(),
            title: "On the Electrodynamics of Moving Bodies".to_string(),
            pages: 31,
            published: Utc
                .with_ymd_and_hms(1905, 6, 30, 0, 0, 0)
                .single()
                .expect("Invalid date"),
            journal: ItemRef::new(journal),
            retracted: None,
        }
    }
}

impl WikibaseItem for Article {
    fn header(&self) -> &ItemHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ItemHeader {
        &mut self.header
    }

    fn fields(&self) -> Vec<FieldDescriptor<'_>> {
        vec![
            FieldDescriptor::property("Title", &self.title),
            FieldDescriptor::property("Pages", &self.pages),
            FieldDescriptor::property("Published", &self.published),
            FieldDescriptor::property("Journal", &self.journal).with_item("Annalen der Physik"),
            FieldDescriptor::property("Retracted,omitoncreate", &self.retracted),
            FieldDescriptor::item("Scholarly article"),
        ]
    }
}

/// A record with a field type that has no Wikibase encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurement {
    /// Sync state.
    pub header: ItemHeader,
    /// Mapped to `Value`; `f64` cannot be encoded.
    pub value: f64,
}

impl WikibaseItem for Measurement {
    fn header(&self) -> &ItemHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ItemHeader {
        &mut self.header
    }

    fn fields(&self) -> Vec<FieldDescriptor<'_>> {
        vec![FieldDescriptor::property("Value", &self.value)]
    }
}
