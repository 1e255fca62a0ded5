//! # Wikibase Sync
//!
//! Declarative mapping of Rust records onto Wikibase items.
//!
//! This crate provides:
//! - [`WikibaseItem`], implemented by records that mirror an item
//! - Label resolution for properties and items, with optional creation
//! - Item creation and claim upload driven by a record's fields
//! - A per-session edit token shared safely between threads
//! - Article edit and page protection helpers
//! - The [`NetworkClient`] transport abstraction
//!
//! ## Workflow
//!
//! 1. Resolve the record's labels with
//!    [`Client::map_property_and_item_configuration`]
//! 2. Create the item with [`Client::create_item_instance`]
//! 3. Upload or refresh claims with [`Client::upload_claims_for_item`]
//! 4. Persist the record's [`ItemHeader`] so later runs skip what exists
//!
//! ## Key Invariants
//!
//! - Labels resolve only on an exact, unique match
//! - An item ID is never overwritten once recorded
//! - At most one claim per property per item
//! - At most one edit token fetch per session
//! - Errors are never retried

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod entity;
mod error;
mod labels;
mod pages;
mod record;
mod resolver;
mod session;
mod transport;

pub use client::Client;
pub use config::{
    AccessToken, ClientConfig, ConsumerInformation, OAuthEndpoints, OAuthInformation,
    DEFAULT_LANGUAGE,
};
pub use error::{WikibaseError, WikibaseResult};
pub use labels::LabelMap;
pub use record::{
    introspect, AnnotatedField, FieldDescriptor, Introspection, ItemHeader, Modifiers,
    PropertyField, PropertyTag, WikibaseItem,
};
pub use resolver::ResolvePolicy;
pub use session::EditTokenCache;
pub use transport::{Method, NetworkClient, RecordedCall, ScriptedClient};

pub use wikibase_codec::{
    ClaimField, DataType, DataValue, EntityId, EntityKind, FieldKind, FieldValue, ItemRef, Snak,
};
pub use wikibase_protocol::{ApiArgs, ApiError};
