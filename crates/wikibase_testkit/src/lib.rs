//! # Wikibase Testkit
//!
//! Test utilities for the Wikibase sync client.
//!
//! This crate provides:
//! - Canned server replies for [`ScriptedClient`](wikibase_sync::ScriptedClient)
//! - Sample records implementing [`WikibaseItem`](wikibase_sync::WikibaseItem)
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use wikibase_testkit::prelude::*;
//! use wikibase_sync::{Client, ScriptedClient};
//!
//! let network = ScriptedClient::new();
//! network.push_response(token_response("abc"));
//! let client = Client::new(&network);
//! assert_eq!(client.edit_token().unwrap(), "abc");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod records;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::records::*;
}

pub use fixtures::*;
pub use generators::*;
pub use records::*;
