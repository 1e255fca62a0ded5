//! # Wikibase Protocol
//!
//! Request and response types for the MediaWiki action API and the
//! Wikibase entity and claim modules.
//!
//! This crate provides:
//! - Builders for the argument sets of each API call
//! - `wbeditentity` data payloads for new items and properties
//! - Typed response bodies, decoded with the API's `error` precedence rule
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod data;
mod error;
mod request;
mod response;

pub use data::{labels_for, ClaimCreate, ItemCreateData, LabelValue, PropertyCreateData, SnakCreate};
pub use error::{ApiError, ProtocolError, ProtocolResult};
pub use request::{
    article_edit_request, create_claim_request, create_item_request, create_property_request,
    protect_request, search_request, set_claim_value_request, token_request, ApiArgs, ApiRequest,
};
pub use response::{
    decode_reply, ArticleEdit, ArticleEditResponse, ClaimInfo, ClaimResponse, EntityBody,
    EntityResponse, PageInfo, ProtectDetail, ProtectResponse, Protection, Reply, SearchHit,
    SearchQuery, SearchResponse, SnakInfo, TokenQuery, TokenResponse, Tokens,
};
