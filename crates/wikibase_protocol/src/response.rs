//! Action API response shapes.
//!
//! Only the fields the client reads are modelled; everything else is
//! ignored. A top-level `error` object takes precedence over the rest of
//! the body, see [`decode_reply`].

use crate::error::{ApiError, ProtocolError, ProtocolResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// A decoded API reply.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    /// The server did not report an error.
    Success {
        /// Typed body.
        body: T,
        /// The body as decoded JSON, kept for diagnostics.
        raw: Value,
    },
    /// The server reported an error.
    Failure(ApiError),
}

/// Decodes a response body.
///
/// If the body carries an `error` object it is returned as
/// [`Reply::Failure`] without looking at any other field.
pub fn decode_reply<T: DeserializeOwned>(bytes: &[u8]) -> ProtocolResult<Reply<T>> {
    let raw: Value =
        serde_json::from_slice(bytes).map_err(|e| ProtocolError::decode(e.to_string()))?;

    if let Some(error) = raw.get("error").filter(|e| !e.is_null()) {
        let error: ApiError = serde_json::from_value(error.clone())
            .map_err(|e| ProtocolError::decode(format!("malformed error object: {e}")))?;
        return Ok(Reply::Failure(error));
    }

    let body = serde_json::from_value(raw.clone())
        .map_err(|e| ProtocolError::decode(e.to_string()))?;
    Ok(Reply::Success { body, raw })
}

/// Reply to `action=query&meta=tokens`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    /// Query result.
    #[serde(default)]
    pub query: TokenQuery,
}

/// The `query` section of a token reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenQuery {
    /// Tokens by type.
    #[serde(default)]
    pub tokens: Tokens,
}

/// Tokens returned by the server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tokens {
    /// The edit token.
    pub csrftoken: Option<String>,
}

/// Reply to a `list=wbsearch` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Query result.
    #[serde(default)]
    pub query: SearchQuery,
}

/// The `query` section of a search reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Matches, possibly inexact.
    #[serde(default)]
    pub wbsearch: Vec<SearchHit>,
}

/// One search match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    /// Namespace number.
    #[serde(default)]
    pub ns: i64,
    /// Page title, `<Namespace>:<ID>`.
    pub title: String,
    /// Page ID.
    #[serde(default)]
    pub pageid: u64,
    /// The label that matched.
    #[serde(default)]
    pub displaytext: String,
}

impl SearchHit {
    /// Returns the bare ID from a `<Namespace>:<ID>` title, or `None` if the
    /// title does not have exactly two parts.
    pub fn entity_id_text(&self) -> Option<&str> {
        let mut parts = self.title.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(id), None) => Some(id),
            _ => None,
        }
    }
}

/// Reply to `wbeditentity`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityResponse {
    /// The entity as stored after the edit.
    pub entity: Option<EntityBody>,
    /// Success flag.
    #[serde(default, deserialize_with = "success_flag")]
    pub success: bool,
}

/// An entity returned by `wbeditentity`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityBody {
    /// Entity ID, `Q…` or `P…`.
    #[serde(default)]
    pub id: String,
    /// Labels by language.
    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub labels: BTreeMap<String, crate::data::LabelValue>,
    /// Claims by property ID.
    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub claims: BTreeMap<String, Vec<ClaimInfo>>,
    /// `item` or `property`.
    #[serde(rename = "type", default)]
    pub entity_type: String,
    /// Revision created by the edit.
    #[serde(default)]
    pub lastrevid: u64,
}

/// A claim as reported by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimInfo {
    /// Server-assigned claim GUID.
    pub id: String,
    /// The value-bearing snak.
    pub mainsnak: SnakInfo,
    /// Always `statement`.
    #[serde(rename = "type", default)]
    pub claim_type: String,
    /// Claim rank.
    #[serde(default)]
    pub rank: String,
}

/// A snak as reported by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SnakInfo {
    /// `value`, `novalue` or `somevalue`.
    pub snaktype: String,
    /// Property ID.
    pub property: String,
    /// Content hash.
    #[serde(default)]
    pub hash: Option<String>,
    /// Property data type.
    #[serde(default)]
    pub datatype: Option<String>,
    /// Value, left undecoded.
    #[serde(default)]
    pub datavalue: Option<Value>,
}

/// Revision information attached to claim edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageInfo {
    /// Revision created by the edit.
    #[serde(default)]
    pub lastrevid: u64,
}

/// Reply to `wbcreateclaim` and `wbsetclaimvalue`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimResponse {
    /// Revision information.
    #[serde(default)]
    pub pageinfo: Option<PageInfo>,
    /// Success flag.
    #[serde(default, deserialize_with = "success_flag")]
    pub success: bool,
    /// The claim as stored after the edit.
    #[serde(default)]
    pub claim: Option<ClaimInfo>,
}

/// Reply to `action=edit`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleEditResponse {
    /// Edit details.
    pub edit: Option<ArticleEdit>,
}

/// Details of an article edit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleEdit {
    /// `Success` on success.
    #[serde(default)]
    pub result: String,
    /// Page ID.
    #[serde(default)]
    pub pageid: u64,
    /// Page title.
    #[serde(default)]
    pub title: String,
    /// Content model of the page.
    #[serde(default)]
    pub contentmodel: String,
    /// Previous revision.
    #[serde(default)]
    pub oldrevid: u64,
    /// New revision.
    #[serde(default)]
    pub newrevid: u64,
    /// Timestamp of the new revision.
    #[serde(default)]
    pub newtimestamp: String,
}

/// Reply to `action=protect`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProtectResponse {
    /// Protection details.
    pub protect: Option<ProtectDetail>,
}

/// Details of a protection change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProtectDetail {
    /// Page title.
    #[serde(default)]
    pub title: String,
    /// Reason given.
    #[serde(default)]
    pub reason: String,
    /// Protections now in force.
    #[serde(default)]
    pub protections: Vec<Protection>,
}

/// One protection entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Protection {
    /// Edit restriction, if set.
    pub edit: Option<String>,
    /// Move restriction, if set.
    #[serde(rename = "move")]
    pub move_level: Option<String>,
    /// Expiry.
    #[serde(default)]
    pub expiry: String,
}

/// Accepts `1`/`0`, `true`/`false`, or the empty string MediaWiki uses for
/// boolean flags in its older output format.
fn success_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => s.is_empty() || s == "1",
        _ => false,
    })
}

/// PHP encodes an empty associative array as `[]`; treat that as an empty map.
fn map_or_empty_list<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(BTreeMap::new()),
        Value::Array(items) if items.is_empty() => Ok(BTreeMap::new()),
        other => serde_json::from_value(other).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_takes_precedence() {
        let body = br#"{"error":{"code":"permissiondenied","info":"nope"},"success":1}"#;
        match decode_reply::<ClaimResponse>(body).unwrap() {
            Reply::Failure(e) => assert_eq!(e, ApiError::new("permissiondenied", "nope")),
            Reply::Success { .. } => panic!("error object was ignored"),
        }
    }

    #[test]
    fn invalid_json_is_decode_error() {
        let err = decode_reply::<TokenResponse>(b"<html>").unwrap_err();
        assert!(matches!(err, ProtocolError::Decode { .. }));
    }

    #[test]
    fn token_response() {
        let body = br#"{"batchcomplete":"","query":{"tokens":{"csrftoken":"abc+\\"}}}"#;
        match decode_reply::<TokenResponse>(body).unwrap() {
            Reply::Success { body, .. } => {
                assert_eq!(body.query.tokens.csrftoken.as_deref(), Some("abc+\\"));
            }
            Reply::Failure(e) => panic!("unexpected failure {e}"),
        }
    }

    #[test]
    fn search_hit_title_split() {
        let hit = SearchHit {
            ns: 120,
            title: "Property:P7".into(),
            pageid: 9,
            displaytext: "Name".into(),
        };
        assert_eq!(hit.entity_id_text(), Some("P7"));

        let bare = SearchHit {
            title: "P7".into(),
            ..hit.clone()
        };
        assert_eq!(bare.entity_id_text(), None);

        let extra = SearchHit {
            title: "a:b:c".into(),
            ..hit
        };
        assert_eq!(extra.entity_id_text(), None);
    }

    #[test]
    fn entity_response_with_claims() {
        let body = br#"{
            "entity": {
                "id": "Q7924",
                "type": "item",
                "labels": {"en": {"language": "en", "value": "foo"}},
                "claims": {
                    "P19": [{
                        "id": "Q7924$A3F8",
                        "mainsnak": {"snaktype": "value", "property": "P19",
                                     "datavalue": {"type": "string", "value": "wibble"}},
                        "rank": "normal",
                        "type": "statement"
                    }]
                },
                "lastrevid": 78256
            },
            "success": 1
        }"#;
        let Reply::Success { body, .. } = decode_reply::<EntityResponse>(body).unwrap() else {
            panic!("expected success");
        };
        assert!(body.success);
        let entity = body.entity.unwrap();
        assert_eq!(entity.id, "Q7924");
        assert_eq!(entity.claims["P19"][0].id, "Q7924$A3F8");
        assert_eq!(entity.labels["en"].value, "foo");
    }

    #[test]
    fn empty_php_arrays_become_empty_maps() {
        let body = br#"{"entity":{"id":"Q11","labels":[],"claims":[]},"success":1}"#;
        let Reply::Success { body, .. } = decode_reply::<EntityResponse>(body).unwrap() else {
            panic!("expected success");
        };
        let entity = body.entity.unwrap();
        assert!(entity.claims.is_empty());
        assert!(entity.labels.is_empty());
    }

    #[test]
    fn missing_success_is_false() {
        let Reply::Success { body, .. } = decode_reply::<ClaimResponse>(b"{}").unwrap() else {
            panic!("expected success");
        };
        assert!(!body.success);
        assert!(body.claim.is_none());
    }
}
