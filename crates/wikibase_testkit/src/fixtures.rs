//! Canned API replies and helpers for scripted clients.
//!
//! Each function returns a reply body in the shape a Wikibase server sends,
//! ready for [`ScriptedClient::push_response`].

use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;
use wikibase_sync::{Client, OAuthInformation, ScriptedClient};

/// Reply to an edit token query.
pub fn token_response(token: &str) -> String {
    json!({"batchcomplete": "", "query": {"tokens": {"csrftoken": token}}}).to_string()
}

/// Reply to an edit token query that carries no token.
pub fn token_response_without_token() -> String {
    json!({"batchcomplete": "", "query": {"tokens": {}}}).to_string()
}

/// Reply to a label search. Each hit is `(title, displaytext)`, e.g.
/// `("Property:P7", "Name")`.
pub fn search_response(hits: &[(&str, &str)]) -> String {
    let hits: Vec<Value> = hits
        .iter()
        .enumerate()
        .map(|(n, (title, text))| {
            json!({"ns": 120, "title": title, "pageid": n + 1, "displaytext": text})
        })
        .collect();
    json!({"batchcomplete": "", "query": {"wbsearch": hits}}).to_string()
}

/// Reply to item creation with no claims.
pub fn created_item_response(id: &str) -> String {
    created_item_with_claims(id, &[])
}

/// Reply to item creation. Each claim is `(property, guid)`.
pub fn created_item_with_claims(id: &str, claims: &[(&str, &str)]) -> String {
    let mut by_property = serde_json::Map::new();
    for (property, guid) in claims {
        let entry = by_property
            .entry(property.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(list) = entry {
            list.push(claim_json(property, guid));
        }
    }
    // PHP sends an empty object as an empty list.
    let claims = if by_property.is_empty() {
        json!([])
    } else {
        Value::Object(by_property)
    };
    json!({
        "entity": {
            "id": id,
            "type": "item",
            "labels": [],
            "claims": claims,
            "lastrevid": 100
        },
        "success": 1
    })
    .to_string()
}

/// Reply to property creation.
pub fn created_property_response(id: &str, datatype: &str) -> String {
    json!({
        "entity": {"id": id, "type": "property", "datatype": datatype, "claims": [], "lastrevid": 101},
        "success": 1
    })
    .to_string()
}

/// Reply to claim creation.
pub fn claim_created_response(property: &str, guid: &str) -> String {
    json!({
        "pageinfo": {"lastrevid": 102},
        "success": 1,
        "claim": claim_json(property, guid)
    })
    .to_string()
}

/// Reply to a claim value update.
pub fn claim_updated_response(property: &str, guid: &str) -> String {
    claim_created_response(property, guid)
}

/// Reply with a server-reported error.
pub fn api_error(code: &str, info: &str) -> String {
    json!({"error": {"code": code, "info": info, "*": "See api.php for usage."}}).to_string()
}

/// Reply to an article edit.
pub fn article_edit_response(title: &str, page_id: u64) -> String {
    json!({
        "edit": {
            "result": "Success",
            "pageid": page_id,
            "title": title,
            "contentmodel": "wikitext",
            "oldrevid": 0,
            "newrevid": 103,
            "newtimestamp": "2018-06-01T10:00:00Z"
        }
    })
    .to_string()
}

/// Reply to a protect request.
pub fn protect_response(title: &str) -> String {
    json!({
        "protect": {
            "title": title,
            "reason": "",
            "protections": [{"edit": "sysop", "expiry": "infinite"}]
        }
    })
    .to_string()
}

fn claim_json(property: &str, guid: &str) -> Value {
    json!({
        "id": guid,
        "mainsnak": {"snaktype": "value", "property": property, "hash": "0000"},
        "type": "statement",
        "rank": "normal"
    })
}

/// A client over `network` with `token` as its edit token.
pub fn client_with_token<'a>(network: &'a ScriptedClient, token: &str) -> Client<&'a ScriptedClient> {
    Client::new(network).with_edit_token(token)
}

/// Writes `info` to a temporary JSON file. The file is removed when the
/// returned handle is dropped.
pub fn oauth_file(info: &OAuthInformation) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    let json = serde_json::to_string(info).expect("Failed to encode OAuth information");
    file.write_all(json.as_bytes())
        .expect("Failed to write OAuth information");
    file
}
