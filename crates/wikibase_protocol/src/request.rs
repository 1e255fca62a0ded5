//! Action API request builders.
//!
//! Every call to the API is a flat set of string arguments. The builders
//! here produce those argument sets; sending them (and adding
//! `format=json`) is the transport's job.

use crate::data::{ItemCreateData, PropertyCreateData};
use crate::error::{ProtocolError, ProtocolResult};
use std::collections::BTreeMap;
use wikibase_codec::{EntityId, EntityKind, Snak};

/// Arguments of a single API call.
pub type ApiArgs = BTreeMap<String, String>;

/// A single API call under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    args: ApiArgs,
}

impl ApiRequest {
    /// Starts a request for the given `action`.
    pub fn new(action: &str) -> Self {
        let mut args = ApiArgs::new();
        args.insert("action".to_string(), action.to_string());
        Self { args }
    }

    /// Adds an argument.
    pub fn arg(mut self, key: &str, value: impl Into<String>) -> Self {
        self.args.insert(key.to_string(), value.into());
        self
    }

    /// Marks the edit as a bot edit when `enabled` is set.
    pub fn bot(self, enabled: bool) -> Self {
        if enabled {
            self.arg("bot", "1")
        } else {
            self
        }
    }

    /// Adds `snaktype` and, when there is a value, `value`.
    pub fn snak(self, snak: &Snak) -> ProtocolResult<Self> {
        let request = self.arg("snaktype", snak.snak_type());
        match snak.data_value() {
            Some(value) => {
                let json = value
                    .value_json()
                    .map_err(|e| ProtocolError::encode(e.to_string()))?;
                Ok(request.arg("value", json))
            }
            None => Ok(request),
        }
    }

    /// Returns the `action` argument.
    pub fn action(&self) -> &str {
        self.args.get("action").map_or("", String::as_str)
    }

    /// Returns the arguments.
    pub fn args(&self) -> &ApiArgs {
        &self.args
    }

    /// Consumes the request, returning its arguments.
    pub fn into_args(self) -> ApiArgs {
        self.args
    }
}

/// `action=query&meta=tokens`
pub fn token_request() -> ApiRequest {
    ApiRequest::new("query").arg("meta", "tokens")
}

/// Label search scoped to one entity kind.
pub fn search_request(label: &str, kind: EntityKind, language: &str) -> ApiRequest {
    ApiRequest::new("query")
        .arg("list", "wbsearch")
        .arg("wbssearch", label)
        .arg("wbstype", kind.as_str())
        .arg("wbslanguage", language)
}

/// Creates a new item with labels and claims in one edit.
pub fn create_item_request(token: &str, data: &ItemCreateData) -> ProtocolResult<ApiRequest> {
    let json = serde_json::to_string(data).map_err(|e| ProtocolError::encode(e.to_string()))?;
    Ok(ApiRequest::new("wbeditentity")
        .arg("token", token)
        .arg("new", EntityKind::Item.as_str())
        .arg("data", json))
}

/// Creates a new property.
pub fn create_property_request(
    token: &str,
    data: &PropertyCreateData,
    bot: bool,
) -> ProtocolResult<ApiRequest> {
    let json = serde_json::to_string(data).map_err(|e| ProtocolError::encode(e.to_string()))?;
    Ok(ApiRequest::new("wbeditentity")
        .arg("token", token)
        .arg("new", EntityKind::Property.as_str())
        .arg("data", json)
        .bot(bot))
}

/// Adds a claim to an entity.
pub fn create_claim_request(
    token: &str,
    entity: EntityId,
    property: EntityId,
    snak: &Snak,
    bot: bool,
) -> ProtocolResult<ApiRequest> {
    ApiRequest::new("wbcreateclaim")
        .arg("token", token)
        .arg("entity", entity.to_string())
        .arg("property", property.to_string())
        .bot(bot)
        .snak(snak)
}

/// Replaces the value of an existing claim.
pub fn set_claim_value_request(
    token: &str,
    claim: &str,
    snak: &Snak,
    bot: bool,
) -> ProtocolResult<ApiRequest> {
    ApiRequest::new("wbsetclaimvalue")
        .arg("token", token)
        .arg("claim", claim)
        .bot(bot)
        .snak(snak)
}

/// Creates or replaces the text of a wiki article.
pub fn article_edit_request(token: &str, title: &str, body: &str) -> ApiRequest {
    ApiRequest::new("edit")
        .arg("token", token)
        .arg("title", format!("article:{title}"))
        .arg("text", body)
}

/// Restricts editing of a page to sysops. `key` is `title` or `pageid`.
pub fn protect_request(token: &str, key: &str, value: &str) -> ApiRequest {
    ApiRequest::new("protect")
        .arg("token", token)
        .arg(key, value)
        .arg("protections", "edit=sysop")
        .arg("expiry", "never")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{labels_for, ClaimCreate};
    use wikibase_codec::{encode_integer, encode_text, DataType};

    #[test]
    fn token_request_args() {
        let req = token_request();
        assert_eq!(req.action(), "query");
        assert_eq!(req.args()["meta"], "tokens");
    }

    #[test]
    fn search_request_args() {
        let req = search_request("Name", EntityKind::Property, "en");
        let args = req.into_args();
        assert_eq!(args["list"], "wbsearch");
        assert_eq!(args["wbssearch"], "Name");
        assert_eq!(args["wbstype"], "property");
        assert_eq!(args["wbslanguage"], "en");
    }

    #[test]
    fn create_claim_with_value() {
        let req = create_claim_request(
            "tok",
            EntityId::item(23),
            EntityId::property(14),
            &encode_text("blah"),
            true,
        )
        .unwrap();
        let args = req.args();
        assert_eq!(args["action"], "wbcreateclaim");
        assert_eq!(args["entity"], "Q23");
        assert_eq!(args["property"], "P14");
        assert_eq!(args["snaktype"], "value");
        assert_eq!(args["value"], "\"blah\"");
        assert_eq!(args["bot"], "1");
    }

    #[test]
    fn novalue_claim_has_no_value_arg() {
        let req = set_claim_value_request("tok", "Q1$abc", &Snak::NoValue, false).unwrap();
        let args = req.args();
        assert_eq!(args["snaktype"], "novalue");
        assert!(!args.contains_key("value"));
        assert!(!args.contains_key("bot"));
    }

    #[test]
    fn create_item_carries_data() {
        let data = ItemCreateData {
            labels: labels_for("en", "Alice"),
            claims: vec![ClaimCreate::new(EntityId::property(7), encode_integer(3))],
        };
        let req = create_item_request("tok", &data).unwrap();
        let args = req.args();
        assert_eq!(args["new"], "item");
        assert!(args["data"].contains("\"Alice\""));
        assert!(args["data"].contains("\"P7\""));
        assert!(!args.contains_key("bot"));
    }

    #[test]
    fn create_property_is_bot_edit() {
        let data = PropertyCreateData {
            labels: labels_for("en", "Name"),
            datatype: DataType::String,
        };
        let req = create_property_request("tok", &data, true).unwrap();
        assert_eq!(req.args()["new"], "property");
        assert_eq!(req.args()["bot"], "1");
        assert!(req.args()["data"].contains("\"datatype\":\"string\""));
    }

    #[test]
    fn page_requests() {
        let edit = article_edit_request("tok", "Intro", "hello");
        assert_eq!(edit.args()["title"], "article:Intro");
        let protect = protect_request("tok", "pageid", "12");
        assert_eq!(protect.args()["pageid"], "12");
        assert_eq!(protect.args()["protections"], "edit=sysop");
        assert_eq!(protect.args()["expiry"], "never");
    }
}
