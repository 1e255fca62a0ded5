//! Entity payloads sent as the `data` argument of `wbeditentity`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wikibase_codec::{DataType, DataValue, EntityId, Snak};

/// A label in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelValue {
    /// Language tag.
    pub language: String,
    /// Label text.
    pub value: String,
}

/// Builds a single-language label map.
pub fn labels_for(language: &str, value: &str) -> BTreeMap<String, LabelValue> {
    let mut labels = BTreeMap::new();
    labels.insert(
        language.to_string(),
        LabelValue {
            language: language.to_string(),
            value: value.to_string(),
        },
    );
    labels
}

/// The main snak of a claim being created with its entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnakCreate {
    /// `value` or `novalue`.
    pub snaktype: &'static str,
    /// Property the claim is about.
    pub property: EntityId,
    /// Value, absent for `novalue`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datavalue: Option<DataValue>,
}

/// A claim created together with its entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimCreate {
    /// The value-bearing snak.
    pub mainsnak: SnakCreate,
    /// Claim rank.
    pub rank: &'static str,
    /// Always `statement`.
    #[serde(rename = "type")]
    pub claim_type: &'static str,
}

impl ClaimCreate {
    /// Creates a normal-rank statement for `property`.
    pub fn new(property: EntityId, snak: Snak) -> Self {
        let snaktype = snak.snak_type();
        let datavalue = match snak {
            Snak::Value(value) => Some(value),
            Snak::NoValue => None,
        };
        Self {
            mainsnak: SnakCreate {
                snaktype,
                property,
                datavalue,
            },
            rank: "normal",
            claim_type: "statement",
        }
    }
}

/// Data for a new item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemCreateData {
    /// Labels by language.
    pub labels: BTreeMap<String, LabelValue>,
    /// Claims to create with the item.
    pub claims: Vec<ClaimCreate>,
}

/// Data for a new property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyCreateData {
    /// Labels by language.
    pub labels: BTreeMap<String, LabelValue>,
    /// Data type of the property's values.
    pub datatype: DataType,
}
