//! Label resolution.
//!
//! Labels are looked up with the `wbsearch` list module, which also returns
//! near matches. Only hits whose display text equals the label byte for
//! byte are kept; exactly one must remain.

use crate::client::Client;
use crate::error::{WikibaseError, WikibaseResult};
use crate::record::{introspect, ItemHeader, WikibaseItem};
use crate::transport::{Method, NetworkClient};
use wikibase_codec::{data_type_for, DataType, EntityId, EntityKind, FieldKind};
use wikibase_protocol::{
    create_property_request, labels_for, search_request, EntityResponse, PropertyCreateData,
    SearchResponse,
};

/// What to do when no entity has the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePolicy {
    /// Fail with [`WikibaseError::NotFound`].
    FailIfMissing,
    /// Create the entity. A new property gets the data type of the given
    /// field kind; for items the kind is ignored.
    CreateIfMissing(FieldKind),
}

impl ResolvePolicy {
    /// Maps a plain create flag to a policy for a field of `kind`.
    pub fn from_flag(create_if_missing: bool, kind: FieldKind) -> Self {
        if create_if_missing {
            Self::CreateIfMissing(kind)
        } else {
            Self::FailIfMissing
        }
    }
}

impl<C: NetworkClient> Client<C> {
    /// Returns the IDs of every property labelled exactly `label`.
    pub fn fetch_property_ids_for_label(&self, label: &str) -> WikibaseResult<Vec<EntityId>> {
        self.fetch_ids_for_label(EntityKind::Property, label)
    }

    /// Returns the IDs of every item labelled exactly `label`.
    pub fn fetch_item_ids_for_label(&self, label: &str) -> WikibaseResult<Vec<EntityId>> {
        self.fetch_ids_for_label(EntityKind::Item, label)
    }

    fn fetch_ids_for_label(&self, kind: EntityKind, label: &str) -> WikibaseResult<Vec<EntityId>> {
        let request = search_request(label, kind, &self.config().language);
        let (body, raw) = self.call::<SearchResponse>(Method::Get, request)?;

        let mut ids = Vec::new();
        for hit in body.query.wbsearch.iter().filter(|hit| hit.displaytext == label) {
            let text = hit.entity_id_text().ok_or_else(|| {
                WikibaseError::unexpected(
                    format!("expected <namespace>:<id> title, got {:?}", hit.title),
                    raw.clone(),
                )
            })?;
            let id = EntityId::parse_as(kind, text).map_err(|e| {
                WikibaseError::unexpected(format!("bad {kind} ID in search hit: {e}"), raw.clone())
            })?;
            ids.push(id);
        }

        tracing::debug!(%kind, label, matches = ids.len(), "searched for label");
        Ok(ids)
    }

    /// Resolves `label` to the ID of the single entity of `kind` carrying it
    /// and records the result in the label map.
    pub fn resolve_label(
        &mut self,
        label: &str,
        kind: EntityKind,
        policy: ResolvePolicy,
    ) -> WikibaseResult<EntityId> {
        if label.is_empty() {
            return Err(WikibaseError::precondition("label must not be empty"));
        }

        let mut ids = self.fetch_ids_for_label(kind, label)?;
        let id = match (ids.len(), policy) {
            (0, ResolvePolicy::FailIfMissing) => {
                return Err(WikibaseError::NotFound {
                    kind,
                    label: label.to_string(),
                });
            }
            (0, ResolvePolicy::CreateIfMissing(field_kind)) => match kind {
                EntityKind::Property => {
                    let data_type = data_type_for(field_kind)
                        .map_err(|e| WikibaseError::encoding(label, e))?;
                    self.create_property_with_label(label, data_type)?
                }
                EntityKind::Item => {
                    let mut header = ItemHeader::new();
                    self.create_item_instance(label, &mut header)?
                }
            },
            (1, _) => ids.remove(0),
            _ => {
                return Err(WikibaseError::Ambiguous {
                    kind,
                    label: label.to_string(),
                    ids: ids.iter().map(EntityId::to_string).collect(),
                });
            }
        };

        self.labels_mut().insert(label, id);
        Ok(id)
    }

    /// Resolves an item label, creating a bare item if allowed.
    pub fn map_item_configuration_by_label(
        &mut self,
        label: &str,
        create_if_missing: bool,
    ) -> WikibaseResult<EntityId> {
        let policy = ResolvePolicy::from_flag(create_if_missing, FieldKind::Item);
        self.resolve_label(label, EntityKind::Item, policy)
    }

    /// Resolves every property and item label a record mentions.
    ///
    /// Fields are handled in declaration order, the property tag before the
    /// item tag, and the first failure stops resolution. Labels resolved
    /// before the failure stay in the label map.
    pub fn map_property_and_item_configuration<R: WikibaseItem + ?Sized>(
        &mut self,
        record: &R,
        create_if_missing: bool,
    ) -> WikibaseResult<()> {
        let info = introspect(record)?;
        for field in info.fields() {
            if let Some(property) = &field.property {
                let policy = ResolvePolicy::from_flag(create_if_missing, property.kind);
                self.resolve_label(property.label, EntityKind::Property, policy)?;
            }
            if let Some(item) = field.item {
                self.map_item_configuration_by_label(item, create_if_missing)?;
            }
        }
        Ok(())
    }

    /// Creates a property with the given label and data type.
    pub fn create_property_with_label(
        &self,
        label: &str,
        data_type: DataType,
    ) -> WikibaseResult<EntityId> {
        if label.is_empty() {
            return Err(WikibaseError::precondition(
                "property label must not be empty",
            ));
        }

        let data = PropertyCreateData {
            labels: labels_for(&self.config().language, label),
            datatype: data_type,
        };
        let token = self.edit_token()?;
        let request = create_property_request(&token, &data, self.config().bot_edits)?;
        let (body, raw) = self.call::<EntityResponse>(Method::Post, request)?;

        if !body.success {
            return Err(WikibaseError::unexpected(
                format!("success flag not set creating property {label:?}"),
                raw,
            ));
        }
        let Some(entity) = body.entity else {
            return Err(WikibaseError::unexpected("no entity in reply", raw));
        };
        let id = EntityId::parse_as(EntityKind::Property, &entity.id).map_err(|e| {
            WikibaseError::unexpected(format!("created property has bad ID: {e}"), raw.clone())
        })?;

        tracing::info!(%id, label, %data_type, "created property");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ScriptedClient;

    fn search(hits: &[(&str, &str)]) -> String {
        let hits: Vec<_> = hits
            .iter()
            .map(|(title, text)| serde_json::json!({"ns": 120, "title": title, "pageid": 1, "displaytext": text}))
            .collect();
        serde_json::json!({"batchcomplete": "", "query": {"wbsearch": hits}}).to_string()
    }

    #[test]
    fn exact_match_filter() {
        let network = ScriptedClient::new();
        network.push_response(search(&[
            ("Property:P7", "Name"),
            ("Property:P8", "Name "),
            ("Property:P9", "name"),
        ]));
        let client = Client::new(&network);

        let ids = client.fetch_property_ids_for_label("Name").unwrap();
        assert_eq!(ids, vec![EntityId::property(7)]);

        let call = network.last_call().unwrap();
        assert_eq!(call.args["wbstype"], "property");
        assert_eq!(call.args["wbslanguage"], "en");
    }

    #[test]
    fn malformed_title_is_unexpected() {
        let network = ScriptedClient::new();
        network.push_response(search(&[("P7", "Name")]));
        let client = Client::new(&network);
        assert!(matches!(
            client.fetch_property_ids_for_label("Name"),
            Err(WikibaseError::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn resolve_single_match() {
        let network = ScriptedClient::new();
        network.push_response(search(&[("Item:Q42", "Douglas")]));
        let mut client = Client::new(&network);

        let id = client
            .resolve_label("Douglas", EntityKind::Item, ResolvePolicy::FailIfMissing)
            .unwrap();
        assert_eq!(id, EntityId::item(42));
        assert_eq!(client.labels().item("Douglas"), Some(id));
    }

    #[test]
    fn resolve_not_found() {
        let network = ScriptedClient::new();
        network.push_response(search(&[("Property:P3", "Named")]));
        let mut client = Client::new(&network);

        let err = client
            .resolve_label("Name", EntityKind::Property, ResolvePolicy::FailIfMissing)
            .unwrap_err();
        assert!(matches!(err, WikibaseError::NotFound { kind: EntityKind::Property, .. }));
        assert!(client.labels().is_empty());
        assert_eq!(network.invocation_count(), 1);
    }

    #[test]
    fn resolve_ambiguous_never_picks() {
        let network = ScriptedClient::new();
        network.push_response(search(&[("Item:Q1", "Paris"), ("Item:Q2", "Paris")]));
        let mut client = Client::new(&network);

        let err = client
            .resolve_label(
                "Paris",
                EntityKind::Item,
                ResolvePolicy::CreateIfMissing(FieldKind::Item),
            )
            .unwrap_err();
        match err {
            WikibaseError::Ambiguous { ids, .. } => assert_eq!(ids, ["Q1", "Q2"]),
            other => panic!("expected ambiguity, got {other}"),
        }
        assert!(client.labels().item("Paris").is_none());
    }

    #[test]
    fn create_missing_property() {
        let network = ScriptedClient::new();
        network.push_response(search(&[]));
        network.push_response(r#"{"batchcomplete":"","query":{"tokens":{"csrftoken":"tok"}}}"#);
        network.push_response(r#"{"entity":{"id":"P21","type":"property"},"success":1}"#);
        let mut client = Client::new(&network);

        let id = client
            .resolve_label(
                "Born",
                EntityKind::Property,
                ResolvePolicy::CreateIfMissing(FieldKind::Time),
            )
            .unwrap();
        assert_eq!(id, EntityId::property(21));
        assert_eq!(client.labels().property("Born"), Some(id));

        let create = network.last_call().unwrap();
        assert_eq!(create.method, Method::Post);
        assert_eq!(create.args["new"], "property");
        assert_eq!(create.args["token"], "tok");
        assert_eq!(create.args["bot"], "1");
        assert!(create.args["data"].contains(r#""datatype":"time""#));
    }

    #[test]
    fn unsupported_kind_fails_before_creating() {
        let network = ScriptedClient::new();
        network.push_response(search(&[]));
        let mut client = Client::new(&network);

        let err = client
            .resolve_label(
                "Score",
                EntityKind::Property,
                ResolvePolicy::CreateIfMissing(FieldKind::Unsupported("f64")),
            )
            .unwrap_err();
        assert!(matches!(err, WikibaseError::Encoding { .. }));
        assert_eq!(network.invocation_count(), 1);
    }

    #[test]
    fn created_property_with_item_id_is_rejected() {
        let network = ScriptedClient::new();
        network.push_response(r#"{"entity":{"id":"Q21"},"success":1}"#);
        let client = Client::new(&network).with_edit_token("tok");

        assert!(matches!(
            client.create_property_with_label("Born", DataType::Time),
            Err(WikibaseError::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn empty_label_is_precondition() {
        let network = ScriptedClient::new();
        let mut client = Client::new(&network);
        assert!(matches!(
            client.resolve_label("", EntityKind::Item, ResolvePolicy::FailIfMissing),
            Err(WikibaseError::Precondition(_))
        ));
        assert_eq!(network.invocation_count(), 0);
    }
}
