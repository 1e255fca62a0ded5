//! Item creation and claim upload.

use crate::client::Client;
use crate::error::{WikibaseError, WikibaseResult};
use crate::record::{introspect, WikibaseItem};
use crate::transport::{Method, NetworkClient};
use wikibase_codec::{encode_value, EntityId, EntityKind, Snak};
use wikibase_protocol::{
    create_claim_request, create_item_request, labels_for, set_claim_value_request, ClaimCreate,
    ClaimResponse, EntityResponse, ItemCreateData,
};

/// A field ready for upload.
struct PlannedClaim {
    label: String,
    property: EntityId,
    snak: Snak,
}

impl<C: NetworkClient> Client<C> {
    /// Creates a new item labelled `label`, together with a claim for every
    /// property field not tagged `omitoncreate`, and records the new item ID
    /// and claim GUIDs in the record's header.
    ///
    /// Every property the record mentions must already be in the label map.
    /// Nothing is sent if any field fails to encode.
    pub fn create_item_instance<R: WikibaseItem + ?Sized>(
        &self,
        label: &str,
        record: &mut R,
    ) -> WikibaseResult<EntityId> {
        if label.is_empty() {
            return Err(WikibaseError::precondition("item label must not be empty"));
        }
        if let Some(id) = record.header().id() {
            return Err(WikibaseError::precondition(format!(
                "record already refers to item {id}"
            )));
        }

        let mut claims = Vec::new();
        for field in introspect(&*record)?.properties() {
            if field.modifiers.omit_on_create {
                continue;
            }
            let property = self.property_for_label(field.label)?;
            let snak =
                encode_value(&field.value).map_err(|e| WikibaseError::encoding(field.label, e))?;
            claims.push(ClaimCreate::new(property, snak));
        }

        let data = ItemCreateData {
            labels: labels_for(&self.config().language, label),
            claims,
        };
        let token = self.edit_token()?;
        let request = create_item_request(&token, &data)?;
        let (body, raw) = self.call::<EntityResponse>(Method::Post, request)?;

        if !body.success {
            return Err(WikibaseError::unexpected(
                format!("success flag not set creating item {label:?}"),
                raw,
            ));
        }
        let Some(entity) = body.entity else {
            return Err(WikibaseError::unexpected("no entity in reply", raw));
        };
        let id = EntityId::parse_as(EntityKind::Item, &entity.id).map_err(|e| {
            WikibaseError::unexpected(format!("created item has bad ID: {e}"), raw.clone())
        })?;

        // The item exists now, so its ID is kept even if the claims below
        // turn out to be malformed.
        record.header_mut().set_id(id);
        tracing::info!(%id, label, claims = data.claims.len(), "created item");

        for (property, created) in &entity.claims {
            let property = EntityId::parse_as(EntityKind::Property, property).map_err(|e| {
                WikibaseError::unexpected(format!("bad property in created claims: {e}"), raw.clone())
            })?;
            match created.as_slice() {
                [] => {}
                [claim] => record.header_mut().record_claim(property, claim.id.clone()),
                _ => {
                    return Err(WikibaseError::unexpected(
                        format!(
                            "{} claims created for {property} on {id}, expected one",
                            created.len()
                        ),
                        raw,
                    ));
                }
            }
        }

        Ok(id)
    }

    /// Uploads the record's property fields as claims on its item.
    ///
    /// Fields with no recorded claim get a new claim and its GUID is
    /// recorded. Fields with a recorded claim are skipped, or have their
    /// value replaced when `allow_refresh` is set. The first failure stops
    /// the upload; GUIDs recorded before it are kept.
    pub fn upload_claims_for_item<R: WikibaseItem + ?Sized>(
        &self,
        record: &mut R,
        allow_refresh: bool,
    ) -> WikibaseResult<()> {
        let Some(entity) = record.header().id() else {
            return Err(WikibaseError::precondition(
                "record has no item ID; create the item first",
            ));
        };

        // Values are borrowed from the record, so they are resolved and
        // encoded up front, and errors are raised when their field is
        // reached.
        let planned: Vec<WikibaseResult<PlannedClaim>> = introspect(&*record)?
            .properties()
            .map(|field| -> WikibaseResult<PlannedClaim> {
                let property = self.property_for_label(field.label)?;
                let snak = encode_value(&field.value)
                    .map_err(|e| WikibaseError::encoding(field.label, e))?;
                Ok(PlannedClaim {
                    label: field.label.to_string(),
                    property,
                    snak,
                })
            })
            .collect();

        for claim in planned {
            let PlannedClaim {
                label,
                property,
                snak,
            } = claim?;
            let context = |source: WikibaseError| WikibaseError::ClaimFailed {
                label: label.clone(),
                property,
                entity,
                source: Box::new(source),
            };

            match record.header().claim_id(property).map(str::to_string) {
                None => {
                    let guid = self
                        .create_claim(entity, property, &snak)
                        .map_err(context)?;
                    record.header_mut().record_claim(property, guid);
                }
                Some(guid) if allow_refresh => {
                    self.update_claim(&guid, &snak).map_err(context)?;
                }
                Some(_) => {
                    tracing::debug!(%entity, %property, "claim already uploaded, skipping");
                }
            }
        }

        Ok(())
    }

    /// Adds a claim to an entity and returns the new claim's GUID.
    pub fn create_claim(
        &self,
        entity: EntityId,
        property: EntityId,
        snak: &Snak,
    ) -> WikibaseResult<String> {
        if property.kind() != EntityKind::Property {
            return Err(WikibaseError::precondition(format!(
                "{property} is not a property"
            )));
        }

        let token = self.edit_token()?;
        let request =
            create_claim_request(&token, entity, property, snak, self.config().bot_edits)?;
        let (body, raw) = self.call::<ClaimResponse>(Method::Post, request)?;

        if !body.success {
            return Err(WikibaseError::unexpected(
                format!("success flag not set adding {property} to {entity}"),
                raw,
            ));
        }
        match body.claim {
            Some(claim) if !claim.id.is_empty() => {
                tracing::info!(%entity, %property, guid = %claim.id, "created claim");
                Ok(claim.id)
            }
            _ => Err(WikibaseError::unexpected("no claim in reply", raw)),
        }
    }

    /// Replaces the value of an existing claim.
    pub fn update_claim(&self, guid: &str, snak: &Snak) -> WikibaseResult<()> {
        if guid.is_empty() {
            return Err(WikibaseError::precondition("claim GUID must not be empty"));
        }

        let token = self.edit_token()?;
        let request = set_claim_value_request(&token, guid, snak, self.config().bot_edits)?;
        let (body, raw) = self.call::<ClaimResponse>(Method::Post, request)?;

        if !body.success {
            return Err(WikibaseError::unexpected(
                format!("success flag not set updating claim {guid}"),
                raw,
            ));
        }
        tracing::debug!(guid, "updated claim");
        Ok(())
    }

    fn property_for_label(&self, label: &str) -> WikibaseResult<EntityId> {
        self.labels().property(label).ok_or_else(|| {
            WikibaseError::precondition(format!("no property mapped for label {label:?}"))
        })
    }
}
