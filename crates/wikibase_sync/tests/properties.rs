//! Property-based tests for what the client sends.

use proptest::prelude::*;
use serde_json::Value;
use wikibase_sync::{EntityId, EntityKind, ItemHeader, ResolvePolicy, ScriptedClient};
use wikibase_testkit::prelude::*;

fn upload_name(name: String) -> (ScriptedClient, Person) {
    let network = ScriptedClient::new();
    network.push_response(claim_created_response("P7", "Q1$x"));
    let mut person = Person::new("");
    person.name = name;
    person.header = ItemHeader::new().with_id(EntityId::item(1));
    (network, person)
}

proptest! {
    #[test]
    fn uploaded_text_is_normalized(text in messy_text_strategy()) {
        let (network, mut person) = upload_name(text.clone());
        let mut client = client_with_token(&network, "tok");
        client.labels_mut().insert("Name", EntityId::property(7));
        client.upload_claims_for_item(&mut person, false).unwrap();

        let args = network.last_call().unwrap().args;
        let expected = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if expected.is_empty() {
            prop_assert_eq!(&args["snaktype"], "novalue");
            prop_assert!(!args.contains_key("value"));
        } else {
            prop_assert_eq!(&args["snaktype"], "value");
            let sent: String = serde_json::from_str(&args["value"]).unwrap();
            prop_assert_eq!(sent, expected);
        }
    }

    #[test]
    fn blank_text_is_sent_as_novalue(text in blank_text_strategy()) {
        let (network, mut person) = upload_name(text);
        let mut client = client_with_token(&network, "tok");
        client.labels_mut().insert("Name", EntityId::property(7));
        client.upload_claims_for_item(&mut person, false).unwrap();

        prop_assert_eq!(&network.last_call().unwrap().args["snaktype"], "novalue");
    }

    #[test]
    fn created_item_carries_label(label in label_strategy(), id in item_id_strategy()) {
        let network = ScriptedClient::new();
        network.push_response(created_item_response(&id.to_string()));
        let client = client_with_token(&network, "tok");

        let mut header = ItemHeader::new();
        let created = client.create_item_instance(&label, &mut header).unwrap();
        prop_assert_eq!(created, id);
        prop_assert_eq!(header.id(), Some(id));

        let data: Value = serde_json::from_str(&network.last_call().unwrap().args["data"]).unwrap();
        prop_assert_eq!(data["labels"]["en"]["value"].as_str(), Some(label.as_str()));
    }

    #[test]
    fn resolved_property_is_stored(label in label_strategy(), id in property_id_strategy()) {
        let network = ScriptedClient::new();
        let title = format!("Property:{id}");
        network.push_response(search_response(&[(title.as_str(), label.as_str())]));
        let mut client = client_with_token(&network, "tok");

        let resolved = client
            .resolve_label(&label, EntityKind::Property, ResolvePolicy::FailIfMissing)
            .unwrap();
        prop_assert_eq!(resolved, id);
        prop_assert_eq!(client.labels().property(&label), Some(id));
        prop_assert_eq!(network.invocation_count(), 1);
    }
}
