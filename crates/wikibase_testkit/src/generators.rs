//! Property-based test generators using proptest.

use proptest::prelude::*;
use wikibase_codec::{EntityId, EntityKind};

/// Strategy for generating entity IDs of either kind.
pub fn entity_id_strategy() -> impl Strategy<Value = EntityId> {
    (prop_oneof![Just(EntityKind::Item), Just(EntityKind::Property)], 1u64..10_000_000)
        .prop_map(|(kind, n)| EntityId::new(kind, n))
}

/// Strategy for generating item IDs.
pub fn item_id_strategy() -> impl Strategy<Value = EntityId> {
    (1u64..10_000_000).prop_map(EntityId::item)
}

/// Strategy for generating property IDs.
pub fn property_id_strategy() -> impl Strategy<Value = EntityId> {
    (1u64..100_000).prop_map(EntityId::property)
}

/// Strategy for generating non-empty labels without commas.
pub fn label_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9 _-]{0,31}").expect("Invalid regex")
}

/// Strategy for generating text with irregular whitespace around and
/// between words.
pub fn messy_text_strategy() -> impl Strategy<Value = String> {
    let word = (
        prop::string::string_regex("[ \t\n\r]{0,3}").expect("Invalid regex"),
        prop::string::string_regex("[a-zA-Z0-9]{1,8}").expect("Invalid regex"),
    );
    let tail = prop::string::string_regex("[ \t\n]{0,3}").expect("Invalid regex");
    (prop::collection::vec(word, 0..6), tail).prop_map(|(words, tail)| {
        let mut text = String::new();
        for (space, word) in &words {
            text.push_str(space);
            text.push_str(word);
        }
        text.push_str(&tail);
        text
    })
}

/// Strategy for generating whitespace-only strings, including the empty
/// string.
pub fn blank_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \t\n\r]{0,8}").expect("Invalid regex")
}
