//! Property-based tests for the document model and its text form.

use super::document::ConfigDocument;
use super::parser::parse;
use super::scope::Scope;
use proptest::prelude::*;

fn section_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z0-9-]{0,8}",
        prop::option::of("[a-z0-9 _/-]{1,12}"),
    )
        .prop_map(|(name, sub)| match sub {
            Some(sub) => format!("{name}.{sub}"),
            None => name,
        })
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,8}"
}

// Printable ASCII plus the characters that need escaping.
fn value_strategy() -> impl Strategy<Value = String> {
    "[ -~\t\n\r\u{8}\u{b}\u{c}]{0,24}"
}

fn document_strategy() -> impl Strategy<Value = ConfigDocument> {
    prop::collection::vec(
        (section_strategy(), key_strategy(), value_strategy()),
        0..20,
    )
    .prop_map(|entries| {
        let mut doc = ConfigDocument::new();
        for (section, key, value) in entries {
            doc.add(&format!("{section}.{key}"), value)
                .expect("generated keys are valid");
        }
        doc
    })
}

fn reparse(text: &str) -> ConfigDocument {
    ConfigDocument::from_entries(parse(text.as_bytes()).expect("serialized text parses"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Saving and re-reading a document loses nothing.
    #[test]
    fn serialized_document_parses_back(doc in document_strategy()) {
        let text = doc.to_string();
        prop_assert_eq!(reparse(&text), doc);
    }

    // Serialized text is canonical: a second pass reproduces it exactly.
    #[test]
    fn canonical_text_round_trips(doc in document_strategy()) {
        let text = doc.to_string();
        prop_assert_eq!(reparse(&text).to_string(), text);
    }

    // The effective value is the last one added, whatever came before.
    #[test]
    fn last_added_value_wins(
        key in key_strategy(),
        values in prop::collection::vec(value_strategy(), 1..6)
    ) {
        let name = format!("sect.{key}");
        let mut doc = ConfigDocument::new();
        for value in &values {
            doc.add(&name, value.as_str()).unwrap();
        }
        prop_assert_eq!(doc.get(&name), values.last().map(String::as_str));
        prop_assert_eq!(doc.get_all(&name).unwrap().len(), values.len());
    }

    // Merging tiers in order makes the highest defined tier win.
    #[test]
    fn highest_tier_wins(
        system in prop::option::of("[a-z]{1,8}"),
        global in prop::option::of("[a-z]{1,8}"),
        local in prop::option::of("[a-z]{1,8}")
    ) {
        let mut merged = ConfigDocument::new();
        for (value, scope) in [(&system, Scope::SYSTEM), (&global, Scope::GLOBAL), (&local, Scope::SELF_)] {
            let mut tier = ConfigDocument::new();
            if let Some(value) = value {
                tier.add("test.key", value.as_str()).unwrap();
            }
            merged.merge(&tier, scope);
        }

        let expected = local.as_deref().or(global.as_deref()).or(system.as_deref());
        prop_assert_eq!(merged.get("test.key"), expected);
    }

    // Lookups ignore the case of section and key names.
    #[test]
    fn names_are_case_insensitive(key in "[a-zA-Z][a-zA-Z0-9-]{0,8}", value in "[a-z]{0,8}") {
        let mut doc = ConfigDocument::new();
        doc.add(&format!("Core.{key}"), value.as_str()).unwrap();
        let upper = format!("CORE.{}", key.to_uppercase());
        let lower = format!("core.{}", key.to_lowercase());
        prop_assert_eq!(doc.get(&upper), Some(value.as_str()));
        prop_assert_eq!(doc.get(&lower), Some(value.as_str()));
    }
}
