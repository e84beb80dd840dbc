//! Property tests for template content validation.
//!
//! Generates content objects over the whitelisted keys (and outside it)
//! and checks the accept/reject rules hold for all of them.

use cms_schema::{validate, ContentError, ContentSchema, CONTENT_KEYS};
use proptest::prelude::*;
use serde_json::{Map, Value};

const OPTIONAL_KEYS: [&str; 5] = ["description", "filename", "zones", "modules", "meta"];

/// Arbitrary JSON values without floats, a few levels deep.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| serde_json::json!(n)),
        "[a-zA-Z0-9_ /]{0,20}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// A non-empty name that is never loose-falsy.
fn truthy_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,30}"
}

/// A subset of the optional keys with arbitrary values.
fn optional_entries() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec((prop::sample::select(OPTIONAL_KEYS.to_vec()), json_value()), 0..5)
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect()
        })
}

/// A key that is not on the whitelist.
fn unknown_key() -> impl Strategy<Value = String> {
    "[a-z]{1,12}".prop_filter("must not be whitelisted", |k| !ContentSchema::is_allowed(k))
}

fn object_json(entries: impl IntoIterator<Item = (String, Value)>) -> String {
    let map: Map<String, Value> = entries.into_iter().collect();
    Value::Object(map).to_string()
}

proptest! {
    /// Whitelisted subsets with a truthy name validate, and the derived
    /// name equals the content's name.
    #[test]
    fn whitelisted_subset_with_name_validates(
        name in truthy_name(),
        optional in optional_entries(),
    ) {
        let mut entries = vec![("name".to_string(), Value::String(name.clone()))];
        entries.extend(optional);
        let content = validate(&object_json(entries)).unwrap();
        prop_assert_eq!(content.name(), name.as_str());
    }

    /// Any key outside the whitelist is rejected.
    #[test]
    fn unknown_key_always_rejected(
        name in truthy_name(),
        key in unknown_key(),
        value in json_value(),
    ) {
        let json = object_json(vec![
            ("name".to_string(), Value::String(name)),
            (key.clone(), value),
        ]);
        prop_assert_eq!(validate(&json).unwrap_err(), ContentError::UnknownKey(key));
    }

    /// Without a name the content is rejected, whatever else it holds.
    #[test]
    fn missing_name_always_rejected(optional in optional_entries()) {
        prop_assume!(!optional.is_empty());
        let err = validate(&object_json(optional)).unwrap_err();
        prop_assert_eq!(err, ContentError::MissingRequiredKey("name".to_string()));
    }

    /// Non-object JSON is never accepted.
    #[test]
    fn non_objects_rejected(value in json_value()) {
        prop_assume!(!value.is_object());
        prop_assert_eq!(validate(&value.to_string()).unwrap_err(), ContentError::NotAnObject);
    }

    /// Validation never panics on arbitrary input.
    #[test]
    fn arbitrary_strings_never_panic(input in ".{0,64}") {
        let _ = validate(&input);
    }

    /// Validate, re-serialize, validate again: same outcome.
    #[test]
    fn revalidation_is_idempotent(
        name in truthy_name(),
        optional in optional_entries(),
    ) {
        let mut entries = vec![("name".to_string(), Value::String(name))];
        entries.extend(optional);
        let first = validate(&object_json(entries)).unwrap();
        let second = validate(&first.to_json_string()).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn whitelist_has_exactly_one_required_key() {
    let required: Vec<&str> = CONTENT_KEYS
        .iter()
        .filter(|r| r.required)
        .map(|r| r.key)
        .collect();
    assert_eq!(required, vec!["name"]);
}
