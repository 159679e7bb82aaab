//! Property-based tests for masking, interpolation, and template round-trips.
//!
//! Test coverage:
//! - Secret: every textual rendering is the mask, whatever the payload
//! - Interpolation: context values substitute verbatim and are never rescanned
//! - Example template: re-parsing yields exactly the flattened field set

use proptest::prelude::*;
use secrecy::ExposeSecret;

use envcraft_config::interpolate::InterpolationContext;
use envcraft_config::report::render_example;
use envcraft_config::{Field, Schema, Secret, parse_assignments};

/// Variable names that cannot collide with common process variables.
fn var_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,10}".prop_map(|suffix| format!("ENVCRAFT_PROP_{}", suffix))
}

/// Field names in lower snake case without double underscores.
fn field_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}(_[a-z0-9]{1,4}){0,2}"
}

proptest! {
    #[test]
    fn prop_secret_renderings_are_masked(payload in ".{1,64}") {
        let secret = Secret::new(payload.clone());
        prop_assert_eq!(secret.to_string(), "***");
        prop_assert_eq!(format!("{:?}", secret), "Secret('***')");
        prop_assert_eq!(serde_json::to_string(&secret).unwrap(), "\"***\"");
        let exposed = secret.get().unwrap();
        prop_assert_eq!(exposed.expose_secret(), payload.as_str());
    }

    #[test]
    fn prop_braced_reference_substitutes_value(
        name in var_name_strategy(),
        value in "[a-zA-Z0-9$_{}/:@.-]{0,24}",
        prefix in "[a-z ]{0,8}",
    ) {
        let mut context = InterpolationContext::new();
        context.insert(&name, value.clone());
        let text = format!("{}${{{}}}", prefix, name);
        prop_assert_eq!(context.interpolate(&text), format!("{}{}", prefix, value));
    }

    #[test]
    fn prop_text_without_dollar_is_unchanged(text in "[^$]{0,64}") {
        let context = InterpolationContext::new();
        prop_assert_eq!(context.interpolate(&text), text);
    }

    #[test]
    fn prop_example_round_trip(
        names in proptest::collection::btree_set(field_name_strategy(), 1..8),
        nested in proptest::collection::btree_set(field_name_strategy(), 0..4),
    ) {
        let mut fields: Vec<Field> = names
            .iter()
            .map(|name| Field::new::<String>(name.clone()))
            .collect();
        if !nested.is_empty() {
            fields.push(Field::nested(
                "group",
                nested.iter().map(|name| Field::new::<u32>(name.clone()).default(1)).collect(),
            ));
        }
        let schema = Schema::new("Generated", fields);

        let parsed: Vec<String> = parse_assignments(&render_example(&schema))
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        prop_assert_eq!(parsed, schema.leaf_names());
    }
}
