//! Property-based tests for the chain and line parsers.
//!
//! Test coverage:
//! - Chains built from known validators parse back to the same calls.
//! - Unknown validator names never survive parsing.
//! - Parsed env files never contain keys with separators or surrounding whitespace.

use proptest::prelude::*;

use envgate::{ValidatorCall, ValidatorRegistry, parse_chain, parse_lines};

/// Strategy for argument values that contain no chain syntax characters.
fn arg_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.:/-]{1,10}"
}

/// Strategy for a single call to a built-in validator.
fn call_strategy() -> impl Strategy<Value = ValidatorCall> {
    let name = prop_oneof![
        Just("required"),
        Just("fallback"),
        Just("enum"),
        Just("number"),
        Just("boolean"),
        Just("trim"),
    ];
    (name, proptest::collection::vec(arg_strategy(), 0..4))
        .prop_map(|(name, args)| ValidatorCall::new(name, args))
}

fn render(call: &ValidatorCall) -> String {
    if call.args.is_empty() {
        call.name.clone()
    } else {
        format!("{}({})", call.name, call.args.join(","))
    }
}

proptest! {
    #[test]
    fn prop_known_chains_parse_back(calls in proptest::collection::vec(call_strategy(), 0..6)) {
        let expression = calls.iter().map(render).collect::<Vec<_>>().join("|");

        let parsed = parse_chain(&expression, &ValidatorRegistry::builtin());

        prop_assert_eq!(parsed, calls);
    }

    #[test]
    fn prop_unknown_names_are_dropped(
        calls in proptest::collection::vec(call_strategy(), 0..4),
        unknown in "x_[a-z]{1,8}",
    ) {
        let mut links: Vec<String> = calls.iter().map(render).collect();
        links.insert(0, unknown.clone());
        links.push(format!("{unknown}(a,b)"));

        let parsed = parse_chain(&links.join("|"), &ValidatorRegistry::builtin());

        prop_assert!(parsed.iter().all(|c| c.name != unknown));
        prop_assert_eq!(parsed.len(), calls.len());
    }

    #[test]
    fn prop_parsed_keys_are_clean(text in "[ -~\\n\\t]{0,200}") {
        let map = parse_lines(&text);
        for key in map.keys() {
            prop_assert!(!key.is_empty());
            prop_assert!(!key.contains('='));
            prop_assert_eq!(key.trim(), key.as_str());
        }
    }
}
