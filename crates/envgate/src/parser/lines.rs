//! `KEY=VALUE` line parsing.
//!
//! Invariants:
//! - Lines are trimmed; blank lines are skipped.
//! - Each line is split on the FIRST `=`; values may therefore contain `=`.
//! - Lines without `=` or with an empty key are dropped silently.
//! - Duplicate keys keep their first position and their last value.

use indexmap::IndexMap;

use crate::constants::KEY_VALUE_SEPARATOR;

/// Insertion-ordered key/value mapping parsed from a file.
pub type EnvMap = IndexMap<String, String>;

/// Parse raw file contents into an ordered mapping.
pub fn parse_lines(contents: &str) -> EnvMap {
    let mut map = EnvMap::new();

    for line in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some((key, value)) = line.split_once(KEY_VALUE_SEPARATOR) else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        map.insert(key.to_string(), value.trim().to_string());
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(map: &EnvMap) -> Vec<(&str, &str)> {
        map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_parses_pairs_in_order() {
        let map = parse_lines("A=1\nB=2");
        assert_eq!(pairs(&map), vec![("A", "1"), ("B", "2")]);
    }

    #[test]
    fn test_trims_and_skips_blank_lines() {
        let map = parse_lines("\n   \r\n  A = 1  \r\n\n\tB=2\t\n");
        assert_eq!(pairs(&map), vec![("A", "1"), ("B", "2")]);
    }

    #[test]
    fn test_splits_on_first_separator_only() {
        let map = parse_lines("DSN=postgres://u:p@h/db?sslmode=require");
        assert_eq!(map["DSN"], "postgres://u:p@h/db?sslmode=require");
    }

    #[test]
    fn test_drops_lines_without_separator_or_key() {
        let map = parse_lines("NOSEPARATOR\n=value\nOK=yes");
        assert_eq!(pairs(&map), vec![("OK", "yes")]);
    }

    #[test]
    fn test_keeps_empty_values() {
        let map = parse_lines("EMPTY=");
        assert_eq!(map.get("EMPTY").map(String::as_str), Some(""));
    }

    #[test]
    fn test_last_duplicate_wins_in_first_position() {
        let map = parse_lines("A=1\nB=2\nA=3");
        assert_eq!(pairs(&map), vec![("A", "3"), ("B", "2")]);
    }

    proptest! {
        #[test]
        fn prop_well_formed_lines_round_trip(
            entries in proptest::collection::btree_map(
                "[A-Z][A-Z0-9_]{0,12}",
                "[a-zA-Z0-9:/._-]{0,20}",
                0..12,
            )
        ) {
            let text: String = entries
                .iter()
                .map(|(k, v)| format!("{k}={v}\n"))
                .collect();

            let map = parse_lines(&text);

            let expected: Vec<(&str, &str)> =
                entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            prop_assert_eq!(pairs(&map), expected);
        }

        #[test]
        fn prop_never_yields_empty_keys(text in "[A-Z=\\n \\t]{0,64}") {
            let map = parse_lines(&text);
            prop_assert!(map.keys().all(|k| !k.is_empty() && !k.contains('=')));
        }
    }
}
