//! Property tests for name normalization.
//!
//! Checks that policies never panic on arbitrary input and that corrected
//! names are stable.

use convcat_foundation::{EnforcementPolicy, ErrorKind};
use convcat_naming::{normalize_code, normalize_entity_name, normalize_intent_name};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

/// Names made only of characters the entity rule allows.
fn valid_entity_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,24}".prop_map(String::from)
}

/// Names with at least one letter and a character the entity rule rewrites.
fn invalid_entity_name() -> impl Strategy<Value = String> {
    ("[a-z]{1,8}", "[.!@ ,;]", "[a-z]{1,8}").prop_map(|(a, bad, b)| format!("{a}{bad}{b}"))
}

/// Names starting with a letter that mix scripts, number signs, combining
/// marks, joiners, and punctuation.
fn mixed_script_name() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-zA-Z0-9]{1,4}".prop_map(String::from),
        Just("é".to_string()),
        Just("Ñ".to_string()),
        Just("大".to_string()),
        Just("₂".to_string()),
        Just("\u{301}".to_string()),
        Just("\u{200D}".to_string()),
        Just(" ".to_string()),
        Just("-".to_string()),
        Just(".".to_string()),
        Just(";".to_string()),
        Just("!".to_string()),
    ];
    ("[a-zé大]", prop::collection::vec(piece, 0..12))
        .prop_map(|(head, rest)| format!("{head}{}", rest.concat()))
}

fn soft_policy() -> impl Strategy<Value = EnforcementPolicy> {
    prop_oneof![
        Just(EnforcementPolicy::Soft),
        Just(EnforcementPolicy::SoftVerbose),
    ]
}

fn any_policy() -> impl Strategy<Value = EnforcementPolicy> {
    prop_oneof![Just(EnforcementPolicy::Hard), soft_policy()]
}

fn arbitrary_string() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..64).prop_map(|chars| chars.into_iter().collect())
}

fn only_entity_chars(name: &str) -> bool {
    name.chars().all(|c| {
        !matches!(c, '\u{301}' | '\u{200D}') && (c == '-' || c == '_' || c.is_alphanumeric())
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn valid_names_pass_unchanged(name in valid_entity_name(), policy in any_policy()) {
        let out = normalize_entity_name(policy, None, &name).unwrap();
        prop_assert_eq!(out.as_str(), name.as_str());
    }

    #[test]
    fn hard_rejects_rewritten_names(name in invalid_entity_name()) {
        let err = normalize_entity_name(EnforcementPolicy::Hard, None, &name).unwrap_err();
        let is_violation = matches!(err.kind, ErrorKind::NamingViolation { .. });
        prop_assert!(is_violation);
    }

    #[test]
    fn soft_corrects_instead_of_failing(name in invalid_entity_name(), policy in soft_policy()) {
        let out = normalize_entity_name(policy, None, &name).unwrap();
        prop_assert!(!out.is_empty());
        prop_assert!(only_entity_chars(&out));
    }

    #[test]
    fn corrected_names_are_stable(name in invalid_entity_name(), policy in soft_policy()) {
        let once = normalize_entity_name(policy, None, &name).unwrap();
        let twice = normalize_entity_name(EnforcementPolicy::Hard, None, &once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn soft_corrects_mixed_scripts(name in mixed_script_name(), policy in soft_policy()) {
        let out = normalize_entity_name(policy, None, &name).unwrap();
        prop_assert!(!out.is_empty());
        prop_assert!(only_entity_chars(&out), "{:?} became {:?}", name, out);
    }

    #[test]
    fn hard_accepts_exactly_the_unchanged_names(name in mixed_script_name()) {
        let soft = normalize_entity_name(EnforcementPolicy::Soft, None, &name).unwrap();
        let hard = normalize_entity_name(EnforcementPolicy::Hard, None, &name);
        prop_assert_eq!(hard.is_ok(), soft.as_str() == name.trim());
    }

    #[test]
    fn corrected_mixed_names_are_stable(name in mixed_script_name()) {
        let once = normalize_entity_name(EnforcementPolicy::Soft, None, &name).unwrap();
        let twice = normalize_entity_name(EnforcementPolicy::Hard, None, &once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn corrected_intents_are_stable(
        subnames in prop::collection::vec(mixed_script_name(), 1..4),
        policy in soft_policy(),
    ) {
        let once = normalize_intent_name(policy, None, &subnames).unwrap();
        let twice = normalize_intent_name(EnforcementPolicy::Hard, None, [once.as_str()]).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn corrected_codes_are_stable(raw in "[a-zA-Zàéîõü ]{1,16}[a-z]") {
        let once = normalize_code(EnforcementPolicy::Soft, &raw).unwrap();
        let twice = normalize_code(EnforcementPolicy::Hard, &once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn arbitrary_input_never_panics(raw in arbitrary_string(), policy in any_policy()) {
        let _ = normalize_entity_name(policy, None, &raw);
        let _ = normalize_intent_name(policy, None, [raw.as_str()]);
        let _ = normalize_code(policy, &raw);
    }
}
