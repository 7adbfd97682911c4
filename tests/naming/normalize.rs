//! Integration tests for entity, intent, and code normalization
//!
//! Tests policy outcomes, diagnostics text, and the intent marker.

use convcat_foundation::{EnforcementPolicy, ErrorKind, NameKind};
use convcat_naming::{
    MandatoryRule, NamingConfig, RuleChain, Sanitizer, intent_key, normalize_entity_name,
    normalize_intent_name,
};

const ALL_POLICIES: [EnforcementPolicy; 3] = [
    EnforcementPolicy::Hard,
    EnforcementPolicy::Soft,
    EnforcementPolicy::SoftVerbose,
];

// =============================================================================
// Entity Names
// =============================================================================

#[test]
fn valid_entity_name_unchanged_under_every_policy() {
    for policy in ALL_POLICIES {
        for name in ["size", "pizza_topping", "sys-like", "čísla_2", "大きさ"] {
            assert_eq!(normalize_entity_name(policy, None, name).unwrap(), name);
        }
    }
}

#[test]
fn hard_entity_violation_cites_original_and_rule() {
    let err = normalize_entity_name(EnforcementPolicy::Hard, None, "pizza.size").unwrap_err();
    let ErrorKind::NamingViolation {
        kind,
        name,
        restrictions,
    } = err.kind
    else {
        panic!("expected a naming violation");
    };
    assert_eq!(kind, NameKind::Entity);
    assert_eq!(name, "pizza.size");
    assert_eq!(
        restrictions,
        "The entity name can only contain letters (in Unicode), numbers, underscores, and hyphens."
    );
}

#[test]
fn hard_violation_lists_every_triggered_user_rule() {
    let rules = RuleChain::from_pairs([("-", "_"), ("$special", r"\L"), ("q", "k")]).unwrap();
    let err = normalize_entity_name(EnforcementPolicy::Hard, Some(&rules), "Pizza-Size").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains(
        "User-defined regex: ''-' should be replaced with '_'', 'entity name should be lowercase'."
    ));
    assert!(!msg.contains("'q'"));
}

#[test]
fn marks_and_joiners_are_violations() {
    for name in ["cafe\u{301}", "a\u{200D}b"] {
        let err = normalize_entity_name(EnforcementPolicy::Hard, None, name).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NamingViolation { .. }), "{name:?}");
    }
    let corrected = normalize_entity_name(EnforcementPolicy::Soft, None, "cafe\u{301}").unwrap();
    assert_eq!(corrected, "cafe");
}

#[test]
fn number_characters_are_allowed() {
    assert_eq!(normalize_entity_name(EnforcementPolicy::Hard, None, "x₂").unwrap(), "x₂");
    assert_eq!(normalize_intent_name(EnforcementPolicy::Hard, None, ["h₂o.v2"]).unwrap(), "h₂o.v2");
}

#[test]
fn soft_entity_names_are_corrected() {
    let rules = RuleChain::from_pairs([("$special", r"\A"), ("$special", r"\L")]).unwrap();
    for policy in [EnforcementPolicy::Soft, EnforcementPolicy::SoftVerbose] {
        let name = normalize_entity_name(policy, Some(&rules), " Crème Brûlée! ").unwrap();
        assert_eq!(name, "creme_brulee");
    }
}

// =============================================================================
// Intent Names
// =============================================================================

#[test]
fn intent_allows_periods() {
    let name = normalize_intent_name(EnforcementPolicy::Hard, None, ["v1.2"]).unwrap();
    assert_eq!(name, "v1.2");

    let err = normalize_entity_name(EnforcementPolicy::Hard, None, "v1.2").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NamingViolation { .. }));
}

#[test]
fn intent_subnames_are_corrected_then_joined() {
    let rules = RuleChain::from_pairs([("$special", r"\U")]).unwrap();
    let name = normalize_intent_name(
        EnforcementPolicy::SoftVerbose,
        Some(&rules),
        ["#order status", "new;old"],
    )
    .unwrap();
    assert_eq!(name, "ORDER_STATUS_NEW_OLD");
}

#[test]
fn intent_keys_compare_loosely() {
    let a = normalize_intent_name(EnforcementPolicy::Soft, None, ["order-status"]).unwrap();
    let b = normalize_intent_name(EnforcementPolicy::Soft, None, ["ORDER", "STATUS"]).unwrap();
    assert_ne!(a, b);
    assert_eq!(intent_key(&a), intent_key(&b));
}

// =============================================================================
// Sanitizer
// =============================================================================

#[test]
fn rewrite_exposes_decision_inputs() {
    let rules = RuleChain::from_pairs([("$special", r"\L")]).unwrap();
    let rewritten = Sanitizer::new(EnforcementPolicy::Hard, MandatoryRule::entity())
        .with_rules(Some(&rules))
        .rewrite("Big Pizza");

    assert_eq!(rewritten.original, "Big Pizza");
    assert_eq!(rewritten.name, "big_pizza");
    assert_eq!(rewritten.mandatory, Some(MandatoryRule::entity().message()));
    assert_eq!(rewritten.triggered, ["entity name should be lowercase"]);
    assert!(rewritten.clone().enforce(EnforcementPolicy::Hard).is_err());
    assert_eq!(rewritten.enforce(EnforcementPolicy::Soft).unwrap(), "big_pizza");
}

#[test]
fn naming_config_is_passed_explicitly() {
    let strict = NamingConfig::new(EnforcementPolicy::Hard);
    let lenient = NamingConfig::new(EnforcementPolicy::Soft);
    assert!(strict.entity_name("a b").is_err());
    assert_eq!(lenient.entity_name("a b").unwrap(), "a_b");
}
