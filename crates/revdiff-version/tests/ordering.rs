//! Property-based checks that every strategy orders versions consistently.

use chrono::DateTime;
use proptest::prelude::*;
use revdiff_version::{
    BranchStrategy, ComparisonOutcome, SemanticStrategy, Strategy as VersionStrategy,
    TimestampStrategy,
};

fn semver_string() -> impl Strategy<Value = String> {
    (
        0..4u64,
        0..4u64,
        0..4u64,
        prop::option::of(prop::sample::select(vec![
            "alpha", "alpha.1", "alpha.beta", "beta", "beta.2", "beta.11", "rc.1",
        ])),
    )
        .prop_map(|(major, minor, patch, pre)| match pre {
            Some(pre) => format!("{major}.{minor}.{patch}-{pre}"),
            None => format!("{major}.{minor}.{patch}"),
        })
}

fn outcome(strategy: &impl VersionStrategy, a: &str, b: &str) -> ComparisonOutcome {
    strategy
        .compare_versions(a, b)
        .expect("generated versions are valid")
        .result
}

fn reversed(outcome: ComparisonOutcome) -> ComparisonOutcome {
    match outcome {
        ComparisonOutcome::Greater => ComparisonOutcome::Less,
        ComparisonOutcome::Less => ComparisonOutcome::Greater,
        other => other,
    }
}

proptest! {
    #[test]
    fn semantic_compare_is_reflexive(v in semver_string()) {
        prop_assert_eq!(outcome(&SemanticStrategy, &v, &v), ComparisonOutcome::Equal);
    }

    #[test]
    fn semantic_compare_is_antisymmetric(a in semver_string(), b in semver_string()) {
        let forward = outcome(&SemanticStrategy, &a, &b);
        let backward = outcome(&SemanticStrategy, &b, &a);
        prop_assert_eq!(forward, reversed(backward));
    }

    #[test]
    fn semantic_compare_is_transitive(
        a in semver_string(),
        b in semver_string(),
        c in semver_string(),
    ) {
        let not_less =
            |x: &str, y: &str| outcome(&SemanticStrategy, x, y) != ComparisonOutcome::Less;
        if not_less(&a, &b) && not_less(&b, &c) {
            prop_assert!(not_less(&a, &c));
        }
    }

    #[test]
    fn semantic_parse_then_generate_round_trips(v in semver_string()) {
        let metadata = SemanticStrategy.parse_version(&v).expect("valid");
        prop_assert_eq!(SemanticStrategy.generate_version(&metadata).expect("generates"), v);
    }

    #[test]
    fn timestamp_order_follows_time(
        first in 946_684_800i64..4_102_444_800,
        second in 946_684_800i64..4_102_444_800,
    ) {
        let strategy = TimestampStrategy::default();
        let a = strategy
            .version_at(DateTime::from_timestamp(first, 0).expect("in range"))
            .expect("encodes");
        let b = strategy
            .version_at(DateTime::from_timestamp(second, 0).expect("in range"))
            .expect("encodes");

        let expected = ComparisonOutcome::from(first.cmp(&second));
        prop_assert_eq!(outcome(&strategy, &a, &b), expected);
    }

    #[test]
    fn timestamp_parse_then_generate_round_trips(secs in 946_684_800i64..4_102_444_800) {
        let strategy = TimestampStrategy::default();
        let version = strategy
            .version_at(DateTime::from_timestamp(secs, 0).expect("in range"))
            .expect("encodes");

        let metadata = strategy.parse_version(&version).expect("valid");
        prop_assert_eq!(strategy.generate_version(&metadata).expect("generates"), version);
    }

    #[test]
    fn branch_next_version_is_always_greater(branch in "[a-z][a-z0-9/-]{0,12}", build in 0..1_000_000u64) {
        let strategy = BranchStrategy::default();
        let current = strategy.version_for(&branch, build);
        let next = strategy.next_version(&current).expect("valid");

        prop_assert_eq!(outcome(&strategy, &next, &current), ComparisonOutcome::Greater);
    }
}
