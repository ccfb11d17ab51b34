//! Property-based tests for seeker using proptest.

use std::cmp::Ordering;

use proptest::prelude::*;
use loadout_seeker::{
    Dir, Op, PropertyBag, PropertyId, Record, Rule, SearchQuery, SortEngine, SortSpec,
};

// ============================================================================
// Test helpers
// ============================================================================

/// Builds one record per entry; `None` leaves the property unset.
fn damage_items(values: &[Option<i64>]) -> Vec<PropertyBag> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let bag = PropertyBag::new(format!("item-{i}"));
            match value {
                Some(v) => bag.with(PropertyId::Damage, v.to_string()),
                None => bag,
            }
        })
        .collect()
}

fn has_value(item: &PropertyBag) -> bool {
    matches!(item.get(PropertyId::Damage), Some(v) if v != "0")
}

fn keys(items: &[PropertyBag]) -> Vec<String> {
    items.iter().map(|item| item.key().0).collect()
}

fn dir_strategy() -> impl Strategy<Value = Dir> {
    prop_oneof![Just(Dir::Asc), Just(Dir::Desc)]
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Empty and "0" values sort after every present value, in both directions.
    #[test]
    fn missing_values_sink_to_bottom(
        values in prop::collection::vec(prop::option::of(-5i64..5), 0..60),
        dir in dir_strategy(),
    ) {
        let mut items = damage_items(&values);
        let engine = SortEngine::new(vec![PropertyId::Damage])
            .with_spec(SortSpec { property: PropertyId::Damage, dir });
        engine.sort(&mut items);

        let first_missing = items.iter().position(|item| !has_value(item)).unwrap_or(items.len());
        for item in &items[first_missing..] {
            prop_assert!(!has_value(item));
        }
    }

    /// Present values are ordered numerically in the chosen direction.
    #[test]
    fn present_values_follow_direction(
        values in prop::collection::vec(prop::option::of(any::<i32>().prop_map(i64::from)), 0..60),
        dir in dir_strategy(),
    ) {
        let mut items = damage_items(&values);
        let engine = SortEngine::new(vec![PropertyId::Damage])
            .with_spec(SortSpec { property: PropertyId::Damage, dir });
        engine.sort(&mut items);

        let present: Vec<i64> = items
            .iter()
            .filter(|item| has_value(item))
            .filter_map(|item| item.get(PropertyId::Damage)?.parse().ok())
            .collect();
        for pair in present.windows(2) {
            match dir {
                Dir::Asc => prop_assert!(pair[0] <= pair[1]),
                Dir::Desc => prop_assert!(pair[0] >= pair[1]),
            }
        }
    }

    /// The comparator is antisymmetric, so sorting is well defined.
    #[test]
    fn comparator_is_antisymmetric(
        a in prop::option::of(-3i64..3),
        b in prop::option::of(-3i64..3),
        dir in dir_strategy(),
    ) {
        let items = damage_items(&[a, b]);
        let engine = SortEngine::new(vec![PropertyId::Damage])
            .with_spec(SortSpec { property: PropertyId::Damage, dir });

        prop_assert_eq!(
            engine.ordering(&items[0], &items[1]),
            engine.ordering(&items[1], &items[0]).reverse()
        );
        prop_assert!(!(engine.compare(&items[0], &items[1]) && engine.compare(&items[1], &items[0])));
    }

    /// Toggling the direction twice reproduces the original ordering.
    #[test]
    fn double_flip_is_identity(
        values in prop::collection::vec(prop::option::of(0i64..6), 0..40),
    ) {
        let source = damage_items(&values);
        let mut engine = SortEngine::new(vec![PropertyId::Name, PropertyId::Damage]);
        engine.set_property(PropertyId::Damage);

        let mut before = source.clone();
        engine.sort(&mut before);

        engine.toggle_direction();
        let mut flipped = source.clone();
        engine.sort(&mut flipped);

        engine.toggle_direction();
        let mut after = source.clone();
        engine.sort(&mut after);

        prop_assert_eq!(keys(&before), keys(&after));
    }

    /// Unparsable numeric text never panics and sinks like an empty value.
    #[test]
    fn garbage_numbers_sink(garbage in "[a-z#]{1,8}", value in 1i64..100) {
        let good = PropertyBag::new("good").with(PropertyId::Weight, value.to_string());
        let bad = PropertyBag::new("bad").with(PropertyId::Weight, garbage);
        for dir in [Dir::Asc, Dir::Desc] {
            let engine = SortEngine::default().with_spec(SortSpec { property: PropertyId::Weight, dir });
            prop_assert_eq!(engine.ordering(&bad, &good), Ordering::Greater);
        }
    }

    /// An empty search matches every record, including ones without the property.
    #[test]
    fn empty_search_matches_all(
        values in prop::collection::vec(prop::option::of(any::<i64>()), 0..40),
    ) {
        let items = damage_items(&values);
        let query = SearchQuery::parse("");
        prop_assert!(items.iter().all(|item| query.matches(item, PropertyId::Damage)));
    }

    /// `>n` accepts exactly the records whose value is greater than n.
    #[test]
    fn greater_than_search(
        values in prop::collection::vec(prop::option::of(-100i64..100), 0..40),
        threshold in -100i64..100,
    ) {
        let items = damage_items(&values);
        let query = SearchQuery::parse(&format!(">{threshold}"));
        for (item, value) in items.iter().zip(&values) {
            let expected = value.is_some_and(|v| v > threshold);
            prop_assert_eq!(query.matches(item, PropertyId::Damage), expected);
        }
    }

    /// A search query never matches a record that lacks the property.
    #[test]
    fn search_never_matches_missing(input in "[a-z<>=!%\"]{1,6}") {
        let query = SearchQuery::parse(&input);
        if !query.is_all() {
            prop_assert!(!query.matches(&PropertyBag::new("bare"), PropertyId::Name));
        }
    }

    /// A rule with a non-empty value never matches an unsupported property.
    #[test]
    fn rules_never_match_missing(value in "[a-z0-9]{1,6}", op_index in 0usize..10) {
        let rule = Rule::new(PropertyId::Level, Op::ALL[op_index], value);
        prop_assert!(!rule.matches(&PropertyBag::new("bare")));
    }
}
