//! Property-based tests for merging and validation.

use crate::merge::merge_all;
use crate::test_util::{Base, CustomConfig, Foo};
use crate::{Document, Merge, Validate};
use proptest::prelude::*;
use serde_json::{json, Value};

// Strings are often empty so that zero-valued leaves show up regularly
fn leaf_string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z0-9]{1,12}"]
}

fn leaf_int_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![Just(0i64), any::<i64>()]
}

fn config_strategy() -> impl Strategy<Value = CustomConfig> {
    (
        leaf_int_strategy(),
        leaf_string_strategy(),
        leaf_string_strategy(),
        leaf_string_strategy(),
    )
        .prop_map(|(a, b, c, bar)| CustomConfig {
            base: Base { a, b, c },
            foo: Foo { bar },
        })
}

fn document_strategy() -> impl Strategy<Value = Document> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ];
    let tree = leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map("[a-c]", inner, 0..4)
            .prop_map(|map| Value::Object(map.into_iter().collect()))
    });
    prop::collection::btree_map("[a-d]", tree, 0..4)
        .prop_map(|map| Document::from(Value::Object(map.into_iter().collect())))
}

fn pick<T: Clone + Default + PartialEq>(first: &T, second: &T) -> T {
    if *first == T::default() {
        second.clone()
    } else {
        first.clone()
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Every leaf keeps the first non-zero value
    #[test]
    fn merge_first_non_zero_wins(first in config_strategy(), second in config_strategy()) {
        let mut merged = first.clone();
        merged.merge_from(&second);

        prop_assert_eq!(merged.base.a, pick(&first.base.a, &second.base.a));
        prop_assert_eq!(&merged.base.b, &pick(&first.base.b, &second.base.b));
        prop_assert_eq!(&merged.base.c, &pick(&first.base.c, &second.base.c));
        prop_assert_eq!(&merged.foo.bar, &pick(&first.foo.bar, &second.foo.bar));
    }

    // Merging a value into itself changes nothing
    #[test]
    fn merge_is_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        merged.merge_from(&config);
        prop_assert_eq!(merged, config);
    }

    // The default value is an identity on both sides
    #[test]
    fn merge_default_is_identity(config in config_strategy()) {
        let mut left = CustomConfig::default();
        left.merge_from(&config);
        prop_assert_eq!(&left, &config);

        let mut right = config.clone();
        right.merge_from(&CustomConfig::default());
        prop_assert_eq!(right, config);
    }

    // Left-to-right merging is associative
    #[test]
    fn merge_is_associative(
        x in config_strategy(),
        y in config_strategy(),
        z in config_strategy(),
    ) {
        let mut xy = x.clone();
        xy.merge_from(&y);
        xy.merge_from(&z);

        let mut yz = y.clone();
        yz.merge_from(&z);
        let mut x_yz = x.clone();
        x_yz.merge_from(&yz);

        prop_assert_eq!(&xy, &x_yz);
        prop_assert_eq!(merge_all::<CustomConfig, _>([&x, &y, &z]), xy);
    }

    // An explicit zero never blocks a later value
    #[test]
    fn merge_zero_is_overwritten(value in 1i64..) {
        let mut merged = CustomConfig::default();
        merged.base.a = 0;
        merged.merge_from(&CustomConfig {
            base: Base { a: value, ..Default::default() },
            ..Default::default()
        });
        prop_assert_eq!(merged.base.a, value);
    }

    // Validation reports exactly the required leaves still at zero
    #[test]
    fn validation_is_complete(config in config_strategy()) {
        let reported = config.empty_required_fields("");
        let mut expected = Vec::new();
        if config.base.a == 0 {
            expected.push("base.a".to_string());
        }
        if config.base.b.is_empty() {
            expected.push("base.b".to_string());
        }
        if config.foo.bar.is_empty() {
            expected.push("foo.bar".to_string());
        }
        prop_assert_eq!(reported, expected);
    }

    // Documents: merging into itself is a no-op, and the empty document is an identity
    #[test]
    fn document_merge_identities(doc in document_strategy()) {
        let mut same = doc.clone();
        same.merge_from(&doc);
        prop_assert_eq!(&same, &doc);

        let mut from_empty = Document::from(json!({}));
        from_empty.merge_from(&doc);
        prop_assert_eq!(&from_empty, &doc);
    }

    // Documents: keys set in the first layer survive any second layer
    #[test]
    fn document_first_layer_keys_survive(first in document_strategy(), second in document_strategy()) {
        let mut merged = first.clone();
        merged.merge_from(&second);

        if let Value::Object(map) = first.as_value() {
            for (key, value) in map {
                if !crate::document::is_zero_value(value) && !value.is_object() {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }
        }
    }
}
