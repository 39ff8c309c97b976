//! Tag-filtered collection tests.

use remap::error::Operation;
use remap::{
    AttributeSelector, Error, MemberDescriptor, MemberType, Object, Tag, TypeDescriptor,
    TypeRegistry, Value, reflect,
};

use crate::helpers::assertions::entry_keys;
use crate::helpers::fixtures::{LOGGABLE, SENSITIVE, sample_customer, sample_order, shop_registry};

fn keys(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(tag, member)| (tag.to_string(), member.to_string()))
        .collect()
}

fn tagged_registry() -> TypeRegistry {
    TypeRegistry::new().with_type(
        TypeDescriptor::new("Tagged")
            .with_member(MemberDescriptor::new("a", MemberType::text()).with_tag(Tag::new("X")))
            .with_member(MemberDescriptor::new("b", MemberType::text()))
            .with_member(
                MemberDescriptor::new("c", MemberType::text())
                    .with_tag(Tag::new("X"))
                    .with_tag(Tag::new("Y")),
            ),
    )
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_entries_follow_declaration_then_tag_order() {
    let registry = tagged_registry();
    let tagged = Object::new("Tagged").with("a", "1").with("b", "2").with("c", "3");

    let collected = reflect(&registry, &tagged)
        .scan_by("X")
        .scan_by("Y")
        .collect()
        .unwrap();

    assert_eq!(
        entry_keys(&collected),
        keys(&[("X", "a"), ("X", "c"), ("Y", "c")])
    );
    assert!(collected.contains("Y"));

    let y: Vec<_> = collected.get("Y").iter().map(|e| e.value().clone()).collect();
    assert_eq!(y, vec![Value::from("3")]);
}

#[test]
fn test_unregistered_tags_never_appear() {
    let registry = tagged_registry();
    let tagged = Object::new("Tagged").with("a", "1").with("c", "3");

    let collected = reflect(&registry, &tagged).scan_by("Y").collect().unwrap();

    assert_eq!(entry_keys(&collected), keys(&[("Y", "c")]));
    assert!(!collected.contains("X"));
    assert!(collected.get("X").is_empty());
}

// ============================================================================
// Deep scan
// ============================================================================

#[test]
fn test_terminals_inside_listed_composites_are_collected() {
    let registry = shop_registry();
    let customer = sample_customer();

    let collected = reflect(&registry, &customer)
        .scan_by(LOGGABLE)
        .collect()
        .unwrap();

    assert_eq!(
        entry_keys(&collected),
        keys(&[
            (LOGGABLE, "id"),
            (LOGGABLE, "name"),
            (LOGGABLE, "id"),
            (LOGGABLE, "id"),
            (LOGGABLE, "id"),
        ])
    );
    let values: Vec<_> = collected.iter().map(|e| e.value().clone()).collect();
    assert_eq!(
        values,
        vec![
            Value::Long(42),
            Value::from("Ada"),
            Value::Long(1),
            Value::Long(2),
            Value::Long(3),
        ]
    );
}

#[test]
fn test_attribute_values_are_extracted_per_tag() {
    let registry = shop_registry();
    let customer = sample_customer();

    let collected = reflect(&registry, &customer)
        .scan_by(SENSITIVE)
        .collect()
        .unwrap();

    let levels: Vec<_> = collected
        .get(SENSITIVE)
        .iter()
        .map(|e| {
            let tag = e.member().tag(SENSITIVE).unwrap();
            assert_eq!(tag.simple_name(), "Sensitive");
            tag.value().clone()
        })
        .collect();
    // name, email, then the amount of each of the three orders.
    assert_eq!(
        levels,
        vec![
            Value::from("medium"),
            Value::from("high"),
            Value::from("high"),
            Value::from("high"),
            Value::from("high"),
        ]
    );
}

#[test]
fn test_null_composites_and_lists_are_skipped() {
    let registry = shop_registry();
    let customer = sample_customer()
        .with("address", Value::Null)
        .with("orders", Value::Null);

    let collected = reflect(&registry, &customer)
        .scan_by(LOGGABLE)
        .collect()
        .unwrap();

    assert_eq!(
        entry_keys(&collected),
        keys(&[(LOGGABLE, "id"), (LOGGABLE, "name")])
    );
}

// ============================================================================
// Configuration and failures
// ============================================================================

#[test]
fn test_collect_requires_a_registered_tag() {
    let registry = shop_registry();
    let customer = sample_customer();

    let err = reflect(&registry, &customer).collect().unwrap_err();

    assert!(matches!(err, Error::Configuration(_)));
    assert!(err.to_string().starts_with("scan configuration required"));
}

#[test]
fn test_named_attribute_selector() {
    let registry = shop_registry();
    let order = sample_order(7, 12.0);

    let collected = reflect(&registry, &order)
        .scan_by(SENSITIVE)
        .with_attribute(AttributeSelector::named("level"))
        .collect()
        .unwrap();

    assert_eq!(collected.len(), 1);
    let entries = collected.get(SENSITIVE);
    let entry = entries[0];
    assert_eq!(entry.value(), &Value::Double(12.0));
    assert_eq!(
        entry.member().tag(SENSITIVE).map(|t| t.value().clone()),
        Some(Value::from("high"))
    );
}

#[test]
fn test_missing_named_attribute_aborts_collection() {
    let registry = shop_registry();
    let customer = sample_customer();

    // `name` also carries a marker tag with no `level` attribute.
    let err = reflect(&registry, &customer)
        .scan_by(SENSITIVE)
        .with_attribute(AttributeSelector::named("level"))
        .collect()
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Mapping {
            operation: Operation::Collect,
            ..
        }
    ));
    match err.root() {
        Error::AttributeNotFound { tag, attribute } => {
            assert_eq!(tag, LOGGABLE);
            assert_eq!(attribute, "level");
        }
        other => panic!("expected AttributeNotFound, got {other}"),
    }
}

#[test]
fn test_unregistered_source_type_is_wrapped() {
    let registry = shop_registry();
    let stray = Object::new("Stray");

    let err = reflect(&registry, &stray).scan_by(LOGGABLE).collect().unwrap_err();

    assert!(matches!(err, Error::Mapping { .. }));
    assert!(matches!(err.root(), Error::NotFound { kind: "type", .. }));
}
