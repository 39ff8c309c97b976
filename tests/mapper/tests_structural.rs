//! Structural mapping tests.

use remap::error::{AccessOp, Operation};
use remap::model::ContainerKind;
use remap::{
    Diagnostic, Error, ListValue, MapValue, MemberType, Object, ScalarKind, TypeDescriptor,
    TypeName, TypeRegistry, Value, reflect,
};
use rstest::rstest;

use crate::helpers::assertions::{nested, slot};
use crate::helpers::fixtures::{sample_customer, shop_registry};

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_identity_mapping_is_structurally_equal() {
    let registry = shop_registry();
    let customer = sample_customer();

    let copy = reflect(&registry, &customer).map_to("Customer").unwrap();

    assert_eq!(copy, customer);
}

#[test]
fn test_names_match_case_insensitively_in_any_order() {
    let registry = shop_registry();
    let customer = sample_customer();

    let dto = reflect(&registry, &customer).map_to("CustomerDto").unwrap();

    assert_eq!(dto.type_name(), "CustomerDto");
    assert_eq!(slot(&dto, "ID"), &Value::Long(42));
    assert_eq!(slot(&dto, "NAME"), &Value::from("Ada"));

    let address = nested(&dto, "Address");
    assert_eq!(address.type_name(), "AddressDto");
    assert_eq!(slot(address, "City"), &Value::from("London"));
    assert_eq!(slot(address, "street"), &Value::from("1 Analytical Way"));
}

#[test]
fn test_unmatched_target_members_keep_defaults() {
    let registry = shop_registry();
    let customer = sample_customer();

    let dto = reflect(&registry, &customer).map_to("CustomerDto").unwrap();

    assert_eq!(slot(&dto, "extra"), &Value::Null);
    assert_eq!(slot(&dto, "visits"), &Value::Int(0));
}

#[test]
fn test_first_declared_source_member_wins_on_collision() {
    let registry = TypeRegistry::new()
        .with_type(
            TypeDescriptor::new("Legacy")
                .field("Code", MemberType::text())
                .field("CODE", MemberType::text()),
        )
        .with_type(TypeDescriptor::new("Modern").field("code", MemberType::text()));
    let legacy = Object::new("Legacy").with("Code", "first").with("CODE", "second");

    let modern = reflect(&registry, &legacy).map_to("Modern").unwrap();

    assert_eq!(slot(&modern, "code"), &Value::from("first"));
}

#[test]
fn test_source_is_left_untouched() {
    let registry = shop_registry();
    let customer = sample_customer();
    let before = customer.clone();

    let _ = reflect(&registry, &customer).map_to("CustomerDto").unwrap();

    assert_eq!(customer, before);
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn test_list_is_rebuilt_as_target_container_and_element_type() {
    let registry = shop_registry();
    let customer = sample_customer();

    let dto = reflect(&registry, &customer).map_to("CustomerDto").unwrap();
    let orders = slot(&dto, "ORDERS").as_list().unwrap();

    assert_eq!(orders.container(), "VecDeque");
    assert_eq!(orders.len(), 3);
    let ids: Vec<_> = orders
        .iter()
        .map(|order| {
            let order = order.as_object().unwrap();
            assert_eq!(order.type_name(), "OrderDto");
            slot(order, "ID").clone()
        })
        .collect();
    assert_eq!(ids, vec![Value::Long(1), Value::Long(2), Value::Long(3)]);
}

#[test]
fn test_map_preserves_null_keys_and_values() {
    let registry = shop_registry();
    let customer = sample_customer();

    let dto = reflect(&registry, &customer).map_to("CustomerDto").unwrap();
    let preferences = slot(&dto, "preferences").as_map().unwrap();

    assert_eq!(preferences.container(), "BTreeMap");
    assert_eq!(preferences.len(), 3);
    assert_eq!(
        preferences.get(&Value::from("theme")),
        Some(&Value::from("dark"))
    );
    assert_eq!(
        preferences.get(&Value::Null),
        Some(&Value::from("fallback"))
    );
    assert_eq!(preferences.get(&Value::from("locale")), Some(&Value::Null));
}

#[rstest]
#[case("orders", "ORDERS")]
#[case("preferences", "preferences")]
fn test_null_source_container_yields_empty_target_container(
    #[case] source_member: &str,
    #[case] target_member: &str,
) {
    let registry = shop_registry();
    let customer = sample_customer().with(source_member, Value::Null);

    let dto = reflect(&registry, &customer).map_to("CustomerDto").unwrap();

    match slot(&dto, target_member) {
        Value::List(list) => assert!(list.is_empty()),
        Value::Map(map) => assert!(map.is_empty()),
        other => panic!("expected an empty container, got {other}"),
    }
}

#[test]
fn test_nested_untyped_lists_keep_their_runtime_shape() {
    let registry = TypeRegistry::new()
        .with_type(TypeDescriptor::new("Grid").field("rows", MemberType::list("Vec")))
        .with_type(TypeDescriptor::new("GridCopy").field("rows", MemberType::list("LinkedList")));
    let grid = Object::new("Grid").with(
        "rows",
        ListValue::new("Vec")
            .with(ListValue::from_items("VecDeque", [1, 2]))
            .with(ListValue::from_items("Vec", [3])),
    );

    let copy = reflect(&registry, &grid).map_to("GridCopy").unwrap();
    let rows = slot(&copy, "rows").as_list().unwrap();

    assert_eq!(rows.container(), "LinkedList");
    let first = rows.items()[0].as_list().unwrap();
    assert_eq!(first.container(), "VecDeque");
    assert_eq!(first.items(), &[Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_container_fallback_is_reported() {
    let registry = shop_registry().with_type(TypeDescriptor::new("Archive").field(
        "orders",
        MemberType::list_of("List", MemberType::composite("Order")),
    ));
    let customer = sample_customer();

    let outcome = reflect(&registry, &customer)
        .map_to_report("Archive")
        .unwrap();

    let orders = slot(&outcome.object, "orders").as_list().unwrap();
    assert_eq!(orders.container(), "Vec");
    assert_eq!(orders.len(), 3);
    assert!(outcome.has_fallbacks());
    assert_eq!(
        outcome.diagnostics,
        vec![Diagnostic::ContainerFallback {
            path: "orders".to_string(),
            kind: ContainerKind::Ordered,
            requested: TypeName::new("List"),
            used: TypeName::new("Vec"),
        }]
    );
}

fn inventory_registry() -> TypeRegistry {
    TypeRegistry::new()
        .with_type(TypeDescriptor::new("Item").field("name", MemberType::text()))
        .with_type(TypeDescriptor::new("ItemDto").field("NAME", MemberType::text()))
        .with_type(
            TypeDescriptor::new("Stock")
                .field(
                    "typed",
                    MemberType::map_of(
                        "HashMap",
                        MemberType::text(),
                        MemberType::composite("Item"),
                    ),
                )
                .field("mixed", MemberType::list("Vec"))
                .field("byKey", MemberType::map("HashMap")),
        )
        .with_type(
            TypeDescriptor::new("StockDto")
                .field(
                    "typed",
                    MemberType::map_of(
                        "BTreeMap",
                        MemberType::text(),
                        MemberType::composite("ItemDto"),
                    ),
                )
                .field("mixed", MemberType::list("Vec"))
                .field("bykey", MemberType::map("Map")),
        )
}

fn item(name: &str) -> Object {
    Object::new("Item").with("name", name)
}

fn stock() -> Object {
    Object::new("Stock")
        .with(
            "typed",
            MapValue::new("HashMap")
                .with("a", item("bolt"))
                .with("b", item("nut")),
        )
        .with(
            "mixed",
            ListValue::new("Vec")
                .with(MapValue::new("Map").with("x", item("washer")))
                .with(item("rivet")),
        )
        .with("byKey", MapValue::new("HashMap").with(1, "one"))
}

#[test]
fn test_map_values_are_mapped_onto_declared_composite() {
    let registry = inventory_registry();

    let dto = reflect(&registry, &stock()).map_to("StockDto").unwrap();
    let typed = slot(&dto, "typed").as_map().unwrap();

    assert_eq!(typed.container(), "BTreeMap");
    assert_eq!(typed.len(), 2);
    for (key, name) in [("a", "bolt"), ("b", "nut")] {
        let value = typed
            .get(&Value::from(key))
            .and_then(Value::as_object)
            .unwrap();
        assert_eq!(value.type_name(), "ItemDto");
        assert_eq!(slot(value, "NAME"), &Value::from(name));
    }
}

#[test]
fn test_untyped_list_deep_copies_maps_and_composites() {
    let registry = inventory_registry();

    let dto = reflect(&registry, &stock()).map_to("StockDto").unwrap();
    let mixed = slot(&dto, "mixed").as_list().unwrap();

    assert_eq!(mixed.len(), 2);
    let inner = mixed.items()[0].as_map().unwrap();
    assert_eq!(inner.container(), "IndexMap");
    let washer = inner
        .get(&Value::from("x"))
        .and_then(Value::as_object)
        .unwrap();
    assert_eq!(washer, &item("washer"));
    assert_eq!(mixed.items()[1].as_object(), Some(&item("rivet")));
}

#[test]
fn test_map_container_fallback_is_reported_at_nested_path() {
    let registry = inventory_registry();

    let outcome = reflect(&registry, &stock())
        .map_to_report("StockDto")
        .unwrap();

    let by_key = slot(&outcome.object, "bykey").as_map().unwrap();
    assert_eq!(by_key.container(), "IndexMap");
    assert_eq!(by_key.get(&Value::Int(1)), Some(&Value::from("one")));
    let fallback = |path: &str| Diagnostic::ContainerFallback {
        path: path.to_string(),
        kind: ContainerKind::KeyValue,
        requested: TypeName::new("Map"),
        used: TypeName::new("IndexMap"),
    };
    assert_eq!(outcome.diagnostics, vec![fallback("mixed[0]"), fallback("bykey")]);
}

#[test]
fn test_set_container_keeps_duplicates() {
    let registry = TypeRegistry::new()
        .with_type(TypeDescriptor::new("Raw").field("codes", MemberType::list("Vec")))
        .with_type(TypeDescriptor::new("Unique").field("codes", MemberType::list("HashSet")));
    let raw = Object::new("Raw").with("codes", ListValue::from_items("Vec", [1, 1, 2]));

    let unique = reflect(&registry, &raw).map_to("Unique").unwrap();
    let codes = slot(&unique, "codes").as_list().unwrap();

    assert_eq!(codes.container(), "HashSet");
    assert_eq!(codes.items(), &[Value::Int(1), Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_no_diagnostics_when_containers_are_concrete() {
    let registry = shop_registry();
    let customer = sample_customer();

    let outcome = reflect(&registry, &customer)
        .map_to_report("CustomerDto")
        .unwrap();

    assert!(outcome.diagnostics.is_empty());
}

// ============================================================================
// Composites
// ============================================================================

#[test]
fn test_null_composite_maps_to_null() {
    let registry = shop_registry();
    let customer = sample_customer().with("address", Value::Null);

    let dto = reflect(&registry, &customer).map_to("CustomerDto").unwrap();

    assert_eq!(slot(&dto, "Address"), &Value::Null);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_text_into_int_fails_with_wrapped_access_error() {
    let registry = shop_registry().with_type(
        TypeDescriptor::new("Strict").field("name", MemberType::primitive(ScalarKind::Int)),
    );
    let customer = sample_customer();

    let err = reflect(&registry, &customer).map_to("Strict").unwrap_err();

    match &err {
        Error::Mapping {
            operation,
            type_name,
            ..
        } => {
            assert_eq!(*operation, Operation::Map);
            assert_eq!(type_name, "Strict");
        }
        other => panic!("expected a mapping error, got {other}"),
    }
    match err.root() {
        Error::Access { op, member, .. } => {
            assert_eq!(*op, AccessOp::Write);
            assert_eq!(member, "name");
        }
        other => panic!("expected an access error, got {other}"),
    }
}

#[test]
fn test_mistyped_terminal_slot_fails_at_the_write() {
    let registry = shop_registry();
    // Written directly, bypassing the accessor's type check.
    let customer = sample_customer().with("id", "forty-two");

    let err = reflect(&registry, &customer).map_to("CustomerDto").unwrap_err();

    match err.root() {
        Error::Access { op, member, .. } => {
            assert_eq!(*op, AccessOp::Write);
            assert_eq!(member, "ID");
        }
        other => panic!("expected an access error, got {other}"),
    }
}

#[test]
fn test_mistyped_container_slot_fails_at_the_read() {
    let registry = shop_registry();
    let customer = sample_customer().with("orders", "none");

    let err = reflect(&registry, &customer).map_to("CustomerDto").unwrap_err();

    match err.root() {
        Error::Access { op, member, .. } => {
            assert_eq!(*op, AccessOp::Read);
            assert_eq!(member, "orders");
        }
        other => panic!("expected an access error, got {other}"),
    }
}

#[test]
fn test_composite_into_scalar_member_fails_with_instantiation() {
    let registry = shop_registry()
        .with_type(TypeDescriptor::new("Flat").field("address", MemberType::text()));
    let customer = sample_customer();

    let err = reflect(&registry, &customer).map_to("Flat").unwrap_err();

    assert!(matches!(err, Error::Mapping { .. }));
    assert!(matches!(err.root(), Error::Instantiation { .. }));
}

#[test]
fn test_target_without_default_constructor_fails() {
    let registry =
        shop_registry().with_type(TypeDescriptor::new("Sealed").without_default_constructor());
    let customer = sample_customer();

    let err = reflect(&registry, &customer).map_to("Sealed").unwrap_err();

    assert!(matches!(err.root(), Error::Instantiation { .. }));
}

#[test]
fn test_target_without_members_maps_to_empty_instance() {
    let registry = shop_registry().with_type(TypeDescriptor::new("Unrelated"));
    let customer = sample_customer();

    let mapped = reflect(&registry, &customer).map_to("Unrelated").unwrap();

    assert_eq!(mapped, Object::new("Unrelated"));
}
