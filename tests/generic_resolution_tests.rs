//! Return types of generic operations resolve through per-wrapper bindings.

mod common;

use std::sync::Arc;

use common::*;
use safe_nav::{ListNav, MapNav, NavAdapter, NavError, NavMap, ObjectRef, Value};

fn foo(name: &str, rank: i32) -> ObjectRef {
    Arc::new(Foo::new(name, rank))
}

#[test]
fn test_param_return_uses_bound_type() {
    let engine = engine();
    let container = Container::new("single", Some(foo("alpha", 1)));
    let wrapper = engine
        .wrap_shape("Container<Foo>", Some(Arc::new(container)))
        .unwrap();

    let item = assert_wrapper_of(wrapper.invoke("get", &[]).unwrap(), "Foo", "get");
    assert_present(&item, "item");
    assert_eq!(item.invoke("name", &[]).unwrap(), Value::Text("alpha".into()));
}

#[test]
fn test_absent_container_yields_absent_bound_type() {
    let engine = engine();
    let wrapper = engine.wrap_shape("Container<Foo>", None).unwrap();

    let item = assert_wrapper_of(wrapper.invoke("get", &[]).unwrap(), "Foo", "get");
    assert_absent(&item, "item of absent container");
    assert_eq!(item.invoke("rank", &[]).unwrap(), Value::I32(0));
    assert_eq!(item.invoke("name", &[]).unwrap(), Value::Absent);
}

#[test]
fn test_param_inside_parameterized_return_is_substituted() {
    let engine = engine();
    let container = Container::new("many", None).with_items([
        Value::Object(foo("a", 1)),
        Value::Object(foo("b", 2)),
    ]);
    let wrapper = engine
        .wrap_shape("Container<Foo>", Some(Arc::new(container)))
        .unwrap();

    let items = ListNav::from_wrapper(assert_wrapper_of(
        wrapper.invoke("items", &[]).unwrap(),
        "List",
        "items",
    ));
    assert_eq!(items.wrapper().bindings().get("E").map(|t| t.to_string()), Some("Foo".into()));
    assert_eq!(items.size().unwrap(), 2);

    let second = assert_wrapper_of(items.get(1).unwrap(), "Foo", "second");
    assert_eq!(second.invoke("rank", &[]).unwrap(), Value::I32(2));
}

#[test]
fn test_value_like_binding_returns_raw_values() {
    let engine = engine();
    let container = Container::new("numbers", None).with_items([Value::I64(5), Value::I64(8)]);
    let wrapper = engine
        .wrap_shape("Container<i64>", Some(Arc::new(container)))
        .unwrap();

    let items = ListNav::from_wrapper(wrapper.nav("items", &[]).unwrap());
    assert_eq!(items.get(0).unwrap(), Value::I64(5));
    assert_eq!(items.index_of(Value::I64(8)).unwrap(), 1);

    // get() is bound to i64 but the container holds nothing: present path,
    // so the real absence comes back as-is
    assert_eq!(wrapper.invoke("get", &[]).unwrap(), Value::Absent);

    let absent = engine.wrap_shape("Container<i64>", None).unwrap();
    assert_eq!(absent.invoke("get", &[]).unwrap(), Value::I64(0));
}

#[test]
fn test_nested_generic_bindings() {
    let engine = engine();
    let wrapper = engine.wrap_shape("Container<List<Foo>>", None).unwrap();

    let list = assert_wrapper_of(wrapper.invoke("get", &[]).unwrap(), "List", "get");
    assert_eq!(
        list.bindings().get("E").map(|t| t.descriptor().name()),
        Some("Foo")
    );
    let first = assert_wrapper_of(list.invoke("first", &[]).unwrap(), "Foo", "first");
    assert_absent(&first, "first of absent nested list");

    let items = assert_wrapper_of(wrapper.invoke("items", &[]).unwrap(), "List", "items");
    let element = items.bindings().get("E").unwrap();
    assert_eq!(element.to_string(), "List<Foo>");
}

#[test]
fn test_concrete_return_keeps_bindings() {
    let engine = engine();
    let wrapper = engine
        .wrap_shape("Container<Foo>", Some(Arc::new(Container::new("box", None))))
        .unwrap();
    assert_eq!(wrapper.invoke("label", &[]).unwrap(), Value::Text("box".into()));
    assert_eq!(wrapper.bindings().len(), 1);
}

#[test]
fn test_map_views_follow_key_and_value_bindings() {
    let engine = engine();
    let map: ObjectRef = Arc::new(NavMap::from_entries([
        (Value::from("ada"), Value::Object(Arc::new(Account::new(1, 10)))),
        (Value::from("bob"), Value::Absent),
    ]));
    let map = MapNav::from_wrapper(engine.wrap_shape("Map<String, Account>", Some(map)).unwrap());

    let keys = map.keys().unwrap();
    assert_eq!(keys.get(0).unwrap(), Value::Text("ada".into()));

    let values = map.values().unwrap();
    let first = assert_wrapper_of(values.get(0).unwrap(), "Account", "first value");
    assert_eq!(first.invoke("id", &[]).unwrap(), Value::I64(1));
    let second = assert_wrapper_of(values.get(1).unwrap(), "Account", "second value");
    assert_absent(&second, "bob has no account");

    let missing = assert_wrapper_of(map.get("zed".into()).unwrap(), "Account", "missing key");
    assert_absent(&missing, "missing key");
}

#[test]
fn test_unbound_parameter_is_a_setup_error() {
    let engine = engine();
    let raw = engine.wrap_typed(&container_type(), None);

    let err = raw.invoke("get", &[]).unwrap_err();
    assert_nav_error(
        &err,
        &NavError::UnresolvedGenericParameter {
            parameter: "T".into(),
            bound: vec![],
        },
        "get on unbound container",
    );
    assert_error_contains(&err, "Container::get", "context names the operation");
}

#[test]
fn test_wrong_arity_is_rejected() {
    let engine = engine();
    let err = engine.wrap_shape("Container<Foo, Foo>", None).unwrap_err();
    assert_nav_error(
        &err,
        &NavError::GenericArityMismatch {
            base: "Container".into(),
            expected: 1,
            got: 2,
        },
        "two arguments for one parameter",
    );
}

#[test]
fn test_unregistered_argument_is_rejected() {
    let engine = engine();
    let err = engine.wrap_shape("Container<Bar>", None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<NavError>(),
        Some(NavError::UnsupportedReturnShape { .. })
    ));
    assert_error_contains(&err, "`Bar` is not registered", "unregistered argument");
}
