//! Behaviour that holds for every watched tree: bypasses, identity, counters

use facet_pretty::FacetPretty;
use propwatch::{TrackedNode, WatchOptions};
use propwatch_object::{Object, ObjectError, PropertyDescriptor, Realm, Value};
use serde_json::json;

#[test]
fn immutable_bindings_hand_out_raw_values() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let config = realm.object().with("level", 3);
    let target = realm.object();
    target.define_own_property("config".into(), PropertyDescriptor::frozen(config.clone()));
    let root = propwatch::wrap(&target);

    let read = root.get("config")?;
    assert!(TrackedNode::from_value(&read).is_none());
    assert_eq!(read, Value::Object(config));

    // the read itself is counted, but nothing below it
    assert_eq!(read.get("level")?, Value::from(3));
    assert_eq!(root.registry().paths(), ["config"]);
    Ok(())
}

#[test]
fn non_configurable_accessors_hand_out_raw_values() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let settings = realm.object().with("level", 3);
    let returned = settings.clone();
    let getter = realm.function("get settings", move |_, _| Ok(Value::from(&returned)));
    let target = realm.object();
    target.define_own_property(
        "settings".into(),
        PropertyDescriptor::accessor(Some(getter), None).configurable(false),
    );
    let root = propwatch::wrap(&target);

    let read = root.get("settings")?;
    assert!(TrackedNode::from_value(&read).is_none());
    assert_eq!(read, Value::Object(settings));

    assert_eq!(read.get("level")?, Value::from(3));
    assert_eq!(root.registry().paths(), ["settings"]);
    Ok(())
}

#[test]
fn configurable_accessors_are_wrapped() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let settings = realm.object().with("level", 3);
    let getter = realm.function("get settings", move |_, _| Ok(Value::from(&settings)));
    let target = realm.object();
    target.define_own_property(
        "settings".into(),
        PropertyDescriptor::accessor(Some(getter), None),
    );
    let root = propwatch::wrap(&target);

    let settings = root.child("settings")?.unwrap();
    settings.get("level")?;
    assert_eq!(root.registry().paths(), ["settings", "settings.level"]);
    Ok(())
}

#[test]
fn read_only_but_configurable_is_still_wrapped() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let target = realm.object();
    target.define_own_property(
        "config".into(),
        PropertyDescriptor::data(realm.object().with("level", 3)).writable(false),
    );
    let root = propwatch::wrap(&target);

    let config = root.child("config")?.unwrap();
    config.get("level")?;
    assert_eq!(root.registry().paths(), ["config", "config.level"]);
    Ok(())
}

#[test]
fn frozen_objects_stop_tracking_below_them() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let target = realm.from_json(&json!({ "foo": { "bar": { "baz": 1 } } }));
    let target = target.as_object().unwrap();
    let foo = target.get("foo")?;
    foo.as_object().unwrap().freeze();
    let root = propwatch::wrap(target);

    let foo = root.child("foo")?.unwrap();
    let bar = foo.get("bar")?;
    assert!(TrackedNode::from_value(&bar).is_none());
    assert_eq!(root.registry().paths(), ["foo", "foo.bar"]);

    // writes still reach the frozen target, which rejects them
    assert!(!foo.set("bar", 2)?);
    assert!(foo.put("bar", 2).is_err());
    assert_eq!(root.registry().counters("foo.bar").unwrap().set(), 2);
    Ok(())
}

#[test]
fn rejected_writes_are_counted() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let target = realm.object();
    target.define_own_property("ro".into(), PropertyDescriptor::data(1).writable(false));
    let root = propwatch::wrap(&target);

    assert!(!root.set("ro", 2)?);
    assert!(matches!(root.put("ro", 2), Err(ObjectError::TypeError(_))));
    assert_eq!(target.get("ro")?, Value::from(1));
    assert_eq!(root.registry().counters("ro").unwrap().set(), 2);
    Ok(())
}

#[test]
fn wrappers_are_not_cached() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let target = realm.object().with("foo", realm.object());
    let root = propwatch::wrap(&target);

    let first = root.child("foo")?.unwrap();
    let second = root.child("foo")?.unwrap();
    assert!(!first.as_object().ptr_eq(second.as_object()));
    assert!(first.target().ptr_eq(second.target()));
    assert!(first.registry().ptr_eq(&second.registry()));
    assert_eq!(first.path(), "foo.");
    assert_eq!(root.registry().counters("foo").unwrap().get(), 2);
    Ok(())
}

#[test]
fn nodes_are_transparent() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let target = realm.from_json(&json!({ "list": [1, 2, 3], "name": "x" }));
    let target = target.as_object().unwrap();
    let root = propwatch::wrap(target);

    let list = root.child("list")?.unwrap();
    assert!(list.as_object().is_array());
    assert_eq!(list.as_object().own_keys(), list.target().own_keys());
    assert_eq!(list.invoke("join", &[])?, Value::from("1,2,3"));
    assert_eq!(
        root.invoke("hasOwnProperty", &["name".into()])?,
        Value::Bool(true)
    );
    assert_eq!(root.invoke("toString", &[])?, Value::from("[object Object]"));

    let added = realm.object();
    assert!(root.set("added", added.clone())?);
    assert_eq!(target.get("added")?, Value::Object(added));
    Ok(())
}

#[test]
fn functions_are_wrapped_and_still_callable() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let double = realm.function("double", |_, args| {
        Ok(Value::from(args.first().map_or(0.0, Value::to_number) * 2.0))
    });
    let root = propwatch::wrap(&realm.object().with("double", double));

    let read = root.get("double")?;
    let node = TrackedNode::from_value(&read).unwrap();
    assert!(read.is_callable());
    assert_eq!(read.call(&Value::Undefined, &[Value::from(21)])?, Value::from(42));

    // `name` is non-writable but configurable
    assert_eq!(node.get("name")?, Value::from("double"));
    assert_eq!(root.registry().paths(), ["double", "double.name"]);
    Ok(())
}

#[test]
fn total_is_always_get_plus_set() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let target = realm.from_json(&json!({
        "a": { "b": [1, 2, 3], "c": "x" },
        "d": 0,
    }));
    let root = propwatch::wrap_with_options(target.as_object().unwrap(), false);

    for round in 0..5usize {
        let a = root.child("a")?.unwrap();
        let b = a.child("b")?.unwrap();
        b.get(round % 3)?;
        if round % 2 == 0 {
            b.set(round % 3, round)?;
            a.set("c", "y")?;
        }
        root.set("d", round)?;
        root.get("d")?;
        b.invoke("forEach", &[realm.function("noop", |_, _| Ok(Value::Undefined)).into()])?;
    }

    let registry = root.registry();
    assert!(!registry.is_empty());
    for item in registry.items() {
        let counters = item.counters();
        assert_eq!(counters.total(), counters.get() + counters.set(), "{}", item.path());
        assert!(counters.total() > 0);
    }
    Ok(())
}

#[test]
fn registry_snapshot() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let target = realm.from_json(&json!({ "foo": { "list": ["a", "b"] } }));
    let root = propwatch::wrap(target.as_object().unwrap());

    let foo = root.child("foo")?.unwrap();
    foo.get("list")?.get(1usize)?;
    foo.set("bar", true)?;

    insta::assert_debug_snapshot!(root.registry(), @r#"
    {
        "foo": Counters {
            get: 1,
            set: 0,
            total: 1,
        },
        "foo.bar": Counters {
            get: 0,
            set: 1,
            total: 1,
        },
        "foo.list": Counters {
            get: 1,
            set: 0,
            total: 1,
        },
        "foo.list[]": Counters {
            get: 1,
            set: 0,
            total: 1,
        },
    }
    "#);
    Ok(())
}

#[test]
fn registry_items_pretty_print() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let root = propwatch::wrap(&realm.object().with("foo", 1));
    root.get("foo")?;

    let item = root.registry().get("foo").unwrap();
    let rendered = format!("{}", item.pretty());
    assert!(rendered.contains("counters"), "{rendered}");
    assert!(rendered.contains("total"), "{rendered}");

    let options = format!("{}", WatchOptions::default().pretty());
    assert!(options.contains("only_own_property"), "{options}");
    Ok(())
}

#[test]
fn proxies_over_proxies_count_once_per_layer() -> Result<(), ObjectError> {
    propwatch_testhelpers::setup();

    let realm = Realm::new();
    let target = realm.object().with("foo", realm.object());
    let inner = propwatch::wrap(&target);
    let outer = propwatch::wrap(&Object::clone(inner.as_object()));

    outer.get("foo")?;
    assert_eq!(inner.registry().counters("foo").unwrap().get(), 1);
    assert_eq!(outer.registry().counters("foo").unwrap().get(), 1);
    Ok(())
}
