//! Behavior tests for overload registration and resolution.

use std::collections::HashMap;
use std::sync::Arc;

use pretty_assertions::assert_eq;

use overload_kit::prelude::*;

fn new_instance(class: &str) -> Value {
    Value::instance(Instance::new(class, HashMap::new()))
}

/// Registry with a small widget hierarchy:
/// Shape <- Circle, plus two unrelated marker classes Scrollable and
/// Clickable with Panel inheriting from both.
fn widget_registry() -> DispatchRegistry {
    let registry = DispatchRegistry::new();
    registry.declare("Shape", &[]).unwrap();
    registry.declare("Circle", &["Shape"]).unwrap();
    registry.declare("Scrollable", &[]).unwrap();
    registry.declare("Clickable", &[]).unwrap();
    registry
        .declare("Panel", &["Scrollable", "Clickable"])
        .unwrap();
    registry
}

#[test]
fn most_specific_overload_wins_for_derived_argument() {
    let registry = widget_registry();
    registry
        .register(
            "Shape",
            "area_label",
            TypeKey::new([TypeTag::class("Shape")]).unwrap(),
            Arc::new(|_| Ok(Value::Str("generic shape".to_string()))),
        )
        .unwrap();
    registry
        .register(
            "Shape",
            "area_label",
            TypeKey::new([TypeTag::class("Circle")]).unwrap(),
            Arc::new(|_| Ok(Value::Str("circle".to_string()))),
        )
        .unwrap();
    registry.freeze("Shape").unwrap();

    let circle = new_instance("Circle");
    let shape = new_instance("Shape");

    assert_eq!(
        registry.call("Shape", "area_label", &[circle]).unwrap(),
        Value::Str("circle".to_string())
    );
    assert_eq!(
        registry.call("Shape", "area_label", &[shape]).unwrap(),
        Value::Str("generic shape".to_string())
    );
}

#[test]
fn diamond_argument_is_ambiguous() {
    let registry = widget_registry();
    registry.declare("Dispatcher", &[]).unwrap();
    registry
        .register(
            "Dispatcher",
            "handle",
            TypeKey::new([TypeTag::class("Scrollable")]).unwrap(),
            Arc::new(|_| Ok(Value::Str("scrolled".to_string()))),
        )
        .unwrap();
    registry
        .register(
            "Dispatcher",
            "handle",
            TypeKey::new([TypeTag::class("Clickable")]).unwrap(),
            Arc::new(|_| Ok(Value::Str("clicked".to_string()))),
        )
        .unwrap();
    registry.freeze("Dispatcher").unwrap();

    // Panel is a subclass of both Scrollable and Clickable; neither
    // overload is more specific than the other.
    let err = registry
        .call("Dispatcher", "handle", &[new_instance("Panel")])
        .unwrap_err();
    match err {
        RegistryError::AmbiguousDispatch { candidates, .. } => {
            assert_eq!(candidates.0.len(), 2);
        }
        other => panic!("expected AmbiguousDispatch, got {:?}", other),
    }

    // A plain Scrollable still dispatches cleanly.
    assert_eq!(
        registry
            .call("Dispatcher", "handle", &[new_instance("Scrollable")])
            .unwrap(),
        Value::Str("scrolled".to_string())
    );
}

#[test]
fn duplicate_signature_is_rejected() {
    let registry = widget_registry();
    let key = TypeKey::new([TypeTag::Int, TypeTag::Int]).unwrap();
    registry
        .register("Shape", "translate", key.clone(), Arc::new(|_| Ok(Value::Nil)))
        .unwrap();
    let err = registry
        .register("Shape", "translate", key, Arc::new(|_| Ok(Value::Nil)))
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateOverload { .. }));
}

#[test]
fn unmatched_argument_types_report_no_overload() {
    let registry = widget_registry();
    registry
        .register(
            "Shape",
            "scale",
            TypeKey::new([TypeTag::Float]).unwrap(),
            Arc::new(|_| Ok(Value::Nil)),
        )
        .unwrap();
    registry.freeze("Shape").unwrap();

    let err = registry
        .call("Shape", "scale", &[Value::Str("wat".to_string())])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "NoMatchingOverloadError: no overload of `Shape.scale` matching (Str)"
    );
}

#[test]
fn missing_function_name_reports_no_overload() {
    let registry = widget_registry();
    let err = registry.call("Shape", "vanish", &[]).unwrap_err();
    assert!(matches!(err, RegistryError::NoMatchingOverload { .. }));
}

#[test]
fn bool_argument_reaches_int_overload() {
    let registry = widget_registry();
    registry
        .register(
            "Shape",
            "opacity",
            TypeKey::new([TypeTag::Int]).unwrap(),
            Arc::new(|args| Ok(Value::Int(args[0].as_int().unwrap_or(0) * 100))),
        )
        .unwrap();
    registry.freeze("Shape").unwrap();

    assert_eq!(
        registry
            .call("Shape", "opacity", &[Value::Bool(true)])
            .unwrap(),
        Value::Int(100)
    );
}

#[test]
fn class_spec_installs_and_freezes() {
    let dispatch = DispatchRegistry::new();
    let instances = InstanceRegistry::new();

    ClassSpec::new("Brush")
        .overload(
            "stroke",
            TypeKey::new([TypeTag::Float]).unwrap(),
            |args| Ok(Value::Float(args[0].as_float().unwrap_or(0.0) * 2.0)),
        )
        .install(&dispatch, &instances)
        .unwrap();

    assert!(dispatch.is_frozen("Brush"));
    assert_eq!(
        dispatch.call("Brush", "stroke", &[Value::Float(1.5)]).unwrap(),
        Value::Float(3.0)
    );

    // The installed class accepts no further registrations.
    let err = dispatch
        .register(
            "Brush",
            "stroke",
            TypeKey::new([TypeTag::Int]).unwrap(),
            Arc::new(|_| Ok(Value::Nil)),
        )
        .unwrap_err();
    assert!(matches!(err, RegistryError::RegistryFrozen { .. }));
}

#[test]
fn failed_install_leaves_no_trace_of_the_class() {
    let dispatch = DispatchRegistry::new();
    let instances = InstanceRegistry::new();

    // The second stroke overload duplicates the first's key, so the
    // install fails partway through registration.
    let err = ClassSpec::new("Brush")
        .overload("stroke", TypeKey::new([TypeTag::Int]).unwrap(), |_| {
            Ok(Value::Nil)
        })
        .overload("stroke", TypeKey::new([TypeTag::Int]).unwrap(), |_| {
            Ok(Value::Nil)
        })
        .member("DEFAULT")
        .install(&dispatch, &instances)
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateOverload { .. }));

    // The declaration was rolled back: nothing half-installed answers
    // calls, and no member was tracked.
    let err = dispatch
        .call("Brush", "stroke", &[Value::Int(1)])
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownClass { .. }));
    assert_eq!(instances.count("Brush"), 0);

    // The name is free again for a corrected definition.
    ClassSpec::new("Brush")
        .overload("stroke", TypeKey::new([TypeTag::Int]).unwrap(), |args| {
            Ok(Value::Int(args[0].as_int().unwrap_or(0)))
        })
        .install(&dispatch, &instances)
        .unwrap();
    assert_eq!(
        dispatch.call("Brush", "stroke", &[Value::Int(7)]).unwrap(),
        Value::Int(7)
    );
}

#[test]
fn implementation_errors_propagate_to_caller() {
    let registry = widget_registry();
    registry
        .register(
            "Shape",
            "divide",
            TypeKey::new([TypeTag::Int, TypeTag::Int]).unwrap(),
            Arc::new(|args| {
                let a = args[0].as_int().unwrap_or(0);
                let b = args[1].as_int().unwrap_or(0);
                if b == 0 {
                    Err(RegistryError::custom("division by zero"))
                } else {
                    Ok(Value::Int(a / b))
                }
            }),
        )
        .unwrap();
    registry.freeze("Shape").unwrap();

    assert_eq!(
        registry
            .call("Shape", "divide", &[Value::Int(6), Value::Int(2)])
            .unwrap(),
        Value::Int(3)
    );
    let err = registry
        .call("Shape", "divide", &[Value::Int(6), Value::Int(0)])
        .unwrap_err();
    assert_eq!(err.to_string(), "division by zero");
}

#[test]
fn concurrent_resolution_is_safe() {
    let registry = Arc::new(DispatchRegistry::new());
    registry.declare("Counter", &[]).unwrap();
    registry
        .register(
            "Counter",
            "next",
            TypeKey::new([TypeTag::Int]).unwrap(),
            Arc::new(|args| Ok(Value::Int(args[0].as_int().unwrap_or(0) + 1))),
        )
        .unwrap();
    registry.freeze("Counter").unwrap();

    let mut handles = Vec::new();
    for t in 0..8i64 {
        let registry = Arc::clone(&registry);
        handles.push(std::thread::spawn(move || {
            for i in 0..100 {
                let out = registry
                    .call("Counter", "next", &[Value::Int(t * 100 + i)])
                    .unwrap();
                assert_eq!(out, Value::Int(t * 100 + i + 1));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}
