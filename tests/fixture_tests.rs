//! Integration tests that resolve JSON descriptor documents from
//! `test_fixtures/`, the way a host that precomputes descriptors would.

use std::path::PathBuf;

use xmlbind::prelude::*;

/// Load a descriptor document from the test_fixtures directory.
fn load_fixture(filename: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

fn load_source(filename: &str) -> DescriptorSet {
    DescriptorSet::from_json(&load_fixture(filename)).expect("Failed to load descriptor set")
}

fn names(matchers: &[TypeMatcher]) -> Vec<&str> {
    matchers.iter().map(|m| m.xml_name.as_str()).collect()
}

// =============================================================================
// item.json
// =============================================================================

#[test]
fn test_item_two_attributes() {
    let report = xmlbind::resolve_json(&load_fixture("item.json")).unwrap();
    let model = report.model(&"a.Item".into()).unwrap();

    let keys: Vec<&str> = model.root.attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert!(model.root.elements.is_empty());
    assert!(model.root.text_content.is_none());
    assert!(model.root.attributes.values().all(|f| f.access == AccessStrategy::DirectField));
}

#[test]
fn test_order_common_case() {
    let source = load_source("item.json");
    let model = Resolver::new(&source)
        .resolve_class(&"a.Order".into())
        .unwrap();

    assert_eq!(model.xml_name, "order");
    assert!(matches!(
        model.root.attribute("id").unwrap().kind,
        FieldKind::Attribute { required: true, .. }
    ));

    // Implicitly bound private field reached through Hungarian-stripped accessors.
    let notes = model.root.element("mNotes").unwrap();
    assert!(matches!(notes.kind, FieldKind::PropertyElement { .. }));
    assert_eq!(
        notes.access,
        AccessStrategy::GetterSetter {
            getter: "getNotes".into(),
            setter: "setNotes".into(),
        }
    );

    assert!(matches!(
        model.root.element("item").unwrap().kind,
        FieldKind::Element { .. }
    ));
    let line = model.root.child("lines").unwrap().element("line").unwrap();
    assert!(matches!(line.kind, FieldKind::ElementList { .. }));
    assert_eq!(line.full_path().to_string(), "lines/line");

    let meta = model.root.child("meta").unwrap();
    assert!(meta.attribute("created").is_some());

    assert!(matches!(
        model.root.text_content.as_ref().unwrap().kind,
        FieldKind::TextContent {
            write_as_cdata: true
        }
    ));

    for skipped in ["CACHE", "scratch", "internal", "tags", "when"] {
        assert!(
            model.root.fields().iter().all(|f| f.source.field != skipped),
            "{} should not be bound",
            skipped
        );
    }
}

#[test]
fn test_point_constructor_binding() {
    let source = load_source("item.json");
    let model = Resolver::new(&source)
        .resolve_class(&"a.Point".into())
        .unwrap();

    let ctor = model.constructor.as_ref().unwrap();
    assert_eq!(ctor.signature, "Point(int, String)");
    assert_eq!(ctor.params, vec!["x", "label"]);
    assert!(model.root.attribute("x").unwrap().access.is_constructor_param());
    assert_eq!(
        model.root.element("label").unwrap().access,
        AccessStrategy::ConstructorParamWithGetter {
            getter: "getLabel".into()
        }
    );
}

#[test]
fn test_model_serializes_to_json() {
    let source = load_source("item.json");
    let model = Resolver::new(&source)
        .resolve_class(&"a.Item".into())
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&model.to_json().unwrap()).unwrap();

    assert_eq!(json["class"], "a.Item");
    assert_eq!(json["root"]["attributes"]["a"]["kind"]["kind"], "attribute");
}

// =============================================================================
// shapes.json
// =============================================================================

#[test]
fn test_shapes_generic_registry() {
    let source = load_source("shapes.json");
    let resolver = Resolver::new(&source);

    let entries = resolver.registry().entries_for(&"g.Shape".into());
    let registered: Vec<&str> = entries.iter().map(|e| e.xml_name.as_str()).collect();
    // Private and abstract classes are never registered.
    assert_eq!(registered, vec!["square", "rect", "circle"]);
}

#[test]
fn test_shapes_polymorphic_list() {
    let source = load_source("shapes.json");
    let model = Resolver::new(&source)
        .resolve_class(&"g.Drawing".into())
        .unwrap();

    assert_eq!(model.xml_name, "drawing");
    let layer = model.root.child("layer").unwrap();
    for name in ["square", "rect", "circle"] {
        match &layer.element(name).unwrap().kind {
            FieldKind::PolymorphicSubstitution { original, list, .. } => {
                assert_eq!(original.field, "shapes");
                assert!(*list);
            }
            other => panic!("Expected PolymorphicSubstitution, got {:?}", other),
        }
    }

    let shapes = model.polymorphic_field("shapes").unwrap();
    let order = names(&shapes.dispatch_order);
    let square = order.iter().position(|n| *n == "square").unwrap();
    let rect = order.iter().position(|n| *n == "rect").unwrap();
    assert!(square < rect, "subtype must be dispatched first: {:?}", order);
}

#[test]
fn test_shapes_explicit_matchers() {
    let source = load_source("shapes.json");
    let model = Resolver::new(&source)
        .resolve_class(&"g.Drawing".into())
        .unwrap();

    assert!(model.root.element("box").is_some());
    assert!(model.root.element("sq").is_some());
    assert!(model.root.element("outline").is_none());

    let outline = model.polymorphic_field("outline").unwrap();
    assert_eq!(names(&outline.matchers), vec!["box", "sq"]);
    assert_eq!(names(&outline.dispatch_order), vec!["sq", "box"]);
}

#[test]
fn test_shapes_inheritance_flag() {
    let source = load_source("shapes.json");
    let resolver = Resolver::new(&source);

    let square = resolver.resolve_class(&"g.Square".into()).unwrap();
    assert!(square.root.attribute("side").is_some());
    assert!(square.root.attribute("width").is_some());

    let rect = resolver.resolve_class(&"g.Rect".into()).unwrap();
    assert_eq!(rect.xml_name, "rect");
    assert_eq!(rect.root.attributes.len(), 1);
}

#[test]
fn test_shapes_private_class_fails_run() {
    match xmlbind::resolve_json(&load_fixture("shapes.json")) {
        Err(xmlbind::Error::Binding(BindingError::NoUsableConstructor { class, reason })) => {
            assert_eq!(class.to_string(), "g.Hidden");
            assert!(reason.contains("private"));
        }
        other => panic!("Expected NoUsableConstructor error, got {:?}", other),
    }
}

#[test]
fn test_shapes_skip_class_policy() {
    let config = xmlbind::config_from_json(r#"{"failure_policy": "skip_class"}"#).unwrap();
    let report = xmlbind::resolve_json_with_config(&load_fixture("shapes.json"), config).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].class().unwrap().to_string(), "g.Hidden");
    let resolved: Vec<String> = report.models.keys().map(|n| n.to_string()).collect();
    assert_eq!(resolved, vec!["g.Square", "g.Rect", "g.Circle", "g.Drawing"]);
}

// =============================================================================
// conflicts.json
// =============================================================================

#[test]
fn test_matcher_name_conflict() {
    let source = load_source("conflicts.json");
    let err = Resolver::new(&source)
        .resolve_class(&"c.Ambiguous".into())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Polymorphism);
    assert!(err.is_naming_conflict());
    match err {
        BindingError::MatcherNameConflict {
            name, first, second, ..
        } => {
            assert_eq!(name, "a");
            assert_eq!(first.to_string(), "c.TypeA");
            assert_eq!(second.to_string(), "c.TypeB");
        }
        other => panic!("Expected MatcherNameConflict error, got {:?}", other),
    }
}

#[test]
fn test_inherited_name_conflict() {
    let source = load_source("conflicts.json");
    match Resolver::new(&source).resolve_class(&"c.Child".into()) {
        Err(BindingError::InheritedNameConflict {
            descendant_class,
            ancestor_class,
            ..
        }) => {
            assert_eq!(descendant_class.to_string(), "c.Child");
            assert_eq!(ancestor_class.to_string(), "c.Parent");
        }
        other => panic!("Expected InheritedNameConflict error, got {:?}", other),
    }
}

#[test]
fn test_partially_annotated_constructor() {
    let source = load_source("conflicts.json");
    match Resolver::new(&source).resolve_class(&"c.Partial".into()) {
        Err(BindingError::PartiallyAnnotatedConstructor {
            constructor, plain, ..
        }) => {
            assert_eq!(constructor, "Partial(String, String)");
            assert_eq!(plain, "b");
        }
        other => panic!("Expected PartiallyAnnotatedConstructor error, got {:?}", other),
    }
}

#[test]
fn test_conflicts_skip_class_report() {
    let source = load_source("conflicts.json");
    let config = ResolverConfig::default().with_failure_policy(FailurePolicy::SkipClass);
    let report = Resolver::with_config(&source, config).resolve_all().unwrap();

    let failed: Vec<String> = report
        .failures
        .iter()
        .filter_map(|e| e.class().map(|c| c.to_string()))
        .collect();
    assert_eq!(failed, vec!["c.Ambiguous", "c.Child", "c.Partial"]);
    assert!(report.model(&"c.Parent".into()).is_some());
}
