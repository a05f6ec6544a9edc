//! End-to-end resolver tests built from synthetic descriptors.

use xmlbind::prelude::*;
use xmlbind_core::path;
use xmlbind_resolver::dispatch_order;

fn attr(name: &str, xml_name: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, TypeRef::String).with_directive(Directive::attribute_named(xml_name))
}

fn resolve(classes: Vec<ClassDescriptor>, class: &str) -> Result<BindingModel, BindingError> {
    let source = DescriptorSet::from_classes(classes).expect("Failed to build source");
    Resolver::new(&source).resolve_class(&class.into())
}

// =============================================================================
// Path Segmenter
// =============================================================================

#[test]
fn test_path_segmentation() {
    let path = path::segment("foo/bar").unwrap();
    assert_eq!(path.segments(), &["foo".to_string(), "bar".to_string()]);
    assert!(path::segment("ns:item/x_1").is_ok());

    for bad in ["/foo", "foo/", "foo/ bar", "", "foo//bar", "foo/b-r"] {
        assert!(path::segment(bad).is_err(), "'{}' should be rejected", bad);
    }
}

// =============================================================================
// Naming Conflicts
// =============================================================================

#[test]
fn test_sibling_conflict_regardless_of_order() {
    for (first, second) in [("one", "two"), ("two", "one")] {
        let result = resolve(
            vec![
                ClassDescriptor::new("a.Item")
                    .bindable()
                    .with_field(attr(first, "x"))
                    .with_field(attr(second, "x")),
            ],
            "a.Item",
        );
        match result {
            Err(BindingError::DuplicateAttribute { existing, new, .. }) => {
                assert_eq!(existing, first);
                assert_eq!(new, second);
            }
            other => panic!("Expected DuplicateAttribute error, got {:?}", other),
        }
    }
}

#[test]
fn test_inherited_conflict_through_polymorphic_substitution() {
    let result = resolve(
        vec![
            ClassDescriptor::interface("g.Shape"),
            ClassDescriptor::new("g.Circle").bindable().with_interface("g.Shape"),
            ClassDescriptor::new("g.Base").bindable().with_field(
                FieldDescriptor::new("circle", TypeRef::class("g.Circle"))
                    .with_directive(Directive::element()),
            ),
            ClassDescriptor::new("g.Drawing")
                .bindable()
                .with_superclass("g.Base")
                .with_field(
                    FieldDescriptor::new("shape", TypeRef::class("g.Shape")).with_directive(
                        Directive::element_with_matchers(vec![MatcherDirective::new(
                            "circle", "g.Circle",
                        )]),
                    ),
                ),
        ],
        "g.Drawing",
    );
    match result {
        Err(BindingError::InheritedNameConflict {
            namespace,
            descendant_field,
            ancestor_field,
            ..
        }) => {
            assert_eq!(namespace, "element");
            assert_eq!(descendant_field, "shape");
            assert_eq!(ancestor_field, "circle");
        }
        other => panic!("Expected InheritedNameConflict error, got {:?}", other),
    }
}

// =============================================================================
// Constructors
// =============================================================================

#[test]
fn test_every_partial_constructor_mix_fails() {
    // Every non-empty, non-full subset of three parameters.
    for mask in 1u8..7 {
        let mut ctor = ConstructorDescriptor::new();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            let mut param = ParamDescriptor::new(*name, TypeRef::String);
            if mask & (1 << i) != 0 {
                param = param.with_directive(Directive::attribute());
            }
            ctor = ctor.with_param(param);
        }
        let result = resolve(
            vec![ClassDescriptor::new("a.Item").bindable().with_constructor(ctor)],
            "a.Item",
        );
        match result {
            Err(err @ BindingError::PartiallyAnnotatedConstructor { .. }) => {
                assert_eq!(err.kind(), ErrorKind::Configuration);
                assert!(err.to_string().contains("Item(String, String, String)"));
            }
            other => panic!("Expected PartiallyAnnotatedConstructor for mask {}, got {:?}", mask, other),
        }
    }
}

#[test]
fn test_private_directived_constructor_rejected() {
    let result = resolve(
        vec![
            ClassDescriptor::new("a.Point")
                .bindable()
                .with_field(
                    FieldDescriptor::new("x", TypeRef::String).with_visibility(Visibility::Private),
                )
                .with_method(MethodDescriptor::new("getX").returning(TypeRef::String))
                .with_constructor(ConstructorDescriptor::new())
                .with_constructor(
                    ConstructorDescriptor::new()
                        .with_visibility(Visibility::Private)
                        .with_param(
                            ParamDescriptor::new("x", TypeRef::String)
                                .with_directive(Directive::attribute()),
                        ),
                ),
        ],
        "a.Point",
    );
    match result {
        Err(err @ BindingError::NoUsableConstructor { .. }) => {
            assert_eq!(err.kind(), ErrorKind::Configuration);
            assert!(err.to_string().contains("Point(String)"), "{}", err);
        }
        other => panic!("Expected NoUsableConstructor error, got {:?}", other),
    }
}

#[test]
fn test_common_case_leaves_unbindable_types_unbound() {
    let model = resolve(
        vec![
            ClassDescriptor::new("a.Tags")
                .with_xml(XmlDirective::default().with_scan_mode(ScanMode::CommonCase))
                .with_field(FieldDescriptor::new("label", TypeRef::String))
                .with_field(FieldDescriptor::new("tags", TypeRef::list_of(TypeRef::String)))
                .with_field(FieldDescriptor::new("when", TypeRef::class("java.util.Date"))),
        ],
        "a.Tags",
    )
    .unwrap();

    let bound: Vec<&str> = model
        .root
        .fields()
        .iter()
        .map(|f| f.source.field.as_str())
        .collect();
    assert_eq!(bound, vec!["label"]);
}

#[test]
fn test_private_field_without_accessors() {
    let result = resolve(
        vec![
            ClassDescriptor::new("a.Item").bindable().with_field(
                FieldDescriptor::new("secret", TypeRef::String)
                    .with_visibility(Visibility::Private)
                    .with_directive(Directive::attribute()),
            ),
        ],
        "a.Item",
    );
    match result {
        Err(err @ BindingError::NoGetterFound { .. }) => {
            assert_eq!(err.kind(), ErrorKind::Accessor);
            assert!(err.to_string().contains("getSecret"));
        }
        other => panic!("Expected NoGetterFound error, got {:?}", other),
    }
}

// =============================================================================
// Polymorphism
// =============================================================================

fn chain_hierarchy() -> (DescriptorSet, Vec<TypeMatcher>) {
    // Animal <- Dog <- Puppy, Animal <- Cat, plus an interface diamond on Puppy.
    let source = DescriptorSet::from_classes(vec![
        ClassDescriptor::interface("z.Pet"),
        ClassDescriptor::new("z.Animal").bindable(),
        ClassDescriptor::new("z.Dog").bindable().with_superclass("z.Animal"),
        ClassDescriptor::new("z.Cat").bindable().with_superclass("z.Animal"),
        ClassDescriptor::new("z.Puppy")
            .bindable()
            .with_superclass("z.Dog")
            .with_interface("z.Pet"),
    ])
    .unwrap();
    let matchers = vec![
        TypeMatcher::new("animal", "z.Animal"),
        TypeMatcher::new("dog", "z.Dog"),
        TypeMatcher::new("cat", "z.Cat"),
        TypeMatcher::new("puppy", "z.Puppy"),
    ];
    (source, matchers)
}

#[test]
fn test_dispatch_order_is_topological_for_every_rotation() {
    let (source, matchers) = chain_hierarchy();
    let hierarchy = TypeHierarchy::from_source(&source);

    for shift in 0..matchers.len() {
        let mut rotated = matchers.clone();
        rotated.rotate_left(shift);
        let order = dispatch_order(&hierarchy, &rotated);
        assert_eq!(order.len(), rotated.len());

        let position = |name: &str| order.iter().position(|m| m.xml_name == name).unwrap();
        for (ancestor, descendant) in [
            ("animal", "dog"),
            ("animal", "cat"),
            ("animal", "puppy"),
            ("dog", "puppy"),
        ] {
            assert!(
                position(descendant) < position(ancestor),
                "{} must precede {} in {:?}",
                descendant,
                ancestor,
                order
            );
        }
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let (mut source, _) = chain_hierarchy();
    source
        .register(
            ClassDescriptor::new("z.Zoo")
                .bindable()
                .with_field(attr("name", "name"))
                .with_field(
                    FieldDescriptor::new("residents", TypeRef::list_of(TypeRef::class("z.Animal")))
                        .with_directive(Directive::element_with_matchers(vec![
                            MatcherDirective::new("animal", "z.Animal"),
                            MatcherDirective::new("dog", "z.Dog"),
                            MatcherDirective::new("puppy", "z.Puppy"),
                        ]))
                        .with_directive(Directive::path("residents")),
                ),
        )
        .unwrap();

    let resolver = Resolver::new(&source);
    let first = resolver.resolve_class(&"z.Zoo".into()).unwrap();
    let second = resolver.resolve_class(&"z.Zoo".into()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

    let residents = first.polymorphic_field("residents").unwrap();
    let order: Vec<&str> = residents
        .dispatch_order
        .iter()
        .map(|m| m.xml_name.as_str())
        .collect();
    assert_eq!(order, vec!["puppy", "dog", "animal"]);
}

#[test]
fn test_matcher_to_unrelated_type() {
    let result = resolve(
        vec![
            ClassDescriptor::interface("g.Shape"),
            ClassDescriptor::new("g.Rock").bindable(),
            ClassDescriptor::new("g.Drawing").bindable().with_field(
                FieldDescriptor::new("shape", TypeRef::class("g.Shape")).with_directive(
                    Directive::element_with_matchers(vec![MatcherDirective::new(
                        "rock", "g.Rock",
                    )]),
                ),
            ),
        ],
        "g.Drawing",
    );
    match result {
        Err(BindingError::InvalidMatcherType { reason, .. }) => {
            assert!(reason.contains("not a subtype of"), "{}", reason);
        }
        other => panic!("Expected InvalidMatcherType error, got {:?}", other),
    }
}
