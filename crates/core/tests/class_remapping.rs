mod common;

use classmap_api::opcodes::*;
use classmap_api::{
    ClassVisitor, FrameItem, FrameKind, InnerClassLink, Label, OuterClassLink, Value, VisitError,
    VisitResult,
};
use classmap_core::recording::{AnnotationEvent, ClassEvent, FieldEvent, MethodEvent};
use classmap_core::{
    ClassRemapper, IdentityRemapper, InnerNamePolicy, Recorder, Remapper, SimpleRemapper,
};
use common::*;

#[test]
fn test_header_is_remapped_and_context_keeps_original_name() {
    let remapper = SimpleRemapper::new()
        .with_class("a/B", "x/Y")
        .with_class("a/I", "x/J");
    let mut adapter = ClassRemapper::new(Recorder::new(), remapper);

    let mut h = header("a/B");
    h.interfaces = Some(vec!["a/I".to_string()]);
    adapter.visit_header(h).unwrap();

    assert_eq!(adapter.class_name(), Some("a/B"));
    let events = adapter.inner().events();
    let forwarded = find_header(events);
    assert_eq!(forwarded.name, "x/Y");
    assert_eq!(forwarded.super_name.as_deref(), Some("java/lang/Object"));
    assert_eq!(forwarded.interfaces, Some(vec!["x/J".to_string()]));
    assert_eq!(forwarded.version, 52);
}

#[test]
fn test_field_is_keyed_by_original_owner_and_descriptor() {
    let remapper = SimpleRemapper::new()
        .with_class("a/B", "x/Y")
        .with_field("a/B", "f", Some("La/B;"), "g");
    let mut adapter = ClassRemapper::new(Recorder::new(), remapper);

    adapter.visit_header(header("a/B")).unwrap();
    let fv = adapter.visit_field(field("f", "La/B;")).unwrap();
    assert!(fv.is_some());
    drop(fv);

    let recorded = adapter.into_inner().into_events();
    let fields = fields(&recorded);
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].0.name, "g");
    assert_eq!(fields[0].0.descriptor, "Lx/Y;");
}

#[test]
fn test_identity_remapping_reproduces_the_traversal() {
    let original = sample_events();
    let remapped = remap_events(&original, IdentityRemapper);
    assert_eq!(remapped, original);
}

#[test]
fn test_remapping_is_deterministic() {
    let original = sample_events();
    let first = remap_events(&original, sample_remapper());
    let second = remap_events(&original, sample_remapper());
    assert_eq!(first, second);
    assert_ne!(first, original);
}

#[test]
fn test_event_order_and_shape_are_preserved() {
    let original = sample_events();
    let remapped = remap_events(&original, sample_remapper());
    assert_eq!(remapped.len(), original.len());
    for (before, after) in original.iter().zip(&remapped) {
        assert_eq!(
            std::mem::discriminant(before),
            std::mem::discriminant(after)
        );
    }
}

#[test]
fn test_class_level_references() {
    let remapped = remap_events(&sample_events(), sample_remapper());

    let h = find_header(&remapped);
    assert_eq!(h.name, "x/Y");
    assert_eq!(
        h.signature.as_deref(),
        Some("<T:Ljava/lang/Object;>Lx/Base<TT;>;Lx/J;")
    );
    assert_eq!(h.super_name.as_deref(), Some("x/Base"));

    assert!(remapped.contains(&ClassEvent::Source {
        source: Some("B.java".to_string()),
        debug: None,
    }));
    assert!(remapped.contains(&ClassEvent::OuterClass(OuterClassLink {
        owner: "x/Outer".to_string(),
        name: Some("build".to_string()),
        descriptor: Some("(Lx/Y;)V".to_string()),
    })));
    assert!(remapped.contains(&ClassEvent::InnerClass(InnerClassLink {
        name: "x/Y$Nested".to_string(),
        outer_name: Some("x/Y".to_string()),
        inner_name: Some("Inner".to_string()),
        access: 0x0009,
    })));
    assert!(remapped.contains(&ClassEvent::InnerClass(InnerClassLink {
        name: "a/B$1".to_string(),
        outer_name: None,
        inner_name: None,
        access: 0,
    })));
}

#[test]
fn test_annotation_tree_is_remapped() {
    let remapped = remap_events(&sample_events(), sample_remapper());
    let annotation = remapped
        .iter()
        .find_map(|event| match event {
            ClassEvent::Annotation {
                descriptor, events, ..
            } => Some((descriptor, events)),
            _ => None,
        })
        .unwrap();

    assert_eq!(annotation.0, "Lx/Marker;");
    assert_eq!(
        annotation.1,
        &vec![
            AnnotationEvent::Value {
                name: Some("type".to_string()),
                value: Value::Type("Lx/Y;".to_string()),
            },
            AnnotationEvent::Value {
                name: Some("label".to_string()),
                value: Value::String("a/B".to_string()),
            },
            AnnotationEvent::Enum {
                name: Some("kind".to_string()),
                descriptor: "Lx/Kind;".to_string(),
                value: "ONE".to_string(),
            },
            AnnotationEvent::Annotation {
                name: Some("inner".to_string()),
                descriptor: "Lx/Marker;".to_string(),
                events: vec![AnnotationEvent::End],
            },
            AnnotationEvent::Array {
                name: Some("types".to_string()),
                events: vec![
                    AnnotationEvent::Value {
                        name: None,
                        value: Value::Type("[Lx/Y;".to_string()),
                    },
                    AnnotationEvent::Value {
                        name: None,
                        value: Value::Int(1),
                    },
                    AnnotationEvent::End,
                ],
            },
            AnnotationEvent::End,
        ]
    );
}

#[test]
fn test_fields_are_remapped() {
    let remapped = remap_events(&sample_events(), sample_remapper());
    let fields = fields(&remapped);
    assert_eq!(fields.len(), 3);

    let (f, events) = fields[0];
    assert_eq!(f.name, "g");
    assert_eq!(f.descriptor, "Lx/Y;");
    assert_eq!(
        events,
        &vec![
            FieldEvent::Annotation {
                descriptor: "Lx/Marker;".to_string(),
                visible: false,
                events: vec![AnnotationEvent::End],
            },
            FieldEvent::End,
        ]
    );

    // String constants are never treated as names.
    let (constant, _) = fields[1];
    assert_eq!(constant.name, "NAME");
    assert_eq!(constant.value, Some(Value::String("a/B".to_string())));

    let (items, _) = fields[2];
    assert_eq!(items.signature.as_deref(), Some("Ljava/util/List<Lx/Y;>;"));
}

#[test]
fn test_overloads_are_renamed_independently() {
    let remapped = remap_events(&sample_events(), sample_remapper());
    let methods = methods(&remapped);
    assert_eq!(methods.len(), 3);

    assert_eq!(methods[0].0.name, "intM");
    assert_eq!(methods[0].0.descriptor, "(I)Lx/Y;");
    assert_eq!(methods[0].0.exceptions, Some(vec!["x/Failure".to_string()]));

    assert_eq!(methods[1].0.name, "m");
    assert_eq!(methods[1].0.descriptor, "(J)Lx/Y;");
    assert_eq!(methods[1].0.exceptions, None);
}

#[test]
fn test_method_body_operands_are_remapped() {
    let remapped = remap_events(&sample_events(), sample_remapper());
    let (_, body) = methods(&remapped)[0];

    let expected = [
        MethodEvent::ParameterAnnotation {
            parameter: 0,
            descriptor: "Lx/Marker;".to_string(),
            visible: true,
            events: vec![AnnotationEvent::End],
        },
        MethodEvent::TryCatch {
            start: Label(0),
            end: Label(1),
            handler: Label(2),
            type_name: Some("x/Failure".to_string()),
        },
        MethodEvent::TryCatch {
            start: Label(0),
            end: Label(1),
            handler: Label(2),
            type_name: None,
        },
        MethodEvent::TypeInsn {
            opcode: NEW,
            type_name: "x/Y".to_string(),
        },
        MethodEvent::MethodInsn {
            opcode: INVOKESPECIAL,
            owner: "x/Y".to_string(),
            name: "<init>".to_string(),
            descriptor: "()V".to_string(),
        },
        MethodEvent::FieldInsn {
            opcode: GETFIELD,
            owner: "x/Y".to_string(),
            name: "g".to_string(),
            descriptor: "Lx/Y;".to_string(),
        },
        MethodEvent::MethodInsn {
            opcode: INVOKEVIRTUAL,
            owner: "x/Y".to_string(),
            name: "intM".to_string(),
            descriptor: "(I)Lx/Y;".to_string(),
        },
        MethodEvent::MethodInsn {
            opcode: INVOKEVIRTUAL,
            owner: "x/Y".to_string(),
            name: "m".to_string(),
            descriptor: "(J)Lx/Y;".to_string(),
        },
        MethodEvent::Ldc {
            value: Value::Type("Lx/Y;".to_string()),
        },
        MethodEvent::Ldc {
            value: Value::String("a/B".to_string()),
        },
        MethodEvent::TypeInsn {
            opcode: ANEWARRAY,
            type_name: "[Lx/Y;".to_string(),
        },
        MethodEvent::MultiANewArray {
            descriptor: "[[Lx/Y;".to_string(),
            dimensions: 2,
        },
        MethodEvent::Frame {
            kind: FrameKind::Full,
            locals: vec![FrameItem::Object("x/Y".to_string()), FrameItem::Integer],
            stack: vec![FrameItem::Object("x/Failure".to_string())],
        },
        MethodEvent::LocalVariable {
            name: "self".to_string(),
            descriptor: "Lx/Y;".to_string(),
            signature: Some("Lx/Y<TT;>;".to_string()),
            start: Label(0),
            end: Label(3),
            index: 0,
        },
    ];
    for event in &expected {
        assert!(body.contains(event), "missing {:?}", event);
    }

    // Operands without names pass through untouched.
    assert!(body.contains(&MethodEvent::IntInsn {
        opcode: BIPUSH,
        operand: 7
    }));
    assert!(body.contains(&MethodEvent::Iinc {
        var: 1,
        increment: -1
    }));
    assert_eq!(body.last(), Some(&MethodEvent::End));
}

#[test]
fn test_annotation_default_and_method_signature() {
    let remapped = remap_events(&sample_events(), sample_remapper());
    let (method, body) = methods(&remapped)[2];

    assert_eq!(method.name, "type");
    assert_eq!(
        method.signature.as_deref(),
        Some("()Ljava/lang/Class<+Lx/Y;>;")
    );
    assert_eq!(
        body[0],
        MethodEvent::AnnotationDefault {
            events: vec![
                AnnotationEvent::Value {
                    name: None,
                    value: Value::Type("Lx/Y;".to_string()),
                },
                AnnotationEvent::End,
            ],
        }
    );
}

#[test]
fn test_inner_name_derived_from_mapped_name() {
    let mut adapter = ClassRemapper::new(Recorder::new(), sample_remapper())
        .with_inner_name_policy(InnerNamePolicy::DeriveFromMappedName);
    emit_sample(&mut adapter).unwrap();
    let events = adapter.into_inner().into_events();

    assert!(events.contains(&ClassEvent::InnerClass(InnerClassLink {
        name: "x/Y$Nested".to_string(),
        outer_name: Some("x/Y".to_string()),
        inner_name: Some("Nested".to_string()),
        access: 0x0009,
    })));
    // Unrenamed and anonymous inner classes keep what they had.
    assert!(events.contains(&ClassEvent::InnerClass(InnerClassLink {
        name: "a/B$1".to_string(),
        outer_name: None,
        inner_name: None,
        access: 0,
    })));
}

#[test]
fn test_outer_link_without_descriptor_uses_name_only_entries() {
    let remapper = sample_remapper().with_method("a/Outer", "create", None, "spawn");
    let mut adapter = ClassRemapper::new(Recorder::new(), remapper);
    adapter.visit_header(header("a/B")).unwrap();
    for name in [Some("create"), Some("make"), None] {
        adapter
            .visit_outer_class(OuterClassLink {
                owner: "a/Outer".to_string(),
                name: name.map(str::to_string),
                descriptor: None,
            })
            .unwrap();
    }

    let events = adapter.into_inner().into_events();
    let forwarded: Vec<Option<&str>> = events[1..]
        .iter()
        .map(|event| match event {
            ClassEvent::OuterClass(link) => {
                assert_eq!(link.owner, "x/Outer");
                assert_eq!(link.descriptor, None);
                link.name.as_deref()
            }
            other => panic!("unexpected event: {:?}", other),
        })
        .collect();
    // `make` is only mapped for one descriptor, so it cannot match here.
    assert_eq!(forwarded, vec![Some("spawn"), Some("make"), None]);
}

#[test]
fn test_absent_optionals_stay_absent() {
    let mut adapter = ClassRemapper::new(Recorder::new(), sample_remapper());
    let mut h = header("a/B");
    h.super_name = None;
    h.interfaces = None;
    adapter.visit_header(h).unwrap();
    drop(adapter.visit_method(method("m", "(I)La/B;")).unwrap());

    let events = adapter.into_inner().into_events();
    let h = find_header(&events);
    assert_eq!(h.signature, None);
    assert_eq!(h.super_name, None);
    assert_eq!(h.interfaces, None);

    let (m, _) = methods(&events)[0];
    assert_eq!(m.signature, None);
    assert_eq!(m.exceptions, None);
}

struct FailingRemapper;

impl Remapper for FailingRemapper {
    fn map(&self, internal_name: &str) -> VisitResult<Option<String>> {
        if internal_name.starts_with("bad/") {
            return Err(VisitError::Unmapped(internal_name.to_string()));
        }
        Ok(None)
    }
}

#[test]
fn test_remapper_errors_propagate_unchanged() {
    let mut adapter = ClassRemapper::new(Recorder::new(), FailingRemapper);
    let mut h = header("a/B");
    h.super_name = Some("bad/Base".to_string());

    let err = adapter.visit_header(h).unwrap_err();
    assert!(matches!(err, VisitError::Unmapped(ref name) if name == "bad/Base"));
    assert!(adapter.inner().events().is_empty());
}

#[test]
fn test_errors_inside_method_bodies_propagate() {
    let mut adapter = ClassRemapper::new(Recorder::new(), FailingRemapper);
    adapter.visit_header(header("a/B")).unwrap();
    let mut mv = adapter.visit_method(method("run", "()V")).unwrap().unwrap();

    let err = mv
        .visit_field_insn(GETSTATIC, "a/B", "f", "Lbad/Thing;")
        .unwrap_err();
    assert!(matches!(err, VisitError::Unmapped(ref name) if name == "bad/Thing"));
}

#[test]
fn test_strict_mapping_rejects_unmapped_names() {
    let remapper = SimpleRemapper::new()
        .with_class("a/B", "x/Y")
        .with_strict_package("a/");
    let mut adapter = ClassRemapper::new(Recorder::new(), remapper);
    adapter.visit_header(header("a/B")).unwrap();

    let err = adapter.visit_field(field("f", "La/Missing;")).err().unwrap();
    assert!(matches!(err, VisitError::Unmapped(ref name) if name == "a/Missing"));
}

#[test]
fn test_malformed_descriptor_is_reported() {
    let mut adapter = ClassRemapper::new(Recorder::new(), IdentityRemapper);
    adapter.visit_header(header("a/B")).unwrap();
    let err = adapter.visit_field(field("f", "Q")).err().unwrap();
    assert!(matches!(err, VisitError::MalformedDescriptor { .. }));
}

#[test]
fn test_members_before_header_are_rejected() {
    let mut adapter = ClassRemapper::new(Recorder::new(), sample_remapper());
    // Source debug info carries no names and is accepted anywhere.
    adapter.visit_source(Some("B.java"), None).unwrap();

    let err = adapter.visit_field(field("f", "I")).err().unwrap();
    assert!(matches!(err, VisitError::MissingHeader("visit_field")));
    let err = adapter.visit_method(method("m", "()V")).err().unwrap();
    assert!(matches!(err, VisitError::MissingHeader("visit_method")));
    let err = adapter
        .visit_inner_class(InnerClassLink {
            name: "a/B$C".to_string(),
            outer_name: None,
            inner_name: None,
            access: 0,
        })
        .unwrap_err();
    assert!(matches!(err, VisitError::MissingHeader("visit_inner_class")));
}

#[test]
fn test_second_header_is_rejected() {
    let mut adapter = ClassRemapper::new(Recorder::new(), sample_remapper());
    adapter.visit_header(header("a/B")).unwrap();

    let err = adapter.visit_header(header("a/C")).unwrap_err();
    match err {
        VisitError::HeaderAlreadyVisited { first, second } => {
            assert_eq!(first, "a/B");
            assert_eq!(second, "a/C");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(adapter.class_name(), Some("a/B"));
    assert_eq!(adapter.inner().events().len(), 1);
}

#[test]
fn test_remapped_recording_serializes() {
    let remapped = remap_events(&sample_events(), sample_remapper());
    let json = serde_json::to_string_pretty(&remapped).unwrap();
    assert!(json.contains("\"x/Y\""));
    let back: Vec<ClassEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, remapped);
}
