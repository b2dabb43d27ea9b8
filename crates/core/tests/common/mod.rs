use classmap_api::opcodes::*;
use classmap_api::{
    ClassHeader, ClassVisitor, FieldDescriptor, FrameItem, FrameKind, InnerClassLink, Label,
    MethodDescriptor, OuterClassLink, Value, VisitResult,
};
use classmap_core::SimpleRemapper;
use classmap_core::recording::{ClassEvent, FieldEvent, MethodEvent};
use classmap_core::{ClassRemapper, Recorder, Remapper, replay};
use ristretto_classfile::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags};

#[allow(dead_code)]
pub fn header(name: &str) -> ClassHeader {
    ClassHeader {
        version: 52,
        access: ClassAccessFlags::PUBLIC,
        name: name.to_string(),
        signature: None,
        super_name: Some("java/lang/Object".to_string()),
        interfaces: Some(vec![]),
    }
}

#[allow(dead_code)]
pub fn field(name: &str, descriptor: &str) -> FieldDescriptor {
    FieldDescriptor {
        access: FieldAccessFlags::PRIVATE,
        name: name.to_string(),
        descriptor: descriptor.to_string(),
        signature: None,
        value: None,
    }
}

#[allow(dead_code)]
pub fn method(name: &str, descriptor: &str) -> MethodDescriptor {
    MethodDescriptor {
        access: MethodAccessFlags::PUBLIC,
        name: name.to_string(),
        descriptor: descriptor.to_string(),
        signature: None,
        exceptions: None,
    }
}

/// The renaming used by most behaviour tests: everything under `a/` moves
/// to `x/`, plus a few member renames.
#[allow(dead_code)]
pub fn sample_remapper() -> SimpleRemapper {
    SimpleRemapper::new()
        .with_class("a/B", "x/Y")
        .with_class("a/B$Inner", "x/Y$Nested")
        .with_class("a/I", "x/J")
        .with_class("a/Base", "x/Base")
        .with_class("a/Marker", "x/Marker")
        .with_class("a/Kind", "x/Kind")
        .with_class("a/Failure", "x/Failure")
        .with_class("a/Outer", "x/Outer")
        .with_field("a/B", "f", Some("La/B;"), "g")
        .with_method("a/B", "m", Some("(I)La/B;"), "intM")
        .with_method("a/Outer", "make", Some("(La/B;)V"), "build")
}

/// Drives one class with every kind of event into `cv`.
#[allow(dead_code)]
pub fn emit_sample(cv: &mut dyn ClassVisitor) -> VisitResult<()> {
    cv.visit_header(ClassHeader {
        version: 52,
        access: ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
        name: "a/B".to_string(),
        signature: Some("<T:Ljava/lang/Object;>La/Base<TT;>;La/I;".to_string()),
        super_name: Some("a/Base".to_string()),
        interfaces: Some(vec!["a/I".to_string()]),
    })?;
    cv.visit_source(Some("B.java"), None)?;
    cv.visit_outer_class(OuterClassLink {
        owner: "a/Outer".to_string(),
        name: Some("make".to_string()),
        descriptor: Some("(La/B;)V".to_string()),
    })?;

    if let Some(mut av) = cv.visit_annotation("La/Marker;", true)? {
        av.visit(Some("type"), &Value::Type("La/B;".to_string()))?;
        av.visit(Some("label"), &Value::String("a/B".to_string()))?;
        av.visit_enum(Some("kind"), "La/Kind;", "ONE")?;
        if let Some(mut nested) = av.visit_annotation(Some("inner"), "La/Marker;")? {
            nested.visit_end()?;
        }
        if let Some(mut array) = av.visit_array(Some("types"))? {
            array.visit(None, &Value::Type("[La/B;".to_string()))?;
            array.visit(None, &Value::Int(1))?;
            array.visit_end()?;
        }
        av.visit_end()?;
    }

    cv.visit_inner_class(InnerClassLink {
        name: "a/B$Inner".to_string(),
        outer_name: Some("a/B".to_string()),
        inner_name: Some("Inner".to_string()),
        access: 0x0009,
    })?;
    cv.visit_inner_class(InnerClassLink {
        name: "a/B$1".to_string(),
        outer_name: None,
        inner_name: None,
        access: 0,
    })?;

    if let Some(mut fv) = cv.visit_field(field("f", "La/B;"))? {
        if let Some(mut av) = fv.visit_annotation("La/Marker;", false)? {
            av.visit_end()?;
        }
        fv.visit_end()?;
    }
    if let Some(mut fv) = cv.visit_field(FieldDescriptor {
        access: FieldAccessFlags::PUBLIC | FieldAccessFlags::STATIC | FieldAccessFlags::FINAL,
        name: "NAME".to_string(),
        descriptor: "Ljava/lang/String;".to_string(),
        signature: None,
        value: Some(Value::String("a/B".to_string())),
    })? {
        fv.visit_end()?;
    }
    if let Some(mut fv) = cv.visit_field(FieldDescriptor {
        access: FieldAccessFlags::PRIVATE,
        name: "items".to_string(),
        descriptor: "Ljava/util/List;".to_string(),
        signature: Some("Ljava/util/List<La/B;>;".to_string()),
        value: None,
    })? {
        fv.visit_end()?;
    }

    if let Some(mut mv) = cv.visit_method(MethodDescriptor {
        access: MethodAccessFlags::PUBLIC,
        name: "m".to_string(),
        descriptor: "(I)La/B;".to_string(),
        signature: None,
        exceptions: Some(vec!["a/Failure".to_string()]),
    })? {
        if let Some(mut av) = mv.visit_parameter_annotation(0, "La/Marker;", true)? {
            av.visit_end()?;
        }
        let (start, end, handler, after) = (Label(0), Label(1), Label(2), Label(3));
        mv.visit_code()?;
        mv.visit_try_catch_block(start, end, handler, Some("a/Failure"))?;
        mv.visit_try_catch_block(start, end, handler, None)?;
        mv.visit_label(start)?;
        mv.visit_line_number(10, start)?;
        mv.visit_type_insn(NEW, "a/B")?;
        mv.visit_insn(DUP)?;
        mv.visit_method_insn(INVOKESPECIAL, "a/B", "<init>", "()V")?;
        mv.visit_var_insn(ASTORE, 2)?;
        mv.visit_var_insn(ALOAD, 2)?;
        mv.visit_field_insn(GETFIELD, "a/B", "f", "La/B;")?;
        mv.visit_method_insn(INVOKEVIRTUAL, "a/B", "m", "(I)La/B;")?;
        mv.visit_method_insn(INVOKEVIRTUAL, "a/B", "m", "(J)La/B;")?;
        mv.visit_ldc_insn(&Value::Type("La/B;".to_string()))?;
        mv.visit_ldc_insn(&Value::String("a/B".to_string()))?;
        mv.visit_type_insn(ANEWARRAY, "[La/B;")?;
        mv.visit_multi_anew_array_insn("[[La/B;", 2)?;
        mv.visit_int_insn(BIPUSH, 7)?;
        mv.visit_iinc_insn(1, -1)?;
        mv.visit_table_switch_insn(0, 1, after, &[start, end])?;
        mv.visit_lookup_switch_insn(after, &[3, 9], &[start, end])?;
        mv.visit_jump_insn(GOTO, after)?;
        mv.visit_label(end)?;
        mv.visit_label(handler)?;
        mv.visit_frame(
            FrameKind::Full,
            &[FrameItem::Object("a/B".to_string()), FrameItem::Integer],
            &[FrameItem::Object("a/Failure".to_string())],
        )?;
        mv.visit_insn(ATHROW)?;
        mv.visit_label(after)?;
        mv.visit_insn(ARETURN)?;
        mv.visit_local_variable(
            "self",
            "La/B;",
            Some("La/B<TT;>;"),
            start,
            after,
            0,
        )?;
        mv.visit_maxs(3, 3)?;
        mv.visit_end()?;
    }
    if let Some(mut mv) = cv.visit_method(method("m", "(J)La/B;"))? {
        mv.visit_end()?;
    }
    if let Some(mut mv) = cv.visit_method(MethodDescriptor {
        access: MethodAccessFlags::PUBLIC | MethodAccessFlags::ABSTRACT,
        name: "type".to_string(),
        descriptor: "()Ljava/lang/Class;".to_string(),
        signature: Some("()Ljava/lang/Class<+La/B;>;".to_string()),
        exceptions: None,
    })? {
        if let Some(mut av) = mv.visit_annotation_default()? {
            av.visit(None, &Value::Type("La/B;".to_string()))?;
            av.visit_end()?;
        }
        mv.visit_end()?;
    }

    cv.visit_end()
}

#[allow(dead_code)]
pub fn sample_events() -> Vec<ClassEvent> {
    let mut recorder = Recorder::new();
    emit_sample(&mut recorder).unwrap();
    recorder.into_events()
}

/// Replays `events` through a [`ClassRemapper`] into a fresh recorder.
#[allow(dead_code)]
pub fn remap_events<R: Remapper>(events: &[ClassEvent], remapper: R) -> Vec<ClassEvent> {
    let mut adapter = ClassRemapper::new(Recorder::new(), remapper);
    replay(events, &mut adapter).unwrap();
    adapter.into_inner().into_events()
}

#[allow(dead_code)]
pub fn find_header(events: &[ClassEvent]) -> &ClassHeader {
    events
        .iter()
        .find_map(|event| match event {
            ClassEvent::Header(header) => Some(header),
            _ => None,
        })
        .expect("no header recorded")
}

#[allow(dead_code)]
pub fn fields(events: &[ClassEvent]) -> Vec<(&FieldDescriptor, &Vec<FieldEvent>)> {
    events
        .iter()
        .filter_map(|event| match event {
            ClassEvent::Field { field, events } => Some((field, events)),
            _ => None,
        })
        .collect()
}

#[allow(dead_code)]
pub fn methods(events: &[ClassEvent]) -> Vec<(&MethodDescriptor, &Vec<MethodEvent>)> {
    events
        .iter()
        .filter_map(|event| match event {
            ClassEvent::Method { method, events } => Some((method, events)),
            _ => None,
        })
        .collect()
}
