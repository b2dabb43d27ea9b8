//! The structural-event protocol.
//!
//! A driver pushes the events of one class into a [`ClassVisitor`]:
//! `visit_header` exactly once and first, then `visit_source`,
//! `visit_outer_class`, annotations, inner-class links, fields and methods in
//! source order, then `visit_end`. Events that open a nested context return
//! `None` when the visitor has no interest in it, otherwise a handle that
//! receives the nested events. The handle borrows the parent, so the nested
//! traversal always finishes before the parent sees its next event.

use crate::error::VisitResult;
use crate::models::{
    ClassHeader, FieldDescriptor, FrameItem, FrameKind, InnerClassLink, Label, MethodDescriptor,
    OuterClassLink, Value,
};

pub type AnnotationHandle<'a> = Option<Box<dyn AnnotationVisitor + 'a>>;
pub type FieldHandle<'a> = Option<Box<dyn FieldVisitor + 'a>>;
pub type MethodHandle<'a> = Option<Box<dyn MethodVisitor + 'a>>;

pub trait ClassVisitor {
    fn visit_header(&mut self, header: ClassHeader) -> VisitResult<()>;

    fn visit_source(&mut self, source: Option<&str>, debug: Option<&str>) -> VisitResult<()>;

    fn visit_outer_class(&mut self, link: OuterClassLink) -> VisitResult<()>;

    fn visit_annotation(&mut self, descriptor: &str, visible: bool)
    -> VisitResult<AnnotationHandle<'_>>;

    fn visit_inner_class(&mut self, link: InnerClassLink) -> VisitResult<()>;

    fn visit_field(&mut self, field: FieldDescriptor) -> VisitResult<FieldHandle<'_>>;

    fn visit_method(&mut self, method: MethodDescriptor) -> VisitResult<MethodHandle<'_>>;

    fn visit_end(&mut self) -> VisitResult<()>;
}

pub trait FieldVisitor {
    fn visit_annotation(&mut self, descriptor: &str, visible: bool)
    -> VisitResult<AnnotationHandle<'_>>;

    fn visit_end(&mut self) -> VisitResult<()>;
}

/// Events of a method declaration and its `Code` attribute.
///
/// Type operands are internal names, field and method operands are
/// `(owner, name, descriptor)` triples.
pub trait MethodVisitor {
    fn visit_annotation_default(&mut self) -> VisitResult<AnnotationHandle<'_>>;

    fn visit_annotation(&mut self, descriptor: &str, visible: bool)
    -> VisitResult<AnnotationHandle<'_>>;

    fn visit_parameter_annotation(
        &mut self,
        parameter: u8,
        descriptor: &str,
        visible: bool,
    ) -> VisitResult<AnnotationHandle<'_>>;

    fn visit_code(&mut self) -> VisitResult<()>;

    fn visit_frame(
        &mut self,
        kind: FrameKind,
        locals: &[FrameItem],
        stack: &[FrameItem],
    ) -> VisitResult<()>;

    fn visit_insn(&mut self, opcode: u8) -> VisitResult<()>;

    fn visit_int_insn(&mut self, opcode: u8, operand: i32) -> VisitResult<()>;

    fn visit_var_insn(&mut self, opcode: u8, var: u16) -> VisitResult<()>;

    fn visit_type_insn(&mut self, opcode: u8, type_name: &str) -> VisitResult<()>;

    fn visit_field_insn(
        &mut self,
        opcode: u8,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> VisitResult<()>;

    fn visit_method_insn(
        &mut self,
        opcode: u8,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> VisitResult<()>;

    fn visit_jump_insn(&mut self, opcode: u8, label: Label) -> VisitResult<()>;

    fn visit_label(&mut self, label: Label) -> VisitResult<()>;

    fn visit_ldc_insn(&mut self, value: &Value) -> VisitResult<()>;

    fn visit_iinc_insn(&mut self, var: u16, increment: i16) -> VisitResult<()>;

    fn visit_table_switch_insn(
        &mut self,
        min: i32,
        max: i32,
        default: Label,
        labels: &[Label],
    ) -> VisitResult<()>;

    fn visit_lookup_switch_insn(
        &mut self,
        default: Label,
        keys: &[i32],
        labels: &[Label],
    ) -> VisitResult<()>;

    fn visit_multi_anew_array_insn(&mut self, descriptor: &str, dimensions: u8)
    -> VisitResult<()>;

    /// `type_name` is absent for `finally` handlers.
    fn visit_try_catch_block(
        &mut self,
        start: Label,
        end: Label,
        handler: Label,
        type_name: Option<&str>,
    ) -> VisitResult<()>;

    fn visit_local_variable(
        &mut self,
        name: &str,
        descriptor: &str,
        signature: Option<&str>,
        start: Label,
        end: Label,
        index: u16,
    ) -> VisitResult<()>;

    fn visit_line_number(&mut self, line: u16, start: Label) -> VisitResult<()>;

    fn visit_maxs(&mut self, max_stack: u16, max_locals: u16) -> VisitResult<()>;

    fn visit_end(&mut self) -> VisitResult<()>;
}

/// Events of an annotation value tree. `name` is absent for array elements.
pub trait AnnotationVisitor {
    fn visit(&mut self, name: Option<&str>, value: &Value) -> VisitResult<()>;

    fn visit_enum(&mut self, name: Option<&str>, descriptor: &str, value: &str)
    -> VisitResult<()>;

    fn visit_annotation(
        &mut self,
        name: Option<&str>,
        descriptor: &str,
    ) -> VisitResult<AnnotationHandle<'_>>;

    fn visit_array(&mut self, name: Option<&str>) -> VisitResult<AnnotationHandle<'_>>;

    fn visit_end(&mut self) -> VisitResult<()>;
}
