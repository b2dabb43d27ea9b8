use super::AnnotationRemapper;
use crate::remapper::Remapper;
use classmap_api::{
    AnnotationHandle, FrameItem, FrameKind, Label, MethodVisitor, Value, VisitResult,
};
use ristretto_classfile::MethodAccessFlags;
use tracing::trace;

/// Remaps the operands of a method body: type, field and method instructions,
/// class literals, exception handler types, local variable types and stack
/// map frames.
pub struct MethodRemapper<'a> {
    next: Box<dyn MethodVisitor + 'a>,
    remapper: &'a dyn Remapper,
    access: MethodAccessFlags,
    descriptor: String,
}

impl<'a> MethodRemapper<'a> {
    /// `descriptor` is the remapped descriptor of the method, as forwarded
    /// downstream.
    pub fn new(
        access: MethodAccessFlags,
        descriptor: &str,
        next: Box<dyn MethodVisitor + 'a>,
        remapper: &'a dyn Remapper,
    ) -> Self {
        Self {
            next,
            remapper,
            access,
            descriptor: descriptor.to_string(),
        }
    }

    pub fn access(&self) -> MethodAccessFlags {
        self.access
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    fn map_frame_items(&self, items: &[FrameItem]) -> VisitResult<Vec<FrameItem>> {
        items
            .iter()
            .map(|item| match item {
                FrameItem::Object(name) => Ok(FrameItem::Object(self.remapper.map_type(name)?)),
                other => Ok(other.clone()),
            })
            .collect()
    }
}

impl MethodVisitor for MethodRemapper<'_> {
    fn visit_annotation_default(&mut self) -> VisitResult<AnnotationHandle<'_>> {
        Ok(self
            .next
            .visit_annotation_default()?
            .map(|av| AnnotationRemapper::boxed(av, self.remapper)))
    }

    fn visit_annotation(
        &mut self,
        descriptor: &str,
        visible: bool,
    ) -> VisitResult<AnnotationHandle<'_>> {
        let descriptor = self.remapper.map_desc(descriptor)?;
        Ok(self
            .next
            .visit_annotation(&descriptor, visible)?
            .map(|av| AnnotationRemapper::boxed(av, self.remapper)))
    }

    fn visit_parameter_annotation(
        &mut self,
        parameter: u8,
        descriptor: &str,
        visible: bool,
    ) -> VisitResult<AnnotationHandle<'_>> {
        let descriptor = self.remapper.map_desc(descriptor)?;
        Ok(self
            .next
            .visit_parameter_annotation(parameter, &descriptor, visible)?
            .map(|av| AnnotationRemapper::boxed(av, self.remapper)))
    }

    fn visit_code(&mut self) -> VisitResult<()> {
        self.next.visit_code()
    }

    fn visit_frame(
        &mut self,
        kind: FrameKind,
        locals: &[FrameItem],
        stack: &[FrameItem],
    ) -> VisitResult<()> {
        let locals = self.map_frame_items(locals)?;
        let stack = self.map_frame_items(stack)?;
        self.next.visit_frame(kind, &locals, &stack)
    }

    fn visit_insn(&mut self, opcode: u8) -> VisitResult<()> {
        self.next.visit_insn(opcode)
    }

    fn visit_int_insn(&mut self, opcode: u8, operand: i32) -> VisitResult<()> {
        self.next.visit_int_insn(opcode, operand)
    }

    fn visit_var_insn(&mut self, opcode: u8, var: u16) -> VisitResult<()> {
        self.next.visit_var_insn(opcode, var)
    }

    fn visit_type_insn(&mut self, opcode: u8, type_name: &str) -> VisitResult<()> {
        let type_name = self.remapper.map_type(type_name)?;
        self.next.visit_type_insn(opcode, &type_name)
    }

    fn visit_field_insn(
        &mut self,
        opcode: u8,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> VisitResult<()> {
        let mapped_name = self.remapper.map_field_name(owner, name, descriptor)?;
        let mapped_owner = self.remapper.map_type(owner)?;
        let mapped_descriptor = self.remapper.map_desc(descriptor)?;
        self.next
            .visit_field_insn(opcode, &mapped_owner, &mapped_name, &mapped_descriptor)
    }

    fn visit_method_insn(
        &mut self,
        opcode: u8,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> VisitResult<()> {
        let mapped_name = self.remapper.map_method_name(owner, name, descriptor)?;
        let mapped_owner = self.remapper.map_type(owner)?;
        let mapped_descriptor = self.remapper.map_method_desc(descriptor)?;
        self.next
            .visit_method_insn(opcode, &mapped_owner, &mapped_name, &mapped_descriptor)
    }

    fn visit_jump_insn(&mut self, opcode: u8, label: Label) -> VisitResult<()> {
        self.next.visit_jump_insn(opcode, label)
    }

    fn visit_label(&mut self, label: Label) -> VisitResult<()> {
        self.next.visit_label(label)
    }

    fn visit_ldc_insn(&mut self, value: &Value) -> VisitResult<()> {
        let value = self.remapper.map_value(value)?;
        self.next.visit_ldc_insn(&value)
    }

    fn visit_iinc_insn(&mut self, var: u16, increment: i16) -> VisitResult<()> {
        self.next.visit_iinc_insn(var, increment)
    }

    fn visit_table_switch_insn(
        &mut self,
        min: i32,
        max: i32,
        default: Label,
        labels: &[Label],
    ) -> VisitResult<()> {
        self.next.visit_table_switch_insn(min, max, default, labels)
    }

    fn visit_lookup_switch_insn(
        &mut self,
        default: Label,
        keys: &[i32],
        labels: &[Label],
    ) -> VisitResult<()> {
        self.next.visit_lookup_switch_insn(default, keys, labels)
    }

    fn visit_multi_anew_array_insn(&mut self, descriptor: &str, dimensions: u8) -> VisitResult<()> {
        let descriptor = self.remapper.map_desc(descriptor)?;
        self.next.visit_multi_anew_array_insn(&descriptor, dimensions)
    }

    fn visit_try_catch_block(
        &mut self,
        start: Label,
        end: Label,
        handler: Label,
        type_name: Option<&str>,
    ) -> VisitResult<()> {
        let type_name = type_name
            .map(|name| self.remapper.map_type(name))
            .transpose()?;
        self.next
            .visit_try_catch_block(start, end, handler, type_name.as_deref())
    }

    fn visit_local_variable(
        &mut self,
        name: &str,
        descriptor: &str,
        signature: Option<&str>,
        start: Label,
        end: Label,
        index: u16,
    ) -> VisitResult<()> {
        let descriptor = self.remapper.map_desc(descriptor)?;
        let signature = self.remapper.map_signature(signature, true)?;
        self.next.visit_local_variable(
            name,
            &descriptor,
            signature.as_deref(),
            start,
            end,
            index,
        )
    }

    fn visit_line_number(&mut self, line: u16, start: Label) -> VisitResult<()> {
        self.next.visit_line_number(line, start)
    }

    fn visit_maxs(&mut self, max_stack: u16, max_locals: u16) -> VisitResult<()> {
        self.next.visit_maxs(max_stack, max_locals)
    }

    fn visit_end(&mut self) -> VisitResult<()> {
        trace!("Finished method body {}", self.descriptor);
        self.next.visit_end()
    }
}
