//! Recording and replaying class traversals.
//!
//! [`Recorder`] is a terminal [`ClassVisitor`] that keeps every event it
//! receives, nested events under the event that opened them. [`replay`]
//! drives a recording into any visitor, feeding a nested context only when
//! the visitor returned a handle for it. Recordings are plain serde data, so
//! they can be dumped as JSON for inspection.

use classmap_api::{
    AnnotationHandle, AnnotationVisitor, ClassHeader, ClassVisitor, FieldDescriptor, FieldHandle,
    FieldVisitor, FrameItem, FrameKind, InnerClassLink, Label, MethodDescriptor, MethodHandle,
    MethodVisitor, OuterClassLink, Value, VisitResult,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClassEvent {
    Header(ClassHeader),
    Source {
        source: Option<String>,
        debug: Option<String>,
    },
    OuterClass(OuterClassLink),
    Annotation {
        descriptor: String,
        visible: bool,
        events: Vec<AnnotationEvent>,
    },
    InnerClass(InnerClassLink),
    Field {
        field: FieldDescriptor,
        events: Vec<FieldEvent>,
    },
    Method {
        method: MethodDescriptor,
        events: Vec<MethodEvent>,
    },
    End,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FieldEvent {
    Annotation {
        descriptor: String,
        visible: bool,
        events: Vec<AnnotationEvent>,
    },
    End,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MethodEvent {
    AnnotationDefault {
        events: Vec<AnnotationEvent>,
    },
    Annotation {
        descriptor: String,
        visible: bool,
        events: Vec<AnnotationEvent>,
    },
    ParameterAnnotation {
        parameter: u8,
        descriptor: String,
        visible: bool,
        events: Vec<AnnotationEvent>,
    },
    Code,
    Frame {
        kind: FrameKind,
        locals: Vec<FrameItem>,
        stack: Vec<FrameItem>,
    },
    Insn {
        opcode: u8,
    },
    IntInsn {
        opcode: u8,
        operand: i32,
    },
    VarInsn {
        opcode: u8,
        var: u16,
    },
    TypeInsn {
        opcode: u8,
        type_name: String,
    },
    FieldInsn {
        opcode: u8,
        owner: String,
        name: String,
        descriptor: String,
    },
    MethodInsn {
        opcode: u8,
        owner: String,
        name: String,
        descriptor: String,
    },
    JumpInsn {
        opcode: u8,
        label: Label,
    },
    Label {
        label: Label,
    },
    Ldc {
        value: Value,
    },
    Iinc {
        var: u16,
        increment: i16,
    },
    TableSwitch {
        min: i32,
        max: i32,
        default: Label,
        labels: Vec<Label>,
    },
    LookupSwitch {
        default: Label,
        keys: Vec<i32>,
        labels: Vec<Label>,
    },
    MultiANewArray {
        descriptor: String,
        dimensions: u8,
    },
    TryCatch {
        start: Label,
        end: Label,
        handler: Label,
        type_name: Option<String>,
    },
    LocalVariable {
        name: String,
        descriptor: String,
        signature: Option<String>,
        start: Label,
        end: Label,
        index: u16,
    },
    LineNumber {
        line: u16,
        start: Label,
    },
    Maxs {
        max_stack: u16,
        max_locals: u16,
    },
    End,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnnotationEvent {
    Value {
        name: Option<String>,
        value: Value,
    },
    Enum {
        name: Option<String>,
        descriptor: String,
        value: String,
    },
    Annotation {
        name: Option<String>,
        descriptor: String,
        events: Vec<AnnotationEvent>,
    },
    Array {
        name: Option<String>,
        events: Vec<AnnotationEvent>,
    },
    End,
}

/// Which nested contexts a [`Recorder`] asks to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interest {
    pub annotations: bool,
    pub fields: bool,
    pub methods: bool,
}

impl Interest {
    pub const ALL: Interest = Interest {
        annotations: true,
        fields: true,
        methods: true,
    };

    pub const NONE: Interest = Interest {
        annotations: false,
        fields: false,
        methods: false,
    };
}

impl Default for Interest {
    fn default() -> Self {
        Self::ALL
    }
}

/// A terminal visitor that records the traversal.
///
/// Declined nested contexts are still recorded, with no nested events.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Vec<ClassEvent>,
    interest: Interest,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interest(interest: Interest) -> Self {
        Self {
            events: Vec::new(),
            interest,
        }
    }

    pub fn events(&self) -> &[ClassEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ClassEvent> {
        self.events
    }
}

impl ClassVisitor for Recorder {
    fn visit_header(&mut self, header: ClassHeader) -> VisitResult<()> {
        self.events.push(ClassEvent::Header(header));
        Ok(())
    }

    fn visit_source(&mut self, source: Option<&str>, debug: Option<&str>) -> VisitResult<()> {
        self.events.push(ClassEvent::Source {
            source: source.map(str::to_string),
            debug: debug.map(str::to_string),
        });
        Ok(())
    }

    fn visit_outer_class(&mut self, link: OuterClassLink) -> VisitResult<()> {
        self.events.push(ClassEvent::OuterClass(link));
        Ok(())
    }

    fn visit_annotation(
        &mut self,
        descriptor: &str,
        visible: bool,
    ) -> VisitResult<AnnotationHandle<'_>> {
        self.events.push(ClassEvent::Annotation {
            descriptor: descriptor.to_string(),
            visible,
            events: Vec::new(),
        });
        if !self.interest.annotations {
            return Ok(None);
        }
        let interest = self.interest;
        Ok(match self.events.last_mut() {
            Some(ClassEvent::Annotation { events, .. }) => {
                Some(Box::new(AnnotationRecorder { events, interest }))
            }
            _ => None,
        })
    }

    fn visit_inner_class(&mut self, link: InnerClassLink) -> VisitResult<()> {
        self.events.push(ClassEvent::InnerClass(link));
        Ok(())
    }

    fn visit_field(&mut self, field: FieldDescriptor) -> VisitResult<FieldHandle<'_>> {
        self.events.push(ClassEvent::Field {
            field,
            events: Vec::new(),
        });
        if !self.interest.fields {
            return Ok(None);
        }
        let interest = self.interest;
        Ok(match self.events.last_mut() {
            Some(ClassEvent::Field { events, .. }) => {
                Some(Box::new(FieldRecorder { events, interest }))
            }
            _ => None,
        })
    }

    fn visit_method(&mut self, method: MethodDescriptor) -> VisitResult<MethodHandle<'_>> {
        self.events.push(ClassEvent::Method {
            method,
            events: Vec::new(),
        });
        if !self.interest.methods {
            return Ok(None);
        }
        let interest = self.interest;
        Ok(match self.events.last_mut() {
            Some(ClassEvent::Method { events, .. }) => {
                Some(Box::new(MethodRecorder { events, interest }))
            }
            _ => None,
        })
    }

    fn visit_end(&mut self) -> VisitResult<()> {
        self.events.push(ClassEvent::End);
        Ok(())
    }
}

struct FieldRecorder<'a> {
    events: &'a mut Vec<FieldEvent>,
    interest: Interest,
}

impl FieldVisitor for FieldRecorder<'_> {
    fn visit_annotation(
        &mut self,
        descriptor: &str,
        visible: bool,
    ) -> VisitResult<AnnotationHandle<'_>> {
        self.events.push(FieldEvent::Annotation {
            descriptor: descriptor.to_string(),
            visible,
            events: Vec::new(),
        });
        if !self.interest.annotations {
            return Ok(None);
        }
        let interest = self.interest;
        Ok(match self.events.last_mut() {
            Some(FieldEvent::Annotation { events, .. }) => {
                Some(Box::new(AnnotationRecorder { events, interest }))
            }
            _ => None,
        })
    }

    fn visit_end(&mut self) -> VisitResult<()> {
        self.events.push(FieldEvent::End);
        Ok(())
    }
}

struct MethodRecorder<'a> {
    events: &'a mut Vec<MethodEvent>,
    interest: Interest,
}

impl MethodRecorder<'_> {
    fn record(&mut self, event: MethodEvent) -> VisitResult<()> {
        self.events.push(event);
        Ok(())
    }

    /// Pushes an event that opens an annotation and hands out its recorder.
    fn open_annotation(&mut self, event: MethodEvent) -> VisitResult<AnnotationHandle<'_>> {
        self.events.push(event);
        if !self.interest.annotations {
            return Ok(None);
        }
        let interest = self.interest;
        Ok(match self.events.last_mut() {
            Some(
                MethodEvent::AnnotationDefault { events }
                | MethodEvent::Annotation { events, .. }
                | MethodEvent::ParameterAnnotation { events, .. },
            ) => Some(Box::new(AnnotationRecorder { events, interest })),
            _ => None,
        })
    }
}

impl MethodVisitor for MethodRecorder<'_> {
    fn visit_annotation_default(&mut self) -> VisitResult<AnnotationHandle<'_>> {
        self.open_annotation(MethodEvent::AnnotationDefault { events: Vec::new() })
    }

    fn visit_annotation(
        &mut self,
        descriptor: &str,
        visible: bool,
    ) -> VisitResult<AnnotationHandle<'_>> {
        self.open_annotation(MethodEvent::Annotation {
            descriptor: descriptor.to_string(),
            visible,
            events: Vec::new(),
        })
    }

    fn visit_parameter_annotation(
        &mut self,
        parameter: u8,
        descriptor: &str,
        visible: bool,
    ) -> VisitResult<AnnotationHandle<'_>> {
        self.open_annotation(MethodEvent::ParameterAnnotation {
            parameter,
            descriptor: descriptor.to_string(),
            visible,
            events: Vec::new(),
        })
    }

    fn visit_code(&mut self) -> VisitResult<()> {
        self.record(MethodEvent::Code)
    }

    fn visit_frame(
        &mut self,
        kind: FrameKind,
        locals: &[FrameItem],
        stack: &[FrameItem],
    ) -> VisitResult<()> {
        self.record(MethodEvent::Frame {
            kind,
            locals: locals.to_vec(),
            stack: stack.to_vec(),
        })
    }

    fn visit_insn(&mut self, opcode: u8) -> VisitResult<()> {
        self.record(MethodEvent::Insn { opcode })
    }

    fn visit_int_insn(&mut self, opcode: u8, operand: i32) -> VisitResult<()> {
        self.record(MethodEvent::IntInsn { opcode, operand })
    }

    fn visit_var_insn(&mut self, opcode: u8, var: u16) -> VisitResult<()> {
        self.record(MethodEvent::VarInsn { opcode, var })
    }

    fn visit_type_insn(&mut self, opcode: u8, type_name: &str) -> VisitResult<()> {
        self.record(MethodEvent::TypeInsn {
            opcode,
            type_name: type_name.to_string(),
        })
    }

    fn visit_field_insn(
        &mut self,
        opcode: u8,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> VisitResult<()> {
        self.record(MethodEvent::FieldInsn {
            opcode,
            owner: owner.to_string(),
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        })
    }

    fn visit_method_insn(
        &mut self,
        opcode: u8,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> VisitResult<()> {
        self.record(MethodEvent::MethodInsn {
            opcode,
            owner: owner.to_string(),
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        })
    }

    fn visit_jump_insn(&mut self, opcode: u8, label: Label) -> VisitResult<()> {
        self.record(MethodEvent::JumpInsn { opcode, label })
    }

    fn visit_label(&mut self, label: Label) -> VisitResult<()> {
        self.record(MethodEvent::Label { label })
    }

    fn visit_ldc_insn(&mut self, value: &Value) -> VisitResult<()> {
        self.record(MethodEvent::Ldc {
            value: value.clone(),
        })
    }

    fn visit_iinc_insn(&mut self, var: u16, increment: i16) -> VisitResult<()> {
        self.record(MethodEvent::Iinc { var, increment })
    }

    fn visit_table_switch_insn(
        &mut self,
        min: i32,
        max: i32,
        default: Label,
        labels: &[Label],
    ) -> VisitResult<()> {
        self.record(MethodEvent::TableSwitch {
            min,
            max,
            default,
            labels: labels.to_vec(),
        })
    }

    fn visit_lookup_switch_insn(
        &mut self,
        default: Label,
        keys: &[i32],
        labels: &[Label],
    ) -> VisitResult<()> {
        self.record(MethodEvent::LookupSwitch {
            default,
            keys: keys.to_vec(),
            labels: labels.to_vec(),
        })
    }

    fn visit_multi_anew_array_insn(&mut self, descriptor: &str, dimensions: u8) -> VisitResult<()> {
        self.record(MethodEvent::MultiANewArray {
            descriptor: descriptor.to_string(),
            dimensions,
        })
    }

    fn visit_try_catch_block(
        &mut self,
        start: Label,
        end: Label,
        handler: Label,
        type_name: Option<&str>,
    ) -> VisitResult<()> {
        self.record(MethodEvent::TryCatch {
            start,
            end,
            handler,
            type_name: type_name.map(str::to_string),
        })
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
        self.record(MethodEvent::LocalVariable {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            signature: signature.map(str::to_string),
            start,
            end,
            index,
        })
    }

    fn visit_line_number(&mut self, line: u16, start: Label) -> VisitResult<()> {
        self.record(MethodEvent::LineNumber { line, start })
    }

    fn visit_maxs(&mut self, max_stack: u16, max_locals: u16) -> VisitResult<()> {
        self.record(MethodEvent::Maxs {
            max_stack,
            max_locals,
        })
    }

    fn visit_end(&mut self) -> VisitResult<()> {
        self.record(MethodEvent::End)
    }
}

struct AnnotationRecorder<'a> {
    events: &'a mut Vec<AnnotationEvent>,
    interest: Interest,
}

impl AnnotationRecorder<'_> {
    fn open(&mut self, event: AnnotationEvent) -> VisitResult<AnnotationHandle<'_>> {
        self.events.push(event);
        let interest = self.interest;
        Ok(match self.events.last_mut() {
            Some(
                AnnotationEvent::Annotation { events, .. } | AnnotationEvent::Array { events, .. },
            ) => Some(Box::new(AnnotationRecorder { events, interest })),
            _ => None,
        })
    }
}

impl AnnotationVisitor for AnnotationRecorder<'_> {
    fn visit(&mut self, name: Option<&str>, value: &Value) -> VisitResult<()> {
        self.events.push(AnnotationEvent::Value {
            name: name.map(str::to_string),
            value: value.clone(),
        });
        Ok(())
    }

    fn visit_enum(&mut self, name: Option<&str>, descriptor: &str, value: &str) -> VisitResult<()> {
        self.events.push(AnnotationEvent::Enum {
            name: name.map(str::to_string),
            descriptor: descriptor.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn visit_annotation(
        &mut self,
        name: Option<&str>,
        descriptor: &str,
    ) -> VisitResult<AnnotationHandle<'_>> {
        self.open(AnnotationEvent::Annotation {
            name: name.map(str::to_string),
            descriptor: descriptor.to_string(),
            events: Vec::new(),
        })
    }

    fn visit_array(&mut self, name: Option<&str>) -> VisitResult<AnnotationHandle<'_>> {
        self.open(AnnotationEvent::Array {
            name: name.map(str::to_string),
            events: Vec::new(),
        })
    }

    fn visit_end(&mut self) -> VisitResult<()> {
        self.events.push(AnnotationEvent::End);
        Ok(())
    }
}

/// Pushes a recorded traversal into `visitor`, in order.
pub fn replay(events: &[ClassEvent], visitor: &mut dyn ClassVisitor) -> VisitResult<()> {
    for event in events {
        match event {
            ClassEvent::Header(header) => visitor.visit_header(header.clone())?,
            ClassEvent::Source { source, debug } => {
                visitor.visit_source(source.as_deref(), debug.as_deref())?
            }
            ClassEvent::OuterClass(link) => visitor.visit_outer_class(link.clone())?,
            ClassEvent::Annotation {
                descriptor,
                visible,
                events,
            } => {
                if let Some(mut av) = visitor.visit_annotation(descriptor, *visible)? {
                    replay_annotation(events, av.as_mut())?;
                }
            }
            ClassEvent::InnerClass(link) => visitor.visit_inner_class(link.clone())?,
            ClassEvent::Field { field, events } => {
                if let Some(mut fv) = visitor.visit_field(field.clone())? {
                    replay_field(events, fv.as_mut())?;
                }
            }
            ClassEvent::Method { method, events } => {
                if let Some(mut mv) = visitor.visit_method(method.clone())? {
                    replay_method(events, mv.as_mut())?;
                }
            }
            ClassEvent::End => visitor.visit_end()?,
        }
    }
    Ok(())
}

fn replay_field(events: &[FieldEvent], visitor: &mut dyn FieldVisitor) -> VisitResult<()> {
    for event in events {
        match event {
            FieldEvent::Annotation {
                descriptor,
                visible,
                events,
            } => {
                if let Some(mut av) = visitor.visit_annotation(descriptor, *visible)? {
                    replay_annotation(events, av.as_mut())?;
                }
            }
            FieldEvent::End => visitor.visit_end()?,
        }
    }
    Ok(())
}

fn replay_method(events: &[MethodEvent], visitor: &mut dyn MethodVisitor) -> VisitResult<()> {
    for event in events {
        match event {
            MethodEvent::AnnotationDefault { events } => {
                if let Some(mut av) = visitor.visit_annotation_default()? {
                    replay_annotation(events, av.as_mut())?;
                }
            }
            MethodEvent::Annotation {
                descriptor,
                visible,
                events,
            } => {
                if let Some(mut av) = visitor.visit_annotation(descriptor, *visible)? {
                    replay_annotation(events, av.as_mut())?;
                }
            }
            MethodEvent::ParameterAnnotation {
                parameter,
                descriptor,
                visible,
                events,
            } => {
                if let Some(mut av) =
                    visitor.visit_parameter_annotation(*parameter, descriptor, *visible)?
                {
                    replay_annotation(events, av.as_mut())?;
                }
            }
            MethodEvent::Code => visitor.visit_code()?,
            MethodEvent::Frame {
                kind,
                locals,
                stack,
            } => visitor.visit_frame(*kind, locals, stack)?,
            MethodEvent::Insn { opcode } => visitor.visit_insn(*opcode)?,
            MethodEvent::IntInsn { opcode, operand } => visitor.visit_int_insn(*opcode, *operand)?,
            MethodEvent::VarInsn { opcode, var } => visitor.visit_var_insn(*opcode, *var)?,
            MethodEvent::TypeInsn { opcode, type_name } => {
                visitor.visit_type_insn(*opcode, type_name)?
            }
            MethodEvent::FieldInsn {
                opcode,
                owner,
                name,
                descriptor,
            } => visitor.visit_field_insn(*opcode, owner, name, descriptor)?,
            MethodEvent::MethodInsn {
                opcode,
                owner,
                name,
                descriptor,
            } => visitor.visit_method_insn(*opcode, owner, name, descriptor)?,
            MethodEvent::JumpInsn { opcode, label } => visitor.visit_jump_insn(*opcode, *label)?,
            MethodEvent::Label { label } => visitor.visit_label(*label)?,
            MethodEvent::Ldc { value } => visitor.visit_ldc_insn(value)?,
            MethodEvent::Iinc { var, increment } => visitor.visit_iinc_insn(*var, *increment)?,
            MethodEvent::TableSwitch {
                min,
                max,
                default,
                labels,
            } => visitor.visit_table_switch_insn(*min, *max, *default, labels)?,
            MethodEvent::LookupSwitch {
                default,
                keys,
                labels,
            } => visitor.visit_lookup_switch_insn(*default, keys, labels)?,
            MethodEvent::MultiANewArray {
                descriptor,
                dimensions,
            } => visitor.visit_multi_anew_array_insn(descriptor, *dimensions)?,
            MethodEvent::TryCatch {
                start,
                end,
                handler,
                type_name,
            } => visitor.visit_try_catch_block(*start, *end, *handler, type_name.as_deref())?,
            MethodEvent::LocalVariable {
                name,
                descriptor,
                signature,
                start,
                end,
                index,
            } => visitor.visit_local_variable(
                name,
                descriptor,
                signature.as_deref(),
                *start,
                *end,
                *index,
            )?,
            MethodEvent::LineNumber { line, start } => visitor.visit_line_number(*line, *start)?,
            MethodEvent::Maxs {
                max_stack,
                max_locals,
            } => visitor.visit_maxs(*max_stack, *max_locals)?,
            MethodEvent::End => visitor.visit_end()?,
        }
    }
    Ok(())
}

fn replay_annotation(
    events: &[AnnotationEvent],
    visitor: &mut dyn AnnotationVisitor,
) -> VisitResult<()> {
    for event in events {
        match event {
            AnnotationEvent::Value { name, value } => visitor.visit(name.as_deref(), value)?,
            AnnotationEvent::Enum {
                name,
                descriptor,
                value,
            } => visitor.visit_enum(name.as_deref(), descriptor, value)?,
            AnnotationEvent::Annotation {
                name,
                descriptor,
                events,
            } => {
                if let Some(mut av) = visitor.visit_annotation(name.as_deref(), descriptor)? {
                    replay_annotation(events, av.as_mut())?;
                }
            }
            AnnotationEvent::Array { name, events } => {
                if let Some(mut av) = visitor.visit_array(name.as_deref())? {
                    replay_annotation(events, av.as_mut())?;
                }
            }
            AnnotationEvent::End => visitor.visit_end()?,
        }
    }
    Ok(())
}
