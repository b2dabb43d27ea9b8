//! Visitor adapters that remap identifiers on their way downstream.
//!
//! [`ClassRemapper`] sits in front of the next [`ClassVisitor`] of a chain.
//! Nested contexts (fields, methods, annotations) get their own remapper,
//! built by an [`AdapterFactory`] and only when the downstream visitor asked
//! for the nested events.
//!
//! [`ClassVisitor`]: classmap_api::ClassVisitor

mod annotation;
mod class;
mod field;
mod method;

pub use annotation::AnnotationRemapper;
pub use class::ClassRemapper;
pub use field::FieldRemapper;
pub use method::MethodRemapper;

use crate::remapper::Remapper;
use classmap_api::{AnnotationVisitor, FieldVisitor, MethodVisitor, VisitError, VisitResult};
use once_cell::unsync::OnceCell;
use ristretto_classfile::MethodAccessFlags;

/// The original name of the class being traversed.
///
/// Written once by the header event; member lookups are keyed by this name,
/// never by the remapped one.
#[derive(Debug, Default)]
pub struct RemapContext {
    class_name: OnceCell<String>,
}

impl RemapContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self, class_name: &str) -> VisitResult<()> {
        self.class_name
            .set(class_name.to_string())
            .map_err(|second| VisitError::HeaderAlreadyVisited {
                first: self.class_name.get().cloned().unwrap_or_default(),
                second,
            })
    }

    /// The class name, or `MissingHeader` naming `event` when no header has
    /// been seen yet.
    pub fn class_name(&self, event: &'static str) -> VisitResult<&str> {
        self.class_name
            .get()
            .map(String::as_str)
            .ok_or(VisitError::MissingHeader(event))
    }

    pub fn get(&self) -> Option<&str> {
        self.class_name.get().map(String::as_str)
    }
}

/// What to do with the simple name of an inner-class link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InnerNamePolicy {
    /// Forward the simple name as received.
    #[default]
    Preserve,
    /// When the inner class itself is renamed, forward the simple name of the
    /// new binary name (the part after the last `$`, or `/` if there is none).
    DeriveFromMappedName,
}

/// Builds the remappers for nested contexts.
///
/// A pipeline stage that needs extra behaviour inside fields, methods or
/// annotations supplies its own factory to [`ClassRemapper::with_factory`]
/// and keeps the class-level remapping as is.
pub trait AdapterFactory {
    fn field_adapter<'a>(
        &self,
        next: Box<dyn FieldVisitor + 'a>,
        remapper: &'a dyn Remapper,
    ) -> Box<dyn FieldVisitor + 'a>;

    /// `descriptor` is the already remapped method descriptor.
    fn method_adapter<'a>(
        &self,
        access: MethodAccessFlags,
        descriptor: &str,
        next: Box<dyn MethodVisitor + 'a>,
        remapper: &'a dyn Remapper,
    ) -> Box<dyn MethodVisitor + 'a>;

    fn annotation_adapter<'a>(
        &self,
        next: Box<dyn AnnotationVisitor + 'a>,
        remapper: &'a dyn Remapper,
    ) -> Box<dyn AnnotationVisitor + 'a>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAdapterFactory;

impl AdapterFactory for DefaultAdapterFactory {
    fn field_adapter<'a>(
        &self,
        next: Box<dyn FieldVisitor + 'a>,
        remapper: &'a dyn Remapper,
    ) -> Box<dyn FieldVisitor + 'a> {
        Box::new(FieldRemapper::new(next, remapper))
    }

    fn method_adapter<'a>(
        &self,
        access: MethodAccessFlags,
        descriptor: &str,
        next: Box<dyn MethodVisitor + 'a>,
        remapper: &'a dyn Remapper,
    ) -> Box<dyn MethodVisitor + 'a> {
        Box::new(MethodRemapper::new(access, descriptor, next, remapper))
    }

    fn annotation_adapter<'a>(
        &self,
        next: Box<dyn AnnotationVisitor + 'a>,
        remapper: &'a dyn Remapper,
    ) -> Box<dyn AnnotationVisitor + 'a> {
        Box::new(AnnotationRemapper::new(next, remapper))
    }
}
