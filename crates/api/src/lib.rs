pub mod error;
pub mod models;
pub mod opcodes;
pub mod visitor;

// Re-export commonly used types
pub use error::{VisitError, VisitResult};
pub use models::*;
pub use visitor::{
    AnnotationHandle, AnnotationVisitor, ClassVisitor, FieldHandle, FieldVisitor, MethodHandle,
    MethodVisitor,
};
