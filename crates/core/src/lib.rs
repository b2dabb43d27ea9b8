pub mod adapter;
pub mod config;
pub mod error;
pub mod logging;
pub mod recording;
pub mod remapper;

pub use adapter::{
    AdapterFactory, AnnotationRemapper, ClassRemapper, DefaultAdapterFactory, FieldRemapper,
    InnerNamePolicy, MethodRemapper, RemapContext,
};
pub use config::{MappingConfig, MemberMapping};
pub use error::{ClassmapError, Result};
pub use recording::{Interest, Recorder, replay};
pub use remapper::{IdentityRemapper, Remapper, SimpleRemapper};
