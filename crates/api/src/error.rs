#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    #[error("Malformed descriptor `{descriptor}`: {reason}")]
    MalformedDescriptor { descriptor: String, reason: String },
    #[error("Malformed signature `{signature}` at offset {offset}: {reason}")]
    MalformedSignature {
        signature: String,
        offset: usize,
        reason: String,
    },
    #[error("Unmapped identifier: {0}")]
    Unmapped(String),
    #[error("Class header visited twice (first: {first}, then: {second})")]
    HeaderAlreadyVisited { first: String, second: String },
    #[error("Event `{0}` received before the class header")]
    MissingHeader(&'static str),
    #[error("Downstream error: {0}")]
    Downstream(String),
}

impl VisitError {
    pub fn malformed_descriptor(descriptor: &str, reason: impl Into<String>) -> Self {
        VisitError::MalformedDescriptor {
            descriptor: descriptor.to_string(),
            reason: reason.into(),
        }
    }
}

pub type VisitResult<T> = std::result::Result<T, VisitError>;
