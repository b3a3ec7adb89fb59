#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unrecognized instruction: {0}")]
    UnrecognizedInstruction(String),

    #[error("unknown segment: {0}")]
    UnknownSegment(String),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("malformed instruction: {0}")]
    MalformedInstruction(String),
}

pub type Result<T> = std::result::Result<T, Error>;
