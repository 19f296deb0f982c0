use std::io;

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("failed to read input: {0}")]
    Read(#[from] io::Error),

    #[error("digest mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },

    #[error("invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("expected a {expected}-byte digest, got {actual} bytes")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("manifest line {line}: {reason}")]
    Manifest { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, DigestError>;
