use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// No row with the requested id.
    #[error("row not found: {0}")]
    NotFound(String),
    /// The remote endpoint could not be reached or answered abnormally.
    #[error("transport error: {0}")]
    Transport(String),
    /// The endpoint rejected the row.
    #[error("invalid row: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
