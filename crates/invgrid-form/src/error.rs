use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    /// A value was set for a field absent from the initial snapshot.
    #[error("no form field named `{0}`")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
