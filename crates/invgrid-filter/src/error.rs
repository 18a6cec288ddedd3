use invgrid_model::FieldKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    /// A filter was set for a key with no matching field spec.
    #[error("no filter field with key `{0}`")]
    UnknownField(String),
    /// The supplied value does not have the shape the field's kind calls for.
    #[error("value for `{key}` does not match field kind `{kind}`")]
    KindMismatch { key: String, kind: FieldKind },
    /// Two field specs share a key.
    #[error("duplicate filter field key `{0}`")]
    DuplicateField(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
