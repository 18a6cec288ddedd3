//! Generic form lifecycle for admin create/edit dialogs.
//!
//! [`FormLifecycle`] keeps current field values against an immutable
//! initial snapshot, runs declarative per-field [`rules`], tracks
//! touched/dirty state, and orchestrates submit and reset. An optional
//! [`WidgetValidator`] lets the rendering layer contribute a secondary
//! validation pass without this crate knowing anything about rendering.

mod error;
mod lifecycle;
pub mod rules;
mod widget;

pub use error::{FormError, Result};
pub use lifecycle::{FieldValues, FormLifecycle};
pub use rules::ValidationRule;
pub use widget::{WidgetValidator, WidgetVerdict};
