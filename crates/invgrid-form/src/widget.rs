//! Capability seam for an external form widget's own validation pass.

use async_trait::async_trait;

/// Result of the external widget's validation pass.
#[derive(Debug, Clone, Default)]
pub struct WidgetVerdict {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl WidgetVerdict {
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }
}

/// A rendering-layer form handle the lifecycle can delegate a secondary
/// validation pass to. The lifecycle holds no other knowledge of the
/// widget; whichever UI layer is in use supplies an implementation.
#[async_trait(?Send)]
pub trait WidgetValidator {
    /// Run the widget's own validation and report its verdict.
    async fn validate(&mut self) -> WidgetVerdict;

    /// Clear the widget's visual validation state.
    fn reset(&mut self);
}
