//! Field-level validation results.
//!
//! Validators collect every failing field before returning, so clients see
//! the complete list of problems in a single response.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One failing field and the message explaining the failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Wire name of the field, e.g. `emailAddress` or `steps[0].title`.
    #[schema(example = "title")]
    pub field: String,
    #[schema(example = "A title is required.")]
    pub message: String,
}

impl FieldError {
    /// Failure `message` for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accumulator for [`FieldError`]s.
///
/// # Examples
/// ```
/// use backend::domain::ValidationErrors;
///
/// let mut errors = ValidationErrors::default();
/// errors.push("title", "A title is required.");
/// assert!(errors.into_result(()).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Record a failure for `field`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn as_slice(&self) -> &[FieldError] {
        &self.errors
    }

    /// Collected errors in insertion order.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }

    /// Return `value` when nothing failed, otherwise the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

/// Trim `raw`, treating blank input as absent.
pub(crate) fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("   "), None)]
    #[case(Some("  Bake bread "), Some("Bake bread"))]
    fn present_treats_blank_as_missing(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(present(raw), expected);
    }

    #[rstest]
    fn errors_keep_insertion_order() {
        let mut errors = ValidationErrors::default();
        errors.push("title", "A title is required.");
        errors.push("description", "A description is required.");
        let fields: Vec<_> = errors
            .into_result(())
            .expect_err("two failures")
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, ["title", "description"]);
    }
}
