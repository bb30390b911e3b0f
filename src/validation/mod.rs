//! Validation engine
//!
//! Two layers of rules guard every write:
//! - static rules on the request types (`validator` derive, see [`not_blank`])
//! - state-dependent rules evaluated as a [`RulePipeline`] against data read
//!   through the repositories
//!
//! Both report into a single [`ValidationFailure`].

mod employee_rules;
mod failure;
mod pipeline;

use std::borrow::Cow;

use validator::ValidationError;

use crate::config::{FIELD_REQUIRED_CODE, FIELD_REQUIRED_MESSAGE};

pub use employee_rules::{
    create_pipeline, enroll_pipeline, update_pipeline, validate_create, validate_enrollment,
    validate_update, CreateContext, EnrollContext, UpdateContext, ADDRESS_RETAINED,
    BENEFITS_EXIST, BENEFIT_EXISTS, DISTINCT_BENEFITS, EMPLOYEE_EXISTS, REQUIRED_FIELDS,
};
pub use failure::{pascal_case, ValidationFailure, Violation, ViolationKind};
pub use pipeline::{PipelineReport, RulePipeline, StageOutcome};

/// Reject empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new(FIELD_REQUIRED_CODE);
        error.message = Some(Cow::Borrowed(FIELD_REQUIRED_MESSAGE));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("John").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t ").is_err());

        let error = not_blank("").unwrap_err();
        assert_eq!(error.code, FIELD_REQUIRED_CODE);
    }
}
