//! Violations and the failure type collecting them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::config::{FIELD_REQUIRED_CODE, FIELD_REQUIRED_MESSAGE, RECORD_FIELD};
use crate::domain::BenefitId;

/// What went wrong with a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Required value missing, empty or whitespace only
    FieldRequired,
    /// The targeted employee does not exist
    EmployeeNotFound,
    /// A referenced benefit does not exist
    UnknownBenefit(BenefitId),
    /// A benefit is referenced more than once in the same request
    DuplicateBenefit(BenefitId),
    /// Any other static rule, with its message
    Invalid(String),
}

impl ViolationKind {
    /// Client-facing message
    pub fn message(&self) -> String {
        match self {
            ViolationKind::FieldRequired => FIELD_REQUIRED_MESSAGE.to_string(),
            ViolationKind::EmployeeNotFound => "Employee does not exist.".to_string(),
            ViolationKind::UnknownBenefit(id) => format!("Benefit {} does not exist.", id),
            ViolationKind::DuplicateBenefit(id) => {
                format!("Benefit {} is listed more than once.", id)
            }
            ViolationKind::Invalid(message) => message.clone(),
        }
    }
}

/// A single rule violation, keyed by the PascalCase field name
/// (empty for record-level violations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn field_required(field: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::FieldRequired)
    }

    pub fn employee_not_found() -> Self {
        Self::new(RECORD_FIELD, ViolationKind::EmployeeNotFound)
    }

    pub fn unknown_benefit(field: impl Into<String>, id: BenefitId) -> Self {
        Self::new(field, ViolationKind::UnknownBenefit(id))
    }

    pub fn duplicate_benefit(field: impl Into<String>, id: BenefitId) -> Self {
        Self::new(field, ViolationKind::DuplicateBenefit(id))
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }
}

/// Ordered collection of violations produced by one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

impl ValidationFailure {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Check whether any violation is of the given kind
    pub fn contains(&self, kind: &ViolationKind) -> bool {
        self.violations.iter().any(|v| &v.kind == kind)
    }

    /// Field name to messages, messages kept in the order they were raised
    pub fn errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for violation in &self.violations {
            errors
                .entry(violation.field.clone())
                .or_default()
                .push(violation.message());
        }
        errors
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .violations
            .iter()
            .map(|v| {
                if v.field.is_empty() {
                    v.message()
                } else {
                    format!("{}: {}", v.field, v.message())
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", rendered)
    }
}

impl Serialize for ValidationFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.errors().serialize(serializer)
    }
}

impl From<Violation> for ValidationFailure {
    fn from(violation: Violation) -> Self {
        Self::new(vec![violation])
    }
}

impl From<validator::ValidationErrors> for ValidationFailure {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| (field.to_string(), errs.clone()))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let violations = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                let key = pascal_case(&field);
                errs.into_iter().map(move |e| {
                    let kind = if e.code == FIELD_REQUIRED_CODE {
                        ViolationKind::FieldRequired
                    } else {
                        ViolationKind::Invalid(
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("{} is invalid", key)),
                        )
                    };
                    Violation::new(key.clone(), kind)
                })
            })
            .collect();

        Self::new(violations)
    }
}

/// `social_security_number` -> `SocialSecurityNumber`
pub fn pascal_case(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("first_name"), "FirstName");
        assert_eq!(pascal_case("social_security_number"), "SocialSecurityNumber");
        assert_eq!(pascal_case("address1"), "Address1");
    }

    #[test]
    fn test_errors_group_by_field_in_order() {
        let mut failure = ValidationFailure::default();
        failure.push(Violation::duplicate_benefit("Benefits", 2));
        failure.push(Violation::field_required("FirstName"));
        failure.push(Violation::unknown_benefit("Benefits", 9));

        let errors = failure.errors();
        assert_eq!(errors["FirstName"], vec!["must not be empty"]);
        assert_eq!(
            errors["Benefits"],
            vec![
                "Benefit 2 is listed more than once.",
                "Benefit 9 does not exist."
            ]
        );
    }

    #[test]
    fn test_record_level_violation_uses_empty_key() {
        let failure = ValidationFailure::from(Violation::employee_not_found());

        assert!(failure.contains(&ViolationKind::EmployeeNotFound));
        assert_eq!(failure.errors()[""], vec!["Employee does not exist."]);
        assert_eq!(failure.to_string(), "Employee does not exist.");
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationFailure::default().into_result().is_ok());
        assert!(ValidationFailure::from(Violation::field_required("LastName"))
            .into_result()
            .is_err());
    }
}
