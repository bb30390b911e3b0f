//! Ordered rule stages with explicit dependency edges.
//!
//! A stage runs only when every stage it depends on has passed. Stages that
//! fail or are skipped make their dependents skip as well, so a rule never
//! has to re-check the preconditions another rule already established.
//! Violations of every evaluated stage are collected; nothing short-circuits
//! except through a declared dependency.

use super::failure::{ValidationFailure, Violation};

type Rule<C> = Box<dyn Fn(&C) -> Vec<Violation> + Send + Sync>;

/// Result of a single stage within one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Passed,
    Failed,
    Skipped,
}

struct Stage<C> {
    name: &'static str,
    depends_on: Vec<&'static str>,
    rule: Rule<C>,
}

/// Ordered list of named rule stages evaluated against a context `C`
pub struct RulePipeline<C> {
    stages: Vec<Stage<C>>,
}

impl<C> Default for RulePipeline<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RulePipeline<C> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage with no dependencies
    pub fn stage<F>(self, name: &'static str, rule: F) -> Self
    where
        F: Fn(&C) -> Vec<Violation> + Send + Sync + 'static,
    {
        self.dependent_stage(name, &[], rule)
    }

    /// Append a stage that only runs once every stage in `depends_on` passed.
    ///
    /// Dependencies must name stages appended earlier.
    pub fn dependent_stage<F>(mut self, name: &'static str, depends_on: &[&'static str], rule: F) -> Self
    where
        F: Fn(&C) -> Vec<Violation> + Send + Sync + 'static,
    {
        debug_assert!(
            depends_on
                .iter()
                .all(|dep| self.stages.iter().any(|s| s.name == *dep)),
            "stage `{}` depends on a stage that was not registered before it",
            name
        );
        self.stages.push(Stage {
            name,
            depends_on: depends_on.to_vec(),
            rule: Box::new(rule),
        });
        self
    }

    /// Evaluate every stage and report per-stage outcomes with the violations
    pub fn evaluate(&self, context: &C) -> PipelineReport {
        let mut report = PipelineReport::default();

        for stage in &self.stages {
            let blocked = stage
                .depends_on
                .iter()
                .any(|dep| report.outcome(dep) != Some(StageOutcome::Passed));

            let outcome = if blocked {
                StageOutcome::Skipped
            } else {
                let violations = (stage.rule)(context);
                if violations.is_empty() {
                    StageOutcome::Passed
                } else {
                    report.failure.extend(violations);
                    StageOutcome::Failed
                }
            };

            tracing::trace!(stage = stage.name, ?outcome, "validation stage evaluated");
            report.outcomes.push((stage.name, outcome));
        }

        report
    }

    /// Evaluate every stage, failing when any violation was collected
    pub fn run(&self, context: &C) -> Result<(), ValidationFailure> {
        self.evaluate(context).into_result()
    }
}

/// Outcome of one pipeline run
#[derive(Debug, Default)]
pub struct PipelineReport {
    outcomes: Vec<(&'static str, StageOutcome)>,
    failure: ValidationFailure,
}

impl PipelineReport {
    /// Outcome of the named stage, `None` if it is not part of the pipeline
    pub fn outcome(&self, name: &str) -> Option<StageOutcome> {
        self.outcomes
            .iter()
            .find(|(stage, _)| *stage == name)
            .map(|(_, outcome)| *outcome)
    }

    pub fn failure(&self) -> &ValidationFailure {
        &self.failure
    }

    pub fn into_result(self) -> Result<(), ValidationFailure> {
        self.failure.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ViolationKind;

    struct Probe {
        first_ok: bool,
        second_ok: bool,
    }

    fn pipeline() -> RulePipeline<Probe> {
        RulePipeline::new()
            .stage("first", |p: &Probe| {
                if p.first_ok {
                    vec![]
                } else {
                    vec![Violation::field_required("First")]
                }
            })
            .stage("second", |p: &Probe| {
                if p.second_ok {
                    vec![]
                } else {
                    vec![Violation::field_required("Second")]
                }
            })
            .dependent_stage("after_first", &["first"], |_: &Probe| {
                vec![Violation::new("", ViolationKind::Invalid("reached".to_string()))]
            })
    }

    #[test]
    fn test_independent_stages_are_all_collected() {
        let report = pipeline().evaluate(&Probe {
            first_ok: false,
            second_ok: false,
        });

        let errors = report.failure().errors();
        assert!(errors.contains_key("First"));
        assert!(errors.contains_key("Second"));
    }

    #[test]
    fn test_dependent_stage_skipped_when_dependency_fails() {
        let report = pipeline().evaluate(&Probe {
            first_ok: false,
            second_ok: true,
        });

        assert_eq!(report.outcome("first"), Some(StageOutcome::Failed));
        assert_eq!(report.outcome("second"), Some(StageOutcome::Passed));
        assert_eq!(report.outcome("after_first"), Some(StageOutcome::Skipped));
        assert_eq!(report.failure().violations().len(), 1);
    }

    #[test]
    fn test_dependent_stage_runs_when_dependency_passes() {
        let report = pipeline().evaluate(&Probe {
            first_ok: true,
            second_ok: true,
        });

        assert_eq!(report.outcome("after_first"), Some(StageOutcome::Failed));
        assert_eq!(report.outcome("missing"), None);
    }

    #[test]
    fn test_skip_propagates_through_chains() {
        let chained = pipeline().dependent_stage("last", &["after_first"], |_: &Probe| vec![]);

        let report = chained.evaluate(&Probe {
            first_ok: false,
            second_ok: true,
        });
        assert_eq!(report.outcome("last"), Some(StageOutcome::Skipped));
    }
}
