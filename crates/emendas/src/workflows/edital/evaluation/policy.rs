use super::super::domain::{Criterion, EvaluationCriteria, ProjectId, ProjectStatus};
use super::config::EditalRules;

/// Validation and lookup failures raised while recording an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("{} score {value} exceeds the maximum of {max}", .criterion.label())]
    CriterionOutOfRange {
        criterion: Criterion,
        value: u8,
        max: u8,
    },
    #[error("feedback has {length} characters, limit is {max}")]
    FeedbackTooLong { length: usize, max: usize },
    #[error("an evaluator identity is required")]
    MissingEvaluator,
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),
}

pub(crate) fn classify(score: u16, rules: &EditalRules) -> ProjectStatus {
    if rules.is_approved(score) {
        ProjectStatus::Approved
    } else {
        ProjectStatus::Rejected
    }
}

/// Inputs are rejected, never clamped, so callers can report the exact violation.
pub(crate) fn validate_manual(
    criteria: &EvaluationCriteria,
    feedback: &str,
    evaluator: &str,
    rules: &EditalRules,
) -> Result<(), EvaluationError> {
    for criterion in Criterion::ordered() {
        let value = criteria.get(criterion);
        let max = rules.max_for(criterion);
        if value > max {
            return Err(EvaluationError::CriterionOutOfRange {
                criterion,
                value,
                max,
            });
        }
    }

    let length = feedback.chars().count();
    if length > rules.max_feedback_chars {
        return Err(EvaluationError::FeedbackTooLong {
            length,
            max: rules.max_feedback_chars,
        });
    }

    if evaluator.trim().is_empty() {
        return Err(EvaluationError::MissingEvaluator);
    }

    Ok(())
}
