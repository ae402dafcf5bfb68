mod config;
mod policy;
mod rules;

pub use config::{
    BudgetBand, EditalRules, DEFAULT_APPROVAL_THRESHOLD, DEFAULT_AUTOMATIC_EVALUATOR,
    DEFAULT_BUDGET_MAX, DEFAULT_BUDGET_MIN, DEFAULT_MAX_FEEDBACK_CHARS, DEFAULT_UNASSIGNED_OWNER,
};
pub use policy::EvaluationError;

#[cfg(test)]
pub(crate) use rules::HUMAN_VALIDATION_DISCLAIMER;

use super::domain::{
    EvaluationCriteria, EvaluationProvenance, EvaluationRecord, Project, ProjectId, ProjectStatus,
};
use policy::{classify, validate_manual};

/// Score a manual evaluation and return the updated project.
///
/// The collection is not modified; callers commit the returned record.
pub fn record_evaluation(
    projects: &[Project],
    project_id: &ProjectId,
    criteria: EvaluationCriteria,
    feedback: &str,
    evaluator: &str,
    rules: &EditalRules,
) -> Result<Project, EvaluationError> {
    validate_manual(&criteria, feedback, evaluator, rules)?;

    let project = projects
        .iter()
        .find(|project| &project.id == project_id)
        .ok_or_else(|| EvaluationError::ProjectNotFound(project_id.clone()))?;

    let score = criteria.total();
    let record = EvaluationRecord {
        criteria,
        score,
        status: classify(score, rules),
        feedback: feedback.to_string(),
        evaluator: evaluator.trim().to_string(),
        provenance: EvaluationProvenance::Human,
    };

    Ok(project.clone().with_evaluation(record))
}

/// Apply the automatic heuristic. Only `Pending` projects are scored; every other
/// project is returned unchanged.
pub fn auto_evaluate(project: Project, rules: &EditalRules) -> Project {
    if project.status != ProjectStatus::Pending {
        return project;
    }

    let record = suggest_evaluation(&project, rules);
    project.with_evaluation(record)
}

/// The evaluation the heuristic would write for `project`, whatever its status.
///
/// Nothing is applied; reviewers use it to prefill a manual evaluation.
pub fn suggest_evaluation(project: &Project, rules: &EditalRules) -> EvaluationRecord {
    let (criteria, signals) = rules::suggest_criteria(project, rules);
    let score = criteria.total();
    EvaluationRecord {
        criteria,
        score,
        status: classify(score, rules),
        feedback: rules::automatic_feedback(project, &criteria, &signals, rules),
        evaluator: rules.automatic_evaluator.clone(),
        provenance: EvaluationProvenance::Automatic,
    }
}

/// Bulk form of [`auto_evaluate`]; order is preserved.
pub fn auto_evaluate_all(projects: &[Project], rules: &EditalRules) -> Vec<Project> {
    projects
        .iter()
        .cloned()
        .map(|project| auto_evaluate(project, rules))
        .collect()
}

/// Number of projects [`auto_evaluate_all`] would score.
pub fn pending_count(projects: &[Project]) -> usize {
    projects
        .iter()
        .filter(|project| project.status == ProjectStatus::Pending)
        .count()
}
