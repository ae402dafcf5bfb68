//! Edital 2026 review workflow: scoring, classification and dashboard projections over the
//! in-memory collection of submitted projects.

pub mod assistant;
pub mod domain;
pub mod evaluation;
pub mod filter;
pub mod parameters;
pub mod report;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    format_brl, Criterion, EvaluationCriteria, EvaluationProvenance, EvaluationRecord, Project,
    ProjectId, ProjectStatus, ThemeArea,
};
pub use evaluation::{
    auto_evaluate, auto_evaluate_all, pending_count, record_evaluation, suggest_evaluation,
    BudgetBand, EditalRules, EvaluationError,
};
pub use filter::{filter_projects, is_neutral, ProjectFilter, Selection};
pub use parameters::{BudgetParameters, EditalParameters, EditalPhase, EditalTimeline};
pub use report::views::{
    DashboardStats, EvaluatorBreakdown, FilterOptions, ProjectView, StatusCount,
    StatusDistribution, ThemeCount,
};
pub use report::{
    compute_stats, distinct_effective_evaluators, distinct_municipalities, effective_evaluator,
};
pub use repository::{InMemoryProjectStore, ProjectRepository, ProjectSnapshot, RepositoryError};
pub use router::review_router;
pub use seed::{load_projects, seed_projects, validate_projects, DatasetError};
pub use service::{
    BulkAnalysisOutcome, EditalReviewService, EvaluationSubmission, ReviewServiceError,
};
