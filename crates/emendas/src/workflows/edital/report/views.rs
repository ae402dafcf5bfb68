use super::super::domain::{Project, ProjectStatus};
use super::super::evaluation::EditalRules;
use super::summary::effective_evaluator;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_count: usize,
    pub approved_count: usize,
    pub total_requested_budget: u64,
    pub average_score: f64,
    pub count_by_theme: Vec<ThemeCount>,
    pub count_by_status: StatusDistribution,
    pub count_by_evaluator_and_status: Vec<EvaluatorBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeCount {
    pub theme: String,
    pub count: usize,
}

/// Three-bucket distribution charted on the dashboard. `UnderReview` has no bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusDistribution {
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
}

impl StatusDistribution {
    pub fn entries(&self) -> [StatusCount; 3] {
        [
            StatusCount::new(ProjectStatus::Approved, self.approved),
            StatusCount::new(ProjectStatus::Pending, self.pending),
            StatusCount::new(ProjectStatus::Rejected, self.rejected),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub status_label: &'static str,
    pub count: usize,
}

impl StatusCount {
    pub fn new(status: ProjectStatus, count: usize) -> Self {
        Self {
            status,
            status_label: status.label(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluatorBreakdown {
    pub evaluator: String,
    pub total: usize,
    pub statuses: Vec<StatusCount>,
}

impl EvaluatorBreakdown {
    pub fn count_for(&self, status: ProjectStatus) -> usize {
        self.statuses
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub municipalities: Vec<String>,
    pub evaluators: Vec<String>,
}

/// Listing/detail representation with the derived display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub status_label: &'static str,
    pub effective_evaluator: String,
    pub has_feedback: bool,
}

impl ProjectView {
    pub fn new(project: Project, rules: &EditalRules) -> Self {
        let effective_evaluator = effective_evaluator(&project, rules).to_string();
        Self {
            status_label: project.status.label(),
            has_feedback: project.has_feedback(),
            effective_evaluator,
            project,
        }
    }
}
