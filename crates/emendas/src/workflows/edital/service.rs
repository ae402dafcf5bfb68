use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{EvaluationCriteria, EvaluationRecord, Project, ProjectId};
use super::evaluation::{self, EditalRules, EvaluationError};
use super::filter::{filter_projects, ProjectFilter};
use super::report::views::{DashboardStats, FilterOptions};
use super::report::{compute_stats, filter_options};
use super::repository::{ProjectRepository, ProjectSnapshot, RepositoryError};

/// Manual evaluation payload as submitted by a reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSubmission {
    pub criteria: EvaluationCriteria,
    #[serde(default)]
    pub feedback: String,
    pub evaluator: String,
}

/// Result of triggering the bulk automatic analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BulkAnalysisOutcome {
    Completed { evaluated: usize },
    AlreadyRunning,
}

/// Service composing the project store and the edital rules.
pub struct EditalReviewService<R> {
    repository: Arc<R>,
    rules: Arc<EditalRules>,
    analysis_busy: Arc<AtomicBool>,
    analysis_delay: Duration,
}

impl<R> Clone for EditalReviewService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            rules: Arc::clone(&self.rules),
            analysis_busy: Arc::clone(&self.analysis_busy),
            analysis_delay: self.analysis_delay,
        }
    }
}

impl<R> EditalReviewService<R>
where
    R: ProjectRepository + 'static,
{
    pub fn new(repository: Arc<R>, rules: EditalRules) -> Self {
        Self {
            repository,
            rules: Arc::new(rules),
            analysis_busy: Arc::new(AtomicBool::new(false)),
            analysis_delay: Duration::ZERO,
        }
    }

    /// Simulated latency of the automatic analysis.
    pub fn with_analysis_delay(mut self, delay: Duration) -> Self {
        self.analysis_delay = delay;
        self
    }

    pub fn rules(&self) -> &EditalRules {
        &self.rules
    }

    pub fn list(&self) -> Result<ProjectSnapshot, ReviewServiceError> {
        Ok(self.repository.snapshot()?)
    }

    pub fn get(&self, project_id: &ProjectId) -> Result<Project, ReviewServiceError> {
        let snapshot = self.repository.snapshot()?;
        let project = snapshot
            .iter()
            .find(|project| &project.id == project_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;
        Ok(project)
    }

    /// Validate and score a manual evaluation, then commit it.
    pub fn record_evaluation(
        &self,
        project_id: &ProjectId,
        submission: EvaluationSubmission,
    ) -> Result<Project, ReviewServiceError> {
        let EvaluationSubmission {
            criteria,
            feedback,
            evaluator,
        } = submission;

        let mut recorded = None;
        let result = self.repository.replace(|projects| {
            let updated = evaluation::record_evaluation(
                projects,
                project_id,
                criteria,
                &feedback,
                &evaluator,
                &self.rules,
            )?;
            let next = projects
                .iter()
                .map(|project| {
                    if project.id == updated.id {
                        updated.clone()
                    } else {
                        project.clone()
                    }
                })
                .collect();
            recorded = Some(updated);
            Ok::<_, ReviewServiceError>(next)
        });

        if let Err(err) = &result {
            warn!(project_id = %project_id, error = %err, "evaluation rejected");
        }
        result?;

        let project =
            recorded.ok_or_else(|| EvaluationError::ProjectNotFound(project_id.clone()))?;
        info!(
            project_id = %project.id,
            score = project.score.unwrap_or_default(),
            status = project.status.key(),
            "evaluation recorded"
        );
        Ok(project)
    }

    /// Preview the automatic evaluation of one project without committing it.
    pub fn suggest(
        &self,
        project_id: &ProjectId,
    ) -> Result<EvaluationRecord, ReviewServiceError> {
        let project = self.get(project_id)?;
        let suggestion = evaluation::suggest_evaluation(&project, &self.rules);
        debug!(project_id = %project.id, score = suggestion.score, "evaluation suggested");
        Ok(suggestion)
    }

    pub fn is_analysis_running(&self) -> bool {
        self.analysis_busy.load(Ordering::Acquire)
    }

    /// Run the automatic analysis over every pending project.
    ///
    /// A trigger while a run is in flight is ignored. The run executes on its own task and
    /// commits the whole collection in one step, so dropping the returned future neither
    /// cancels it nor exposes a partial result.
    pub async fn auto_evaluate_all(&self) -> Result<BulkAnalysisOutcome, ReviewServiceError> {
        let Some(guard) = AnalysisGuard::acquire(&self.analysis_busy) else {
            debug!("automatic analysis already running; trigger ignored");
            return Ok(BulkAnalysisOutcome::AlreadyRunning);
        };

        let repository = Arc::clone(&self.repository);
        let rules = Arc::clone(&self.rules);
        let delay = self.analysis_delay;

        let task = tokio::spawn(async move {
            let _guard = guard;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let mut evaluated = 0;
            repository.replace(|projects| {
                evaluated = evaluation::pending_count(projects);
                Ok::<_, RepositoryError>(evaluation::auto_evaluate_all(projects, &rules))
            })?;
            Ok::<_, RepositoryError>(evaluated)
        });

        let evaluated = task
            .await
            .map_err(|err| ReviewServiceError::Analysis(err.to_string()))??;

        info!(evaluated, "automatic analysis completed");
        Ok(BulkAnalysisOutcome::Completed { evaluated })
    }

    pub fn stats(&self) -> Result<DashboardStats, ReviewServiceError> {
        let snapshot = self.repository.snapshot()?;
        Ok(compute_stats(&snapshot, &self.rules))
    }

    pub fn filter(&self, filter: &ProjectFilter) -> Result<Vec<Project>, ReviewServiceError> {
        let snapshot = self.repository.snapshot()?;
        Ok(filter_projects(&snapshot, filter, &self.rules))
    }

    pub fn filter_options(&self) -> Result<FilterOptions, ReviewServiceError> {
        let snapshot = self.repository.snapshot()?;
        Ok(filter_options(&snapshot, &self.rules))
    }
}

/// Busy flag held for the lifetime of one analysis run.
struct AnalysisGuard {
    busy: Arc<AtomicBool>,
}

impl AnalysisGuard {
    fn acquire(busy: &Arc<AtomicBool>) -> Option<Self> {
        busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                busy: Arc::clone(busy),
            })
    }
}

impl Drop for AnalysisGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("automatic analysis task failed: {0}")]
    Analysis(String),
}
