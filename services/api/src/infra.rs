use chrono::NaiveDate;
use emendas::error::AppError;
use emendas::workflows::edital::{
    load_projects, seed_projects, validate_projects, EditalRules, Project,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Projects from `path`, or the bundled 2026 submissions when no path is given.
///
/// External datasets are checked against the configured rubric before use.
pub(crate) fn load_dataset(
    path: Option<&Path>,
    rules: &EditalRules,
) -> Result<Vec<Project>, AppError> {
    let projects = match path {
        Some(path) => {
            let projects = load_projects(path)?;
            validate_projects(&projects, rules)?;
            info!(path = %path.display(), count = projects.len(), "loaded project dataset");
            projects
        }
        None => seed_projects()?,
    };
    Ok(projects)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
