use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::domain::{Criterion, Project, ProjectId, ProjectStatus};
use super::evaluation::EditalRules;

const SEED_JSON: &str = include_str!("../../../data/projects.json");

/// Submissions shipped with the 2026 call.
pub fn seed_projects() -> Result<Vec<Project>, DatasetError> {
    parse_projects(SEED_JSON)
}

pub fn load_projects(path: impl AsRef<Path>) -> Result<Vec<Project>, DatasetError> {
    let file = File::open(path)?;
    load_projects_from_reader(BufReader::new(file))
}

pub fn load_projects_from_reader<R: Read>(reader: R) -> Result<Vec<Project>, DatasetError> {
    let projects: Vec<Project> = serde_json::from_reader(reader)?;
    ensure_unique_ids(&projects)?;
    Ok(projects)
}

pub fn parse_projects(raw: &str) -> Result<Vec<Project>, DatasetError> {
    let projects: Vec<Project> = serde_json::from_str(raw)?;
    ensure_unique_ids(&projects)?;
    Ok(projects)
}

/// Check every evaluated record against the rubric.
///
/// A score must match its breakdown and stay within the criterion maxima. Approved and
/// rejected records must agree with the threshold; pending records must be unscored.
pub fn validate_projects(projects: &[Project], rules: &EditalRules) -> Result<(), DatasetError> {
    projects
        .iter()
        .try_for_each(|project| validate_record(project, rules))
}

fn validate_record(project: &Project, rules: &EditalRules) -> Result<(), DatasetError> {
    let invalid = |reason: String| DatasetError::InvalidRecord {
        id: project.id.clone(),
        reason,
    };

    let score = match (project.score, project.evaluation) {
        (None, None) => None,
        (Some(score), Some(criteria)) => {
            if score > rules.max_score() {
                return Err(invalid(format!(
                    "score {score} exceeds the maximum of {}",
                    rules.max_score()
                )));
            }
            for criterion in Criterion::ordered() {
                let value = criteria.get(criterion);
                let max = rules.max_for(criterion);
                if value > max {
                    return Err(invalid(format!(
                        "{} score {value} exceeds the maximum of {max}",
                        criterion.label()
                    )));
                }
            }
            if score != criteria.total() {
                return Err(invalid(format!(
                    "score {score} differs from the breakdown total {}",
                    criteria.total()
                )));
            }
            Some(score)
        }
        (Some(_), None) => return Err(invalid("score without a breakdown".to_string())),
        (None, Some(_)) => return Err(invalid("breakdown without a score".to_string())),
    };

    match (project.status, score) {
        (ProjectStatus::Approved, Some(score)) if !rules.is_approved(score) => {
            Err(invalid(format!(
                "approved with score {score} below the threshold of {}",
                rules.approval_threshold
            )))
        }
        (ProjectStatus::Rejected, Some(score)) if rules.is_approved(score) => {
            Err(invalid(format!(
                "rejected with score {score} at or above the threshold of {}",
                rules.approval_threshold
            )))
        }
        (ProjectStatus::Approved | ProjectStatus::Rejected, None) => Err(invalid(format!(
            "{} without a score",
            project.status.key()
        ))),
        (ProjectStatus::Pending, Some(_)) => {
            Err(invalid("pending project carries a score".to_string()))
        }
        _ => Ok(()),
    }
}

fn ensure_unique_ids(projects: &[Project]) -> Result<(), DatasetError> {
    let mut seen = HashSet::with_capacity(projects.len());
    for project in projects {
        if !seen.insert(&project.id) {
            return Err(DatasetError::DuplicateId(project.id.clone()));
        }
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read project dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid project dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate project id {0}")]
    DuplicateId(ProjectId),
    #[error("project {id} is inconsistent: {reason}")]
    InvalidRecord { id: ProjectId, reason: String },
}
