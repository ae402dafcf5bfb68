use std::sync::{Arc, RwLock};

use super::domain::Project;

/// Immutable view of the collection at one point in time.
pub type ProjectSnapshot = Arc<[Project]>;

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Writers never mutate a snapshot in place: `replace` derives a new collection from the
/// current one and swaps it in as a single step.
pub trait ProjectRepository: Send + Sync {
    fn snapshot(&self) -> Result<ProjectSnapshot, RepositoryError>;

    fn replace<E, F>(&self, update: F) -> Result<ProjectSnapshot, E>
    where
        E: From<RepositoryError>,
        F: FnOnce(&[Project]) -> Result<Vec<Project>, E>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store holding the current snapshot behind a read/write lock.
#[derive(Debug)]
pub struct InMemoryProjectStore {
    current: RwLock<ProjectSnapshot>,
}

impl InMemoryProjectStore {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            current: RwLock::new(projects.into()),
        }
    }
}

impl Default for InMemoryProjectStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ProjectRepository for InMemoryProjectStore {
    fn snapshot(&self) -> Result<ProjectSnapshot, RepositoryError> {
        let guard = self
            .current
            .read()
            .map_err(|_| RepositoryError::Unavailable("project store lock poisoned".into()))?;
        Ok(Arc::clone(&guard))
    }

    fn replace<E, F>(&self, update: F) -> Result<ProjectSnapshot, E>
    where
        E: From<RepositoryError>,
        F: FnOnce(&[Project]) -> Result<Vec<Project>, E>,
    {
        let mut guard = self
            .current
            .write()
            .map_err(|_| RepositoryError::Unavailable("project store lock poisoned".into()))?;
        let next: ProjectSnapshot = update(&guard)?.into();
        *guard = Arc::clone(&next);
        Ok(next)
    }
}
