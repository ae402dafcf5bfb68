use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::edital::domain::{
    EvaluationCriteria, EvaluationProvenance, Project, ProjectId, ProjectStatus, ThemeArea,
};
use crate::workflows::edital::evaluation::EditalRules;
use crate::workflows::edital::parameters::EditalParameters;
use crate::workflows::edital::repository::{
    InMemoryProjectStore, ProjectRepository, ProjectSnapshot, RepositoryError,
};
use crate::workflows::edital::service::{EditalReviewService, EvaluationSubmission};
use crate::workflows::edital::{review_router, seed_projects};

pub(super) fn rules() -> EditalRules {
    EditalRules::default()
}

pub(super) fn project(id: &str, status: ProjectStatus) -> Project {
    Project {
        id: ProjectId::new(id),
        entity_name: format!("Associação {id}"),
        cnpj: "12.345.678/0001-90".to_string(),
        municipality: "São Paulo".to_string(),
        project_name: format!("Projeto {id}"),
        theme: ThemeArea::SocialDevelopment,
        description: "Oficinas comunitárias".to_string(),
        beneficiaries: "120 famílias".to_string(),
        requested_value: 300_000,
        has_parliamentary_amendment: false,
        status,
        score: None,
        evaluation: None,
        feedback: None,
        evaluator: None,
        provenance: EvaluationProvenance::Unset,
    }
}

pub(super) fn pending(
    id: &str,
    requested_value: u64,
    theme: &str,
    description_len: usize,
) -> Project {
    Project {
        requested_value,
        theme: ThemeArea::from(theme.to_string()),
        description: "a".repeat(description_len),
        ..project(id, ProjectStatus::Pending)
    }
}

pub(super) fn reviewed(id: &str, status: ProjectStatus, score: u16, evaluator: &str) -> Project {
    Project {
        score: Some(score),
        evaluator: Some(evaluator.to_string()),
        provenance: EvaluationProvenance::Human,
        ..project(id, status)
    }
}

pub(super) fn criteria(
    history: u8,
    consistency: u8,
    mandate_relation: u8,
    social_impact: u8,
    budget: u8,
) -> EvaluationCriteria {
    EvaluationCriteria {
        history,
        consistency,
        mandate_relation,
        social_impact,
        budget,
    }
}

pub(super) fn submission(criteria: EvaluationCriteria, evaluator: &str) -> EvaluationSubmission {
    EvaluationSubmission {
        criteria,
        feedback: "Projeto consistente.".to_string(),
        evaluator: evaluator.to_string(),
    }
}

pub(super) fn build_service(
    projects: Vec<Project>,
) -> (
    EditalReviewService<InMemoryProjectStore>,
    Arc<InMemoryProjectStore>,
) {
    let repository = Arc::new(InMemoryProjectStore::new(projects));
    let service = EditalReviewService::new(repository.clone(), rules());
    (service, repository)
}

pub(super) fn delayed_service(
    projects: Vec<Project>,
    delay: Duration,
) -> (
    EditalReviewService<InMemoryProjectStore>,
    Arc<InMemoryProjectStore>,
) {
    let (service, repository) = build_service(projects);
    (service.with_analysis_delay(delay), repository)
}

pub(super) fn seeded_router() -> axum::Router {
    let projects = seed_projects().expect("seed dataset parses");
    let (service, _) = build_service(projects);
    review_router(
        Arc::new(service),
        Arc::new(EditalParameters::edital_2026(rules())),
    )
}

pub(super) fn find<'a>(projects: &'a [Project], id: &str) -> &'a Project {
    projects
        .iter()
        .find(|project| project.id.as_str() == id)
        .unwrap_or_else(|| panic!("project {id} present"))
}

pub(super) struct UnavailableRepository;

impl ProjectRepository for UnavailableRepository {
    fn snapshot(&self) -> Result<ProjectSnapshot, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn replace<E, F>(&self, _update: F) -> Result<ProjectSnapshot, E>
    where
        E: From<RepositoryError>,
        F: FnOnce(&[Project]) -> Result<Vec<Project>, E>,
    {
        Err(RepositoryError::Unavailable("store offline".to_string()).into())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
