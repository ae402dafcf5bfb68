use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::assistant::{self, AssistantRequest};
use super::domain::{ProjectId, ProjectStatus};
use super::evaluation::EvaluationError;
use super::filter::{is_neutral, ProjectFilter, Selection};
use super::parameters::EditalParameters;
use super::report::views::ProjectView;
use super::repository::{ProjectRepository, RepositoryError};
use super::service::{
    BulkAnalysisOutcome, EditalReviewService, EvaluationSubmission, ReviewServiceError,
};

/// Shared state for the review endpoints.
pub struct ReviewState<R> {
    pub service: Arc<EditalReviewService<R>>,
    pub parameters: Arc<EditalParameters>,
}

impl<R> Clone for ReviewState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            parameters: Arc::clone(&self.parameters),
        }
    }
}

/// Router builder exposing the listing, evaluation and dashboard endpoints.
pub fn review_router<R>(
    service: Arc<EditalReviewService<R>>,
    parameters: Arc<EditalParameters>,
) -> Router
where
    R: ProjectRepository + 'static,
{
    Router::new()
        .route("/api/v1/projects", get(list_handler::<R>))
        .route("/api/v1/projects/:project_id", get(detail_handler::<R>))
        .route(
            "/api/v1/projects/:project_id/evaluation",
            post(evaluation_handler::<R>),
        )
        .route(
            "/api/v1/projects/:project_id/suggestion",
            get(suggestion_handler::<R>),
        )
        .route("/api/v1/auto-evaluation", post(auto_evaluation_handler::<R>))
        .route("/api/v1/dashboard", get(dashboard_handler::<R>))
        .route("/api/v1/filters", get(filters_handler::<R>))
        .route("/api/v1/edital", get(parameters_handler::<R>))
        .route("/api/v1/assistant", post(assistant_handler::<R>))
        .with_state(ReviewState {
            service,
            parameters,
        })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectQuery {
    #[serde(default)]
    pub(crate) query: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) municipality: Option<String>,
    #[serde(default)]
    pub(crate) evaluator: Option<String>,
}

impl ProjectQuery {
    fn into_filter(self) -> Result<ProjectFilter, String> {
        let status = match self.status.as_deref() {
            Some(raw) if !is_neutral(raw) => Selection::Only(
                ProjectStatus::from_key(raw).ok_or_else(|| format!("unknown status '{raw}'"))?,
            ),
            _ => Selection::All,
        };

        Ok(ProjectFilter {
            query: self.query.unwrap_or_default(),
            status,
            municipality: Selection::parse(self.municipality.as_deref()),
            evaluator: Selection::parse(self.evaluator.as_deref()),
        })
    }
}

pub(crate) async fn list_handler<R>(
    State(state): State<ReviewState<R>>,
    Query(query): Query<ProjectQuery>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": message })))
                .into_response()
        }
    };

    match state.service.filter(&filter) {
        Ok(projects) => {
            let rules = state.service.rules();
            let views: Vec<ProjectView> = projects
                .into_iter()
                .map(|project| ProjectView::new(project, rules))
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn detail_handler<R>(
    State(state): State<ReviewState<R>>,
    Path(project_id): Path<String>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    match state.service.get(&ProjectId(project_id)) {
        Ok(project) => {
            let view = ProjectView::new(project, state.service.rules());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn evaluation_handler<R>(
    State(state): State<ReviewState<R>>,
    Path(project_id): Path<String>,
    submission: Result<axum::Json<EvaluationSubmission>, JsonRejection>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let axum::Json(submission) = match submission {
        Ok(submission) => submission,
        Err(rejection) => {
            let payload = json!({ "error": rejection.body_text() });
            return (rejection.status(), axum::Json(payload)).into_response();
        }
    };

    match state
        .service
        .record_evaluation(&ProjectId(project_id), submission)
    {
        Ok(project) => {
            let view = ProjectView::new(project, state.service.rules());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn suggestion_handler<R>(
    State(state): State<ReviewState<R>>,
    Path(project_id): Path<String>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    match state.service.suggest(&ProjectId(project_id)) {
        Ok(suggestion) => (StatusCode::OK, axum::Json(suggestion)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn auto_evaluation_handler<R>(State(state): State<ReviewState<R>>) -> Response
where
    R: ProjectRepository + 'static,
{
    match state.service.auto_evaluate_all().await {
        Ok(outcome @ BulkAnalysisOutcome::Completed { .. }) => {
            (StatusCode::OK, axum::Json(outcome)).into_response()
        }
        Ok(outcome @ BulkAnalysisOutcome::AlreadyRunning) => {
            (StatusCode::CONFLICT, axum::Json(outcome)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn dashboard_handler<R>(State(state): State<ReviewState<R>>) -> Response
where
    R: ProjectRepository + 'static,
{
    match state.service.stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn filters_handler<R>(State(state): State<ReviewState<R>>) -> Response
where
    R: ProjectRepository + 'static,
{
    match state.service.filter_options() {
        Ok(options) => (StatusCode::OK, axum::Json(options)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn parameters_handler<R>(State(state): State<ReviewState<R>>) -> Response
where
    R: ProjectRepository + 'static,
{
    (StatusCode::OK, axum::Json(state.parameters.as_ref().clone())).into_response()
}

pub(crate) async fn assistant_handler<R>(
    State(state): State<ReviewState<R>>,
    axum::Json(request): axum::Json<AssistantRequest>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let reply = assistant::reply(&request.message, &state.parameters);
    (StatusCode::OK, axum::Json(reply)).into_response()
}

fn error_response(err: ReviewServiceError) -> Response {
    let status = match &err {
        ReviewServiceError::Evaluation(EvaluationError::ProjectNotFound(_))
        | ReviewServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ReviewServiceError::Evaluation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ReviewServiceError::Repository(RepositoryError::Unavailable(_))
        | ReviewServiceError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
