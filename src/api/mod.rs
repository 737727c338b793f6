use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::error::AppError;
use crate::pages::{CourseDetailPage, PageState, SubjectDetailPage, SubjectListPage};
use crate::services::{CascadeService, HomeSummary};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/home", get(home_summary))
        .route("/api/subjects", get(subject_list))
        .route("/api/subjects/{id}", get(subject_detail))
        .route("/api/courses/{id}", get(course_detail))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.supabase.fetch_subjects().await?;
    Ok(StatusCode::OK)
}

async fn home_summary(State(state): State<AppState>) -> Json<HomeSummary> {
    let service = CascadeService::new(state.supabase.clone());
    Json(service.load_home_summary().await)
}

async fn subject_list(State(state): State<AppState>) -> Response {
    let page = SubjectListPage::new(CascadeService::new(state.supabase.clone()));
    page.load().await;
    page_response(page.state())
}

async fn subject_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let page = SubjectDetailPage::new(CascadeService::new(state.supabase.clone()));
    page.observe(&id).await;
    page_response(page.state())
}

async fn course_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let page = CourseDetailPage::new(CascadeService::new(state.supabase.clone()));
    page.observe(&id).await;
    page_response(page.state())
}

/// One request is one page visit: map the final page state onto an HTTP
/// status and ship the snapshot as the body.
fn page_response<T: Serialize>(state: PageState<T>) -> Response {
    let status = match &state {
        PageState::NotFound => StatusCode::NOT_FOUND,
        PageState::Error { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Json(state)).into_response()
}
