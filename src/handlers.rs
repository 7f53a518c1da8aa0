use crate::config::Config;
use crate::errors::AppError;
use crate::models::{LeadPayload, LeadResponse};
use crate::repository::LeadRepository;
use crate::validation::{validate_create, validate_update};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
}

/// Health check endpoint.
///
/// Returns the service status, name, and version.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-leads-api",
            "version": "0.1.0"
        })),
    )
}

/// GET /
///
/// Service banner: name, version, and the available endpoint map.
pub async fn service_banner() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to the Lead Management CRUD API",
        "version": "0.1.0",
        "endpoints": {
            "users": "/api/users"
        }
    }))
}

/// GET /api/users
///
/// Lists every lead.
///
/// # Returns
///
/// * `Result<Json<Vec<LeadResponse>>, AppError>` - All leads, each with the
///   derived `full_name`, or an error.
pub async fn list_leads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeadResponse>>, AppError> {
    tracing::info!("GET /api/users");

    let repo = LeadRepository::new(state.db.clone());
    let leads = repo.list().await?;

    Ok(Json(leads.into_iter().map(LeadResponse::from).collect()))
}

/// POST /api/users
///
/// Creates a lead. The body is validated before any persistence call; a
/// non-empty error list aborts with 400 and the per-field detail.
///
/// # Returns
///
/// * `Result<(StatusCode, Json<LeadResponse>), AppError>` - 201 with the
///   stored lead, or an error (400 validation, 409 duplicate email).
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LeadPayload>,
) -> Result<(StatusCode, Json<LeadResponse>), AppError> {
    tracing::info!("POST /api/users");

    let new_lead = validate_create(&payload).map_err(AppError::Validation)?;

    let repo = LeadRepository::new(state.db.clone());
    let lead = repo.create(&new_lead).await?;
    tracing::info!("Created lead {} ({})", lead.id, lead.email);

    Ok((StatusCode::CREATED, Json(lead.into())))
}

/// GET /api/users/:id
///
/// Fetches a single lead by id.
pub async fn get_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeadResponse>, AppError> {
    tracing::info!("GET /api/users/{}", id);

    let repo = LeadRepository::new(state.db.clone());
    let lead = repo.get(id).await?;

    Ok(Json(lead.into()))
}

/// PUT /api/users/:id
///
/// Updates a lead. Only the fields present in the body are validated and
/// overwritten; unspecified fields retain their prior values.
pub async fn update_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LeadPayload>,
) -> Result<Json<LeadResponse>, AppError> {
    tracing::info!("PUT /api/users/{}", id);

    let changes = validate_update(&payload).map_err(AppError::Validation)?;

    let repo = LeadRepository::new(state.db.clone());
    let lead = repo.update(id, &changes).await?;
    tracing::info!("Updated lead {}", lead.id);

    Ok(Json(lead.into()))
}

/// DELETE /api/users/:id
///
/// Permanently removes a lead. Responds 204 with no body.
pub async fn delete_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    tracing::info!("DELETE /api/users/{}", id);

    let repo = LeadRepository::new(state.db.clone());
    repo.delete(id).await?;
    tracing::info!("Deleted lead {}", id);

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/leads/:source
///
/// Lists leads whose `lead_source` exactly matches the path segment.
/// Unknown sources are not an error; they yield an empty list.
pub async fn leads_by_source(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
) -> Result<Json<Vec<LeadResponse>>, AppError> {
    tracing::info!("GET /api/users/leads/{}", source);

    let repo = LeadRepository::new(state.db.clone());
    let leads = repo.list_by_lead_source(&source).await?;

    Ok(Json(leads.into_iter().map(LeadResponse::from).collect()))
}

/// GET /api/users/companies/:size
///
/// Lists leads whose `company_size` exactly matches the path segment.
/// Unknown sizes yield an empty list.
pub async fn leads_by_company_size(
    State(state): State<Arc<AppState>>,
    Path(size): Path<String>,
) -> Result<Json<Vec<LeadResponse>>, AppError> {
    tracing::info!("GET /api/users/companies/{}", size);

    let repo = LeadRepository::new(state.db.clone());
    let leads = repo.list_by_company_size(&size).await?;

    Ok(Json(leads.into_iter().map(LeadResponse::from).collect()))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}
