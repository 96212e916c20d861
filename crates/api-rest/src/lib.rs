//! # API REST
//!
//! REST surface of the CDM Insights analytics API.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status mapping)
//!
//! Uses `cdm-core` for the query layer and aggregation logic.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use cdm_core::config::DEFAULT_PAGE_LIMIT;
use cdm_core::entities::{Concept, Person};
use cdm_core::repositories::{ConceptRepository, PersonRepository};
use cdm_core::{CdmError, CoreConfig, DomainId, PersonStats, StatsService, VisitStats};

/// Application state shared across REST API handlers.
///
/// Holds the configuration resolved at startup and the connection pool;
/// repositories are constructed per request from the pool.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub pool: PgPool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        read_person_statistics,
        read_visit_statistics,
        read_concepts,
        read_concept,
        read_people,
    ),
    components(schemas(HealthRes, Concept, Person, PersonStats, VisitStats, DomainId))
)]
struct ApiDoc;

/// Build the application router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/static/person", get(read_person_statistics))
        .route("/static/visit", get(read_visit_statistics))
        .route("/concepts/", get(read_concepts))
        .route("/concepts/:concept_id", get(read_concept))
        .route("/person/", get(read_people))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// How handler failures surface over HTTP. Bodies follow the
/// `{"detail": "..."}` shape consumers of the previous service expect.
#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    BadRequest(String),
    Internal,
}

impl From<CdmError> for ApiError {
    fn from(err: CdmError) -> Self {
        match err {
            CdmError::NotFound => ApiError::NotFound("Not found"),
            CdmError::InvalidInput(message) => ApiError::BadRequest(message),
            // Data-source and configuration failures are fatal to the
            // request; no retries, no partial results.
            CdmError::DataSource(_) | CdmError::Configuration(_) => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.to_string()),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            ),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConceptSearchParams {
    /// Rows to skip before the page starts.
    #[serde(default)]
    pub skip: u64,
    /// Page size; clamped to the configured maximum.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Exact vocabulary-domain filter.
    pub domain_id: Option<DomainId>,
    /// Case-sensitive substring filter on the concept name.
    pub concept_name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn skip_as_i64(skip: u64) -> i64 {
    i64::try_from(skip).unwrap_or(i64::MAX)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "CDM Insights REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/static/person",
    responses(
        (status = 200, description = "Patient totals and breakdowns by gender, race and ethnicity", body = PersonStats),
        (status = 500, description = "Data source unavailable")
    )
)]
/// Aggregate patient statistics.
///
/// Always returns the full category map for every dimension, even when all
/// counts are zero; this endpoint never responds 404.
#[axum::debug_handler]
async fn read_person_statistics(
    State(state): State<AppState>,
) -> Result<Json<PersonStats>, ApiError> {
    let stats_service = StatsService::new(state.pool.clone());
    match stats_service.person_statistics().await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            tracing::error!("Person statistics error: {:?}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/static/visit",
    responses(
        (status = 200, description = "Visit breakdowns and the age-decade histogram", body = VisitStats),
        (status = 500, description = "Data source unavailable")
    )
)]
/// Aggregate visit statistics, including the age-decade histogram.
#[axum::debug_handler]
async fn read_visit_statistics(
    State(state): State<AppState>,
) -> Result<Json<VisitStats>, ApiError> {
    let stats_service = StatsService::new(state.pool.clone());
    match stats_service.visit_statistics().await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            tracing::error!("Visit statistics error: {:?}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/concepts/",
    params(ConceptSearchParams),
    responses(
        (status = 200, description = "Matching concepts", body = [Concept]),
        (status = 404, description = "No concept matched"),
        (status = 500, description = "Data source unavailable")
    )
)]
/// Paginated concept search. An empty page is a 404, not an empty list.
#[axum::debug_handler]
async fn read_concepts(
    State(state): State<AppState>,
    Query(params): Query<ConceptSearchParams>,
) -> Result<Json<Vec<Concept>>, ApiError> {
    let limit = state.cfg.clamp_limit(params.limit);
    let concept_repository = ConceptRepository::new(state.pool.clone());
    match concept_repository
        .search(
            skip_as_i64(params.skip),
            limit,
            params.domain_id,
            params.concept_name.as_deref(),
        )
        .await
    {
        Ok(concepts) if concepts.is_empty() => Err(ApiError::NotFound("Not found")),
        Ok(concepts) => Ok(Json(concepts)),
        Err(e) => {
            tracing::error!("Concept search error: {:?}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/concepts/{concept_id}",
    params(("concept_id" = i32, Path, description = "Concept id")),
    responses(
        (status = 200, description = "The concept", body = Concept),
        (status = 404, description = "Unknown concept id"),
        (status = 500, description = "Data source unavailable")
    )
)]
/// Point lookup of a concept by id.
#[axum::debug_handler]
async fn read_concept(
    State(state): State<AppState>,
    AxumPath(concept_id): AxumPath<i32>,
) -> Result<Json<Concept>, ApiError> {
    let concept_repository = ConceptRepository::new(state.pool.clone());
    match concept_repository.get(concept_id).await {
        Ok(Some(concept)) => Ok(Json(concept)),
        Ok(None) => Err(ApiError::NotFound("Concept id not found")),
        Err(e) => {
            tracing::error!("Concept lookup error: {:?}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/person/",
    params(PageParams),
    responses(
        (status = 200, description = "A page of persons", body = [Person]),
        (status = 404, description = "Page beyond the table"),
        (status = 500, description = "Data source unavailable")
    )
)]
/// Unfiltered paginated listing of persons. An empty page is a 404.
#[axum::debug_handler]
async fn read_people(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let limit = state.cfg.clamp_limit(params.limit);
    let person_repository = PersonRepository::new(state.pool.clone());
    match person_repository.search(skip_as_i64(params.skip), limit).await {
        Ok(people) if people.is_empty() => Err(ApiError::NotFound("Not found")),
        Ok(people) => Ok(Json(people)),
        Err(e) => {
            tracing::error!("Person search error: {:?}", e);
            Err(e.into())
        }
    }
}
