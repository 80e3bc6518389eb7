use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{CreateProviderRequest, ErrorResponse, HealthResponse, ProviderId, SearchQuery, SearchRequest, SearchResponse, SERVICE_TYPES};
use crate::services::{ProviderSource, ProviderStore};
use crate::core::ProviderSearcher;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProviderStore>,
    pub searcher: ProviderSearcher,
}

/// Configure all provider routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/providers", web::get().to(list_providers))
        .route("/providers", web::post().to(create_provider))
        .route("/providers/{id}", web::get().to(get_provider))
        .route("/service-types", web::get().to(list_service_types))
        .route("/search", web::post().to(search));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List every provider
///
/// GET /api/providers
async fn list_providers(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_providers().await {
        Ok(providers) => HttpResponse::Ok().json(providers),
        Err(e) => {
            tracing::error!("Failed to list providers: {}", e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve providers",
                e.to_string(),
            )
        }
    }
}

/// Fetch a single provider
///
/// GET /api/providers/{id}
async fn get_provider(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id: ProviderId = match path.parse() {
        Ok(id) => id,
        Err(_) => {
            return error_response(
                actix_web::http::StatusCode::BAD_REQUEST,
                "Invalid provider ID",
                format!("'{}' is not a valid provider id", path.as_str()),
            );
        }
    };

    match state.store.get_provider(id).await {
        Ok(Some(provider)) => HttpResponse::Ok().json(provider),
        Ok(None) => error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            "Provider not found",
            format!("No provider with id {}", id),
        ),
        Err(e) => {
            tracing::error!("Failed to fetch provider {}: {}", id, e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve provider",
                e.to_string(),
            )
        }
    }
}

/// Register a provider
///
/// POST /api/providers
async fn create_provider(
    state: web::Data<AppState>,
    req: web::Json<CreateProviderRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_provider request: {:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Invalid provider data",
            errors.to_string(),
        );
    }

    match state.store.create_provider(req.into_inner().into()).await {
        Ok(provider) => {
            tracing::info!("Created provider {} ({})", provider.id, provider.name);
            HttpResponse::Created().json(provider)
        }
        Err(e) => {
            tracing::error!("Failed to create provider: {}", e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create provider",
                e.to_string(),
            )
        }
    }
}

/// Catalog of service types for the search form
///
/// GET /api/service-types
async fn list_service_types() -> impl Responder {
    HttpResponse::Ok().json(SERVICE_TYPES)
}

/// Search endpoint
///
/// POST /api/search
///
/// Request body:
/// ```json
/// {
///   "latitude": 11.6528,
///   "longitude": 78.1585,
///   "serviceType": "family"
/// }
/// ```
async fn search(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Invalid search parameters",
            errors.to_string(),
        );
    }

    let query: SearchQuery = req.into_inner().into();

    match state.searcher.search_with_fallback(state.store.as_ref(), &query).await {
        Ok(outcome) => {
            tracing::info!(
                "Search at ({}, {}) filter={:?} returned {} providers within {}km",
                query.latitude,
                query.longitude,
                query.category_filter(),
                outcome.results.len(),
                outcome.radius_used
            );
            HttpResponse::Ok().json(SearchResponse::from(outcome))
        }
        Err(e) => {
            tracing::error!("Search error: {}", e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to perform search",
                e.to_string(),
            )
        }
    }
}
