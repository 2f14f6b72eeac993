//! API Handlers
//!
//! HTTP request handlers for each inventory endpoint. Handlers only decode
//! the request and shape the response; all decisions live in the service.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    CreateItemRequest, HealthResponse, Item, ItemStats, ListParams, MessageResponse,
    PaginatedResponse, UpdateItemRequest,
};
use crate::pagination::ListQuery;
use crate::service::ItemService;
use crate::store::ItemStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ItemService>,
}

impl AppState {
    pub fn new(service: ItemService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds the service over `store` from configuration.
    pub fn from_config(config: &Config, store: Arc<dyn ItemStore>) -> Self {
        Self::new(ItemService::from_config(config, store))
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation(format!("invalid item id '{}'", raw)))
}

fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|e| ApiError::Validation(e.body_text()))
}

/// Handler for GET /api/v1/inventory
pub async fn list_items(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse>> {
    let Query(params) = params.map_err(|e| ApiError::Validation(e.body_text()))?;
    let query = ListQuery::try_from(params)?;

    let page = state.service.list(&query).await?;
    Ok(Json(page.into()))
}

/// Handler for POST /api/v1/inventory
pub async fn create_item(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>)> {
    let req = json_body(body)?;
    let item = state.service.create(req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /api/v1/inventory/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get(id).await?))
}

/// Handler for PUT /api/v1/inventory/:id
///
/// Partial update: absent fields keep their values.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<Item>> {
    let id = parse_id(&id)?;
    let req = json_body(body)?;
    Ok(Json(state.service.update(id, req).await?))
}

/// Handler for DELETE /api/v1/inventory/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /api/v1/inventory/stats
pub async fn item_stats(State(state): State<AppState>) -> Result<Json<ItemStats>> {
    Ok(Json(state.service.stats().await?))
}

/// Handler for POST /api/v1/inventory/seed
pub async fn seed_items(State(state): State<AppState>) -> Result<Json<MessageResponse>> {
    let inserted = state.service.seed().await?;
    let message = if inserted == 0 {
        "Database already contains items, nothing seeded".to_string()
    } else {
        format!("Database seeded successfully with {} sample items", inserted)
    };
    Ok(Json(MessageResponse::new(message)))
}

/// Handler for GET /health
///
/// Not rate limited. Reports 503 when the store cannot be reached.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.service.health().await {
        Ok(()) => {
            let cache = state.service.cache_stats().await;
            let keys = state.service.tracked_callers();
            (StatusCode::OK, Json(HealthResponse::healthy(cache, keys)))
        }
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::unhealthy(e.to_string())),
        ),
    }
}
