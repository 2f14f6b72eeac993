//! API Routes
//!
//! Configures the Axum router with all inventory endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_item, delete_item, get_item, health_handler, item_stats, list_items, seed_items,
    update_item, AppState,
};
use super::middleware::rate_limit_middleware;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check, not rate limited
/// - `GET /api/v1/inventory` - Paginated, filtered listing
/// - `POST /api/v1/inventory` - Create an item
/// - `GET /api/v1/inventory/stats` - Aggregate statistics
/// - `POST /api/v1/inventory/seed` - Insert the sample catalog into an empty store
/// - `GET|PUT|DELETE /api/v1/inventory/:id` - Read, partially update or delete
///
/// # Middleware
/// - Rate limiting per caller on `/api/*` routes
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let inventory = Router::new()
        .route("/inventory", get(list_items).post(create_item))
        .route("/inventory/stats", get(item_stats))
        .route("/inventory/seed", post(seed_items))
        .route(
            "/inventory/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1", inventory)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
