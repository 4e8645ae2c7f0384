//! Router configuration.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_admin;
use crate::handlers::{ai, archive, authors, categories, posts, settings, site};
use crate::state::AppState;

/// Default whole-request timeout; a bulk stream is bounded by it too.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

pub fn create_router(state: AppState) -> Router {
    create_router_with_timeout(state, REQUEST_TIMEOUT)
}

pub fn create_router_with_timeout(state: AppState, timeout: Duration) -> Router {
    let api = Router::new()
        .route("/archive/import", post(archive::import_snapshot).get(archive::import_history))
        .route("/archive/import/bulk", post(archive::import_bulk))
        .route("/ai/format", post(ai::format_content))
        .route("/ai/improve", post(ai::improve_content))
        .route(
            "/posts",
            get(posts::get_posts).post(posts::create_post).put(posts::update_post).delete(posts::delete_post),
        )
        .route(
            "/authors",
            get(authors::list_authors)
                .post(authors::create_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        .route("/categories", get(categories::list_categories))
        .route("/admin/seed-categories", post(categories::seed_categories))
        .route(
            "/settings",
            get(settings::get_settings).post(settings::create_setting).put(settings::update_setting),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(site::health))
        .route("/sitemap.xml", get(site::sitemap))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
