mod handlers;

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::db::Database;
use crate::service::{ListService, ABOUT_PATH};

/// Build the application router.
///
/// Anything that is not a list, the about page, or a form target is looked
/// up as a static asset under `static_dir`.
pub fn create_router(db: Database, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(handlers::default_list).post(handlers::add_item))
        .route("/delete", post(handlers::delete_item))
        .route(ABOUT_PATH, get(handlers::about))
        .route("/{list_name}", get(handlers::named_list))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(ListService::new(db))
}
