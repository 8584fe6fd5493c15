use std::path::Path;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{auth, handlers, AppState};

/// The full HTTP surface: JSON API, `/images/*` from the gallery directory,
/// and everything else from the UI asset root.
pub fn build_router(app_state: AppState, frontend_dir: impl AsRef<Path>) -> Router {
    let images_dir = app_state.gallery_service.images_dir().to_path_buf();

    let api_routes = Router::new()
        .route("/images", get(handlers::list_images_handler))
        .route("/health", get(handlers::health_handler))
        .route("/auth/register", post(auth::handlers::register_handler))
        .route("/auth/login", post(auth::handlers::login_handler))
        .route("/auth/logout", post(auth::handlers::logout_handler));

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/images", ServeDir::new(images_dir))
        .fallback_service(ServeDir::new(frontend_dir.as_ref()))
        .layer(middleware::from_fn(crate::middleware::add_security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
