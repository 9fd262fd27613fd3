pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::{bravery, generation, library, matching};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/catalog", get(matching::handlers::handle_catalog))
        .route(
            "/api/v1/campaigns/match",
            post(matching::handlers::handle_match),
        )
        .route(
            "/api/v1/campaigns/themes",
            post(matching::handlers::handle_themes),
        )
        // Generation API
        .route(
            "/api/v1/campaigns/generate",
            post(generation::handlers::handle_generate),
        )
        .route(
            "/api/v1/trends",
            get(generation::handlers::handle_list_trends)
                .post(generation::handlers::handle_generate_trends)
                .delete(generation::handlers::handle_clear_trends),
        )
        // Bravery API
        .route("/api/v1/bravery/score", post(bravery::handlers::handle_score))
        // Library API
        .route(
            "/api/v1/library",
            get(library::handlers::handle_list).post(library::handlers::handle_save),
        )
        .route(
            "/api/v1/library/:id",
            get(library::handlers::handle_get).delete(library::handlers::handle_delete),
        )
        .route(
            "/api/v1/library/:id/favorite",
            patch(library::handlers::handle_toggle_favorite),
        )
        .with_state(state)
}
