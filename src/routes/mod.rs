pub mod about;
pub mod alert;
pub mod assets;
pub mod community;
pub mod explore;
pub mod health;
pub mod help;
pub mod home;
pub mod language;
pub mod login;
pub mod upload;

use axum::routing::get;
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::extractors;
use crate::state::AppState;

/// The full browser-facing application.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .merge(language::router())
        .merge(upload::router(state.config.upload.max_bytes))
        .merge(community::router())
        .merge(explore::router())
        .merge(help::router())
        .merge(login::router())
        .merge(about::router())
        .merge(health::router())
        .merge(assets::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            extractors::ensure_visitor,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
