//! Suggestion API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/suggestions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{jar_id}/suggest", post(handler::create))
        .route("/{jar_id}/suggestions", get(handler::list))
        .route(
            "/suggestion/{suggestion_id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
