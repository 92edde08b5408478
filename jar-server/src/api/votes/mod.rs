//! Vote API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/votes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{jar_id}/vote", post(handler::submit))
        .route(
            "/{jar_id}/votes/{member_id}",
            get(handler::member_votes).delete(handler::clear),
        )
        .route(
            "/{jar_id}/suggestion/{suggestion_id}/votes",
            get(handler::suggestion_votes),
        )
}
