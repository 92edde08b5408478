//! Jar API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/jars", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        // phase transitions
        .route("/{id}/start-suggesting", post(handler::start_suggesting))
        .route("/{id}/start-voting", post(handler::start_voting))
        .route("/{id}/complete", post(handler::complete))
        // reverts (operator correction)
        .route("/{id}/revert-to-setup", post(handler::revert_to_setup))
        .route("/{id}/revert-to-suggesting", post(handler::revert_to_suggesting))
        .route("/{id}/revert-to-voting", post(handler::revert_to_voting))
        // reads
        .route("/{id}/stats", get(handler::stats))
        .route("/{id}/results", get(handler::results))
}
