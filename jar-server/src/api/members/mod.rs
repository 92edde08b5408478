//! Member API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/members", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{jar_id}/join", post(handler::join))
        .route("/{jar_id}/members", get(handler::list))
        .route("/{jar_id}/member-by-contact/{contact}", get(handler::get_by_contact))
        .route("/member/{member_id}", get(handler::get_by_id).delete(handler::leave))
        .route("/member/{member_id}/display-name", patch(handler::update_display_name))
}
