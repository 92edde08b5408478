//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`jars`] - Jar 生命周期与结果接口
//! - [`members`] - 成员接口
//! - [`suggestions`] - 建议接口
//! - [`votes`] - 投票接口

pub mod health;
pub mod jars;
pub mod members;
pub mod suggestions;
pub mod votes;

use crate::core::ServerState;
use axum::Router;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(jars::router())
        .merge(members::router())
        .merge(suggestions::router())
        .merge(votes::router())
}
