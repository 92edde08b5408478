//! Error re-exports
//!
//! The unified error system lives in `shared::error`; this module re-exports
//! it for handler/domain code. Repository errors are bridged in
//! `crate::db::repository`.

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
