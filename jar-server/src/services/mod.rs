//! 服务模块 - 后台扫描与通知
//!
//! - [`sweeper`] - 截止时间后台扫描
//! - [`notify`] - 通知出口（相位变更回调）

pub mod notify;
pub mod sweeper;

pub use notify::{LogNotifier, Notifier};
pub use sweeper::DeadlineSweeper;
