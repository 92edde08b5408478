//! Jar Server - 小群体民主决策服务
//!
//! # 架构概述
//!
//! 一个 jar 是一次决策会话：成员加入，在建议窗口提交建议，然后在投票窗口
//! 把点数预算分配到建议上，产出排名和获胜者。
//!
//! # 模块结构
//!
//! ```text
//! jar-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── db/            # SQLite 连接池与仓库层
//! ├── jars/          # 相位状态机、截止检查、CRUD、统计
//! ├── suggestions/   # 建议配额与结构化地理位置
//! ├── votes/         # 投票引擎与结果聚合
//! ├── services/      # 后台扫描、通知出口
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、校验工具
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod jars;
pub mod services;
pub mod suggestions;
pub mod utils;
pub mod votes;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};
pub use utils::{init_logger, setup_environment};

pub fn print_banner() {
    println!(
        r#"
       __
      / /___ ______
 __  / / __ `/ ___/
/ /_/ / /_/ / /
\____/\__,_/_/
    "#
    );
}
