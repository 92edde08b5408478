//! 服务器状态

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{LogNotifier, Notifier};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / Pool 浅拷贝，克隆成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | notifier | Arc<dyn Notifier> | 通知出口 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 通知出口（相位变更回调）
    pub notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("pool", &"<SqlitePool>")
            .field("notifier", &"<dyn Notifier>")
            .finish()
    }
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录（确保存在）
    /// 2. 数据库（work_dir/jar.db，自动迁移）
    /// 3. 通知出口（默认日志实现）
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir()
            .expect("Failed to create work directory");

        let db_path = config.database_path();
        let db_path_str = db_path.to_string_lossy();

        let db_service = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");

        Self {
            config: config.clone(),
            pool: db_service.pool,
            notifier: Arc::new(LogNotifier),
        }
    }

    /// 使用自定义通知出口构造状态
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}
