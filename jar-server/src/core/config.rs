//! 服务器配置
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | WORK_DIR | ./data | 工作目录（数据库、日志） |
//! | HTTP_PORT | 3000 | HTTP 服务端口 |
//! | ENVIRONMENT | development | 运行环境 |
//! | SWEEP_INTERVAL_SECS | 30 | 截止时间后台扫描间隔（秒） |
//! | DEFAULT_POINTS_PER_VOTER | 0 | 默认投票点数（0 = 开始投票时自动推导） |
//! | DEFAULT_MAX_SUGGESTIONS | 1 | 每位成员默认建议配额 |
//! | ENABLE_STRUCTURED_LOCATION | true | 是否接受结构化地理位置字段 |
//!
//! # 示例
//!
//! ```ignore
//! WORK_DIR=/data/jar HTTP_PORT=8080 cargo run
//! ```

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 后台截止时间扫描间隔（秒）
    pub sweep_interval_secs: u64,
    /// 新 jar 的默认投票点数；0 表示不设置，进入投票阶段时自动推导
    pub default_points_per_voter: i64,
    /// 每位成员默认建议配额
    pub default_max_suggestions: i64,
    /// 是否接受建议的结构化地理位置字段
    pub enable_structured_location: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            sweep_interval_secs: std::env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            default_points_per_voter: std::env::var("DEFAULT_POINTS_PER_VOTER")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(0),
            default_max_suggestions: std::env::var("DEFAULT_MAX_SUGGESTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1),
            enable_structured_location: std::env::var("ENABLE_STRUCTURED_LOCATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库文件路径
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("jar.db")
    }

    /// 确保工作目录存在
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
