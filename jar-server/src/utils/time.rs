//! 时间工具函数
//!
//! 所有时间戳统一使用 Unix millis (`i64`)，repository 层和 API 层同一单位。

pub use shared::util::now_millis;

/// Millis in one second / minute / day — deadline arithmetic helpers
pub const SECOND_MS: i64 = 1_000;
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
pub const DAY_MS: i64 = 24 * 60 * MINUTE_MS;

/// True when `deadline` is set and strictly before `now`
pub fn is_past(deadline: Option<i64>, now: i64) -> bool {
    deadline.is_some_and(|d| now > d)
}
