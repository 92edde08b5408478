/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a UUIDv4 string for use as a resource ID (members, suggestions, votes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generate a short, URL-safe ID for jars (shareable link slug).
///
/// 8 hex chars from a UUIDv4 — ~4 billion values, collision-free at the
/// scale of a planning session service. Jar links stay typable.
pub fn short_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
