use uuid::Uuid;

/// 生成带前缀的实体 ID，例如 `course-3f2a...`
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}
