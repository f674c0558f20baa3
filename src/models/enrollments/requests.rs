use serde::{Deserialize, Serialize};

/// 选课请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub course_id: String,
    pub student_id: String,
}
