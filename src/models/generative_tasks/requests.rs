use serde::{Deserialize, Serialize};

use super::entities::Difficulty;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTaskRequest {
    pub activity_id: String,
    pub difficulty: Difficulty,
    pub student_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitGenerativeTaskRequest {
    pub task_id: String,
    pub code: String,
    pub student_id: String,
}
