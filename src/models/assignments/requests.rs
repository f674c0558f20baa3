use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entities::AssignmentType;
use crate::models::courses::entities::Resource;

/// 创建作业请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: String,
    pub course_id: String,
    #[serde(rename = "type")]
    pub assignment_type: AssignmentType,
    pub total_points: u32,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub instructions: String,
}

/// 提交作业请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssignmentRequest {
    pub assignment_id: String,
    pub student_id: String,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<Resource>,
}

/// 评分请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAssignmentRequest {
    pub submission_id: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    // 缺省时使用课程的授课教师
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graded_by: Option<String>,
}
