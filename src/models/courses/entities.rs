use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 课程难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

// 课程状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Active,
    Inactive,
    Completed,
}

// 资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Pdf,
    Video,
    Link,
    Document,
}

/// 课程或作业附带的资源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// 课程
///
/// `enrolled_students` 只表示成员关系，一个学生可以属于多门课程；
/// `instructor_id` 是唯一的归属教师。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor_id: String,
    pub category: String,
    pub level: CourseLevel,
    pub duration: String,
    #[serde(default)]
    pub enrolled_students: Vec<String>,
    pub max_students: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: CourseStatus,
    #[serde(default)]
    pub syllabus: Vec<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn is_enrolled(&self, student_id: &str) -> bool {
        self.enrolled_students.iter().any(|id| id == student_id)
    }

    pub fn is_full(&self) -> bool {
        self.enrolled_students.len() >= self.max_students as usize
    }
}
