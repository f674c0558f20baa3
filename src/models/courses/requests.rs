use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entities::{Course, CourseLevel, CourseStatus};

/// 创建课程请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    // 未指定时由数据源决定（fixture 中为当前教师）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
    pub category: String,
    pub level: CourseLevel,
    pub duration: String,
    pub max_students: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub syllabus: Vec<String>,
}

/// 更新课程请求，所有字段可选
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<CourseLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CourseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllabus: Option<Vec<String>>,
}

impl UpdateCourseRequest {
    pub fn apply_to(self, course: &mut Course) {
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(description) = self.description {
            course.description = description;
        }
        if let Some(category) = self.category {
            course.category = category;
        }
        if let Some(level) = self.level {
            course.level = level;
        }
        if let Some(duration) = self.duration {
            course.duration = duration;
        }
        if let Some(max_students) = self.max_students {
            course.max_students = max_students;
        }
        if let Some(start_date) = self.start_date {
            course.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            course.end_date = end_date;
        }
        if let Some(status) = self.status {
            course.status = status;
        }
        if let Some(syllabus) = self.syllabus {
            course.syllabus = syllabus;
        }
    }
}
