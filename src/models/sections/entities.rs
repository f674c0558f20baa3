use serde::{Deserialize, Serialize};

use crate::models::activities::entities::Activity;

/// 课程章节，`order` 在所属课程内是从 1 开始的连续序号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSection {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order: u32,
    pub visible: bool,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl CourseSection {
    pub fn find_activity(&self, activity_id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == activity_id)
    }
}
