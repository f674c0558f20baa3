use serde::{Deserialize, Serialize};

use super::entities::CourseSection;

/// 创建章节请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSectionRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    // 期望位置（从 1 开始），缺省时追加到末尾
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// 更新章节请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSectionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

pub(crate) fn default_visible() -> bool {
    true
}

impl CreateSectionRequest {
    pub fn into_section(self, id: String, course_id: String) -> CourseSection {
        CourseSection {
            id,
            course_id,
            title: self.title,
            description: self.description,
            order: 0,
            visible: self.visible,
            activities: Vec::new(),
        }
    }
}

impl UpdateSectionRequest {
    /// 覆盖出现的字段，`order` 不在这里处理
    pub fn apply_to(self, section: &mut CourseSection) {
        if let Some(title) = self.title {
            section.title = title;
        }
        if self.description.is_some() {
            section.description = self.description;
        }
        if let Some(visible) = self.visible {
            section.visible = visible;
        }
    }
}
