use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entities::{Activity, ActivityKind, ActivityMetadata, ActivityType};
use crate::models::sections::requests::default_visible;

/// 在章节中创建活动
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    // 期望位置（从 1 开始），缺省时追加到末尾
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: ActivityMetadata,
}

/// 更新活动，`metadata` 与现有字段合并
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub activity_type: Option<ActivityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_until: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ActivityMetadata>,
}

impl CreateActivityRequest {
    /// 生成活动实体；`order` 由调用方在插入后重新编号
    pub fn into_activity(self, id: String, section_id: String) -> Activity {
        Activity {
            id,
            section_id,
            title: self.title,
            description: self.description,
            kind: ActivityKind::from_parts(self.activity_type, self.metadata),
            order: 0,
            visible: self.visible,
            due_date: self.due_date,
            available_from: self.available_from,
            available_until: self.available_until,
        }
    }
}

impl UpdateActivityRequest {
    /// 覆盖出现的字段，`order` 不在这里处理
    pub fn apply_to(self, activity: &mut Activity) {
        if let Some(title) = self.title {
            activity.title = title;
        }
        if self.description.is_some() {
            activity.description = self.description;
        }
        if let Some(visible) = self.visible {
            activity.visible = visible;
        }
        if self.due_date.is_some() {
            activity.due_date = self.due_date;
        }
        if self.available_from.is_some() {
            activity.available_from = self.available_from;
        }
        if self.available_until.is_some() {
            activity.available_until = self.available_until;
        }

        let current_type = activity.activity_type();
        match self.activity_type {
            // 类型变化时只使用请求中的 metadata，旧类型的字段不保留
            Some(activity_type) if activity_type != current_type => {
                activity.kind =
                    ActivityKind::from_parts(activity_type, self.metadata.unwrap_or_default());
            }
            _ => {
                if let Some(update) = self.metadata {
                    let mut metadata = activity.kind.metadata();
                    metadata.merge(update);
                    activity.kind = ActivityKind::from_parts(current_type, metadata);
                }
            }
        }
    }
}
