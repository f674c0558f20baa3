//! 课程活动
//!
//! 活动在线上格式里是 `type` 字符串加一个形状不固定的 `metadata` 对象；
//! 在内存里则是 [`ActivityKind`] 和类型对应的字段，未知的 `type` 直接解析失败。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::generative_tasks::entities::Difficulty;

// 活动类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityType {
    Assignment,
    Quiz,
    Forum,
    Resource,
    Page,
    Video,
    Url,
    GenerativeTask,
}

/// 线上格式的 metadata，所有字段可选
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creativity_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
}

impl ActivityMetadata {
    /// 用 `update` 中出现的字段覆盖当前值
    pub fn merge(&mut self, update: ActivityMetadata) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if update.$field.is_some() {
                    self.$field = update.$field;
                })*
            };
        }
        overlay!(
            file_url,
            file_size,
            file_type,
            video_url,
            video_duration,
            url,
            attempts,
            time_limit,
            questions,
            points,
            ai_model,
            creativity_level,
            difficulty,
            task_type,
            estimated_time
        );
    }
}

/// 活动类型及其专属字段
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityKind {
    Assignment {
        points: Option<u32>,
    },
    Quiz {
        questions: Option<u32>,
        time_limit: Option<u32>, // 分钟
        attempts: Option<u32>,
        points: Option<u32>,
    },
    Forum,
    Resource {
        file_url: Option<String>,
        file_size: Option<String>,
        file_type: Option<String>,
    },
    Page,
    Video {
        video_url: Option<String>,
        video_duration: Option<String>,
    },
    Url {
        url: Option<String>,
    },
    GenerativeTask {
        points: Option<u32>,
        ai_model: Option<String>,
        creativity_level: Option<String>,
        difficulty: Option<Difficulty>,
        task_type: Option<String>,
        estimated_time: Option<u32>, // 分钟
    },
}

impl ActivityKind {
    /// 由线上的 `type` + `metadata` 构造，丢弃与类型无关的字段
    pub fn from_parts(activity_type: ActivityType, m: ActivityMetadata) -> Self {
        match activity_type {
            ActivityType::Assignment => ActivityKind::Assignment { points: m.points },
            ActivityType::Quiz => ActivityKind::Quiz {
                questions: m.questions,
                time_limit: m.time_limit,
                attempts: m.attempts,
                points: m.points,
            },
            ActivityType::Forum => ActivityKind::Forum,
            ActivityType::Resource => ActivityKind::Resource {
                file_url: m.file_url,
                file_size: m.file_size,
                file_type: m.file_type,
            },
            ActivityType::Page => ActivityKind::Page,
            ActivityType::Video => ActivityKind::Video {
                video_url: m.video_url,
                video_duration: m.video_duration,
            },
            ActivityType::Url => ActivityKind::Url { url: m.url },
            ActivityType::GenerativeTask => ActivityKind::GenerativeTask {
                points: m.points,
                ai_model: m.ai_model,
                creativity_level: m.creativity_level,
                difficulty: m.difficulty,
                task_type: m.task_type,
                estimated_time: m.estimated_time,
            },
        }
    }

    pub fn activity_type(&self) -> ActivityType {
        match self {
            ActivityKind::Assignment { .. } => ActivityType::Assignment,
            ActivityKind::Quiz { .. } => ActivityType::Quiz,
            ActivityKind::Forum => ActivityType::Forum,
            ActivityKind::Resource { .. } => ActivityType::Resource,
            ActivityKind::Page => ActivityType::Page,
            ActivityKind::Video { .. } => ActivityType::Video,
            ActivityKind::Url { .. } => ActivityType::Url,
            ActivityKind::GenerativeTask { .. } => ActivityType::GenerativeTask,
        }
    }

    /// 还原为线上格式的 metadata
    pub fn metadata(&self) -> ActivityMetadata {
        match self.clone() {
            ActivityKind::Assignment { points } => ActivityMetadata {
                points,
                ..Default::default()
            },
            ActivityKind::Quiz {
                questions,
                time_limit,
                attempts,
                points,
            } => ActivityMetadata {
                questions,
                time_limit,
                attempts,
                points,
                ..Default::default()
            },
            ActivityKind::Forum | ActivityKind::Page => ActivityMetadata::default(),
            ActivityKind::Resource {
                file_url,
                file_size,
                file_type,
            } => ActivityMetadata {
                file_url,
                file_size,
                file_type,
                ..Default::default()
            },
            ActivityKind::Video {
                video_url,
                video_duration,
            } => ActivityMetadata {
                video_url,
                video_duration,
                ..Default::default()
            },
            ActivityKind::Url { url } => ActivityMetadata {
                url,
                ..Default::default()
            },
            ActivityKind::GenerativeTask {
                points,
                ai_model,
                creativity_level,
                difficulty,
                task_type,
                estimated_time,
            } => ActivityMetadata {
                points,
                ai_model,
                creativity_level,
                difficulty,
                task_type,
                estimated_time,
                ..Default::default()
            },
        }
    }

    /// 可计分的活动返回满分
    pub fn points(&self) -> Option<u32> {
        match self {
            ActivityKind::Assignment { points }
            | ActivityKind::Quiz { points, .. }
            | ActivityKind::GenerativeTask { points, .. } => *points,
            ActivityKind::Forum
            | ActivityKind::Resource { .. }
            | ActivityKind::Page
            | ActivityKind::Video { .. }
            | ActivityKind::Url { .. } => None,
        }
    }
}

/// 章节中的一个活动，`order` 在所属章节内从 1 开始连续
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ActivityRecord", into = "ActivityRecord")]
pub struct Activity {
    pub id: String,
    pub section_id: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: ActivityKind,
    pub order: u32,
    pub visible: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub available_from: Option<DateTime<Utc>>,
    pub available_until: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn activity_type(&self) -> ActivityType {
        self.kind.activity_type()
    }
}

// 线上格式
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityRecord {
    id: String,
    section_id: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "type")]
    activity_type: ActivityType,
    order: u32,
    #[serde(default = "crate::models::sections::requests::default_visible")]
    visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    available_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    available_until: Option<DateTime<Utc>>,
    #[serde(default)]
    metadata: ActivityMetadata,
}

impl From<ActivityRecord> for Activity {
    fn from(record: ActivityRecord) -> Self {
        Self {
            id: record.id,
            section_id: record.section_id,
            title: record.title,
            description: record.description,
            kind: ActivityKind::from_parts(record.activity_type, record.metadata),
            order: record.order,
            visible: record.visible,
            due_date: record.due_date,
            available_from: record.available_from,
            available_until: record.available_until,
        }
    }
}

impl From<Activity> for ActivityRecord {
    fn from(activity: Activity) -> Self {
        Self {
            activity_type: activity.kind.activity_type(),
            metadata: activity.kind.metadata(),
            id: activity.id,
            section_id: activity.section_id,
            title: activity.title,
            description: activity.description,
            order: activity.order,
            visible: activity.visible,
            due_date: activity.due_date,
            available_from: activity.available_from,
            available_until: activity.available_until,
        }
    }
}
