use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 生成任务难度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// 为学生生成的编程任务
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeTask {
    #[serde(alias = "taskId")]
    pub id: String,
    pub activity_id: String,
    pub student_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub difficulty: Difficulty,
    // 预计耗时（分钟）
    pub estimated_time: u32,
    #[serde(default)]
    pub hints: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub name: String,
    pub passed: bool,
}

/// 生成任务的提交结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeTaskSubmission {
    #[serde(alias = "submissionId")]
    pub id: String,
    pub task_id: String,
    pub student_id: String,
    pub code: String,
    pub score: u32,
    pub feedback: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    pub created_at: DateTime<Utc>,
}
