use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::courses::entities::Resource;

// 作业类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    Quiz,
    Essay,
    Project,
    Exam,
}

// 作业状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    Submitted,
    Graded,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub description: String,
    pub course_id: String,
    pub instructor_id: String,
    #[serde(rename = "type")]
    pub assignment_type: AssignmentType,
    pub total_points: u32,
    pub due_date: DateTime<Utc>,
    pub status: AssignmentStatus,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub attachments: Vec<Resource>,
    // 同一学生可以多次提交，只有最新一次计入
    #[serde(default)]
    pub submissions: Vec<Submission>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    /// 某个学生最新的一次提交
    pub fn latest_submission(&self, student_id: &str) -> Option<&Submission> {
        self.submissions
            .iter()
            .filter(|s| s.student_id == student_id)
            .max_by_key(|s| s.submitted_at)
    }
}

// 提交状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
    Late,
    Graded,
}

/// 作业提交，至多拥有一个成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<Resource>,
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
}

/// 成绩，学生名/作业名/课程名为冗余字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub assignment_id: String,
    pub assignment_title: String,
    pub course_id: String,
    pub course_name: String,
    pub score: f64,
    pub total_points: u32,
    pub letter_grade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub graded_by: String,
    pub graded_at: DateTime<Utc>,
}

/// 按百分比换算字母等级
pub fn letter_grade(score: f64, total_points: u32) -> &'static str {
    if total_points == 0 {
        return "F";
    }
    let percent = score / f64::from(total_points) * 100.0;
    match percent {
        p if p >= 93.0 => "A",
        p if p >= 90.0 => "A-",
        p if p >= 87.0 => "B+",
        p if p >= 83.0 => "B",
        p if p >= 80.0 => "B-",
        p if p >= 77.0 => "C+",
        p if p >= 73.0 => "C",
        p if p >= 70.0 => "C-",
        p if p >= 60.0 => "D",
        _ => "F",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_grade_boundaries() {
        assert_eq!(letter_grade(93.0, 100), "A");
        assert_eq!(letter_grade(45.0, 50), "A-");
        assert_eq!(letter_grade(87.0, 100), "B+");
        assert_eq!(letter_grade(59.9, 100), "F");
        assert_eq!(letter_grade(10.0, 0), "F");
    }
}
