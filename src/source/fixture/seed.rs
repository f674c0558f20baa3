//! 内嵌的种子数据
//!
//! `fixtures/seed.json` 在编译期嵌入二进制，每个 [`FixtureSource`](super::FixtureSource)
//! 启动时解析出一份独立的可变副本。

use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::errors::{LmsError, Result};
use crate::models::{
    assignments::entities::{Assignment, Grade},
    courses::entities::Course,
    enrollments::entities::Enrollment,
    forum::entities::ForumPost,
    generative_tasks::entities::{GenerativeTask, GenerativeTaskSubmission},
    sections::entities::CourseSection,
    users::entities::User,
};

#[derive(Embed)]
#[folder = "fixtures/"]
struct SeedAssets;

const SEED_FILE: &str = "seed.json";

/// fixture 数据源的全部数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub grades: Vec<Grade>,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
    // 所有课程的章节放在同一个列表里，按 course_id 区分
    #[serde(default)]
    pub course_sections: Vec<CourseSection>,
    #[serde(default)]
    pub forum_posts: Vec<ForumPost>,
    #[serde(default)]
    pub generative_tasks: Vec<GenerativeTask>,
    #[serde(default)]
    pub generative_submissions: Vec<GenerativeTaskSubmission>,
}

impl FixtureData {
    /// 解析内嵌的种子数据
    pub fn seed() -> Result<Self> {
        let file = SeedAssets::get(SEED_FILE)
            .ok_or_else(|| LmsError::config(format!("Embedded fixture '{SEED_FILE}' is missing")))?;
        Self::from_json(&file.data)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| LmsError::serialization(format!("Invalid fixture data: {e}")))
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn course_mut(&mut self, id: &str) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| c.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut CourseSection> {
        self.course_sections.iter_mut().find(|s| s.id == id)
    }

    /// 某门课程的章节（按 order 排序）
    pub fn sections_of(&self, course_id: &str) -> Vec<&CourseSection> {
        let mut sections: Vec<&CourseSection> = self
            .course_sections
            .iter()
            .filter(|s| s.course_id == course_id)
            .collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// 取出某门课程的章节，交给 `f` 修改后放回
    ///
    /// 传入的列表已按 order 排序，`f` 负责维持 order 连续。
    pub fn with_course_sections<R>(
        &mut self,
        course_id: &str,
        f: impl FnOnce(&mut Vec<CourseSection>) -> R,
    ) -> R {
        let (mut siblings, others): (Vec<_>, Vec<_>) = std::mem::take(&mut self.course_sections)
            .into_iter()
            .partition(|s| s.course_id == course_id);
        siblings.sort_by_key(|s| s.order);
        let result = f(&mut siblings);
        self.course_sections = others;
        self.course_sections.extend(siblings);
        result
    }

    /// 活动所在章节的 ID
    pub fn section_of_activity(&self, activity_id: &str) -> Option<&str> {
        self.course_sections
            .iter()
            .find(|s| s.find_activity(activity_id).is_some())
            .map(|s| s.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::reorder::is_dense;

    #[test]
    fn test_seed_contents() {
        let data = FixtureData::seed().unwrap();
        assert_eq!(data.users.len(), 3);
        assert_eq!(data.courses.len(), 2);
        assert_eq!(data.assignments.len(), 3);
        assert_eq!(data.grades.len(), 2);
        assert_eq!(data.enrollments.len(), 3);
        assert_eq!(data.course_sections.len(), 3);
        assert_eq!(data.forum_posts.len(), 1);

        let activities: usize = data.course_sections.iter().map(|s| s.activities.len()).sum();
        assert_eq!(activities, 11);
    }

    #[test]
    fn test_seed_orders_are_dense() {
        let data = FixtureData::seed().unwrap();
        let sections: Vec<_> = data.sections_of("course-1").into_iter().cloned().collect();
        assert!(is_dense(&sections));
        for section in &sections {
            assert!(is_dense(&section.activities), "{} is not dense", section.id);
            assert!(section.activities.iter().all(|a| a.section_id == section.id));
        }
    }

    #[test]
    fn test_with_course_sections_keeps_other_courses() {
        let mut data = FixtureData::seed().unwrap();
        let before = data.course_sections.len();
        let count = data.with_course_sections("course-2", |sections| sections.len());
        assert_eq!(count, 0);
        assert_eq!(data.course_sections.len(), before);
    }
}
