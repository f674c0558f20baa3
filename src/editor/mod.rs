//! 课程编辑器
//!
//! [`CourseEditor`] 在一门课程章节的本地副本上工作：拖放排序、增删章节和活动、
//! 切换可见性。每次修改之后，章节和各章节内活动的 `order` 都保持从 1 开始连续。
//! 编辑结果通过 [`CourseEditor::into_sections`] 取出，由调用方决定如何保存。

use crate::errors::{LmsError, Result};
use crate::models::activities::entities::Activity;
use crate::models::activities::requests::CreateActivityRequest;
use crate::models::sections::entities::CourseSection;
use crate::models::sections::requests::CreateSectionRequest;
use crate::utils::generate_id;

pub mod drag;
pub mod reorder;

pub use drag::{DragItem, DragSession, DropOutcome};

fn section_not_found() -> LmsError {
    LmsError::not_found("Section not found")
}

fn activity_not_found() -> LmsError {
    LmsError::not_found("Activity not found")
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseEditor {
    course_id: String,
    sections: Vec<CourseSection>,
}

impl CourseEditor {
    /// 只保留属于该课程的章节，并修复任何不连续的顺序
    pub fn new(course_id: impl Into<String>, sections: Vec<CourseSection>) -> Self {
        let course_id = course_id.into();
        let mut sections: Vec<CourseSection> = sections
            .into_iter()
            .filter(|s| s.course_id == course_id)
            .collect();
        reorder::normalize(&mut sections);
        for section in &mut sections {
            reorder::normalize(&mut section.activities);
        }
        Self {
            course_id,
            sections,
        }
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn sections(&self) -> &[CourseSection] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<CourseSection> {
        self.sections
    }

    pub fn section(&self, section_id: &str) -> Option<&CourseSection> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    fn section_mut(&mut self, section_id: &str) -> Result<&mut CourseSection> {
        self.sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .ok_or_else(section_not_found)
    }

    /// 活动及其所在章节
    pub fn find_activity(&self, activity_id: &str) -> Option<(&CourseSection, &Activity)> {
        self.sections
            .iter()
            .find_map(|s| s.find_activity(activity_id).map(|a| (s, a)))
    }

    /// 所有章节和活动的顺序都连续
    pub fn is_dense(&self) -> bool {
        reorder::is_dense(&self.sections)
            && self
                .sections
                .iter()
                .all(|s| reorder::is_dense(&s.activities))
    }

    /// 活动总数
    pub fn activity_count(&self) -> usize {
        self.sections.iter().map(|s| s.activities.len()).sum()
    }

    /// 把章节拖放到另一个章节的位置
    pub fn move_section(&mut self, dragged_id: &str, target_id: &str) -> Result<()> {
        if self.section(dragged_id).is_none() || self.section(target_id).is_none() {
            return Err(section_not_found());
        }
        reorder::move_onto(&mut self.sections, dragged_id, target_id);
        Ok(())
    }

    /// 把活动拖放到另一个活动的位置
    ///
    /// 两者在同一章节时按拖放语义重排；不同章节时转移到目标章节并占据目标活动的位置。
    pub fn move_activity(&mut self, dragged_id: &str, target_id: &str) -> Result<()> {
        let (source_id, target_section_id, target_index) = {
            let (source, _) = self
                .find_activity(dragged_id)
                .ok_or_else(activity_not_found)?;
            let (target, _) = self
                .find_activity(target_id)
                .ok_or_else(activity_not_found)?;
            let index = reorder::position_of(&target.activities, target_id);
            (source.id.clone(), target.id.clone(), index)
        };

        if source_id == target_section_id {
            let section = self.section_mut(&source_id)?;
            reorder::move_onto(&mut section.activities, dragged_id, target_id);
            Ok(())
        } else {
            self.move_activity_to_section(dragged_id, &target_section_id, target_index)
        }
    }

    /// 把活动移到指定章节
    ///
    /// `position` 为目标章节中的下标（从 0 开始），缺省或越界时追加到末尾。
    /// 目标章节就是当前章节时等同于章节内移动。
    pub fn move_activity_to_section(
        &mut self,
        activity_id: &str,
        target_section_id: &str,
        position: Option<usize>,
    ) -> Result<()> {
        let source_id = self
            .find_activity(activity_id)
            .map(|(s, _)| s.id.clone())
            .ok_or_else(activity_not_found)?;
        if self.section(target_section_id).is_none() {
            return Err(section_not_found());
        }

        if source_id == target_section_id {
            let section = self.section_mut(&source_id)?;
            let index = position.unwrap_or(section.activities.len());
            reorder::move_to_index(&mut section.activities, activity_id, index);
            return Ok(());
        }

        let mut activity = {
            let source = self.section_mut(&source_id)?;
            reorder::remove(&mut source.activities, activity_id).ok_or_else(activity_not_found)?
        };
        activity.section_id = target_section_id.to_string();

        let target = self.section_mut(target_section_id)?;
        reorder::insert_at(&mut target.activities, activity, position);
        Ok(())
    }

    /// 新建章节，追加或插入到 `order` 指定的位置
    pub fn add_section(&mut self, request: CreateSectionRequest) -> Result<&CourseSection> {
        if request.title.trim().is_empty() {
            return Err(LmsError::validation("title must not be empty"));
        }
        let index = reorder::index_from_order(request.order);
        let section = request.into_section(generate_id("section"), self.course_id.clone());
        let at = reorder::insert_at(&mut self.sections, section, index);
        Ok(&self.sections[at])
    }

    /// 删除章节及其中的活动
    pub fn delete_section(&mut self, section_id: &str) -> Result<CourseSection> {
        reorder::remove(&mut self.sections, section_id).ok_or_else(section_not_found)
    }

    /// 切换章节可见性，返回新的状态
    pub fn toggle_section_visibility(&mut self, section_id: &str) -> Result<bool> {
        let section = self.section_mut(section_id)?;
        section.visible = !section.visible;
        Ok(section.visible)
    }

    /// 修改章节标题，标题会去掉首尾空白
    pub fn rename_section(&mut self, section_id: &str, title: &str) -> Result<&CourseSection> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LmsError::validation("title must not be empty"));
        }
        let section = self.section_mut(section_id)?;
        section.title = title.to_string();
        Ok(&*section)
    }

    /// 切换活动可见性，返回新的状态
    pub fn toggle_activity_visibility(&mut self, activity_id: &str) -> Result<bool> {
        let activity = self
            .sections
            .iter_mut()
            .find_map(|s| s.activities.iter_mut().find(|a| a.id == activity_id))
            .ok_or_else(activity_not_found)?;
        activity.visible = !activity.visible;
        Ok(activity.visible)
    }

    pub fn add_activity(
        &mut self,
        section_id: &str,
        request: CreateActivityRequest,
    ) -> Result<&Activity> {
        if request.title.trim().is_empty() {
            return Err(LmsError::validation("title must not be empty"));
        }
        let section = self.section_mut(section_id)?;
        let index = reorder::index_from_order(request.order);
        let activity = request.into_activity(generate_id("activity"), section_id.to_string());
        let at = reorder::insert_at(&mut section.activities, activity, index);
        Ok(&section.activities[at])
    }

    pub fn delete_activity(&mut self, activity_id: &str) -> Result<Activity> {
        let section_id = self
            .find_activity(activity_id)
            .map(|(s, _)| s.id.clone())
            .ok_or_else(activity_not_found)?;
        let section = self.section_mut(&section_id)?;
        reorder::remove(&mut section.activities, activity_id).ok_or_else(activity_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activities::entities::ActivityType;
    use crate::source::fixture::FixtureData;

    fn editor() -> CourseEditor {
        let data = FixtureData::seed().unwrap();
        CourseEditor::new("course-1", data.course_sections)
    }

    fn activity_ids(editor: &CourseEditor, section_id: &str) -> Vec<String> {
        editor
            .section(section_id)
            .unwrap()
            .activities
            .iter()
            .map(|a| a.id.clone())
            .collect()
    }

    fn order_of(editor: &CourseEditor, activity_id: &str) -> u32 {
        editor.find_activity(activity_id).unwrap().1.order
    }

    #[test]
    fn test_drag_activity_onto_next_sibling_swaps_them() {
        let mut editor = editor();
        // 只留下 activity-5 和 activity-6，两者分别位于第 1、2 位
        editor.delete_activity("activity-4").unwrap();
        editor.delete_activity("activity-6b").unwrap();
        assert_eq!(order_of(&editor, "activity-5"), 1);
        assert_eq!(order_of(&editor, "activity-6"), 2);

        editor.move_activity("activity-5", "activity-6").unwrap();

        assert_eq!(order_of(&editor, "activity-6"), 1);
        assert_eq!(order_of(&editor, "activity-5"), 2);
        assert!(editor.is_dense());
    }

    #[test]
    fn test_drag_activity_within_full_seeded_section() {
        let mut editor = editor();
        editor.move_activity("activity-5", "activity-6").unwrap();
        assert_eq!(
            activity_ids(&editor, "section-2"),
            ["activity-4", "activity-6", "activity-5", "activity-6b"]
        );
        assert!(order_of(&editor, "activity-6") < order_of(&editor, "activity-5"));
        assert!(editor.is_dense());
    }

    #[test]
    fn test_move_activity_to_other_section_appends() {
        let mut editor = editor();
        editor
            .move_activity_to_section("activity-2", "section-3", None)
            .unwrap();

        assert_eq!(activity_ids(&editor, "section-1"), ["activity-1", "activity-3"]);
        let section_3 = activity_ids(&editor, "section-3");
        assert_eq!(section_3.last().map(String::as_str), Some("activity-2"));
        let (section, moved) = editor.find_activity("activity-2").unwrap();
        assert_eq!(section.id, "section-3");
        assert_eq!(moved.section_id, "section-3");
        assert_eq!(moved.order, 5);
        assert!(editor.is_dense());
        assert_eq!(editor.activity_count(), 11);
    }

    #[test]
    fn test_move_activity_to_other_section_at_position() {
        let mut editor = editor();
        editor
            .move_activity_to_section("activity-7", "section-1", Some(0))
            .unwrap();
        assert_eq!(
            activity_ids(&editor, "section-1"),
            ["activity-7", "activity-1", "activity-2", "activity-3"]
        );
        assert!(editor.is_dense());
    }

    #[test]
    fn test_drag_activity_onto_activity_in_other_section() {
        let mut editor = editor();
        editor.move_activity("activity-1", "activity-8").unwrap();
        assert_eq!(
            activity_ids(&editor, "section-3"),
            ["activity-7", "activity-1", "activity-8", "activity-9", "activity-10"]
        );
        assert!(editor.is_dense());
    }

    #[test]
    fn test_move_section() {
        let mut editor = editor();
        editor.move_section("section-3", "section-1").unwrap();
        let ids: Vec<_> = editor.sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["section-3", "section-1", "section-2"]);
        assert!(editor.is_dense());

        assert!(editor.move_section("section-9", "section-1").is_err());
    }

    #[test]
    fn test_every_section_move_keeps_orders_dense() {
        let ids = ["section-1", "section-2", "section-3"];
        for dragged in ids {
            for target in ids {
                let mut editor = editor();
                editor.move_section(dragged, target).unwrap();
                assert!(editor.is_dense());
                assert_eq!(editor.sections().len(), 3);
            }
        }
    }

    #[test]
    fn test_add_and_delete_keep_orders_dense() {
        let mut editor = editor();
        let section_id = editor
            .add_section(CreateSectionRequest {
                title: "Week 4".into(),
                description: None,
                order: Some(2),
                visible: true,
            })
            .unwrap()
            .id
            .clone();
        assert_eq!(editor.section(&section_id).unwrap().order, 2);

        let activity = editor
            .add_activity(
                &section_id,
                CreateActivityRequest {
                    title: "Intro video".into(),
                    description: None,
                    activity_type: ActivityType::Video,
                    order: None,
                    visible: true,
                    due_date: None,
                    available_from: None,
                    available_until: None,
                    metadata: Default::default(),
                },
            )
            .unwrap();
        assert_eq!(activity.order, 1);
        assert_eq!(activity.section_id, section_id);

        editor.delete_section("section-1").unwrap();
        editor.delete_activity("activity-9").unwrap();
        assert!(editor.is_dense());
        assert_eq!(editor.sections()[0].id, section_id);
    }

    #[test]
    fn test_toggle_visibility() {
        let mut editor = editor();
        assert!(!editor.toggle_section_visibility("section-2").unwrap());
        assert!(editor.toggle_section_visibility("section-2").unwrap());
        assert!(editor.toggle_section_visibility("missing").is_err());
    }

    #[test]
    fn test_toggle_activity_visibility() {
        let mut editor = editor();
        assert!(!editor.toggle_activity_visibility("activity-5").unwrap());
        assert!(!editor.find_activity("activity-5").unwrap().1.visible);
        assert!(editor.find_activity("activity-4").unwrap().1.visible);
        assert!(editor.toggle_activity_visibility("activity-5").unwrap());

        let err = editor.toggle_activity_visibility("activity-404").unwrap_err();
        assert_eq!(err.message(), "Activity not found");
    }

    #[test]
    fn test_rename_section() {
        let mut editor = editor();
        let section = editor
            .rename_section("section-2", "  Week 2: Semantic HTML ")
            .unwrap();
        assert_eq!(section.title, "Week 2: Semantic HTML");
        assert_eq!(section.order, 2);

        let err = editor.rename_section("section-2", "   ").unwrap_err();
        assert_eq!(err.code(), "E008");
        assert_eq!(editor.section("section-2").unwrap().title, "Week 2: Semantic HTML");

        let err = editor.rename_section("missing", "Week 9").unwrap_err();
        assert_eq!(err.message(), "Section not found");
    }

    #[test]
    fn test_new_filters_and_normalizes() {
        let mut data = FixtureData::seed().unwrap();
        data.course_sections[0].order = 10;
        data.course_sections[1].activities[0].order = 7;
        let editor = CourseEditor::new("course-1", data.course_sections.clone());
        assert!(editor.is_dense());
        assert_eq!(editor.sections().last().unwrap().id, "section-1");

        let other = CourseEditor::new("course-2", data.course_sections);
        assert!(other.sections().is_empty());
    }
}
