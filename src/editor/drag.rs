//! 拖放会话
//!
//! 记录当前被拖动的条目和唯一的悬停目标。悬停目标每次都被整体替换，
//! 不依赖进入/离开事件的计数，所以不会出现多个目标同时高亮。

use super::CourseEditor;
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    Section { id: String },
    Activity { id: String },
}

impl DragItem {
    pub fn section(id: impl Into<String>) -> Self {
        DragItem::Section { id: id.into() }
    }

    pub fn activity(id: impl Into<String>) -> Self {
        DragItem::Activity { id: id.into() }
    }

    pub fn id(&self) -> &str {
        match self {
            DragItem::Section { id } | DragItem::Activity { id } => id,
        }
    }
}

/// 一次放下操作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    SectionMoved,
    ActivityMoved,
    // 活动放到了章节上，追加到该章节末尾
    ActivityTransferred,
    // 没有拖动中的条目、放回自身或组合无意义
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    dragged: Option<DragItem>,
    hover: Option<DragItem>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, item: DragItem) {
        self.dragged = Some(item);
        self.hover = None;
    }

    pub fn dragged(&self) -> Option<&DragItem> {
        self.dragged.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// 设置当前悬停目标，`None` 表示离开所有目标
    pub fn hover(&mut self, target: Option<DragItem>) {
        if self.dragged.is_some() {
            self.hover = target;
        }
    }

    pub fn hovered(&self) -> Option<&DragItem> {
        self.hover.as_ref()
    }

    pub fn is_hovering(&self, target: &DragItem) -> bool {
        self.hover.as_ref() == Some(target)
    }

    pub fn cancel(&mut self) {
        self.dragged = None;
        self.hover = None;
    }

    /// 在 `target` 上放下，并把结果应用到编辑器；无论成功与否会话都会结束
    pub fn drop_on(&mut self, editor: &mut CourseEditor, target: DragItem) -> Result<DropOutcome> {
        let dragged = self.dragged.take();
        self.hover = None;

        let Some(dragged) = dragged else {
            return Ok(DropOutcome::Ignored);
        };
        if dragged == target {
            return Ok(DropOutcome::Ignored);
        }

        match (&dragged, &target) {
            (DragItem::Section { id: from }, DragItem::Section { id: to }) => {
                editor.move_section(from, to)?;
                Ok(DropOutcome::SectionMoved)
            }
            (DragItem::Activity { id: from }, DragItem::Activity { id: to }) => {
                editor.move_activity(from, to)?;
                Ok(DropOutcome::ActivityMoved)
            }
            (DragItem::Activity { id }, DragItem::Section { id: section_id }) => {
                editor.move_activity_to_section(id, section_id, None)?;
                Ok(DropOutcome::ActivityTransferred)
            }
            (DragItem::Section { .. }, DragItem::Activity { .. }) => Ok(DropOutcome::Ignored),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixture::FixtureData;

    fn editor() -> CourseEditor {
        CourseEditor::new("course-1", FixtureData::seed().unwrap().course_sections)
    }

    #[test]
    fn test_hover_has_single_target() {
        let mut session = DragSession::new();
        session.start(DragItem::activity("activity-1"));
        session.hover(Some(DragItem::section("section-2")));
        session.hover(Some(DragItem::section("section-3")));

        assert!(session.is_hovering(&DragItem::section("section-3")));
        assert!(!session.is_hovering(&DragItem::section("section-2")));

        session.hover(None);
        assert!(session.hovered().is_none());
    }

    #[test]
    fn test_hover_without_drag_is_ignored() {
        let mut session = DragSession::new();
        session.hover(Some(DragItem::section("section-1")));
        assert!(session.hovered().is_none());
    }

    #[test]
    fn test_drop_activity_on_section_transfers_it() {
        let mut editor = editor();
        let mut session = DragSession::new();
        session.start(DragItem::activity("activity-4"));
        session.hover(Some(DragItem::section("section-1")));

        let outcome = session
            .drop_on(&mut editor, DragItem::section("section-1"))
            .unwrap();
        assert_eq!(outcome, DropOutcome::ActivityTransferred);
        assert!(!session.is_dragging());
        assert!(session.hovered().is_none());

        let (section, activity) = editor.find_activity("activity-4").unwrap();
        assert_eq!(section.id, "section-1");
        assert_eq!(activity.order, 4);
        assert!(editor.is_dense());
    }

    #[test]
    fn test_drop_section_on_section() {
        let mut editor = editor();
        let mut session = DragSession::new();
        session.start(DragItem::section("section-1"));
        let outcome = session
            .drop_on(&mut editor, DragItem::section("section-2"))
            .unwrap();
        assert_eq!(outcome, DropOutcome::SectionMoved);
        assert_eq!(editor.sections()[0].id, "section-2");
    }

    #[test]
    fn test_drop_on_self_or_without_drag_is_ignored() {
        let mut editor = editor();
        let before = editor.clone();
        let mut session = DragSession::new();

        assert_eq!(
            session
                .drop_on(&mut editor, DragItem::activity("activity-1"))
                .unwrap(),
            DropOutcome::Ignored
        );

        session.start(DragItem::activity("activity-1"));
        assert_eq!(
            session
                .drop_on(&mut editor, DragItem::activity("activity-1"))
                .unwrap(),
            DropOutcome::Ignored
        );

        session.start(DragItem::section("section-1"));
        assert_eq!(
            session
                .drop_on(&mut editor, DragItem::activity("activity-5"))
                .unwrap(),
            DropOutcome::Ignored
        );
        assert_eq!(editor, before);
    }

    #[test]
    fn test_drop_on_unknown_target_ends_session_with_error() {
        let mut editor = editor();
        let mut session = DragSession::new();
        session.start(DragItem::activity("activity-1"));
        let err = session
            .drop_on(&mut editor, DragItem::activity("activity-404"))
            .unwrap_err();
        assert_eq!(err.message(), "Activity not found");
        assert!(!session.is_dragging());
    }
}
