//! 会话状态
//!
//! 保存当前登录用户和已完成活动的集合，生命周期显式：`load` 读入，`save` 写回。
//! 课程进度不做存储，每次由完成集合和课程章节计算得出。

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::errors::{LmsError, Result};
use crate::models::enrollments::entities::Enrollment;
use crate::models::sections::entities::CourseSection;

/// 持久化的会话内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default)]
    pub completed_activities: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    path: Option<PathBuf>, // None 表示只在内存中
    state: SessionState,
    dirty: bool,
}

impl SessionStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// 读取会话文件，文件不存在时得到空会话
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                LmsError::session(format!("Failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                LmsError::session(format!("Failed to parse {}: {e}", path.display()))
            })?
        } else {
            debug!("No session file at {}, starting empty", path.display());
            SessionState::default()
        };

        Ok(Self {
            path: Some(path),
            state,
            dirty: false,
        })
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Self::load(&config.path)
    }

    /// 写回会话文件；先写临时文件再改名，避免留下半个文件
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = &self.path else {
            self.dirty = false;
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        self.state.saved_at = Some(Utc::now());
        let json = serde_json::to_string_pretty(&self.state)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .and_then(|_| fs::rename(&tmp, path))
            .map_err(|e| LmsError::session(format!("Failed to write {}: {e}", path.display())))?;

        self.dirty = false;
        debug!("Session saved to {}", path.display());
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// 有未保存的修改
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn current_user(&self) -> Option<&str> {
        self.state.current_user.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.current_user.is_some()
    }

    /// 切换到另一个用户时清空完成记录
    pub fn sign_in(&mut self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        if self.current_user() != Some(user_id.as_str()) {
            if !self.state.completed_activities.is_empty() {
                warn!("Switching session user, clearing completed activities");
            }
            self.state.completed_activities.clear();
            self.state.current_user = Some(user_id);
            self.dirty = true;
        }
    }

    pub fn sign_out(&mut self) {
        if self.state.current_user.take().is_some() {
            self.state.completed_activities.clear();
            self.dirty = true;
        }
    }

    /// 标记完成，已完成时返回 `false`
    pub fn mark_completed(&mut self, activity_id: impl Into<String>) -> bool {
        let inserted = self.state.completed_activities.insert(activity_id.into());
        self.dirty |= inserted;
        inserted
    }

    /// 取消完成标记，原本未完成时返回 `false`
    pub fn mark_incomplete(&mut self, activity_id: &str) -> bool {
        let removed = self.state.completed_activities.remove(activity_id);
        self.dirty |= removed;
        removed
    }

    pub fn is_completed(&self, activity_id: &str) -> bool {
        self.state.completed_activities.contains(activity_id)
    }

    pub fn completed_activities(&self) -> impl Iterator<Item = &str> {
        self.state.completed_activities.iter().map(String::as_str)
    }

    /// 课程进度百分比：已完成活动数 / 活动总数，向下取整；没有活动时为 0
    pub fn course_progress(&self, sections: &[CourseSection]) -> u8 {
        let (total, completed) = sections
            .iter()
            .flat_map(|s| s.activities.iter())
            .fold((0usize, 0usize), |(total, done), activity| {
                (total + 1, done + usize::from(self.is_completed(&activity.id)))
            });
        if total == 0 {
            return 0;
        }
        (completed * 100 / total) as u8
    }

    /// 选课记录对应课程的进度，只统计属于该课程的章节
    pub fn enrollment_progress(&self, enrollment: &Enrollment, sections: &[CourseSection]) -> u8 {
        let course_sections: Vec<CourseSection> = sections
            .iter()
            .filter(|s| s.course_id == enrollment.course_id)
            .cloned()
            .collect();
        self.course_progress(&course_sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixture::FixtureData;

    fn sections() -> Vec<CourseSection> {
        FixtureData::seed().unwrap().course_sections
    }

    #[test]
    fn test_missing_file_loads_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::load(dir.path().join("session.json")).unwrap();
        assert!(store.current_user().is_none());
        assert_eq!(store.completed_activities().count(), 0);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = SessionStore::load(&path).unwrap();
        store.sign_in("student-1");
        store.mark_completed("activity-1");
        store.mark_completed("activity-4");
        assert!(store.is_dirty());
        store.save().unwrap();
        assert!(!store.is_dirty());

        let reloaded = SessionStore::load(&path).unwrap();
        assert_eq!(reloaded.current_user(), Some("student-1"));
        assert!(reloaded.is_completed("activity-1"));
        assert!(reloaded.is_completed("activity-4"));
        assert!(!reloaded.is_completed("activity-2"));
        assert!(reloaded.state().saved_at.is_some());
    }

    #[test]
    fn test_corrupt_file_is_session_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let err = SessionStore::load(&path).unwrap_err();
        assert_eq!(err.code(), "E012");
    }

    #[test]
    fn test_course_progress_is_computed() {
        let sections = sections();
        let mut store = SessionStore::in_memory();
        assert_eq!(store.course_progress(&sections), 0);

        // 11 个活动中完成 4 个：36%
        for id in ["activity-1", "activity-2", "activity-3", "activity-4"] {
            assert!(store.mark_completed(id));
        }
        assert!(!store.mark_completed("activity-1"));
        assert_eq!(store.course_progress(&sections), 36);

        store.mark_incomplete("activity-4");
        assert_eq!(store.course_progress(&sections), 27);
        assert_eq!(store.course_progress(&[]), 0);
    }

    #[test]
    fn test_enrollment_progress_only_counts_its_course() {
        let data = FixtureData::seed().unwrap();
        let mut store = SessionStore::in_memory();
        for section in &data.course_sections {
            for activity in &section.activities {
                store.mark_completed(activity.id.clone());
            }
        }
        let course_1 = data.enrollments.iter().find(|e| e.course_id == "course-1").unwrap();
        let course_2 = data.enrollments.iter().find(|e| e.course_id == "course-2").unwrap();
        assert_eq!(store.enrollment_progress(course_1, &data.course_sections), 100);
        assert_eq!(store.enrollment_progress(course_2, &data.course_sections), 0);
    }

    #[test]
    fn test_switching_user_clears_completions() {
        let mut store = SessionStore::in_memory();
        store.sign_in("student-1");
        store.mark_completed("activity-1");
        store.sign_in("student-1");
        assert!(store.is_completed("activity-1"));

        store.sign_in("student-2");
        assert!(!store.is_completed("activity-1"));

        store.sign_out();
        assert!(!store.is_signed_in());
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let mut store = SessionStore::in_memory();
        store.mark_completed("activity-1");
        store.save().unwrap();
        assert!(store.path().is_none());
        assert!(!store.is_dirty());
    }
}
