//! 数据模型
//!
//! 线上格式统一使用 camelCase 字段名，与原有前端/后端保持一致。

pub mod activities;
pub mod assignments;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod forum;
pub mod generative_tasks;
pub mod sections;
pub mod users;

pub use common::response::ApiResponse;
