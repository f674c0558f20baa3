//! SkillSpace - 学习管理系统数据访问层
//!
//! 为课程、章节、活动、作业、成绩、选课、论坛和用户提供统一的类型化访问接口，
//! 数据可以来自内置 fixture（模拟延迟），也可以来自远程 HTTP 服务。
//!
//! # 架构
//! - `client`: 数据访问门面
//! - `config`: 配置管理与模式解析
//! - `editor`: 课程编辑器（排序与拖放）
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: 把数据源暴露为 HTTP 服务
//! - `runtime`: 运行时生命周期管理
//! - `session`: 会话与学习进度
//! - `source`: 数据源实现与注册表
//! - `utils`: 工具函数

pub mod client;
pub mod config;
pub mod editor;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod session;
pub mod source;
pub mod utils;
