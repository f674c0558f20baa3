use reqwest::Method;

use super::router::{Route, RouteTable};

mod activities;
mod assignments;
mod courses;
mod enrollments;
mod forum;
mod generative_tasks;
mod grades;
mod sections;
mod users;

/// fixture 支持的全部端点
pub(super) fn route_table() -> RouteTable {
    RouteTable::new(vec![
        // 课程
        Route::new(Method::GET, "/courses", courses::list_courses),
        Route::new(Method::POST, "/courses", courses::create_course),
        Route::new(Method::GET, "/courses/{id}", courses::get_course),
        Route::new(Method::PUT, "/courses/{id}", courses::update_course),
        Route::new(Method::DELETE, "/courses/{id}", courses::delete_course),
        // 章节
        Route::new(Method::GET, "/courses/{id}/sections", sections::list_sections),
        Route::new(Method::POST, "/courses/{id}/sections", sections::create_section),
        Route::new(Method::PUT, "/sections/{id}", sections::update_section),
        Route::new(Method::DELETE, "/sections/{id}", sections::delete_section),
        // 活动
        Route::new(
            Method::GET,
            "/courses/{id}/activities/{activityId}",
            activities::get_course_activity,
        ),
        Route::new(Method::GET, "/activities/{id}", activities::get_activity),
        Route::new(
            Method::POST,
            "/sections/{id}/activities",
            activities::create_activity,
        ),
        Route::new(Method::PUT, "/activities/{id}", activities::update_activity),
        Route::new(Method::DELETE, "/activities/{id}", activities::delete_activity),
        // 作业
        Route::new(Method::GET, "/assignments", assignments::list_assignments),
        Route::new(Method::POST, "/assignments", assignments::create_assignment),
        Route::new(Method::GET, "/assignments/{id}", assignments::get_assignment),
        Route::new(
            Method::POST,
            "/assignments/submit",
            assignments::submit_assignment,
        ),
        Route::new(
            Method::POST,
            "/assignments/grade",
            assignments::grade_assignment,
        ),
        // 生成任务
        Route::new(
            Method::POST,
            "/generative-tasks/generate",
            generative_tasks::generate_task,
        ),
        Route::new(
            Method::POST,
            "/generative-tasks/submit",
            generative_tasks::submit_task,
        ),
        Route::new(
            Method::GET,
            "/generative-tasks/{id}/hints",
            generative_tasks::get_hints,
        ),
        // 成绩
        Route::new(Method::GET, "/grades", grades::list_grades),
        Route::new(Method::GET, "/grades/student/{id}", grades::list_student_grades),
        // 选课
        Route::new(Method::GET, "/enrollments", enrollments::list_enrollments),
        Route::new(Method::POST, "/enrollments", enrollments::create_enrollment),
        // 论坛
        Route::new(Method::GET, "/forum-posts", forum::list_posts),
        Route::new(Method::POST, "/forum-posts", forum::create_post),
        Route::new(Method::POST, "/forum-posts/reply", forum::create_reply),
        // 用户
        Route::new(Method::GET, "/users", users::list_users),
        Route::new(Method::GET, "/users/{id}", users::get_user),
        Route::new(Method::PUT, "/users/{id}", users::update_user),
    ])
}

/// 非空字符串校验
pub(super) fn require_non_empty(field: &str, value: &str) -> crate::errors::Result<()> {
    if value.trim().is_empty() {
        return Err(crate::errors::LmsError::validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
