use chrono::Utc;
use serde_json::{Value, json};

use super::require_non_empty;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::courses::entities::{Course, CourseStatus};
use crate::models::courses::requests::{CreateCourseRequest, UpdateCourseRequest};
use crate::models::users::entities::UserRole;
use crate::source::fixture::router::RouteContext;
use crate::source::fixture::{FixtureStore, respond};
use crate::utils::generate_id;

pub(super) fn list_courses(store: &FixtureStore, _: &RouteContext) -> Result<ApiResponse<Value>> {
    let data = store.read();
    respond(&data.courses, "Courses retrieved successfully")
}

pub(super) fn get_course(store: &FixtureStore, ctx: &RouteContext) -> Result<ApiResponse<Value>> {
    let id = ctx.param("id")?;
    let data = store.read();
    let course = data
        .course(id)
        .ok_or_else(|| LmsError::not_found("Course not found"))?;
    respond(course, "Course retrieved successfully")
}

pub(super) fn create_course(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let request: CreateCourseRequest = ctx.body()?;
    require_non_empty("title", &request.title)?;
    if request.end_date < request.start_date {
        return Err(LmsError::validation("endDate must not be before startDate"));
    }

    let mut data = store.write();

    // 未指定授课教师时取第一位教师
    let instructor_id = match request.instructor_id {
        Some(id) => {
            let instructor = data
                .user(&id)
                .ok_or_else(|| LmsError::not_found("Instructor not found"))?;
            if instructor.role == UserRole::Student {
                return Err(LmsError::validation("Instructor must not be a student"));
            }
            id
        }
        None => data
            .users
            .iter()
            .find(|u| u.role == UserRole::Professor)
            .map(|u| u.id.clone())
            .ok_or_else(|| LmsError::validation("instructorId is required"))?,
    };

    let now = Utc::now();
    let course = Course {
        id: generate_id("course"),
        title: request.title,
        description: request.description,
        instructor_id,
        category: request.category,
        level: request.level,
        duration: request.duration,
        enrolled_students: Vec::new(),
        max_students: request.max_students,
        start_date: request.start_date,
        end_date: request.end_date,
        status: CourseStatus::Active,
        syllabus: request.syllabus,
        resources: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    data.courses.push(course.clone());

    respond(course, "Course created successfully")
}

pub(super) fn update_course(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let id = ctx.param("id")?;
    let update: UpdateCourseRequest = ctx.body()?;
    if let Some(title) = &update.title {
        require_non_empty("title", title)?;
    }

    let mut data = store.write();
    let slot = data
        .course_mut(id)
        .ok_or_else(|| LmsError::not_found("Course not found"))?;

    // 在副本上校验，失败时不留下半更新的数据
    let mut course = slot.clone();
    update.apply_to(&mut course);
    if course.end_date < course.start_date {
        return Err(LmsError::validation("endDate must not be before startDate"));
    }
    course.updated_at = Utc::now();
    *slot = course.clone();

    respond(course, "Course updated successfully")
}

pub(super) fn delete_course(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let id = ctx.param("id")?;
    let mut data = store.write();

    let before = data.courses.len();
    data.courses.retain(|c| c.id != id);
    if data.courses.len() == before {
        return Err(LmsError::not_found("Course not found"));
    }
    // 章节和选课记录随课程一起删除
    data.course_sections.retain(|s| s.course_id != id);
    data.enrollments.retain(|e| e.course_id != id);

    respond(json!({ "id": id }), "Course deleted successfully")
}
