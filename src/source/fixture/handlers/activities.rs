use serde_json::{Value, json};

use super::require_non_empty;
use crate::editor::reorder::{self, index_from_order};
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::activities::requests::{CreateActivityRequest, UpdateActivityRequest};
use crate::models::sections::entities::CourseSection;
use crate::source::fixture::router::RouteContext;
use crate::source::fixture::{FixtureData, FixtureStore, respond};
use crate::utils::generate_id;

fn activity_not_found() -> LmsError {
    LmsError::not_found("Activity not found")
}

fn section_with_activity<'a>(
    data: &'a mut FixtureData,
    activity_id: &str,
) -> Option<&'a mut CourseSection> {
    data.course_sections
        .iter_mut()
        .find(|s| s.find_activity(activity_id).is_some())
}

pub(super) fn get_course_activity(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let course_id = ctx.param("id")?;
    let activity_id = ctx.param("activityId")?;
    let data = store.read();
    if data.course(course_id).is_none() {
        return Err(LmsError::not_found("Course not found"));
    }

    let activity = data
        .sections_of(course_id)
        .into_iter()
        .find_map(|s| s.find_activity(activity_id))
        .ok_or_else(activity_not_found)?;
    respond(activity, "Activity retrieved successfully")
}

pub(super) fn get_activity(store: &FixtureStore, ctx: &RouteContext) -> Result<ApiResponse<Value>> {
    let id = ctx.param("id")?;
    let data = store.read();
    let activity = data
        .course_sections
        .iter()
        .find_map(|s| s.find_activity(id))
        .ok_or_else(activity_not_found)?;
    respond(activity, "Activity retrieved successfully")
}

pub(super) fn create_activity(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let section_id = ctx.param("id")?;
    let request: CreateActivityRequest = ctx.body()?;
    require_non_empty("title", &request.title)?;

    let mut data = store.write();
    let section = data
        .section_mut(section_id)
        .ok_or_else(|| LmsError::not_found("Section not found"))?;

    let index = index_from_order(request.order);
    let activity = request.into_activity(generate_id("activity"), section_id.to_string());
    let at = reorder::insert_at(&mut section.activities, activity, index);

    respond(&section.activities[at], "Activity created successfully")
}

pub(super) fn update_activity(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let id = ctx.param("id")?;
    let update: UpdateActivityRequest = ctx.body()?;
    if let Some(title) = &update.title {
        require_non_empty("title", title)?;
    }

    let mut data = store.write();
    let section = section_with_activity(&mut data, id).ok_or_else(activity_not_found)?;

    let index = index_from_order(update.order);
    if let Some(activity) = section.activities.iter_mut().find(|a| a.id == id) {
        update.apply_to(activity);
    }
    if let Some(index) = index {
        reorder::move_to_index(&mut section.activities, id, index);
    }

    let updated = section.find_activity(id).ok_or_else(activity_not_found)?;
    respond(updated, "Activity updated successfully")
}

pub(super) fn delete_activity(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let id = ctx.param("id")?;
    let mut data = store.write();
    let section = section_with_activity(&mut data, id).ok_or_else(activity_not_found)?;
    reorder::remove(&mut section.activities, id);

    respond(json!({ "id": id }), "Activity deleted successfully")
}
