use serde_json::{Value, json};

use super::require_non_empty;
use crate::editor::reorder::{self, index_from_order};
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::sections::requests::{CreateSectionRequest, UpdateSectionRequest};
use crate::source::fixture::router::RouteContext;
use crate::source::fixture::{FixtureStore, respond};
use crate::utils::generate_id;

fn section_not_found() -> LmsError {
    LmsError::not_found("Section not found")
}

pub(super) fn list_sections(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let course_id = ctx.param("id")?;
    let data = store.read();
    if data.course(course_id).is_none() {
        return Err(LmsError::not_found("Course not found"));
    }
    respond(
        data.sections_of(course_id),
        "Course sections retrieved successfully",
    )
}

pub(super) fn create_section(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let course_id = ctx.param("id")?;
    let request: CreateSectionRequest = ctx.body()?;
    require_non_empty("title", &request.title)?;

    let mut data = store.write();
    if data.course(course_id).is_none() {
        return Err(LmsError::not_found("Course not found"));
    }

    let index = index_from_order(request.order);
    let section = request.into_section(generate_id("section"), course_id.to_string());
    let created = data.with_course_sections(course_id, |sections| {
        let at = reorder::insert_at(sections, section, index);
        sections[at].clone()
    });

    respond(created, "Section created successfully")
}

pub(super) fn update_section(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let id = ctx.param("id")?;
    let update: UpdateSectionRequest = ctx.body()?;
    if let Some(title) = &update.title {
        require_non_empty("title", title)?;
    }

    let mut data = store.write();
    let section = data.section_mut(id).ok_or_else(section_not_found)?;
    let course_id = section.course_id.clone();
    let index = index_from_order(update.order);
    update.apply_to(section);

    let updated = data.with_course_sections(&course_id, |sections| {
        if let Some(index) = index {
            reorder::move_to_index(sections, id, index);
        }
        sections.iter().find(|s| s.id == id).cloned()
    })
    .ok_or_else(section_not_found)?;

    respond(updated, "Section updated successfully")
}

pub(super) fn delete_section(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let id = ctx.param("id")?;
    let mut data = store.write();
    let course_id = data
        .section_mut(id)
        .map(|s| s.course_id.clone())
        .ok_or_else(section_not_found)?;

    data.with_course_sections(&course_id, |sections| reorder::remove(sections, id));

    respond(json!({ "id": id }), "Section deleted successfully")
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::{Value, json};

    use crate::source::fixture::tests::{get, send, source};

    fn section_ids(value: &Value) -> Vec<String> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap().to_string())
            .collect()
    }

    fn orders(value: &Value) -> Vec<u64> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["order"].as_u64().unwrap())
            .collect()
    }

    #[test]
    fn test_list_sections_sorted_by_order() {
        let source = source();
        let sections = get(&source, "/courses/course-1/sections")
            .unwrap()
            .data
            .unwrap();
        assert_eq!(section_ids(&sections), ["section-1", "section-2", "section-3"]);
        assert_eq!(orders(&sections), [1, 2, 3]);
    }

    #[test]
    fn test_list_sections_for_unknown_course() {
        let source = source();
        let err = get(&source, "/courses/nope/sections").unwrap_err();
        assert_eq!(err.message(), "Course not found");
    }

    #[test]
    fn test_create_section_appends_by_default() {
        let source = source();
        let created = send(
            &source,
            Method::POST,
            "/courses/course-1/sections",
            json!({"title": "Week 4: Frameworks"}),
        )
        .unwrap()
        .data
        .unwrap();
        assert_eq!(created["order"], 4);
        assert_eq!(created["courseId"], "course-1");
        assert_eq!(created["visible"], true);

        let sections = get(&source, "/courses/course-1/sections")
            .unwrap()
            .data
            .unwrap();
        assert_eq!(orders(&sections), [1, 2, 3, 4]);
        assert_eq!(sections[3]["id"], created["id"]);
    }

    #[test]
    fn test_create_section_at_position_shifts_siblings() {
        let source = source();
        let created = send(
            &source,
            Method::POST,
            "/courses/course-1/sections",
            json!({"title": "Orientation", "order": 1}),
        )
        .unwrap()
        .data
        .unwrap();
        assert_eq!(created["order"], 1);

        let sections = get(&source, "/courses/course-1/sections")
            .unwrap()
            .data
            .unwrap();
        assert_eq!(orders(&sections), [1, 2, 3, 4]);
        assert_eq!(sections[1]["id"], "section-1");
    }

    #[test]
    fn test_update_section_order_moves_it() {
        let source = source();
        let updated = send(
            &source,
            Method::PUT,
            "/sections/section-3",
            json!({"order": 1, "visible": false}),
        )
        .unwrap()
        .data
        .unwrap();
        assert_eq!(updated["order"], 1);
        assert_eq!(updated["visible"], false);

        let sections = get(&source, "/courses/course-1/sections")
            .unwrap()
            .data
            .unwrap();
        assert_eq!(section_ids(&sections), ["section-3", "section-1", "section-2"]);
        assert_eq!(orders(&sections), [1, 2, 3]);
    }

    #[test]
    fn test_delete_section_keeps_orders_dense() {
        let source = source();
        send(&source, Method::DELETE, "/sections/section-1", json!(null)).unwrap();
        let sections = get(&source, "/courses/course-1/sections")
            .unwrap()
            .data
            .unwrap();
        assert_eq!(section_ids(&sections), ["section-2", "section-3"]);
        assert_eq!(orders(&sections), [1, 2]);

        let err = send(&source, Method::DELETE, "/sections/section-1", json!(null)).unwrap_err();
        assert_eq!(err.code(), "E007");
    }
}
