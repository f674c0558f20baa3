use serde_json::Value;

use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::entities::Grade;
use crate::source::fixture::router::RouteContext;
use crate::source::fixture::{FixtureStore, respond};

pub(super) fn list_grades(store: &FixtureStore, _: &RouteContext) -> Result<ApiResponse<Value>> {
    let data = store.read();
    respond(&data.grades, "Grades retrieved successfully")
}

pub(super) fn list_student_grades(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let student_id = ctx.param("id")?;
    let data = store.read();
    if data.user(student_id).is_none() {
        return Err(LmsError::not_found("Student not found"));
    }
    let grades: Vec<&Grade> = data
        .grades
        .iter()
        .filter(|g| g.student_id == student_id)
        .collect();
    respond(grades, "Student grades retrieved successfully")
}
