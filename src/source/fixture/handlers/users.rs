use serde_json::Value;

use super::require_non_empty;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::users::requests::UpdateUserRequest;
use crate::source::fixture::router::RouteContext;
use crate::source::fixture::{FixtureStore, respond};

pub(super) fn list_users(store: &FixtureStore, ctx: &RouteContext) -> Result<ApiResponse<Value>> {
    let data = store.read();
    let users: Vec<_> = data
        .users
        .iter()
        .filter(|u| ctx.query("role").is_none_or(|role| u.role.to_string() == role))
        .collect();
    respond(users, "Users retrieved successfully")
}

pub(super) fn get_user(store: &FixtureStore, ctx: &RouteContext) -> Result<ApiResponse<Value>> {
    let id = ctx.param("id")?;
    let data = store.read();
    let user = data
        .user(id)
        .ok_or_else(|| LmsError::not_found("User not found"))?;
    respond(user, "User retrieved successfully")
}

pub(super) fn update_user(store: &FixtureStore, ctx: &RouteContext) -> Result<ApiResponse<Value>> {
    let id = ctx.param("id")?;
    let update: UpdateUserRequest = ctx.body()?;
    if let Some(name) = &update.name {
        require_non_empty("name", name)?;
    }
    if let Some(email) = &update.email {
        if !email.contains('@') {
            return Err(LmsError::validation("Email format is invalid"));
        }
    }

    let mut data = store.write();
    let user = data
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| LmsError::not_found("User not found"))?;
    if let Some(name) = update.name {
        user.name = name;
    }
    if let Some(email) = update.email {
        user.email = email;
    }
    if let Some(profile) = update.profile {
        user.profile.merge(profile);
    }

    respond(&*user, "User updated successfully")
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use crate::source::fixture::tests::{get, send, source};

    #[test]
    fn test_list_users_by_role() {
        let source = source();
        let all = get(&source, "/users").unwrap().data.unwrap();
        assert_eq!(all.as_array().unwrap().len(), 3);
        let professors = get(&source, "/users?role=professor").unwrap().data.unwrap();
        assert_eq!(professors[0]["id"], "professor-1");
        assert_eq!(professors.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_update_user_merges_profile() {
        let source = source();
        let updated = send(
            &source,
            Method::PUT,
            "/users/student-1",
            json!({"name": "Alice J.", "profile": {"phone": "+1-555-9999"}}),
        )
        .unwrap()
        .data
        .unwrap();
        assert_eq!(updated["name"], "Alice J.");
        assert_eq!(updated["profile"]["phone"], "+1-555-9999");
        assert_eq!(updated["profile"]["department"], "Computer Science");

        let fetched = get(&source, "/users/student-1").unwrap().data.unwrap();
        assert_eq!(fetched, updated);
    }

    #[test]
    fn test_update_user_rejects_bad_email() {
        let source = source();
        let err = send(
            &source,
            Method::PUT,
            "/users/student-1",
            json!({"email": "not-an-email"}),
        )
        .unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[test]
    fn test_get_missing_user() {
        let source = source();
        let err = get(&source, "/users/nobody").unwrap_err();
        assert_eq!(err.message(), "User not found");
    }
}
