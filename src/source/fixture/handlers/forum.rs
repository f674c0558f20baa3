use chrono::Utc;
use serde_json::Value;

use super::require_non_empty;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::activities::entities::ActivityType;
use crate::models::forum::entities::{ForumPost, ForumReply};
use crate::models::forum::requests::{CreateForumPostRequest, CreateForumReplyRequest};
use crate::source::fixture::router::RouteContext;
use crate::source::fixture::{FixtureStore, respond};
use crate::utils::generate_id;

pub(super) fn list_posts(store: &FixtureStore, ctx: &RouteContext) -> Result<ApiResponse<Value>> {
    let data = store.read();
    let posts: Vec<&ForumPost> = match ctx.query("forumId") {
        Some(forum_id) => data
            .forum_posts
            .iter()
            .filter(|p| p.forum_id == forum_id)
            .collect(),
        None => data.forum_posts.iter().collect(),
    };
    respond(posts, "Forum posts retrieved successfully")
}

pub(super) fn create_post(store: &FixtureStore, ctx: &RouteContext) -> Result<ApiResponse<Value>> {
    let request: CreateForumPostRequest = ctx.body()?;
    require_non_empty("title", &request.title)?;
    require_non_empty("content", &request.content)?;

    let mut data = store.write();
    let is_forum = data
        .course_sections
        .iter()
        .find_map(|s| s.find_activity(&request.forum_id))
        .is_some_and(|a| a.activity_type() == ActivityType::Forum);
    if !is_forum {
        return Err(LmsError::not_found("Forum not found"));
    }
    if data.user(&request.author_id).is_none() {
        return Err(LmsError::not_found("Author not found"));
    }

    let post = ForumPost {
        id: generate_id("post"),
        forum_id: request.forum_id,
        author_id: request.author_id,
        author_name: request.author_name,
        title: request.title,
        content: request.content,
        created_at: Utc::now(),
        replies: Vec::new(),
        is_pinned: false,
    };
    data.forum_posts.push(post.clone());

    respond(post, "Forum post created successfully")
}

pub(super) fn create_reply(store: &FixtureStore, ctx: &RouteContext) -> Result<ApiResponse<Value>> {
    let request: CreateForumReplyRequest = ctx.body()?;
    require_non_empty("content", &request.content)?;

    let mut data = store.write();
    if data.user(&request.author_id).is_none() {
        return Err(LmsError::not_found("Author not found"));
    }
    let post = data
        .forum_posts
        .iter_mut()
        .find(|p| p.id == request.post_id)
        .ok_or_else(|| LmsError::not_found("Post not found"))?;

    let reply = ForumReply {
        id: generate_id("reply"),
        post_id: request.post_id,
        author_id: request.author_id,
        author_name: request.author_name,
        content: request.content,
        created_at: Utc::now(),
    };
    post.replies.push(reply.clone());

    respond(reply, "Reply created successfully")
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use crate::source::fixture::tests::{get, send, source};

    #[test]
    fn test_list_posts_filtered_by_forum() {
        let source = source();
        let posts = get(&source, "/forum-posts?forumId=activity-3").unwrap().data.unwrap();
        assert_eq!(posts.as_array().unwrap().len(), 1);

        let none = get(&source, "/forum-posts?forumId=activity-1").unwrap().data.unwrap();
        assert!(none.as_array().unwrap().is_empty());

        let all = get(&source, "/forum-posts").unwrap().data.unwrap();
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_create_post_then_reply() {
        let source = source();
        let post = send(
            &source,
            Method::POST,
            "/forum-posts",
            json!({
                "forumId": "activity-3",
                "title": "Hello from Bob",
                "content": "Looking forward to the course",
                "authorId": "student-2",
                "authorName": "Bob Smith"
            }),
        )
        .unwrap()
        .data
        .unwrap();
        assert_eq!(post["isPinned"], false);

        let reply = send(
            &source,
            Method::POST,
            "/forum-posts/reply",
            json!({
                "postId": post["id"],
                "content": "Welcome!",
                "authorId": "professor-1",
                "authorName": "Dr. Sarah Wilson"
            }),
        )
        .unwrap()
        .data
        .unwrap();
        assert_eq!(reply["postId"], post["id"]);

        let posts = get(&source, "/forum-posts?forumId=activity-3").unwrap().data.unwrap();
        let stored = posts
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["id"] == post["id"])
            .unwrap();
        assert_eq!(stored["replies"][0]["content"], "Welcome!");
    }

    #[test]
    fn test_reply_to_missing_post() {
        let source = source();
        let err = send(
            &source,
            Method::POST,
            "/forum-posts/reply",
            json!({"postId": "post-9", "content": "?", "authorId": "student-1", "authorName": "Alice"}),
        )
        .unwrap_err();
        assert_eq!(err.message(), "Post not found");
    }

    #[test]
    fn test_post_to_non_forum_activity() {
        let source = source();
        let err = send(
            &source,
            Method::POST,
            "/forum-posts",
            json!({
                "forumId": "activity-5",
                "title": "t",
                "content": "c",
                "authorId": "student-1",
                "authorName": "Alice Johnson"
            }),
        )
        .unwrap_err();
        assert_eq!(err.message(), "Forum not found");
    }
}
