use reqwest::Method;
use serde_json::Value;

use super::{ApiClient, RequestOptions};
use crate::models::ApiResponse;
use crate::models::activities::entities::Activity;
use crate::models::activities::requests::{CreateActivityRequest, UpdateActivityRequest};
use crate::models::assignments::entities::{Assignment, Grade, Submission};
use crate::models::assignments::requests::{
    CreateAssignmentRequest, GradeAssignmentRequest, SubmitAssignmentRequest,
};
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{CreateCourseRequest, UpdateCourseRequest};
use crate::models::enrollments::entities::Enrollment;
use crate::models::enrollments::requests::EnrollRequest;
use crate::models::forum::entities::{ForumPost, ForumReply};
use crate::models::forum::requests::{CreateForumPostRequest, CreateForumReplyRequest};
use crate::models::generative_tasks::entities::{
    Difficulty, GenerativeTask, GenerativeTaskSubmission,
};
use crate::models::generative_tasks::requests::{GenerateTaskRequest, SubmitGenerativeTaskRequest};
use crate::models::sections::entities::CourseSection;
use crate::models::sections::requests::{CreateSectionRequest, UpdateSectionRequest};
use crate::models::users::entities::User;
use crate::models::users::requests::UpdateUserRequest;
use crate::utils::encode_query_value;

impl ApiClient {
    // 课程
    pub async fn get_courses(&self) -> ApiResponse<Vec<Course>> {
        self.call("/courses", RequestOptions::get()).await
    }

    pub async fn get_course(&self, course_id: &str) -> ApiResponse<Course> {
        self.call(&format!("/courses/{course_id}"), RequestOptions::get())
            .await
    }

    pub async fn create_course(&self, request: &CreateCourseRequest) -> ApiResponse<Course> {
        self.send(Method::POST, "/courses", request).await
    }

    pub async fn update_course(
        &self,
        course_id: &str,
        request: &UpdateCourseRequest,
    ) -> ApiResponse<Course> {
        self.send(Method::PUT, &format!("/courses/{course_id}"), request)
            .await
    }

    pub async fn delete_course(&self, course_id: &str) -> ApiResponse<Value> {
        self.request(&format!("/courses/{course_id}"), RequestOptions::delete())
            .await
    }

    // 章节
    pub async fn get_course_sections(&self, course_id: &str) -> ApiResponse<Vec<CourseSection>> {
        self.call(
            &format!("/courses/{course_id}/sections"),
            RequestOptions::get(),
        )
        .await
    }

    pub async fn create_section(
        &self,
        course_id: &str,
        request: &CreateSectionRequest,
    ) -> ApiResponse<CourseSection> {
        self.send(
            Method::POST,
            &format!("/courses/{course_id}/sections"),
            request,
        )
        .await
    }

    pub async fn update_section(
        &self,
        section_id: &str,
        request: &UpdateSectionRequest,
    ) -> ApiResponse<CourseSection> {
        self.send(Method::PUT, &format!("/sections/{section_id}"), request)
            .await
    }

    pub async fn delete_section(&self, section_id: &str) -> ApiResponse<Value> {
        self.request(&format!("/sections/{section_id}"), RequestOptions::delete())
            .await
    }

    // 活动
    pub async fn get_activity(&self, course_id: &str, activity_id: &str) -> ApiResponse<Activity> {
        self.call(
            &format!("/courses/{course_id}/activities/{activity_id}"),
            RequestOptions::get(),
        )
        .await
    }

    pub async fn get_activity_by_id(&self, activity_id: &str) -> ApiResponse<Activity> {
        self.call(&format!("/activities/{activity_id}"), RequestOptions::get())
            .await
    }

    pub async fn create_activity(
        &self,
        section_id: &str,
        request: &CreateActivityRequest,
    ) -> ApiResponse<Activity> {
        self.send(
            Method::POST,
            &format!("/sections/{section_id}/activities"),
            request,
        )
        .await
    }

    pub async fn update_activity(
        &self,
        activity_id: &str,
        request: &UpdateActivityRequest,
    ) -> ApiResponse<Activity> {
        self.send(Method::PUT, &format!("/activities/{activity_id}"), request)
            .await
    }

    pub async fn delete_activity(&self, activity_id: &str) -> ApiResponse<Value> {
        self.request(
            &format!("/activities/{activity_id}"),
            RequestOptions::delete(),
        )
        .await
    }

    // 作业
    pub async fn get_assignments(&self) -> ApiResponse<Vec<Assignment>> {
        self.call("/assignments", RequestOptions::get()).await
    }

    pub async fn get_assignment(&self, assignment_id: &str) -> ApiResponse<Assignment> {
        self.call(
            &format!("/assignments/{assignment_id}"),
            RequestOptions::get(),
        )
        .await
    }

    pub async fn create_assignment(
        &self,
        request: &CreateAssignmentRequest,
    ) -> ApiResponse<Assignment> {
        self.send(Method::POST, "/assignments", request).await
    }

    pub async fn submit_assignment(
        &self,
        request: &SubmitAssignmentRequest,
    ) -> ApiResponse<Submission> {
        self.send(Method::POST, "/assignments/submit", request)
            .await
    }

    pub async fn grade_assignment(
        &self,
        request: &GradeAssignmentRequest,
    ) -> ApiResponse<Submission> {
        self.send(Method::POST, "/assignments/grade", request).await
    }

    // 生成任务
    pub async fn generate_task(&self, request: &GenerateTaskRequest) -> ApiResponse<GenerativeTask> {
        self.send(Method::POST, "/generative-tasks/generate", request)
            .await
    }

    pub async fn submit_generative_task(
        &self,
        request: &SubmitGenerativeTaskRequest,
    ) -> ApiResponse<GenerativeTaskSubmission> {
        self.send(Method::POST, "/generative-tasks/submit", request)
            .await
    }

    pub async fn get_generative_task_hints(
        &self,
        task_id: &str,
        difficulty: Difficulty,
    ) -> ApiResponse<Vec<String>> {
        self.call(
            &format!("/generative-tasks/{task_id}/hints?difficulty={difficulty}"),
            RequestOptions::get(),
        )
        .await
    }

    // 成绩
    pub async fn get_grades(&self) -> ApiResponse<Vec<Grade>> {
        self.call("/grades", RequestOptions::get()).await
    }

    pub async fn get_student_grades(&self, student_id: &str) -> ApiResponse<Vec<Grade>> {
        self.call(
            &format!("/grades/student/{student_id}"),
            RequestOptions::get(),
        )
        .await
    }

    // 选课
    pub async fn get_enrollments(&self) -> ApiResponse<Vec<Enrollment>> {
        self.call("/enrollments", RequestOptions::get()).await
    }

    pub async fn enroll_student(&self, request: &EnrollRequest) -> ApiResponse<Enrollment> {
        self.send(Method::POST, "/enrollments", request).await
    }

    // 论坛
    pub async fn get_forum_posts(&self, forum_id: Option<&str>) -> ApiResponse<Vec<ForumPost>> {
        let endpoint = match forum_id {
            Some(id) => format!("/forum-posts?forumId={}", encode_query_value(id)),
            None => "/forum-posts".to_string(),
        };
        self.call(&endpoint, RequestOptions::get()).await
    }

    pub async fn create_forum_post(
        &self,
        request: &CreateForumPostRequest,
    ) -> ApiResponse<ForumPost> {
        self.send(Method::POST, "/forum-posts", request).await
    }

    pub async fn create_forum_reply(
        &self,
        request: &CreateForumReplyRequest,
    ) -> ApiResponse<ForumReply> {
        self.send(Method::POST, "/forum-posts/reply", request).await
    }

    // 用户
    pub async fn get_users(&self) -> ApiResponse<Vec<User>> {
        self.call("/users", RequestOptions::get()).await
    }

    pub async fn get_user(&self, user_id: &str) -> ApiResponse<User> {
        self.call(&format!("/users/{user_id}"), RequestOptions::get())
            .await
    }

    pub async fn update_user(&self, user_id: &str, request: &UpdateUserRequest) -> ApiResponse<User> {
        self.send(Method::PUT, &format!("/users/{user_id}"), request)
            .await
    }
}
