use chrono::Utc;
use rand::Rng;
use serde_json::Value;

use super::require_non_empty;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::activities::entities::ActivityKind;
use crate::models::generative_tasks::entities::{
    Difficulty, GenerativeTask, GenerativeTaskSubmission, TestCase,
};
use crate::models::generative_tasks::requests::{GenerateTaskRequest, SubmitGenerativeTaskRequest};
use crate::source::fixture::router::RouteContext;
use crate::source::fixture::{FixtureStore, respond};
use crate::utils::generate_id;

const TASK_DESCRIPTION: &str = "Create a responsive web component using modern CSS techniques";
const TASK_REQUIREMENTS: [&str; 4] = [
    "Use CSS Grid or Flexbox for layout",
    "Make it responsive for all screen sizes",
    "Include hover effects and transitions",
    "Follow accessibility guidelines",
];
const TASK_HINTS: [&str; 3] = [
    "Start with mobile-first approach",
    "Use CSS custom properties for theming",
    "Test your code frequently",
];
const DEFAULT_ESTIMATED_TIME: u32 = 30;
const SUBMISSION_FEEDBACK: &str =
    "Good work! Your solution demonstrates understanding of the concepts.";

/// 按难度给出的提示
pub(crate) fn hints_for(difficulty: Difficulty) -> [&'static str; 3] {
    match difficulty {
        Difficulty::Easy => [
            "Start with basic HTML structure",
            "Use simple CSS properties",
            "Test your code frequently",
        ],
        Difficulty::Medium => [
            "Use CSS Grid or Flexbox for layout",
            "Implement responsive design",
            "Add interactive elements",
        ],
        Difficulty::Hard => [
            "Optimize for performance",
            "Implement advanced CSS features",
            "Consider accessibility standards",
        ],
    }
}

pub(super) fn generate_task(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let request: GenerateTaskRequest = ctx.body()?;

    let mut data = store.write();
    if data.user(&request.student_id).is_none() {
        return Err(LmsError::not_found("Student not found"));
    }

    let activity = data
        .course_sections
        .iter()
        .find_map(|s| s.find_activity(&request.activity_id))
        .ok_or_else(|| LmsError::not_found("Activity not found"))?;
    let ActivityKind::GenerativeTask { estimated_time, .. } = &activity.kind else {
        return Err(LmsError::validation(
            "Activity is not a generative task",
        ));
    };

    let task = GenerativeTask {
        id: generate_id("task"),
        activity_id: request.activity_id.clone(),
        student_id: request.student_id,
        title: format!("AI Generated Task - {}", request.difficulty),
        description: TASK_DESCRIPTION.to_string(),
        requirements: TASK_REQUIREMENTS.iter().map(|r| r.to_string()).collect(),
        difficulty: request.difficulty,
        estimated_time: estimated_time.unwrap_or(DEFAULT_ESTIMATED_TIME),
        hints: TASK_HINTS.iter().map(|h| h.to_string()).collect(),
        created_at: Utc::now(),
    };
    data.generative_tasks.push(task.clone());

    respond(task, "Task generated successfully")
}

pub(super) fn submit_task(store: &FixtureStore, ctx: &RouteContext) -> Result<ApiResponse<Value>> {
    let request: SubmitGenerativeTaskRequest = ctx.body()?;
    require_non_empty("code", &request.code)?;

    let mut data = store.write();
    let task = data
        .generative_tasks
        .iter()
        .find(|t| t.id == request.task_id)
        .ok_or_else(|| LmsError::not_found("Task not found"))?;
    if task.student_id != request.student_id {
        return Err(LmsError::validation(
            "Task was generated for another student",
        ));
    }

    let mut rng = rand::rng();
    let submission = GenerativeTaskSubmission {
        id: generate_id("submission"),
        task_id: request.task_id,
        student_id: request.student_id,
        code: request.code,
        score: rng.random_range(60..=100),
        feedback: SUBMISSION_FEEDBACK.to_string(),
        test_cases: vec![
            TestCase {
                name: "Responsive Design".to_string(),
                passed: true,
            },
            TestCase {
                name: "CSS Implementation".to_string(),
                passed: true,
            },
            TestCase {
                name: "Accessibility".to_string(),
                passed: rng.random_bool(0.7),
            },
        ],
        created_at: Utc::now(),
    };
    data.generative_submissions.push(submission.clone());

    respond(submission, "Task submitted successfully")
}

pub(super) fn get_hints(_: &FixtureStore, ctx: &RouteContext) -> Result<ApiResponse<Value>> {
    let difficulty = match ctx.query("difficulty") {
        Some(raw) => raw.parse::<Difficulty>().map_err(LmsError::validation)?,
        None => Difficulty::default(),
    };
    respond(hints_for(difficulty), "Hints retrieved successfully")
}
