use chrono::Utc;
use serde_json::Value;

use super::require_non_empty;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::entities::{
    Assignment, AssignmentStatus, Grade, Submission, SubmissionStatus, letter_grade,
};
use crate::models::assignments::requests::{
    CreateAssignmentRequest, GradeAssignmentRequest, SubmitAssignmentRequest,
};
use crate::models::enrollments::entities::EnrollmentStatus;
use crate::source::fixture::router::RouteContext;
use crate::source::fixture::{FixtureStore, respond};
use crate::utils::generate_id;

fn assignment_not_found() -> LmsError {
    LmsError::not_found("Assignment not found")
}

pub(super) fn list_assignments(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let data = store.read();
    let assignments: Vec<&Assignment> = match ctx.query("courseId") {
        Some(course_id) => data
            .assignments
            .iter()
            .filter(|a| a.course_id == course_id)
            .collect(),
        None => data.assignments.iter().collect(),
    };
    respond(assignments, "Assignments retrieved successfully")
}

pub(super) fn get_assignment(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let id = ctx.param("id")?;
    let data = store.read();
    let assignment = data
        .assignments
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(assignment_not_found)?;
    respond(assignment, "Assignment retrieved successfully")
}

pub(super) fn create_assignment(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let request: CreateAssignmentRequest = ctx.body()?;
    require_non_empty("title", &request.title)?;
    if request.total_points == 0 {
        return Err(LmsError::validation("totalPoints must be greater than 0"));
    }

    let mut data = store.write();
    let instructor_id = data
        .course(&request.course_id)
        .map(|c| c.instructor_id.clone())
        .ok_or_else(|| LmsError::not_found("Course not found"))?;

    let now = Utc::now();
    let assignment = Assignment {
        id: generate_id("assignment"),
        title: request.title,
        description: request.description,
        course_id: request.course_id,
        instructor_id,
        assignment_type: request.assignment_type,
        total_points: request.total_points,
        due_date: request.due_date,
        status: AssignmentStatus::Pending,
        instructions: request.instructions,
        attachments: Vec::new(),
        submissions: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    data.assignments.push(assignment.clone());

    respond(assignment, "Assignment created successfully")
}

pub(super) fn submit_assignment(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let request: SubmitAssignmentRequest = ctx.body()?;
    require_non_empty("content", &request.content)?;

    let mut data = store.write();

    let student = data
        .user(&request.student_id)
        .ok_or_else(|| LmsError::not_found("Student not found"))?;
    if !student.is_student() {
        return Err(LmsError::validation("Only students can submit assignments"));
    }

    let (course_id, due_date) = data
        .assignments
        .iter()
        .find(|a| a.id == request.assignment_id)
        .map(|a| (a.course_id.clone(), a.due_date))
        .ok_or_else(assignment_not_found)?;

    // 课程成员列表或有效的选课记录都算已选课
    let enrolled = data
        .course(&course_id)
        .is_some_and(|c| c.is_enrolled(&request.student_id))
        || data.enrollments.iter().any(|e| {
            e.student_id == request.student_id
                && e.course_id == course_id
                && e.status == EnrollmentStatus::Active
        });
    if !enrolled {
        return Err(LmsError::validation(
            "Student is not enrolled in this course",
        ));
    }

    let now = Utc::now();
    let submission = Submission {
        id: generate_id("submission"),
        assignment_id: request.assignment_id.clone(),
        student_id: request.student_id,
        content: request.content,
        attachments: request.attachments,
        submitted_at: now,
        status: if now > due_date {
            SubmissionStatus::Late
        } else {
            SubmissionStatus::Submitted
        },
        grade: None,
    };

    if let Some(assignment) = data
        .assignments
        .iter_mut()
        .find(|a| a.id == request.assignment_id)
    {
        assignment.submissions.push(submission.clone());
        assignment.updated_at = now;
    }

    respond(submission, "Assignment submitted successfully")
}

pub(super) fn grade_assignment(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let request: GradeAssignmentRequest = ctx.body()?;

    let mut data = store.write();

    let (assignment, submission) = data
        .assignments
        .iter()
        .find_map(|a| {
            a.submissions
                .iter()
                .find(|s| s.id == request.submission_id)
                .map(|s| (a, s))
        })
        .ok_or_else(|| LmsError::not_found("Submission not found"))?;

    if !request.score.is_finite()
        || request.score < 0.0
        || request.score > f64::from(assignment.total_points)
    {
        return Err(LmsError::validation(format!(
            "score must be between 0 and {}",
            assignment.total_points
        )));
    }

    let graded_by = request
        .graded_by
        .unwrap_or_else(|| assignment.instructor_id.clone());
    let student_name = data
        .user(&submission.student_id)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| submission.student_id.clone());
    let course_name = data
        .course(&assignment.course_id)
        .map(|c| c.title.clone())
        .unwrap_or_default();

    let grade = Grade {
        id: generate_id("grade"),
        student_id: submission.student_id.clone(),
        student_name,
        assignment_id: assignment.id.clone(),
        assignment_title: assignment.title.clone(),
        course_id: assignment.course_id.clone(),
        course_name,
        score: request.score,
        total_points: assignment.total_points,
        letter_grade: letter_grade(request.score, assignment.total_points).to_string(),
        feedback: request.feedback,
        graded_by,
        graded_at: Utc::now(),
    };

    // 同一学生同一作业只保留最新成绩
    data.grades.retain(|g| {
        !(g.student_id == grade.student_id && g.assignment_id == grade.assignment_id)
    });
    data.grades.push(grade.clone());

    let submission = data
        .assignments
        .iter_mut()
        .flat_map(|a| a.submissions.iter_mut())
        .find(|s| s.id == request.submission_id)
        .ok_or_else(|| LmsError::not_found("Submission not found"))?;
    submission.grade = Some(grade);
    submission.status = SubmissionStatus::Graded;

    respond(&*submission, "Assignment graded successfully")
}
