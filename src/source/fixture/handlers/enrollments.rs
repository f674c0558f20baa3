use chrono::Utc;
use serde_json::Value;

use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::enrollments::entities::{Enrollment, EnrollmentStatus};
use crate::models::enrollments::requests::EnrollRequest;
use crate::source::fixture::router::RouteContext;
use crate::source::fixture::{FixtureStore, respond};
use crate::utils::generate_id;

pub(super) fn list_enrollments(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let data = store.read();
    let enrollments: Vec<&Enrollment> = data
        .enrollments
        .iter()
        .filter(|e| ctx.query("studentId").is_none_or(|id| e.student_id == id))
        .filter(|e| ctx.query("courseId").is_none_or(|id| e.course_id == id))
        .collect();
    respond(enrollments, "Enrollments retrieved successfully")
}

pub(super) fn create_enrollment(
    store: &FixtureStore,
    ctx: &RouteContext,
) -> Result<ApiResponse<Value>> {
    let request: EnrollRequest = ctx.body()?;

    let mut data = store.write();
    let student = data
        .user(&request.student_id)
        .ok_or_else(|| LmsError::not_found("Student not found"))?;
    if !student.is_student() {
        return Err(LmsError::validation("Only students can enroll in courses"));
    }

    let course = data
        .course(&request.course_id)
        .ok_or_else(|| LmsError::not_found("Course not found"))?;
    let duplicate = course.is_enrolled(&request.student_id)
        || data
            .enrollments
            .iter()
            .any(|e| e.student_id == request.student_id && e.course_id == request.course_id);
    if duplicate {
        return Err(LmsError::validation(
            "Student is already enrolled in this course",
        ));
    }
    if course.is_full() {
        return Err(LmsError::validation("Course is full"));
    }

    let enrollment = Enrollment {
        id: generate_id("enrollment"),
        student_id: request.student_id.clone(),
        course_id: request.course_id.clone(),
        enrolled_at: Utc::now(),
        status: EnrollmentStatus::Active,
        last_accessed: None,
    };
    data.enrollments.push(enrollment.clone());
    if let Some(course) = data.course_mut(&request.course_id) {
        course.enrolled_students.push(request.student_id);
    }

    respond(enrollment, "Student enrolled successfully")
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use crate::source::fixture::tests::{get, send, source};

    #[test]
    fn test_enroll_adds_student_to_course() {
        let source = source();
        let enrollment = send(
            &source,
            Method::POST,
            "/enrollments",
            json!({"courseId": "course-2", "studentId": "student-2"}),
        )
        .unwrap()
        .data
        .unwrap();
        assert_eq!(enrollment["status"], "active");

        let course = get(&source, "/courses/course-2").unwrap().data.unwrap();
        assert_eq!(course["enrolledStudents"], json!(["student-1", "student-2"]));

        let mine = get(&source, "/enrollments?studentId=student-2").unwrap().data.unwrap();
        assert_eq!(mine.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_enroll_rejects_duplicates() {
        let source = source();
        let err = send(
            &source,
            Method::POST,
            "/enrollments",
            json!({"courseId": "course-1", "studentId": "student-1"}),
        )
        .unwrap_err();
        assert_eq!(err.message(), "Student is already enrolled in this course");
    }

    #[test]
    fn test_enroll_rejects_unknown_ids() {
        let source = source();
        let unknown_course = send(
            &source,
            Method::POST,
            "/enrollments",
            json!({"courseId": "course-9", "studentId": "student-2"}),
        )
        .unwrap_err();
        assert_eq!(unknown_course.message(), "Course not found");

        let unknown_student = send(
            &source,
            Method::POST,
            "/enrollments",
            json!({"courseId": "course-2", "studentId": "student-9"}),
        )
        .unwrap_err();
        assert_eq!(unknown_student.message(), "Student not found");
    }

    #[test]
    fn test_list_enrollments() {
        let source = source();
        let all = get(&source, "/enrollments").unwrap().data.unwrap();
        assert_eq!(all.as_array().unwrap().len(), 3);
        let course_2 = get(&source, "/enrollments?courseId=course-2").unwrap().data.unwrap();
        assert_eq!(course_2.as_array().unwrap().len(), 1);
    }
}
