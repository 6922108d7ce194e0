use axum::{extract::{rejection::JsonRejection, Path, State}, http::StatusCode, Json};
use models::student::{NewStudent, Student, StudentId};
use service::errors::ServiceError;
use tracing::info;

use crate::errors::JsonApiError;
use crate::metrics;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/v1/students", tag = "students",
    responses(
        (status = 200, description = "All students", body = [crate::openapi::StudentDoc]),
        (status = 500, description = "Repository failure")
    )
)]
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, JsonApiError> {
    let students = state.students.get_all_students().await?;
    Ok(Json(students))
}

#[utoipa::path(
    post, path = "/api/v1/students", tag = "students",
    request_body = crate::openapi::NewStudentDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::StudentDoc),
        (status = 400, description = "Invalid body or email taken"),
        (status = 500, description = "Repository failure")
    )
)]
pub async fn add_student(
    State(state): State<AppState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), JsonApiError> {
    let Json(input) = payload.inspect_err(|_| metrics::record_rejection("invalid_body"))?;
    let student = input.into_student().inspect_err(|_| metrics::record_rejection("invalid_body"))?;
    match state.students.add_student(student).await {
        Ok(saved) => {
            metrics::STUDENTS_ADDED_TOTAL.inc();
            info!(student_id = ?saved.id, "student created");
            Ok((StatusCode::CREATED, Json(saved)))
        }
        Err(e) => {
            if matches!(e, ServiceError::BadRequest(_)) {
                metrics::record_rejection("email_taken");
            }
            Err(e.into())
        }
    }
}

#[utoipa::path(
    delete, path = "/api/v1/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No student with this id"),
        (status = 500, description = "Repository failure")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<StatusCode, JsonApiError> {
    match state.students.delete_student(id).await {
        Ok(()) => {
            metrics::STUDENTS_DELETED_TOTAL.inc();
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => {
            if matches!(e, ServiceError::NotFound(_)) {
                metrics::record_rejection("not_found");
            }
            Err(e.into())
        }
    }
}
