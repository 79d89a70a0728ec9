//! Student CGPA API handlers
//!
//! Every handler re-reads the students document. Mutations hold the state's
//! write guard from load to save so concurrent writers cannot lose updates.

use crate::api::utils::MessageResponse;
use crate::error::AppError;
use crate::query::{self, SortOrder};
use crate::records::{Student, StudentId, StudentRecord, StudentUpdate};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

const STUDENT_NOT_FOUND: &str = "Student not found";

/// Sort query
#[derive(Debug, Deserialize)]
pub struct SortQuery {
    /// Field to sort by, e.g. `cgpa`, `grade_point1`, `grade1`
    pub sort_by: String,
    /// `asc` (default) or `desc`
    pub order: Option<String>,
}

/// Response to a create or update
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    /// Human-readable message
    pub message: String,
    /// The student as stored
    pub student: Student,
}

/// GET / - Service banner
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("CGPA Management API"))
}

/// GET /about - Service description
pub async fn about() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "A fully functional API to manage CGPA of students",
    ))
}

/// GET /view - List all students in document order
pub async fn view(
    State(state): State<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<Student>>, AppError> {
    let state = state.read().await;
    Ok(Json(state.load_roster()?.students()))
}

/// GET /student/:student_id - Get a single student
pub async fn get_student(
    State(state): State<Arc<RwLock<AppState>>>,
    Path(student_id): Path<StudentId>,
) -> Result<Json<Student>, AppError> {
    let state = state.read().await;
    let roster = state.load_roster()?;
    roster
        .get(&student_id.to_string())
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(STUDENT_NOT_FOUND.to_string()))
}

/// GET /sort?sort_by=F&order=asc|desc - Students ordered by a grade field
pub async fn sort_students(
    State(state): State<Arc<RwLock<AppState>>>,
    Query(params): Query<SortQuery>,
) -> Result<Json<Vec<Student>>, AppError> {
    // Parameters are checked before the document is touched
    query::check_sort_field::<Student>(&params.sort_by)?;
    let order = match params.order.as_deref() {
        Some(token) => SortOrder::from_query(token)?,
        None => SortOrder::Asc,
    };

    let state = state.read().await;
    let students = state.load_roster()?.students();
    Ok(Json(query::sort_by_field(&students, &params.sort_by, order)?))
}

/// POST /create - Add a new student
pub async fn create_student(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(record): Json<StudentRecord>,
) -> Result<(StatusCode, Json<StudentResponse>), AppError> {
    let student = Student::from_record(record)?;

    let state = state.write().await;
    let mut roster = state.load_roster()?;
    roster.insert(student.clone())?;
    state.save_roster(&roster)?;

    info!(student_id = student.id(), cgpa = student.cgpa, "Student created");
    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            message: "Student created successfully".to_string(),
            student,
        }),
    ))
}

/// PUT /update/:student_id - Merge the provided fields into a student
pub async fn update_student(
    State(state): State<Arc<RwLock<AppState>>>,
    Path(student_id): Path<StudentId>,
    Json(update): Json<StudentUpdate>,
) -> Result<Json<StudentResponse>, AppError> {
    let key = student_id.to_string();

    let state = state.write().await;
    let mut roster = state.load_roster()?;
    let existing = roster
        .get(&key)
        .ok_or_else(|| AppError::NotFound(STUDENT_NOT_FOUND.to_string()))?;

    let mut merged = existing.merge(update)?;
    // Identity comes from the path, whatever the stored record says
    merged.record.student_id = student_id;
    roster.replace(&key, merged.clone())?;
    state.save_roster(&roster)?;

    info!(student_id, cgpa = merged.cgpa, "Student updated");
    Ok(Json(StudentResponse {
        message: "Student updated successfully".to_string(),
        student: merged,
    }))
}

/// DELETE /delete/:student_id - Remove a student
pub async fn delete_student(
    State(state): State<Arc<RwLock<AppState>>>,
    Path(student_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let state = state.write().await;
    let mut roster = state.load_roster()?;
    roster
        .remove(&student_id)
        .ok_or_else(|| AppError::NotFound(STUDENT_NOT_FOUND.to_string()))?;
    state.save_roster(&roster)?;

    info!(student_id = %student_id, "Student deleted");
    Ok(Json(MessageResponse::new("Student deleted")))
}
