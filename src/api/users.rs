//! User directory API handlers
//!
//! Serve the users collection loaded at startup. Two flavors share these
//! handlers: the plain one reports misses as a 200 `{"error": ...}` payload and
//! bad parameters as 400; the validated one answers 404 and 422 instead.

use crate::api::utils::{non_empty, Lookup};
use crate::error::AppError;
use crate::query::{self, SortOrder};
use crate::records::user::{self, User, UserId};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

const USER_NOT_FOUND: &str = "User not found!";

/// Highest accepted `min_score`
pub const MAX_SCORE: i64 = 100;

/// Lookup by id query
#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    /// ID of the user
    pub user_id: UserId,
}

/// Sort query
#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    /// `asc` (default) or `desc`
    pub order: Option<String>,
    /// Field to sort by, `score` when absent
    pub sort_by: Option<String>,
}

/// Filter query
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// Department to keep; absent or empty keeps everyone
    pub department: Option<String>,
}

/// GET /view - List all users
pub async fn view(State(state): State<Arc<RwLock<AppState>>>) -> Json<Vec<User>> {
    let state = state.read().await;
    Json(state.users.clone())
}

/// GET /check?user_id=N - Get a user, reporting a miss in the body
pub async fn check_user(
    State(state): State<Arc<RwLock<AppState>>>,
    Query(query): Query<CheckQuery>,
) -> Json<Lookup<User>> {
    let state = state.read().await;
    let found = user::find_by_id(&state.users, query.user_id).cloned();
    Json(Lookup::from_option(found, USER_NOT_FOUND))
}

/// GET /check?user_id=N - Get a user, 404 on a miss
pub async fn check_user_strict(
    State(state): State<Arc<RwLock<AppState>>>,
    Query(query): Query<CheckQuery>,
) -> Result<Json<User>, AppError> {
    let state = state.read().await;
    user::find_by_id(&state.users, query.user_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
}

/// GET /check/:user_id - Get a user by path id
pub async fn check_user_by_path(
    State(state): State<Arc<RwLock<AppState>>>,
    Path(user_id): Path<UserId>,
) -> Json<Lookup<User>> {
    let state = state.read().await;
    let found = user::find_by_id(&state.users, user_id).cloned();
    Json(Lookup::from_option(found, USER_NOT_FOUND))
}

/// GET /department/:dept_name - Users of one department
pub async fn users_by_department(
    State(state): State<Arc<RwLock<AppState>>>,
    Path(dept_name): Path<String>,
) -> Json<Lookup<Vec<User>>> {
    let state = state.read().await;
    let users = query::filter(&state.users, |u| u.department == dept_name);
    Json(non_empty(users, "No users found in this department"))
}

/// GET /score/:min_score - Users scoring at least `min_score`
pub async fn users_with_min_score(
    State(state): State<Arc<RwLock<AppState>>>,
    Path(min_score): Path<i64>,
) -> Result<Json<Lookup<Vec<User>>>, AppError> {
    if !(0..=MAX_SCORE).contains(&min_score) {
        return Err(AppError::Validation(format!(
            "min_score must be between 0 and {}",
            MAX_SCORE
        )));
    }

    let state = state.read().await;
    let threshold = min_score as f64;
    let users = query::filter(&state.users, |u| u.score >= threshold);
    Ok(Json(non_empty(
        users,
        format!("No users with score >= {}", min_score),
    )))
}

/// GET /users/:department/:user_id - Lookup by department and id
pub async fn user_by_department(
    State(state): State<Arc<RwLock<AppState>>>,
    Path((department, user_id)): Path<(String, UserId)>,
) -> Json<Lookup<User>> {
    let state = state.read().await;
    let found = user::find_by_department_and_id(&state.users, &department, user_id).cloned();
    Json(Lookup::from_option(found, USER_NOT_FOUND))
}

/// GET /sort - Users ordered by a field, 400 on bad parameters
pub async fn sort_users(
    State(state): State<Arc<RwLock<AppState>>>,
    Query(params): Query<SortQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let state = state.read().await;
    sorted(&state.users, &params).map(Json)
}

/// GET /sort - Users ordered by a field, 422 on bad parameters
pub async fn sort_users_strict(
    State(state): State<Arc<RwLock<AppState>>>,
    Query(params): Query<SortQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let state = state.read().await;
    sorted(&state.users, &params)
        .map(Json)
        .map_err(|e| match e {
            AppError::BadRequest(msg) => AppError::Validation(msg),
            other => other,
        })
}

/// GET /filter - Users of a department, or everyone
pub async fn filter_users(
    State(state): State<Arc<RwLock<AppState>>>,
    Query(params): Query<FilterQuery>,
) -> Json<Vec<User>> {
    let state = state.read().await;
    match params.department.as_deref() {
        Some(department) if !department.is_empty() => {
            Json(query::filter(&state.users, |u| u.department == department))
        }
        _ => Json(state.users.clone()),
    }
}

fn sorted(users: &[User], params: &SortQuery) -> Result<Vec<User>, AppError> {
    let order = match params.order.as_deref() {
        Some(token) => SortOrder::from_query(token)?,
        None => SortOrder::Asc,
    };
    let field = params.sort_by.as_deref().unwrap_or("score");
    query::sort_by_field(users, field, order)
}
