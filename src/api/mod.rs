//! API module
//!
//! Contains HTTP request handlers for the record services and the router that
//! mounts the ones belonging to the configured service.

pub mod bookings;
pub mod students;
pub mod users;
pub mod utils;

use crate::config::ServiceKind;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Build the routes of `service`
///
/// Services share paths such as `/view` and `/sort`, so only one is mounted.
pub fn router(service: ServiceKind, state: Arc<RwLock<AppState>>) -> Router {
    let routes = match service {
        ServiceKind::Users => Router::new()
            .route("/view", get(users::view))
            .route("/check", get(users::check_user))
            .route("/check/:user_id", get(users::check_user_by_path))
            .route("/department/:dept_name", get(users::users_by_department))
            .route("/score/:min_score", get(users::users_with_min_score))
            .route(
                "/users/:department/:user_id",
                get(users::user_by_department),
            )
            .route("/sort", get(users::sort_users))
            .route("/filter", get(users::filter_users)),
        ServiceKind::ValidatedUsers => Router::new()
            .route("/check", get(users::check_user_strict))
            .route("/sort", get(users::sort_users_strict))
            .route("/filter", get(users::filter_users)),
        ServiceKind::Bookings => Router::new()
            .route("/", get(bookings::hello))
            .route("/user/:name", get(bookings::greet))
            .route("/add", get(bookings::add))
            .route("/view", get(bookings::view)),
        ServiceKind::Students => Router::new()
            .route("/", get(students::hello))
            .route("/about", get(students::about))
            .route("/view", get(students::view))
            .route("/student/:student_id", get(students::get_student))
            .route("/sort", get(students::sort_students))
            .route("/create", post(students::create_student))
            .route("/update/:student_id", put(students::update_student))
            .route("/delete/:student_id", delete(students::delete_student)),
    };

    routes.with_state(state)
}
