// State management module
// Handles application state and the JSON document store

pub mod app_state;
pub mod persistence;

pub use app_state::AppState;
pub use persistence::{JsonDocument, PersistenceError};
