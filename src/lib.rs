//! Record Service Library
//!
//! Flat JSON record stores (users, bookings, students) served over HTTP, with
//! stable filtering and sorting and a CGPA computation layer for students.
//! The server binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
pub mod grading;
pub mod query;
pub mod records;
/// Application state management
///
/// Handles the document store and the users startup snapshot.
pub mod state;
