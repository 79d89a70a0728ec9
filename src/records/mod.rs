//! Record types served by the services
//!
//! Users and students are typed records; bookings are opaque JSON objects
//! owned by their data file.

pub mod roster;
pub mod student;
pub mod user;

pub use roster::Roster;
pub use student::{Patch, Student, StudentId, StudentRecord, StudentUpdate};
pub use user::{User, UserId};

/// A booking entry, passed through as stored
pub type Booking = serde_json::Value;
