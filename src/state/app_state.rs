// Application state management
// Holds the document store and, for the users services, the startup snapshot

use super::persistence::{JsonDocument, PersistenceError};
use crate::config::{Config, ServiceKind};
use crate::records::{Booking, Roster, User};
use std::path::Path;

/// Main application state
///
/// Shared as `Arc<RwLock<AppState>>`. The state itself never changes after
/// startup; the lock exists so that students mutations hold the write guard
/// across their whole load-mutate-save sequence while reads share the read
/// guard.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Which service this process serves
    pub service: ServiceKind,
    /// Backing document
    pub document: JsonDocument,
    /// Users loaded once at startup. Never re-read, so edits to the file made
    /// while the process runs are not visible until restart.
    pub users: Vec<User>,
}

impl AppState {
    /// Create state for `service` backed by the document at `path`
    ///
    /// The users services load their collection here, once. A corrupt users
    /// document fails startup.
    pub fn open<P: AsRef<Path>>(service: ServiceKind, path: P) -> Result<Self, PersistenceError> {
        let document = JsonDocument::new(path);
        let users = match service {
            ServiceKind::Users | ServiceKind::ValidatedUsers => document.load()?,
            ServiceKind::Bookings | ServiceKind::Students => Vec::new(),
        };

        Ok(Self {
            service,
            document,
            users,
        })
    }

    /// Create state from application configuration
    pub fn from_config(config: &Config) -> Result<Self, PersistenceError> {
        Self::open(config.service, config.document_path())
    }

    /// Get the number of users loaded at startup
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Read the bookings document
    pub fn load_bookings(&self) -> Result<Vec<Booking>, PersistenceError> {
        self.document.load()
    }

    /// Read the students document
    pub fn load_roster(&self) -> Result<Roster, PersistenceError> {
        self.document.load()
    }

    /// Rewrite the students document
    pub fn save_roster(&self, roster: &Roster) -> Result<(), PersistenceError> {
        self.document.save(roster)
    }
}
