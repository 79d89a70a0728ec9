//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Which record service this process exposes
    pub service: ServiceKind,
    /// Persistence configuration
    pub persistence: PersistenceConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Directory holding the JSON documents
    pub data_dir: PathBuf,
}

/// The record services a process can expose.
///
/// Their HTTP paths overlap, so one process serves exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// User directory; misses answer with a 200 error payload
    Users,
    /// User directory; misses answer 404, bad parameters 422
    ValidatedUsers,
    /// Read-only bookings list
    Bookings,
    /// Student CGPA management
    Students,
}

impl ServiceKind {
    /// All service kinds, in the order they are documented
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::Users,
        ServiceKind::ValidatedUsers,
        ServiceKind::Bookings,
        ServiceKind::Students,
    ];

    /// Configuration token for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Users => "users",
            ServiceKind::ValidatedUsers => "validated-users",
            ServiceKind::Bookings => "bookings",
            ServiceKind::Students => "students",
        }
    }

    /// File name of the document backing this service
    pub fn document_name(&self) -> &'static str {
        match self {
            ServiceKind::Users | ServiceKind::ValidatedUsers => "users.json",
            ServiceKind::Bookings => "bookings.json",
            ServiceKind::Students => "students.json",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = ServiceKind::ALL.iter().map(|k| k.as_str()).collect();
                anyhow::anyhow!("Unknown service '{}', select from {:?}", s, valid)
            })
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    ///
    /// Fails only when `RECORD_SERVICE` names an unknown service.
    pub fn from_env() -> anyhow::Result<Self> {
        let service = match env::var("RECORD_SERVICE") {
            Ok(value) => value.parse()?,
            Err(_) => ServiceKind::Students,
        };

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8000),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            service,
            persistence: PersistenceConfig {
                data_dir: env::var_os("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(".")),
            },
        })
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Path of the document backing the configured service
    pub fn document_path(&self) -> PathBuf {
        self.persistence.data_dir.join(self.service.document_name())
    }
}
