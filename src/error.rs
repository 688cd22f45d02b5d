//! Error types for brewse
//!
//! All modules use `BrewseResult<T>` as their return type.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for brewse operations
pub type BrewseResult<T> = Result<T, BrewseError>;

/// All errors that can occur in brewse
#[derive(Error, Debug)]
pub enum BrewseError {
    // Environment errors
    #[error("Home directory could not be determined")]
    HomeDirUnavailable,

    // Cache errors (recovered inside the registry client)
    #[error("cache miss: {0}")]
    CacheMiss(String),

    #[error("cache expired: {0}")]
    CacheExpired(String),

    // Registry errors
    #[error("Request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("Malformed {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to fetch {collection}: {source}")]
    Fetch {
        collection: &'static str,
        #[source]
        source: Box<BrewseError>,
    },

    // Manifest errors
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {command}, exit code: {code}")]
    Apply { command: String, code: i32 },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl BrewseError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a decode error for a named payload
    pub fn decode(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            what: what.into(),
            source,
        }
    }

    /// Wrap an error with the registry collection that produced it
    pub fn fetch(collection: &'static str, source: BrewseError) -> Self {
        Self::Fetch {
            collection,
            source: Box::new(source),
        }
    }

    /// Check if error is a cache miss or expiry (both fall through to the network)
    pub fn is_cache_miss(&self) -> bool {
        matches!(self, Self::CacheMiss(_) | Self::CacheExpired(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CommandFailed { command, .. } if invokes_brew(command) => {
                Some("Install Homebrew from https://brew.sh or set brew.binary in the config")
            }
            Self::Network { .. } => Some("Check your connection, or retry later"),
            Self::Fetch { source, .. } => source.hint(),
            Self::HomeDirUnavailable => Some("Set the HOME environment variable"),
            _ => None,
        }
    }
}

/// Whether the program of a `<binary> args..` command line is Homebrew
fn invokes_brew(command: &str) -> bool {
    command
        .split_whitespace()
        .next()
        .and_then(|program| Path::new(program).file_stem())
        .is_some_and(|stem| stem == "brew")
}
