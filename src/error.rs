use thiserror::Error;

/// The only failure a parse can report. Everything below the document level
/// degrades to empty fields instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unreadable input: {0}")]
    UnreadableInput(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("missing required credential: {0}")]
    Missing(String),
    #[error("credential {0} is set but empty")]
    Empty(String),
    #[error("credential {name} could not be read: {reason}")]
    Invalid { name: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("no cached page for key {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("browser failed to {step}: {reason}")]
    Browser { step: &'static str, reason: String },
}

impl FetchError {
    /// Adapter for `map_err` on headless_chrome calls, which return `anyhow::Error`.
    pub fn at(step: &'static str) -> impl FnOnce(anyhow::Error) -> FetchError {
        move |err| FetchError::Browser {
            step,
            reason: format!("{err:#}"),
        }
    }
}
