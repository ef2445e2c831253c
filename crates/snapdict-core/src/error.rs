use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{resource} unavailable: {reason}")]
    ResourceUnavailable { resource: String, reason: String },

    #[error("Malformed {file} at line {line}: {reason}")]
    Parse { file: String, line: usize, reason: String },
}

impl Error {
    pub fn unavailable(resource: impl Into<String>, reason: impl ToString) -> Self {
        Self::ResourceUnavailable { resource: resource.into(), reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
