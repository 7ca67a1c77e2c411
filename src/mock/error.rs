use thiserror::Error;

/// Rejected mock authoring input. The backend is left unchanged.
#[derive(Debug, Error)]
pub enum MockError {
    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("collection `{0}` must be a JSON array")]
    NotAnArray(String),

    #[error("invalid mock path `{0}`: must start with `/`")]
    InvalidPath(String),

    #[error("status {0} cannot be returned to fetch: use 200..=599")]
    InvalidStatus(u16),

    #[error("invalid collection name `{0}`")]
    InvalidName(String),
}
