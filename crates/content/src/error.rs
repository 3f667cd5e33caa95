use crate::posts::IdType;
use thiserror::Error;

/// Why a content request produced no usable value
#[derive(Debug, Error)]
pub enum ContentError {
    /// The envelope carried a non-empty error list (transport failures
    /// included, since the transport reports them the same way)
    #[error("GraphQL errors: {}", .0.join("; "))]
    Upstream(Vec<String>),

    /// The response had no errors but lacked the expected field
    #[error("Response is missing {0}")]
    MissingData(&'static str),

    #[error("No post with {id_type} '{id}'")]
    NotFound { id: String, id_type: IdType },

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
