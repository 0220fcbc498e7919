use thiserror::Error;

/// Failure surface of the client.
///
/// The backend is the single source of truth but not always reachable: any
/// transport failure or non-2xx status is surfaced as-is, without parsing a
/// structured error body. No variant is fatal to the caller and nothing is
/// retried automatically.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("no matching record")]
    NotFound,

    /// Cart quantities never go below 1; rejected before any request is built.
    #[error("quantity must be at least 1")]
    QuantityTooSmall,

    #[error("local store error: {0}")]
    Store(#[from] sled::Error),

    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;
