use bilidaily_models::web::ApiResponse;
use reqwest::{StatusCode, Url};
use thiserror::Error;
use url::ParseError;

/// Result alias for operations within the platform client crate.
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Joining a path onto a configured base URL failed.
    #[error("failed to join path '{path}' to base URL '{base}': {source}")]
    InvalidPath {
        base: String,
        path: String,
        #[source]
        source: ParseError,
    },

    /// The underlying HTTP client returned an error.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote side returned a non-success HTTP status.
    #[error("{url} returned {status}: {message}")]
    Http {
        status: StatusCode,
        url: Url,
        message: String,
    },

    /// The body was not the expected JSON envelope.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    /// The envelope carried a non-zero code.
    #[error("{endpoint} failed ({code}): {message}")]
    Service {
        endpoint: &'static str,
        code: i64,
        message: String,
    },

    /// The envelope reported success but carried no data.
    #[error("{endpoint} returned no data")]
    MissingData { endpoint: &'static str },
}

/// Unwraps an envelope into its payload, mapping failure codes to [`ApiError::Service`].
pub trait ResponseExt<T> {
    fn into_data(self, endpoint: &'static str) -> Result<T>;
}

impl<T> ResponseExt<T> for ApiResponse<T> {
    fn into_data(self, endpoint: &'static str) -> Result<T> {
        if self.code != 0 {
            return Err(ApiError::Service {
                endpoint,
                code: self.code,
                message: self.message,
            });
        }
        self.data.ok_or(ApiError::MissingData { endpoint })
    }
}
