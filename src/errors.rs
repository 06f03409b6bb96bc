use thiserror::Error;

/// Errors that stop a conversion run: talking to the Slides or Drive API,
/// reading credentials, or bad caller input.
#[derive(Error, Debug)]
pub enum SlidesApiError {
    /// Error originating from the underlying HTTP client (`reqwest`).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A response or request body could not be (de)serialized.
    #[error("Failed to (de)serialize JSON: {0}")]
    JsonDeserialization(#[from] serde_json::Error),

    /// A non-2xx response, with the message from the Google error body when
    /// there is one.
    #[error("API returned an error: Status {status}, Message: {message}")]
    ApiError {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Authentication setup/configuration error: {0}")]
    AuthSetupError(String),

    /// Token fetching failed inside yup-oauth2.
    #[cfg(not(target_arch = "wasm32"))]
    #[cfg(feature = "yup-oauth2")]
    #[error("Authentication library error: {0}")]
    AuthLibError(#[from] yup_oauth2::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] std::env::VarError),

    /// Reading the Markdown source or the service account key failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// A type alias for `Result<T, SlidesApiError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, SlidesApiError>;
