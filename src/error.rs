use thiserror::Error;

/// Error types for request authentication
///
/// Signature checks themselves never produce an error, they return `false`.
/// These variants cover the surrounding request handling.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (no token known for the requested bot)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request used an HTTP method other than POST
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The request could not be decoded
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The payload is not signed with the bot token
    #[error("data are not signed with telegram bot token")]
    Unauthorized,
}

impl Error {
    /// Create a new configuration error
    pub fn configuration<S: AsRef<str>>(message: S) -> Self {
        Error::Configuration(message.as_ref().to_string())
    }

    /// Create a new bad request error
    pub fn bad_request<S: AsRef<str>>(message: S) -> Self {
        Error::BadRequest(message.as_ref().to_string())
    }

    /// HTTP status code a handler should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Configuration(_) => 500,
            Error::MethodNotAllowed(_) => 405,
            Error::BadRequest(_) => 400,
            Error::Unauthorized => 401,
        }
    }
}
