use thiserror::Error;

/// Failures from the remote video API. Display is the bare message so the
/// controller can carry it into `last_error` untouched.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API answered with an error body.
    #[error("{0}")]
    Api(String),

    /// The request never produced a usable response.
    #[error("{0}")]
    Http(#[from] reqwest::Error),
}
