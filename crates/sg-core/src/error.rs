use thiserror::Error;

/// Everything that can go wrong between submitting a prompt and having an
/// artifact on disk. Every variant is recoverable: the session stays
/// interactive and the next submission starts clean.
///
/// Display for the message-carrying variants is the underlying text
/// verbatim, so the UI can show it without unwrapping.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The create call was rejected before a job existed.
    #[error("{0}")]
    Create(String),

    /// The service reported the job as failed, or a poll could not be read.
    #[error("{0}")]
    Remote(String),

    /// The attempt cap was exhausted without a terminal status.
    #[error("Timeout waiting for video")]
    PollTimeout,

    /// The artifact could not be fetched or persisted.
    #[error("{0}")]
    Download(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_pass_through() {
        assert_eq!(
            GenerateError::Create("invalid api key".into()).to_string(),
            "invalid api key"
        );
        assert_eq!(
            GenerateError::Remote("Generation failed".into()).to_string(),
            "Generation failed"
        );
        assert_eq!(
            GenerateError::Download("disk full".into()).to_string(),
            "disk full"
        );
    }

    #[test]
    fn test_timeout_text() {
        assert_eq!(
            GenerateError::PollTimeout.to_string(),
            "Timeout waiting for video"
        );
    }
}
