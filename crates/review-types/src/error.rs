use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown document status: {0}")]
    UnknownStatus(String),

    #[error("Unknown check status: {0}")]
    UnknownCheckStatus(String),

    #[error("Unknown feedback value: {0}")]
    UnknownFeedback(String),
}
