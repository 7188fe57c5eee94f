use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollError {
    #[error("Enter a valid option: got '{given}', expected a number from 1 to {max}")]
    InvalidOptionIndex { given: String, max: usize },

    #[error("A poll needs at least one option")]
    NoOptions,

    #[error("Option '{0}' appears more than once")]
    DuplicateOption(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
