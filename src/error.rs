// src/error.rs

use thiserror::Error;

/// Result type for tweetprep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the pipeline can surface to a caller.
///
/// All variants except `Io` are configuration errors: they are raised before
/// any token is transformed, so a failed call never leaves partial output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported tokenizer: {0}")]
    UnknownTokenizer(String),

    #[error("token has no category predicate named `{0}`")]
    UnknownCategory(String),

    #[error("unknown action `{0}`, expected one of remove, tag, demojize, emojize")]
    UnknownAction(String),

    #[error("action `{action}` is not allowed for `{category}`, expected {allowed}")]
    IllegalAction {
        action: String,
        category: String,
        allowed: String,
    },

    #[error("unknown stop list: {0}")]
    UnsupportedStopWords(String),

    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn illegal_action(action: impl Into<String>, category: impl Into<String>, allowed: &[&str]) -> Self {
        Error::IllegalAction {
            action: action.into(),
            category: category.into(),
            allowed: allowed.join(", "),
        }
    }
}
