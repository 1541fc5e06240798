/// Recoverable engine errors. The message is meant to be shown next to the
/// offending input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FestivalError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    Lookup(String),

    #[error("duplicate entry: {0}")]
    Duplicate(String),

    #[error("invalid state: {0}")]
    State(String),
}

impl FestivalError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }
}
