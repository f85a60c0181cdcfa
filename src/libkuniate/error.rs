use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read country data")]
    Io(#[from] io::Error),
    #[error("malformed country data: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "fetch")]
    #[error("cannot fetch country data: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("country data unavailable: {0}")]
    DataUnavailable(String),
    #[error("only {distinct} distinct country names, at least {needed} are needed")]
    InsufficientVariety { distinct: usize, needed: usize },
    #[error("no question is being asked")]
    NoActiveQuestion,
    #[error("this question was already answered")]
    AlreadyAnswered,
    #[error("{0:?} is not one of the offered options")]
    NotAnOption(String),
    #[error("the hint for this question was already used")]
    HintAlreadyUsed,
}

impl QuizError {
    /// Rejected answer submissions. Nothing in the quiz changed.
    pub fn is_invalid_submission(&self) -> bool {
        matches!(
            self,
            QuizError::NoActiveQuestion | QuizError::AlreadyAnswered | QuizError::NotAnOption(_)
        )
    }
}

impl From<SourceError> for QuizError {
    fn from(err: SourceError) -> Self {
        QuizError::DataUnavailable(err.to_string())
    }
}

#[derive(Debug, Error)]
#[error("unknown question type {0:?} (expected flag, capital or borders)")]
pub struct UnknownQuestionType(pub String);
