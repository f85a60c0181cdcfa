//! 国当て (Kuniate!): the question/answer engine behind the country guessing game.
//!
//! The library knows nothing about terminals. Front ends build a [`Quiz`] from a
//! dataset, forward player actions to it and render [`QuizSnapshot`]s and
//! [`QuizEvent`]s.

pub mod country;
pub mod error;
pub mod rng;
pub mod shitsumon;
pub mod source;
pub mod timer;

pub use country::{CountryRecord, QuestionType};
pub use error::{QuizError, SourceError};
pub use rng::QuizRng;
pub use shitsumon::{
    Answer, Hint, Outcome, Phase, Prompt, Quiz, QuizConfig, QuizEvent, QuizSnapshot,
    OPTION_COUNT,
};
pub use source::{load_dataset, CountrySource, DatasetReport, JsonFileSource};
#[cfg(feature = "fetch")]
pub use source::{HttpSource, DEFAULT_URL};
pub use timer::{AdvanceToken, ScheduledAdvance};
