use crate::country::{CountryRecord, QuestionType};
use crate::error::QuizError;
use crate::rng::QuizRng;
use crate::timer::{AdvanceToken, ScheduledAdvance};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Candidate answers per question: the subject plus three others.
pub const OPTION_COUNT: usize = 4;

const NO_DATA: &str = "no data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// How long the answer stays on screen before the next question.
    pub advance_delay: Duration,
    /// Progress saturates here.
    pub progress_ceiling: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            advance_delay: Duration::from_secs(2),
            progress_ceiling: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NoQuestion,
    AwaitingAnswer,
    Answered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Result of a recorded answer, and when to move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    pub outcome: Outcome,
    pub next: ScheduledAdvance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    Revealed(String),
    /// The subject lacks the field the hint is built from.
    Unavailable,
}

/// Transient notifications for the player. Drained with [`Quiz::take_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    AnswerCorrect,
    AnswerIncorrect,
    HintRevealed(String),
}

/// The subject's field shown for the current question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Prompt {
    Flag {
        image: Option<String>,
        description: Option<String>,
    },
    Capital {
        capital: Option<String>,
    },
    Borders {
        borders: Option<Vec<String>>,
    },
}

impl Prompt {
    fn of(question_type: QuestionType, country: &CountryRecord) -> Self {
        match question_type {
            QuestionType::Flag => Prompt::Flag {
                image: country.flag_image.clone(),
                description: country.flag_description.clone(),
            },
            QuestionType::Capital => Prompt::Capital {
                capital: country.first_capital().map(str::to_owned),
            },
            QuestionType::Borders => Prompt::Borders {
                borders: country.borders.clone(),
            },
        }
    }
}

/// Mutable per-session state. Only the owning [`Quiz`] changes it.
#[derive(Debug, Clone, Default)]
pub struct QuizState {
    pub question_type: QuestionType,
    /// Index of the subject in the dataset.
    pub subject: Option<usize>,
    pub options: Vec<String>,
    pub selected_option: Option<String>,
    pub hint_used: bool,
    pub hint_available: bool,
    pub hint_text: Option<String>,
    pub progress: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub score: u32,
    serial: u64,
}

/// Everything a front end needs to draw the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSnapshot {
    pub phase: Phase,
    pub question_type: QuestionType,
    pub prompt: Option<Prompt>,
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub selected_correct: Option<bool>,
    pub score: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub progress: u32,
    pub progress_ratio: f32,
    pub hint_available: bool,
    pub hint_text: Option<String>,
}

/// The question/answer engine.
///
/// Holds the read-only dataset, the random source and the [`QuizState`]. A
/// `Quiz` can only be built from a dataset it can actually ask questions
/// about, so generating a question never fails.
pub struct Quiz<R = QuizRng> {
    countries: Vec<CountryRecord>,
    rng: R,
    config: QuizConfig,
    state: QuizState,
    events: Vec<QuizEvent>,
}

impl Quiz<QuizRng> {
    pub fn with_seed(countries: Vec<CountryRecord>, seed: u64) -> Result<Self, QuizError> {
        Self::new(countries, QuizRng::new(seed), QuizConfig::default())
    }
}

impl<R: Rng> Quiz<R> {
    pub fn new(countries: Vec<CountryRecord>, rng: R, config: QuizConfig) -> Result<Self, QuizError> {
        if countries.is_empty() {
            warn!("[Setup] The dataset is empty.");
            return Err(QuizError::DataUnavailable("the dataset is empty".to_owned()));
        }
        let distinct = distinct_names(&countries);
        if distinct < OPTION_COUNT {
            warn!("[Setup] Only {} distinct country names.", distinct);
            return Err(QuizError::InsufficientVariety {
                distinct,
                needed: OPTION_COUNT,
            });
        }
        info!(
            "[Setup] Quiz ready with {} countries ({} distinct names).",
            countries.len(),
            distinct
        );

        Ok(Self {
            countries,
            rng,
            config,
            state: QuizState::default(),
            events: Vec::new(),
        })
    }

    /// Sets the type of the first question. Use [`Quiz::change_question_type`] once playing.
    pub fn with_question_type(mut self, question_type: QuestionType) -> Self {
        self.state.question_type = question_type;
        self
    }

    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }
    pub fn state(&self) -> &QuizState {
        &self.state
    }
    pub fn question_type(&self) -> QuestionType {
        self.state.question_type
    }
    pub fn options(&self) -> &[String] {
        &self.state.options
    }
    pub fn subject(&self) -> Option<&CountryRecord> {
        self.state.subject.map(|idx| &self.countries[idx])
    }
    pub fn answered(&self) -> u32 {
        self.state.correct_count + self.state.incorrect_count
    }

    pub fn phase(&self) -> Phase {
        match (self.state.subject, &self.state.selected_option) {
            (None, _) => Phase::NoQuestion,
            (Some(_), None) => Phase::AwaitingAnswer,
            (Some(_), Some(_)) => Phase::Answered,
        }
    }

    /// Picks a new subject and four shuffled options, discarding the current question.
    pub fn generate_question(&mut self) -> &CountryRecord {
        let len = self.countries.len();
        let subject = self.rng.random_range(0..len);
        let correct = self.countries[subject].name.clone();

        let mut options = Vec::with_capacity(OPTION_COUNT);
        options.push(correct);
        // terminates: the dataset was checked for enough distinct names
        while options.len() < OPTION_COUNT {
            let candidate = &self.countries[self.rng.random_range(0..len)].name;
            if !options.contains(candidate) {
                options.push(candidate.clone());
            }
        }
        options.shuffle(&mut self.rng);

        let state = &mut self.state;
        state.subject = Some(subject);
        state.options = options;
        state.selected_option = None;
        state.hint_used = false;
        state.hint_available = true;
        state.hint_text = None;
        state.progress = (state.progress + 1).min(self.config.progress_ceiling);
        state.serial += 1;

        debug!(
            "[Quiz] Question {} ({}): {:?} among {:?}",
            state.serial, state.question_type, self.countries[subject].name, state.options
        );
        &self.countries[subject]
    }

    pub fn submit_answer(&mut self, option: &str) -> Result<Answer, QuizError> {
        self.submit_answer_at(option, Instant::now())
    }

    /// Records the player's choice. `now` anchors the scheduled advance.
    pub fn submit_answer_at(&mut self, option: &str, now: Instant) -> Result<Answer, QuizError> {
        match self.phase() {
            Phase::NoQuestion => return Err(QuizError::NoActiveQuestion),
            Phase::Answered => return Err(QuizError::AlreadyAnswered),
            Phase::AwaitingAnswer => {}
        }
        if !self.state.options.iter().any(|o| o == option) {
            return Err(QuizError::NotAnOption(option.to_owned()));
        }

        let correct = self.subject().is_some_and(|subject| subject.name == option);
        let state = &mut self.state;
        state.selected_option = Some(option.to_owned());
        state.hint_available = false;
        let outcome = if correct {
            state.score += 1;
            state.correct_count += 1;
            self.events.push(QuizEvent::AnswerCorrect);
            Outcome::Correct
        } else {
            state.incorrect_count += 1;
            self.events.push(QuizEvent::AnswerIncorrect);
            Outcome::Incorrect
        };
        debug!(
            "[Quiz] Answered {:?}: {:?} (score {})",
            option, outcome, state.score
        );

        Ok(Answer {
            outcome,
            next: ScheduledAdvance::new(
                AdvanceToken(state.serial),
                now,
                self.config.advance_delay,
            ),
        })
    }

    /// Fires a scheduled advance. Returns `false` if the token is stale, i.e. a
    /// newer question was generated since it was scheduled.
    pub fn advance(&mut self, token: AdvanceToken) -> bool {
        if token.0 != self.state.serial || self.phase() != Phase::Answered {
            debug!(
                "[Quiz] Ignoring stale advance {:?} (current question {})",
                token, self.state.serial
            );
            return false;
        }
        self.generate_question();
        true
    }

    /// Uses up the hint for the current question.
    pub fn request_hint(&mut self) -> Result<Hint, QuizError> {
        match self.phase() {
            Phase::NoQuestion => return Err(QuizError::NoActiveQuestion),
            Phase::Answered => return Err(QuizError::AlreadyAnswered),
            Phase::AwaitingAnswer => {}
        }
        if self.state.hint_used {
            return Err(QuizError::HintAlreadyUsed);
        }

        let text = self
            .subject()
            .and_then(|subject| hint_for(self.state.question_type, subject));
        self.state.hint_used = true;
        self.state.hint_available = false;

        Ok(match text {
            Some(text) => {
                debug!("[Quiz] Hint: {}", text);
                self.state.hint_text = Some(text.clone());
                self.events.push(QuizEvent::HintRevealed(text.clone()));
                Hint::Revealed(text)
            }
            None => {
                debug!("[Quiz] No hint data for this question.");
                Hint::Unavailable
            }
        })
    }

    /// Switches category and starts a fresh question. The current one is
    /// dropped unanswered and any scheduled advance goes stale.
    pub fn change_question_type(&mut self, question_type: QuestionType) -> &CountryRecord {
        debug!(
            "[Quiz] Question type {} -> {}",
            self.state.question_type, question_type
        );
        self.state.question_type = question_type;
        self.generate_question()
    }

    pub fn take_events(&mut self) -> Vec<QuizEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        let state = &self.state;
        let subject = self.subject();
        QuizSnapshot {
            phase: self.phase(),
            question_type: state.question_type,
            prompt: subject.map(|country| Prompt::of(state.question_type, country)),
            options: state.options.clone(),
            selected: state.selected_option.clone(),
            selected_correct: state
                .selected_option
                .as_ref()
                .zip(subject)
                .map(|(selected, country)| *selected == country.name),
            score: state.score,
            correct_count: state.correct_count,
            incorrect_count: state.incorrect_count,
            progress: state.progress,
            progress_ratio: state.progress as f32 / self.config.progress_ceiling.max(1) as f32,
            hint_available: state.hint_available,
            hint_text: state.hint_text.clone(),
        }
    }
}

/// Hint text for `country` under `question_type`, or `None` when the needed
/// field is missing. A missing flag description reads as "no data".
pub fn hint_for(question_type: QuestionType, country: &CountryRecord) -> Option<String> {
    let name = &country.name;
    match question_type {
        QuestionType::Flag => {
            let colors = country
                .flag_description
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_else(|| NO_DATA.to_owned());
            Some(format!("The flag of {} has colors {}", name, colors))
        }
        QuestionType::Capital => country
            .first_capital()
            .map(|capital| format!("The capital of {} is {}", name, capital)),
        QuestionType::Borders => country
            .first_border()
            .map(|border| format!("One of the countries bordering {} is {}", name, border)),
    }
}

fn distinct_names(countries: &[CountryRecord]) -> usize {
    countries
        .iter()
        .map(|c| c.name.as_str())
        .collect::<HashSet<_>>()
        .len()
}
