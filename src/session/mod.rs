//! Quiz session state machine
//!
//! A session walks through three pages:
//!
//! ```text
//! Start --begin--> Answering --finish--> Result --reset--> Start
//! ```
//!
//! Every transition is a method on [`Session`] that either moves to the next
//! page or returns a [`SessionError`] and leaves the session untouched.
//! Nothing here performs I/O; persistence and rendering live in [`flow`].

pub mod flow;
pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use flow::{apply, Action, PhotoCard, QuizContext, Screen, View};
pub use store::SessionStore;

/// Highest age accepted for the player and for guesses
pub const MAX_AGE: u32 = 120;

/// Smallest guess that counts as an answer
pub const MIN_GUESS: u32 = 1;

/// Recoverable session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please fill in your age and profession to start")]
    FormNotSubmitted,

    #[error("Age must be between 0 and {max}, got {0}", max = MAX_AGE)]
    AgeOutOfRange(u32),

    #[error("Cannot {action} from the {from} page")]
    InvalidTransition { from: Page, action: &'static str },

    #[error("Expected {expected} guesses, got {got}")]
    GuessCountMismatch { expected: usize, got: usize },

    #[error("Please fill in ALL the ages (minimum {min}) before finishing! Missing: {}", photo_list(.missing), min = MIN_GUESS)]
    IncompleteGuesses { missing: Vec<usize> },
}

fn photo_list(indexes: &[usize]) -> String {
    indexes
        .iter()
        .map(|i| format!("photo {}", i + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Page the session is currently on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Start,
    Answering,
    Result,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Answering => "answering",
            Self::Result => "result",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contents of the start page form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileForm {
    pub age: u32,
    #[serde(default)]
    pub profession: String,
}

/// Everything persisted for a completed session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub declared_age: u32,
    pub declared_profession: String,
    pub guesses: Vec<u32>,
}

/// One player's pass through the quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    page: Page,
    declared_age: Option<u32>,
    declared_profession: String,
    guesses: Vec<Option<u32>>,
}

impl Session {
    /// Fresh session with one empty guess slot per photo
    pub fn new(photo_count: usize) -> Self {
        Self {
            page: Page::Start,
            declared_age: None,
            declared_profession: String::new(),
            guesses: vec![None; photo_count],
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn declared_age(&self) -> Option<u32> {
        self.declared_age
    }

    pub fn declared_profession(&self) -> &str {
        &self.declared_profession
    }

    pub fn guesses(&self) -> &[Option<u32>] {
        &self.guesses
    }

    fn expect_page(&self, expected: Page, action: &'static str) -> Result<(), SessionError> {
        if self.page != expected {
            return Err(SessionError::InvalidTransition {
                from: self.page,
                action,
            });
        }
        Ok(())
    }

    /// Start → Answering with the submitted profile
    pub fn begin(&mut self, form: Option<ProfileForm>) -> Result<(), SessionError> {
        self.expect_page(Page::Start, "begin")?;
        let form = form.ok_or(SessionError::FormNotSubmitted)?;
        if form.age > MAX_AGE {
            return Err(SessionError::AgeOutOfRange(form.age));
        }

        self.declared_age = Some(form.age);
        self.declared_profession = form.profession.trim().to_string();
        self.page = Page::Answering;
        Ok(())
    }

    /// Store the values currently entered on the answering page
    pub fn record_guesses(&mut self, guesses: Vec<Option<u32>>) -> Result<(), SessionError> {
        self.expect_page(Page::Answering, "record guesses")?;
        if guesses.len() != self.guesses.len() {
            return Err(SessionError::GuessCountMismatch {
                expected: self.guesses.len(),
                got: guesses.len(),
            });
        }
        self.guesses = guesses;
        Ok(())
    }

    /// Every guess, provided none is missing or below [`MIN_GUESS`]
    pub fn complete_guesses(&self) -> Result<Vec<u32>, SessionError> {
        let missing: Vec<usize> = self
            .guesses
            .iter()
            .enumerate()
            .filter(|(_, guess)| !matches!(guess, Some(value) if *value >= MIN_GUESS))
            .map(|(index, _)| index)
            .collect();

        if !missing.is_empty() {
            return Err(SessionError::IncompleteGuesses { missing });
        }
        Ok(self.guesses.iter().flatten().copied().collect())
    }

    /// What `finish` would persist, without changing the page
    pub fn submission(&self) -> Result<Submission, SessionError> {
        self.expect_page(Page::Answering, "finish")?;
        let guesses = self.complete_guesses()?;
        let declared_age = self.declared_age.ok_or(SessionError::FormNotSubmitted)?;

        Ok(Submission {
            declared_age,
            declared_profession: self.declared_profession.clone(),
            guesses,
        })
    }

    /// Answering → Result, guarded by a complete set of guesses
    pub fn finish(&mut self) -> Result<Submission, SessionError> {
        let submission = self.submission()?;
        self.page = Page::Result;
        Ok(submission)
    }

    /// Result → Start, clearing everything the player entered
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.expect_page(Page::Result, "restart")?;
        *self = Self::new(self.guesses.len());
        Ok(())
    }
}
