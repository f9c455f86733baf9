//! Request-level quiz flow
//!
//! [`apply`] runs one user action against a session and returns a [`View`]
//! describing what to render next. Recoverable problems (an incomplete set
//! of guesses, a stale form posted from another tab) become a warning on
//! the view; database and scoring failures are returned as errors.

use serde::Serialize;
use thiserror::Error;

use super::{Page, ProfileForm, Session, SessionError};
use crate::dataset::Dataset;
use crate::db::{Database, DbError};
use crate::metrics::{Comparison, MetricsError};

/// Errors that abort a request
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Failed to store predictions: {0}")]
    Database(#[from] DbError),

    #[error("Failed to score guesses: {0}")]
    Metrics(#[from] MetricsError),
}

/// Shared, read-mostly resources a transition may need
pub struct QuizContext<'a> {
    pub dataset: &'a Dataset,
    pub db: &'a Database,
}

/// A user interaction
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Re-render the current page
    Show,
    /// Start page form; `None` when nothing was submitted
    Begin(Option<ProfileForm>),
    /// Answering page values, one per photo
    Finish(Vec<Option<u32>>),
    Restart,
}

/// One photo on the answering page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoCard {
    pub index: usize,
    pub image: String,
    pub guess: Option<u32>,
}

/// Page-specific content to render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum Screen {
    Start,
    Answering {
        declared_age: Option<u32>,
        declared_profession: String,
        photos: Vec<PhotoCard>,
    },
    Result {
        declared_age: Option<u32>,
        declared_profession: String,
        comparison: Comparison,
    },
}

/// Everything the UI needs after an action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub screen: Screen,
    pub warning: Option<String>,
}

/// Apply `action` to `session` and describe the resulting page
pub fn apply(session: &mut Session, action: Action, ctx: &QuizContext) -> Result<View, FlowError> {
    let warning = match step(session, action, ctx) {
        Ok(()) => None,
        Err(FlowError::Session(err)) => {
            tracing::warn!("Transition rejected on {} page: {}", session.page(), err);
            Some(err.to_string())
        }
        Err(err) => return Err(err),
    };

    Ok(View {
        screen: render_screen(session, ctx)?,
        warning,
    })
}

fn step(session: &mut Session, action: Action, ctx: &QuizContext) -> Result<(), FlowError> {
    match action {
        Action::Show => {}
        Action::Begin(form) => session.begin(form)?,
        Action::Finish(guesses) => {
            session.record_guesses(guesses)?;

            // Written before the page changes: a failed insert leaves the
            // session on the answering page
            let submission = session.submission()?;
            let id = ctx.db.append_prediction(
                submission.declared_age,
                &submission.declared_profession,
                &submission.guesses,
            )?;
            tracing::info!("Stored predictions as record {}", id);

            session.finish()?;
        }
        Action::Restart => session.reset()?,
    }
    Ok(())
}

fn render_screen(session: &Session, ctx: &QuizContext) -> Result<Screen, FlowError> {
    let screen = match session.page() {
        Page::Start => Screen::Start,
        Page::Answering => Screen::Answering {
            declared_age: session.declared_age(),
            declared_profession: session.declared_profession().to_string(),
            photos: ctx
                .dataset
                .records()
                .iter()
                .zip(session.guesses())
                .map(|(record, guess)| PhotoCard {
                    index: record.index,
                    image: record.image.clone(),
                    guess: *guess,
                })
                .collect(),
        },
        Page::Result => Screen::Result {
            declared_age: session.declared_age(),
            declared_profession: session.declared_profession().to_string(),
            comparison: Comparison::compute(ctx.dataset, &session.complete_guesses()?)?,
        },
    };
    Ok(screen)
}
