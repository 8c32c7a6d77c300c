//! Form state and result view for a calculation request.
//!
//! [`Form`] holds the raw text of each mark field for a semester. Calling
//! [`Form::calculate`] runs the calculator and returns everything a front end
//! needs to redraw: which fields to flag, what to put in the result area and
//! which notification to show.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::calculator::{CategoryKind, Sgpa, Subject, ValidationError, compute_sgpa};
use crate::config::SemesterConfig;
use crate::parser::parse_mark;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Placeholder shown in the result area when there is no valid result.
pub const EMPTY_DISPLAY: &str = "--";

pub const INVALID_MARKS_MESSAGE: &str = "Please enter valid marks (0-100) for all subjects";
pub const ZERO_CREDITS_MESSAGE: &str = "Total credits must be greater than zero";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    Valid,
    Invalid,
}

/// Transient notification. A newer toast replaces the one on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// What the result area shows after a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub display: String,
    /// Category class; `None` for the reset view.
    pub class: Option<CategoryKind>,
    /// Badge text; `None` hides the badge.
    pub badge: Option<String>,
    pub toast: Toast,
}

impl ResultView {
    /// Successful result: the SGPA, its tier class and badge.
    pub fn from_sgpa(sgpa: Sgpa) -> Self {
        let category = sgpa.category();
        ResultView {
            display: sgpa.to_string(),
            class: Some(category.kind),
            badge: Some(category.badge.to_string()),
            toast: Toast::new(category.message),
        }
    }

    /// Reset view with the error surfaced as a notification.
    pub fn from_error(error: &ValidationError) -> Self {
        let message = match error {
            ValidationError::InvalidMark { .. } => INVALID_MARKS_MESSAGE,
            ValidationError::ZeroTotalCredits => ZERO_CREDITS_MESSAGE,
        };
        ResultView {
            display: EMPTY_DISPLAY.to_string(),
            class: None,
            badge: None,
            toast: Toast::new(message),
        }
    }
}

/// Everything produced by one calculation request.
#[derive(Debug, Clone, PartialEq)]
pub struct FormOutcome {
    pub subjects: Vec<Subject>,
    pub fields: Vec<(String, FieldState)>,
    pub view: ResultView,
    pub result: Result<Sgpa, ValidationError>,
}

impl FormOutcome {
    pub fn field(&self, id: &str) -> Option<FieldState> {
        self.fields.iter().find(|(f, _)| f == id).map(|(_, state)| *state)
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, state)| *state == FieldState::Invalid)
            .map(|(id, _)| id.as_str())
    }
}

/// Builds the outcome for an already assembled subject list.
pub fn evaluate(subjects: Vec<Subject>) -> FormOutcome {
    let result = compute_sgpa(&subjects);

    // flag by position, not id, so a repeated id cannot mark the wrong row
    let rejected = matches!(result, Err(ValidationError::InvalidMark { .. }));
    let fields = subjects
        .iter()
        .map(|s| {
            let state = if rejected && !s.has_valid_mark() {
                FieldState::Invalid
            } else {
                FieldState::Valid
            };
            (s.id.clone(), state)
        })
        .collect();

    let view = match &result {
        Ok(sgpa) => {
            info!(sgpa = %sgpa, class = %sgpa.category().kind, "Calculation succeeded");
            ResultView::from_sgpa(*sgpa)
        }
        Err(e) => {
            info!(error = %e, kind = e.kind(), "Calculation rejected");
            ResultView::from_error(e)
        }
    };

    FormOutcome {
        subjects,
        fields,
        view,
        result,
    }
}

/// Live check while a field is being edited.
///
/// Only a value that parses and falls outside 0-100 is flagged; text that
/// does not parse yet is left alone until the form is submitted.
pub fn input_feedback(raw: &str) -> FieldState {
    match parse_mark(raw) {
        Some(m) if !(0..=100).contains(&m) => FieldState::Invalid,
        _ => FieldState::Valid,
    }
}

/// Raw mark fields for every subject of a semester.
#[derive(Debug, Clone)]
pub struct Form<'a> {
    semester: &'a SemesterConfig,
    values: HashMap<String, String>,
}

impl<'a> Form<'a> {
    pub fn new(semester: &'a SemesterConfig) -> Self {
        Self {
            semester,
            values: HashMap::new(),
        }
    }

    /// Sets the raw text of a field. Returns `false` for an unknown subject id.
    pub fn set(&mut self, id: &str, raw: impl Into<String>) -> bool {
        if self.semester.subject(id).is_none() {
            return false;
        }
        self.values.insert(id.to_string(), raw.into());
        true
    }

    pub fn get(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or("")
    }

    /// Subjects in semester order with their current field values parsed.
    pub fn subjects(&self) -> Vec<Subject> {
        self.semester
            .subjects
            .iter()
            .map(|s| Subject::new(s.id.clone(), s.credits, parse_mark(self.get(&s.id))))
            .collect()
    }

    pub fn calculate(&self) -> FormOutcome {
        debug!(semester = %self.semester.name, filled = self.values.len(), "Calculating");
        evaluate(self.subjects())
    }
}
