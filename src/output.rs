//! Rendering of calculation outcomes.
//!
//! Supports debug pretty-printing, JSON serialization, and a plain text
//! summary for terminals.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

use crate::calculator::{Sgpa, SubjectResult, subject_breakdown, total_credits};
use crate::form::{FieldState, FormOutcome, ResultView};

/// Serializable summary of one calculation request.
#[derive(Debug, Serialize)]
pub struct Report {
    pub calculated_at: DateTime<Utc>,
    pub semester: Option<String>,
    pub total_credits: u64,
    pub sgpa: Option<Sgpa>,
    pub error: Option<ReportError>,
    pub subjects: Vec<SubjectResult>,
    pub view: ResultView,
}

#[derive(Debug, Serialize)]
pub struct ReportError {
    pub kind: &'static str,
    pub invalid_ids: Vec<String>,
}

impl Report {
    pub fn from_outcome(outcome: &FormOutcome) -> Self {
        let (sgpa, error) = match &outcome.result {
            Ok(sgpa) => (Some(*sgpa), None),
            Err(e) => (
                None,
                Some(ReportError {
                    kind: e.kind(),
                    invalid_ids: e.invalid_ids().to_vec(),
                }),
            ),
        };

        Report {
            calculated_at: Utc::now(),
            semester: None,
            total_credits: total_credits(outcome.subjects.iter().map(|s| s.credits)),
            sgpa,
            error,
            subjects: subject_breakdown(&outcome.subjects),
            view: outcome.view.clone(),
        }
    }

    pub fn with_semester(mut self, name: &str) -> Self {
        self.semester = Some(name.to_string());
        self
    }
}

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Renders the report as pretty-printed JSON.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Renders the outcome as a human-readable summary.
pub fn render_text(outcome: &FormOutcome) -> String {
    let mut out = String::new();

    // fields are built one per subject, in the same order
    for (subject, (id, state)) in outcome.subjects.iter().zip(&outcome.fields) {
        let mark = subject
            .mark
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        let flag = match state {
            FieldState::Valid => "",
            FieldState::Invalid => "  <- invalid",
        };
        let credits = subject.credits;
        let _ = writeln!(out, "{id:<16} {credits:>2} cr  {mark:>4}{flag}");
    }

    let view = &outcome.view;
    let _ = writeln!(out);
    match &view.badge {
        Some(badge) => {
            let _ = writeln!(out, "SGPA: {}  [{}]", view.display, badge);
        }
        None => {
            let _ = writeln!(out, "SGPA: {}", view.display);
        }
    }
    let _ = writeln!(out, "{}", view.toast.message);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Subject;
    use crate::form::evaluate;

    fn passing() -> FormOutcome {
        evaluate(vec![
            Subject::new("A", 4, Some(90)),
            Subject::new("B", 3, Some(80)),
        ])
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&Report::from_outcome(&passing()));
    }

    #[test]
    fn test_report_from_success() {
        let report = Report::from_outcome(&passing()).with_semester("Semester 1");
        assert_eq!(report.semester.as_deref(), Some("Semester 1"));
        assert_eq!(report.total_credits, 7);
        assert_eq!(report.sgpa.unwrap().to_string(), "9.57");
        assert!(report.error.is_none());
        assert_eq!(report.subjects.len(), 2);
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&Report::from_outcome(&passing())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sgpa"], 9.57);
        assert_eq!(value["view"]["class"], "excellent");
        assert_eq!(value["view"]["toast"]["duration_ms"], 3000);
        assert_eq!(value["subjects"][1]["grade_point"], 9);
        assert!(value["error"].is_null());
    }

    #[test]
    fn test_render_json_error() {
        let outcome = evaluate(vec![Subject::new("A", 4, Some(105))]);
        let json = render_json(&Report::from_outcome(&outcome)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"]["kind"], "invalid_mark");
        assert_eq!(value["error"]["invalid_ids"][0], "A");
        assert_eq!(value["view"]["display"], "--");
        assert!(value["sgpa"].is_null());
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&passing());
        assert!(text.contains("SGPA: 9.57  [Outstanding! 🏆]"));
        assert!(text.contains("Exceptional performance! Keep it up!"));
    }

    #[test]
    fn test_render_text_marks_invalid_fields() {
        let outcome = evaluate(vec![Subject::new("A", 4, None), Subject::new("B", 3, Some(50))]);
        let text = render_text(&outcome);
        assert!(text.contains("<- invalid"));
        assert!(text.contains("SGPA: --\n"));
        assert_eq!(text.matches("<- invalid").count(), 1);
    }

    #[test]
    fn test_render_text_keeps_rows_with_the_same_id_apart() {
        let outcome = evaluate(vec![Subject::new("A", 4, Some(50)), Subject::new("A", 3, Some(200))]);
        let text = render_text(&outcome);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains(" 4 cr") && lines[0].contains("50"));
        assert!(!lines[0].contains("<- invalid"));
        assert!(lines[1].contains(" 3 cr") && lines[1].contains("200"));
        assert!(lines[1].ends_with("<- invalid"));
    }
}
