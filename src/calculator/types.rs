//! Data types shared by the calculation pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One subject of a calculation request.
///
/// `mark` is `None` when the raw field could not be read as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub credits: u32,
    pub mark: Option<i64>,
}

impl Subject {
    pub fn new(id: impl Into<String>, credits: u32, mark: Option<i64>) -> Self {
        Self {
            id: id.into(),
            credits,
            mark,
        }
    }

    /// A mark is usable when it was parsed and lies in `0..=100`.
    pub fn has_valid_mark(&self) -> bool {
        matches!(self.mark, Some(m) if (0..=100).contains(&m))
    }
}

/// Semester grade point average, stored in hundredths.
///
/// Values are always already rounded to two fractional digits, so the
/// displayed text and the value used for classification agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sgpa {
    hundredths: u32,
}

impl Sgpa {
    pub fn from_hundredths(hundredths: u32) -> Self {
        Self { hundredths }
    }

    pub fn hundredths(self) -> u32 {
        self.hundredths
    }

    pub fn value(self) -> f64 {
        f64::from(self.hundredths) / 100.0
    }
}

impl fmt::Display for Sgpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

impl Serialize for Sgpa {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

/// Reasons a calculation request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more marks are missing, non-numeric, or outside 0-100.
    #[error("invalid marks for subjects: {}", .invalid_ids.join(", "))]
    InvalidMark { invalid_ids: Vec<String> },

    /// The credits of all subjects add up to zero.
    #[error("total credits must be greater than zero")]
    ZeroTotalCredits,
}

impl ValidationError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::InvalidMark { .. } => "invalid_mark",
            ValidationError::ZeroTotalCredits => "zero_total_credits",
        }
    }

    pub fn invalid_ids(&self) -> &[String] {
        match self {
            ValidationError::InvalidMark { invalid_ids } => invalid_ids,
            ValidationError::ZeroTotalCredits => &[],
        }
    }
}

/// Display class shared by one or more tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Excellent,
    Good,
    Average,
    Poor,
}

impl CategoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Excellent => "excellent",
            CategoryKind::Good => "good",
            CategoryKind::Average => "average",
            CategoryKind::Poor => "poor",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performance tier for an SGPA, with the text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub kind: CategoryKind,
    pub badge: &'static str,
    pub message: &'static str,
}

/// Per-subject line of a successful calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectResult {
    pub id: String,
    pub credits: u32,
    pub mark: i64,
    pub grade_point: u8,
    pub credit_points: u64,
}
