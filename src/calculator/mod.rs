//! Grade point conversion, SGPA aggregation and performance classification.
//!
//! Everything in this module is a pure function of its input: marks are
//! turned into grade points, weighted by credits into an SGPA, and the SGPA
//! is mapped to a display tier.

pub mod aggregate;
pub mod classify;
pub mod grade;
pub mod types;
pub mod utility;

pub use aggregate::{compute_sgpa, subject_breakdown, total_credits};
pub use classify::classify;
pub use grade::grade_point;
pub use types::{Category, CategoryKind, Sgpa, Subject, SubjectResult, ValidationError};
