use crate::calculator::grade::grade_point;
use crate::calculator::types::{Sgpa, Subject, SubjectResult, ValidationError};
use crate::calculator::utility::ratio_in_hundredths;
use tracing::debug;

/// Computes the credit-weighted grade point average of `subjects`.
///
/// Validation is all-or-nothing: if any mark is missing or outside 0-100 the
/// whole request fails with [`ValidationError::InvalidMark`] listing every
/// offending subject id in input order. Marks are checked before credits, so
/// a request that is wrong both ways reports the marks.
///
/// The result is rounded half up to two decimals.
pub fn compute_sgpa(subjects: &[Subject]) -> Result<Sgpa, ValidationError> {
    let invalid_ids: Vec<String> = subjects
        .iter()
        .filter(|s| !s.has_valid_mark())
        .map(|s| s.id.clone())
        .collect();

    if !invalid_ids.is_empty() {
        debug!(invalid = invalid_ids.len(), "Rejecting marks");
        return Err(ValidationError::InvalidMark { invalid_ids });
    }

    let mut weighted_total = 0u64;

    for subject in subjects {
        // validated above
        let mark = subject.mark.unwrap_or_default();
        weighted_total += u64::from(subject.credits) * u64::from(grade_point(mark));
    }
    let credit_sum = total_credits(subjects.iter().map(|s| s.credits));

    let hundredths =
        ratio_in_hundredths(weighted_total, credit_sum).ok_or(ValidationError::ZeroTotalCredits)?;

    debug!(weighted_total, credit_sum, hundredths, "SGPA computed");

    // at most 10 * credit_sum / credit_sum, i.e. 1000
    Ok(Sgpa::from_hundredths(hundredths as u32))
}

/// Sum of credit values, widened so it cannot overflow.
pub fn total_credits<I: IntoIterator<Item = u32>>(credits: I) -> u64 {
    credits.into_iter().map(u64::from).sum()
}

/// Grade point and credit points for every subject with a valid mark.
pub fn subject_breakdown(subjects: &[Subject]) -> Vec<SubjectResult> {
    subjects
        .iter()
        .filter(|s| s.has_valid_mark())
        .filter_map(|s| {
            let mark = s.mark?;
            let gp = grade_point(mark);
            Some(SubjectResult {
                id: s.id.clone(),
                credits: s.credits,
                mark,
                grade_point: gp,
                credit_points: u64::from(s.credits) * u64::from(gp),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn subject(id: &str, credits: u32, mark: i64) -> Subject {
        Subject::new(id, credits, Some(mark))
    }

    #[test]
    fn test_weighted_average() {
        let subjects = vec![subject("A", 4, 90), subject("B", 3, 80)];
        let sgpa = compute_sgpa(&subjects).unwrap();
        assert_eq!(sgpa.hundredths(), 957);
        assert_eq!(sgpa.to_string(), "9.57");
    }

    #[test]
    fn test_single_failing_subject() {
        let subjects = vec![subject("A", 3, 39)];
        assert_eq!(compute_sgpa(&subjects).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_all_top_marks() {
        let subjects = vec![subject("A", 4, 100), subject("B", 2, 95)];
        assert_eq!(compute_sgpa(&subjects).unwrap().to_string(), "10.00");
    }

    #[test]
    fn test_mark_out_of_range() {
        let subjects = vec![subject("A", 4, 105)];
        assert_eq!(
            compute_sgpa(&subjects),
            Err(ValidationError::InvalidMark {
                invalid_ids: vec!["A".to_string()]
            })
        );
    }

    #[test]
    fn test_reports_every_invalid_subject_in_order() {
        let subjects = vec![
            subject("A", 4, -1),
            subject("B", 3, 75),
            Subject::new("C", 3, None),
            subject("D", 2, 101),
        ];
        let err = compute_sgpa(&subjects).unwrap_err();
        assert_eq!(err.invalid_ids(), ["A", "C", "D"]);
    }

    #[test]
    fn test_zero_total_credits() {
        let subjects = vec![subject("A", 0, 90)];
        assert_eq!(compute_sgpa(&subjects), Err(ValidationError::ZeroTotalCredits));
    }

    #[test]
    fn test_empty_request_has_zero_credits() {
        assert_eq!(compute_sgpa(&[]), Err(ValidationError::ZeroTotalCredits));
    }

    #[test]
    fn test_invalid_mark_wins_over_zero_credits() {
        let subjects = vec![subject("A", 0, 200)];
        assert_eq!(compute_sgpa(&subjects).unwrap_err().kind(), "invalid_mark");
    }

    #[test]
    fn test_rounds_half_up() {
        // (1*10 + 7*9) / 8 = 73/8 = 9.125
        let subjects = vec![subject("A", 1, 95), subject("B", 7, 85)];
        assert_eq!(compute_sgpa(&subjects).unwrap().to_string(), "9.13");
    }

    #[test]
    fn test_zero_credit_subject_is_ignored_in_average() {
        let subjects = vec![subject("A", 4, 90), subject("lab", 0, 10)];
        assert_eq!(compute_sgpa(&subjects).unwrap().to_string(), "10.00");
    }

    #[test]
    fn test_subject_breakdown() {
        let subjects = vec![subject("A", 4, 90), Subject::new("B", 3, None), subject("C", 3, 47)];
        let lines = subject_breakdown(&subjects);
        assert_eq!(
            lines,
            vec![
                SubjectResult {
                    id: "A".into(),
                    credits: 4,
                    mark: 90,
                    grade_point: 10,
                    credit_points: 40,
                },
                SubjectResult {
                    id: "C".into(),
                    credits: 3,
                    mark: 47,
                    grade_point: 5,
                    credit_points: 15,
                },
            ]
        );
        assert_eq!(total_credits(subjects.iter().map(|s| s.credits)), 10);
    }

    #[test]
    fn test_large_credit_values() {
        let subjects = vec![subject("A", 500_000_000, 90), subject("B", u32::MAX, 85)];
        assert_eq!(compute_sgpa(&subjects).unwrap().to_string(), "9.10");

        let lines = subject_breakdown(&subjects);
        assert_eq!(lines[0].credit_points, 5_000_000_000);
        assert_eq!(lines[1].credit_points, u64::from(u32::MAX) * 9);
        assert_eq!(total_credits([u32::MAX, u32::MAX]), 2 * u64::from(u32::MAX));
    }

    fn subjects_strategy() -> impl Strategy<Value = Vec<Subject>> {
        prop::collection::vec((1u32..=6, 0i64..=100), 1..10).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (credits, mark))| Subject::new(format!("s{i}"), credits, Some(mark)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn sgpa_stays_in_range(subjects in subjects_strategy()) {
            let sgpa = compute_sgpa(&subjects).unwrap();
            prop_assert!(sgpa.hundredths() <= 1000);
        }

        #[test]
        fn sgpa_is_idempotent(subjects in subjects_strategy()) {
            prop_assert_eq!(compute_sgpa(&subjects), compute_sgpa(&subjects));
        }
    }
}
