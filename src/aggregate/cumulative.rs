use crate::aggregate::types::{CumulativeResult, Diagnostic, SemesterRecord};
use crate::aggregate::utility::weighted_average;
use crate::error::{GradeError, Result};
use crate::grading::GradingTable;

/// Combines semester records into a credit-weighted CGPA.
///
/// A zero-credit semester is allowed; it contributes no weight and is flagged
/// with [`Diagnostic::ZeroCreditSemester`].
///
/// # Errors
///
/// [`GradeError::InvalidCredit`] for negative or non-finite credits, or when
/// the credit or quality-point total overflows. [`GradeError::InvalidGpa`]
/// for a negative or non-finite GPA.
pub fn compute_cgpa(records: &[SemesterRecord]) -> Result<CumulativeResult> {
    let mut diagnostics = Vec::new();
    let mut running_credits = 0.0;
    let mut running_points = 0.0;

    for (index, record) in records.iter().enumerate() {
        running_credits += record.total_credits;
        running_points += record.quality_points();

        if !record.total_credits.is_finite()
            || record.total_credits < 0.0
            || !running_credits.is_finite()
        {
            return Err(GradeError::InvalidCredit {
                index,
                credits: record.total_credits,
            });
        }
        if !record.gpa.is_finite() || record.gpa < 0.0 {
            return Err(GradeError::InvalidGpa {
                index,
                gpa: record.gpa,
            });
        }
        if !running_points.is_finite() {
            return Err(GradeError::InvalidCredit {
                index,
                credits: record.total_credits,
            });
        }
        if record.total_credits == 0.0 {
            diagnostics.push(Diagnostic::ZeroCreditSemester { index });
        }
    }

    let (cgpa, total_credits) =
        weighted_average(records.iter().map(|r| (r.gpa, r.total_credits)));

    if total_credits == 0.0 {
        diagnostics.push(Diagnostic::ZeroTotalCredits);
    }

    Ok(CumulativeResult {
        cgpa,
        total_credits,
        per_semester: records.to_vec(),
        diagnostics,
    })
}

/// [`compute_cgpa`] for records graded on `table`: no GPA may exceed the
/// table's highest grade point.
///
/// # Errors
///
/// [`GradeError::InvalidGpa`] for a GPA above the scale maximum, plus
/// everything [`compute_cgpa`] rejects.
pub fn compute_cgpa_on_scale(
    records: &[SemesterRecord],
    table: &GradingTable,
) -> Result<CumulativeResult> {
    let ceiling = table.max_grade_point();

    if let Some((index, record)) = records
        .iter()
        .enumerate()
        .find(|(_, record)| record.gpa > ceiling)
    {
        return Err(GradeError::InvalidGpa {
            index,
            gpa: record.gpa,
        });
    }

    compute_cgpa(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::grade_courses;
    use crate::aggregate::types::CourseEntry;

    #[test]
    fn test_two_semesters() {
        let records = [SemesterRecord::new(3.0, 15.0), SemesterRecord::new(3.5, 18.0)];
        let result = compute_cgpa(&records).unwrap();

        assert!((result.cgpa - 108.0 / 33.0).abs() < 1e-12);
        assert!((result.cgpa - 3.2727).abs() < 1e-4);
        assert_eq!(result.total_credits, 33.0);
        assert_eq!(result.per_semester, records.to_vec());
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.total_quality_points(), 108.0);
    }

    #[test]
    fn test_zero_credit_semester_is_flagged() {
        let records = [SemesterRecord::new(2.0, 0.0), SemesterRecord::new(3.0, 12.0)];
        let result = compute_cgpa(&records).unwrap();

        assert_eq!(result.cgpa, 3.0);
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::ZeroCreditSemester { index: 0 }]
        );
    }

    #[test]
    fn test_no_credits_at_all() {
        let result = compute_cgpa(&[]).unwrap();
        assert_eq!(result.cgpa, 0.0);
        assert_eq!(result.diagnostics, vec![Diagnostic::ZeroTotalCredits]);

        let result = compute_cgpa(&[SemesterRecord::new(3.0, 0.0)]).unwrap();
        assert_eq!(result.cgpa, 0.0);
        assert_eq!(
            result.diagnostics,
            vec![
                Diagnostic::ZeroCreditSemester { index: 0 },
                Diagnostic::ZeroTotalCredits
            ]
        );
    }

    #[test]
    fn test_negative_credits_rejected() {
        let records = [SemesterRecord::new(3.0, 15.0), SemesterRecord::new(3.0, -1.0)];
        assert!(matches!(
            compute_cgpa(&records),
            Err(GradeError::InvalidCredit { index: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_gpa_rejected() {
        let records = [SemesterRecord::new(-0.5, 15.0)];
        assert!(matches!(
            compute_cgpa(&records),
            Err(GradeError::InvalidGpa { index: 0, .. })
        ));
    }

    #[test]
    fn test_overflowing_credit_total_rejected() {
        let records = [SemesterRecord::new(1.0, 1e308), SemesterRecord::new(1.0, 1e308)];
        assert!(matches!(
            compute_cgpa(&records),
            Err(GradeError::InvalidCredit { index: 1, .. })
        ));

        let records = [SemesterRecord::new(4.0, 1e308)];
        assert!(matches!(
            compute_cgpa(&records),
            Err(GradeError::InvalidCredit { index: 0, .. })
        ));
    }

    #[test]
    fn test_gpa_above_scale_maximum_rejected() {
        let table = GradingTable::eight_band().unwrap();
        let records = [SemesterRecord::new(40.0, 10.0), SemesterRecord::new(3.0, 10.0)];

        assert!(matches!(
            compute_cgpa_on_scale(&records, &table),
            Err(GradeError::InvalidGpa { index: 0, .. })
        ));

        let records = [SemesterRecord::new(4.0, 10.0), SemesterRecord::new(3.0, 10.0)];
        let result = compute_cgpa_on_scale(&records, &table).unwrap();
        assert_eq!(result.cgpa, 3.5);
    }

    #[test]
    fn test_cgpa_from_computed_semesters() {
        let table = GradingTable::eight_band().unwrap();
        let first = grade_courses(&[CourseEntry::new(90.0, 3.0)], &table).unwrap();
        let second = grade_courses(&[CourseEntry::new(45.0, 3.0)], &table).unwrap();

        let records: Vec<SemesterRecord> = [&first, &second].into_iter().map(Into::into).collect();
        let result = compute_cgpa(&records).unwrap();

        assert_eq!(result.cgpa, 2.0);
        assert_eq!(result.total_credits, 6.0);
    }
}
