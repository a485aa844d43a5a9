use crate::aggregate::types::{CourseEntry, Diagnostic, GradedCourse, SemesterResult};
use crate::aggregate::utility::weighted_average;
use crate::error::{GradeError, Result};
use crate::grading::GradingTable;

/// Grades every course against `table` and reduces them to a semester GPA.
///
/// Credit hours must be positive. An empty course list is valid and yields a
/// GPA of 0 with [`Diagnostic::ZeroTotalCredits`].
///
/// # Errors
///
/// [`GradeError::InvalidCredit`] for non-positive credit hours or when the
/// credit or credit-point total overflows, and [`GradeError::OutOfRange`] for
/// marks the table cannot grade.
pub fn grade_courses(entries: &[CourseEntry], table: &GradingTable) -> Result<SemesterResult> {
    let mut graded_courses = Vec::with_capacity(entries.len());
    let mut running_credits = 0.0;
    let mut running_points = 0.0;

    for (index, entry) in entries.iter().enumerate() {
        let invalid_credit = || GradeError::InvalidCredit {
            index,
            credits: entry.credit_hours,
        };

        if !entry.credit_hours.is_finite() || entry.credit_hours <= 0.0 {
            return Err(invalid_credit());
        }

        let band = table.lookup(entry.mark)?;
        let credit_points = band.grade_point * entry.credit_hours;

        running_credits += entry.credit_hours;
        running_points += credit_points;
        if !running_credits.is_finite() || !running_points.is_finite() {
            return Err(invalid_credit());
        }

        graded_courses.push(GradedCourse {
            entry: entry.clone(),
            letter: band.letter.clone(),
            grade_point: band.grade_point,
            credit_points,
        });
    }

    let (gpa, total_credits) = weighted_average(
        graded_courses
            .iter()
            .map(|course| (course.grade_point, course.entry.credit_hours)),
    );

    let mut diagnostics = Vec::new();
    if total_credits == 0.0 {
        diagnostics.push(Diagnostic::ZeroTotalCredits);
    }

    Ok(SemesterResult {
        gpa,
        total_credits,
        graded_courses,
        diagnostics,
    })
}
