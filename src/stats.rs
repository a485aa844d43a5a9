use crate::aggregate::SemesterResult;

/// Pass/fail counts for one semester.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceSummary {
    pub total_courses: usize,
    pub passed_courses: usize,
    pub failed_courses: usize,
}

impl PerformanceSummary {
    /// A course passes when it earned a non-zero grade point.
    pub fn from_semester(result: &SemesterResult) -> Self {
        let total_courses = result.graded_courses.len();
        let passed_courses = result
            .graded_courses
            .iter()
            .filter(|course| course.grade_point > 0.0)
            .count();

        PerformanceSummary {
            total_courses,
            passed_courses,
            failed_courses: total_courses - passed_courses,
        }
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn pass_pct(&self) -> f64 {
        Self::pct(self.passed_courses, self.total_courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{CourseEntry, grade_courses};
    use crate::grading::GradingTable;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(PerformanceSummary::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(PerformanceSummary::pct(50, 100), 50.0);
        assert_eq!(PerformanceSummary::pct(1, 4), 25.0);
    }

    #[test]
    fn test_from_empty_semester() {
        let table = GradingTable::eight_band().unwrap();
        let result = grade_courses(&[], &table).unwrap();

        assert_eq!(
            PerformanceSummary::from_semester(&result),
            PerformanceSummary::default()
        );
    }

    #[test]
    fn test_pass_fail_split_at_pass_mark() {
        let table = GradingTable::eight_band().unwrap();
        let entries = [
            CourseEntry::new(50.0, 3.0),
            CourseEntry::new(49.0, 3.0),
            CourseEntry::new(88.0, 2.0),
            CourseEntry::new(0.0, 1.0),
        ];
        let result = grade_courses(&entries, &table).unwrap();
        let summary = PerformanceSummary::from_semester(&result);

        assert_eq!(summary.total_courses, 4);
        assert_eq!(summary.passed_courses, 2);
        assert_eq!(summary.failed_courses, 2);
        assert_eq!(summary.pass_pct(), 50.0);
    }
}
