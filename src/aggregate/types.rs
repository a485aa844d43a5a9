//! Data types consumed and produced by the aggregation functions.

use serde::{Deserialize, Serialize};

/// One course as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub credit_hours: f64,
    pub mark: f64,
}

impl CourseEntry {
    pub fn new(mark: f64, credit_hours: f64) -> Self {
        Self {
            code: None,
            title: None,
            credit_hours,
            mark,
        }
    }

    /// Attach a course code and title for display.
    pub fn with_label(mut self, code: &str, title: &str) -> Self {
        self.code = Some(code.to_string());
        self.title = Some(title.to_string());
        self
    }
}

/// A [`CourseEntry`] with its grade resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedCourse {
    #[serde(flatten)]
    pub entry: CourseEntry,
    pub letter: String,
    pub grade_point: f64,
    pub credit_points: f64,
}

/// Non-fatal findings attached to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Nothing carried weight; the average is reported as 0.
    ZeroTotalCredits,
    /// The semester at `index` has zero credits and contributes nothing.
    ZeroCreditSemester { index: usize },
}

/// GPA for one semester, with the per-course breakdown in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterResult {
    pub gpa: f64,
    pub total_credits: f64,
    pub graded_courses: Vec<GradedCourse>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A semester as an input to CGPA: either computed here or recorded elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    pub gpa: f64,
    pub total_credits: f64,
}

impl SemesterRecord {
    pub fn new(gpa: f64, total_credits: f64) -> Self {
        Self { gpa, total_credits }
    }

    /// GPA weighted by credits.
    pub fn quality_points(&self) -> f64 {
        self.gpa * self.total_credits
    }
}

impl From<&SemesterResult> for SemesterRecord {
    fn from(result: &SemesterResult) -> Self {
        Self::new(result.gpa, result.total_credits)
    }
}

/// CGPA over a sequence of semesters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeResult {
    pub cgpa: f64,
    pub total_credits: f64,
    pub per_semester: Vec<SemesterRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CumulativeResult {
    pub fn total_quality_points(&self) -> f64 {
        self.per_semester.iter().map(SemesterRecord::quality_points).sum()
    }
}
