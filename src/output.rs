//! Output formatting and persistence for grading results.
//!
//! Supports debug logging, JSON serialization, plain-text tables and CSV
//! append. Rounding to two decimals happens here and nowhere else.

use std::fmt::{self, Debug};
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{CumulativeResult, Diagnostic, SemesterResult};
use crate::grading::GradingTable;
use crate::stats::PerformanceSummary;

/// One appended line of the results CSV.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    pub timestamp: DateTime<Utc>,
    pub scale: String,
    pub courses: usize,
    pub passed: usize,
    pub failed: usize,
    pub total_credits: f64,
    pub gpa: f64,
}

impl ResultRecord {
    pub fn from_semester(table: &GradingTable, result: &SemesterResult) -> Self {
        let summary = PerformanceSummary::from_semester(result);

        ResultRecord {
            timestamp: Utc::now(),
            scale: table.name().unwrap_or("custom").to_string(),
            courses: summary.total_courses,
            passed: summary.passed_courses,
            failed: summary.failed_courses,
            total_credits: result.total_credits,
            gpa: round2(result.gpa),
        }
    }
}

/// Rounds to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl Debug) {
    debug!("{:#?}", value);
}

/// Serializes a value as pretty-printed JSON.
pub fn to_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn label(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn write_diagnostics(f: &mut fmt::Formatter<'_>, diagnostics: &[Diagnostic]) -> fmt::Result {
    for diagnostic in diagnostics {
        match diagnostic {
            Diagnostic::ZeroTotalCredits => {
                writeln!(f, "note: no credit hours counted, average reported as 0")?
            }
            Diagnostic::ZeroCreditSemester { index } => {
                writeln!(f, "note: semester {} has zero credit hours", index + 1)?
            }
        }
    }
    Ok(())
}

/// Per-course breakdown followed by GPA, credit total and pass/fail counts.
pub struct SemesterTable<'a>(pub &'a SemesterResult);

impl fmt::Display for SemesterTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;

        writeln!(
            f,
            "{:<10} {:<28} {:>6} {:>7} {:>5} {:>7} {:>8}",
            "Code", "Title", "Credit", "Marks", "Grade", "Points", "CrPoints"
        )?;
        for course in &result.graded_courses {
            writeln!(
                f,
                "{:<10} {:<28} {:>6} {:>7} {:>5} {:>7.2} {:>8.2}",
                label(course.entry.code.as_deref()),
                label(course.entry.title.as_deref()),
                course.entry.credit_hours,
                course.entry.mark,
                course.letter,
                course.grade_point,
                course.credit_points,
            )?;
        }

        let summary = PerformanceSummary::from_semester(result);
        writeln!(f)?;
        writeln!(f, "GPA: {:.2}", round2(result.gpa))?;
        writeln!(f, "Total credit hours: {}", result.total_credits)?;
        writeln!(
            f,
            "Courses: {}  Passed: {} ({:.1}%)  Failed: {}",
            summary.total_courses,
            summary.passed_courses,
            summary.pass_pct(),
            summary.failed_courses
        )?;
        write_diagnostics(f, &result.diagnostics)
    }
}

/// CGPA with the per-semester quality-point breakdown.
pub struct CumulativeTable<'a>(pub &'a CumulativeResult);

impl fmt::Display for CumulativeTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;

        writeln!(f, "{:<9} {:>6} {:>8} {:>8}", "Semester", "GPA", "Credits", "Points")?;
        for (index, record) in result.per_semester.iter().enumerate() {
            writeln!(
                f,
                "{:<9} {:>6.2} {:>8} {:>8.2}",
                index + 1,
                record.gpa,
                record.total_credits,
                record.quality_points()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "CGPA: {:.2}", round2(result.cgpa))?;
        writeln!(f, "Total quality points: {:.2}", result.total_quality_points())?;
        writeln!(f, "Total credit hours: {}", result.total_credits)?;
        write_diagnostics(f, &result.diagnostics)
    }
}

/// Bands of a scale, highest first, then its pass mark and top grade point.
pub struct ScaleTable<'a>(pub &'a GradingTable);

impl fmt::Display for ScaleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.0;

        writeln!(f, "Scale: {}", table.name().unwrap_or("custom"))?;
        for band in table.bands() {
            writeln!(
                f,
                "{:<3} {:>3}-{:<3} ({:.2})",
                band.letter, band.lower_bound, band.upper_bound, band.grade_point
            )?;
        }

        match table.pass_mark() {
            Some(mark) => writeln!(f, "Pass mark: {mark}")?,
            None => writeln!(f, "Pass mark: none")?,
        }
        writeln!(f, "Max grade point: {:.2}", table.max_grade_point())
    }
}

/// Appends a [`ResultRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, record: &ResultRecord) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
