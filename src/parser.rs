//! Readers for course lists, semester histories and custom grading scales.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::aggregate::{CourseEntry, SemesterRecord};
use crate::grading::{GradeBand, GradingTable};

/// On-disk shape of a custom grading scale.
///
/// ```json
/// {
///   "name": "pass-fail",
///   "bands": [
///     { "lower_bound": 50, "upper_bound": 100, "letter": "P", "grade_point": 1.0 },
///     { "lower_bound": 0,  "upper_bound": 49,  "letter": "F", "grade_point": 0.0 }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
struct ScaleFile {
    #[serde(default)]
    name: Option<String>,
    bands: Vec<GradeBand>,
}

/// Reads course rows (`code,title,credit_hours,mark`) from a CSV file with headers.
/// `code` and `title` may be empty or omitted.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_courses(path: &Path) -> Result<Vec<CourseEntry>> {
    let rows =
        read_csv(path).with_context(|| format!("reading courses from {}", path.display()))?;
    debug!(courses = rows.len(), "Courses loaded");
    Ok(rows)
}

/// Reads semester rows (`gpa,total_credits`) from a CSV file with headers.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_semesters(path: &Path) -> Result<Vec<SemesterRecord>> {
    let rows =
        read_csv(path).with_context(|| format!("reading semesters from {}", path.display()))?;
    debug!(semesters = rows.len(), "Semesters loaded");
    Ok(rows)
}

/// Loads and validates a grading scale from a JSON file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_scale(path: &Path) -> Result<GradingTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading scale file {}", path.display()))?;
    let file: ScaleFile = serde_json::from_str(&content)
        .with_context(|| format!("parsing scale file {}", path.display()))?;

    let name = file.name.unwrap_or_else(|| path.display().to_string());
    let table = GradingTable::named(name, file.bands)
        .with_context(|| format!("validating scale file {}", path.display()))?;

    debug!(bands = table.bands().len(), "Scale loaded");
    Ok(table)
}

fn read_csv<T>(path: &Path) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: T = result?;
        rows.push(record);
    }

    Ok(rows)
}
