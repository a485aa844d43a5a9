use serde::{Deserialize, Serialize};

use crate::error::{GradeError, Result};

/// Lowest mark a table accepts.
pub const MIN_MARK: f64 = 0.0;
/// Highest mark a table accepts.
pub const MAX_MARK: f64 = 100.0;

/// One row of a grading scale: an inclusive mark range bound to a letter and
/// its grade point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub letter: String,
    pub grade_point: f64,
}

impl GradeBand {
    pub fn new(lower_bound: f64, upper_bound: f64, letter: impl Into<String>, grade_point: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            letter: letter.into(),
            grade_point,
        }
    }

    fn check(&self) -> Result<()> {
        let range = format!("{}..={}", self.lower_bound, self.upper_bound);

        if self.letter.trim().is_empty() {
            return Err(GradeError::scale(format!("band {range} has an empty letter")));
        }
        if !self.lower_bound.is_finite() || !self.upper_bound.is_finite() {
            return Err(GradeError::scale(format!(
                "band '{}' has a non-finite bound",
                self.letter
            )));
        }
        if self.lower_bound.fract() != 0.0 || self.upper_bound.fract() != 0.0 {
            return Err(GradeError::scale(format!(
                "band '{}' ({range}) must use whole-mark bounds",
                self.letter
            )));
        }
        if self.lower_bound > self.upper_bound {
            return Err(GradeError::scale(format!(
                "band '{}' has lower bound above upper bound ({range})",
                self.letter
            )));
        }
        if self.lower_bound < MIN_MARK || self.upper_bound > MAX_MARK {
            return Err(GradeError::scale(format!(
                "band '{}' ({range}) lies outside {MIN_MARK}..={MAX_MARK}",
                self.letter
            )));
        }
        if !self.grade_point.is_finite() || self.grade_point < 0.0 {
            return Err(GradeError::scale(format!(
                "band '{}' has invalid grade point {}",
                self.letter, self.grade_point
            )));
        }

        Ok(())
    }
}

/// A validated grading scale.
///
/// Bands cover every whole mark from [`MIN_MARK`] to [`MAX_MARK`] exactly once
/// and are stored in descending order of lower bound. A fractional mark falls
/// into the band with the greatest lower bound not above it, so `84.5` on a
/// scale with `85..=100` and `80..=84` grades as the lower band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradingTable {
    name: Option<String>,
    bands: Vec<GradeBand>,
}

impl GradingTable {
    /// Builds a table from bands given in any order.
    ///
    /// # Errors
    ///
    /// Returns [`GradeError::InvalidScale`] when the bands are empty, malformed,
    /// leave a gap, or overlap.
    pub fn new(bands: Vec<GradeBand>) -> Result<Self> {
        Self::build(None, bands)
    }

    /// Same as [`GradingTable::new`], attaching a display name.
    pub fn named(name: impl Into<String>, bands: Vec<GradeBand>) -> Result<Self> {
        Self::build(Some(name.into()), bands)
    }

    fn build(name: Option<String>, mut bands: Vec<GradeBand>) -> Result<Self> {
        if bands.is_empty() {
            return Err(GradeError::scale("scale has no bands"));
        }

        for band in &bands {
            band.check()?;
        }

        // Bounds are finite at this point.
        bands.sort_by(|a, b| a.lower_bound.total_cmp(&b.lower_bound));

        let first = &bands[0];
        if first.lower_bound > MIN_MARK {
            return Err(GradeError::scale(format!(
                "marks {}..={} are not covered",
                MIN_MARK,
                first.lower_bound - 1.0
            )));
        }

        for pair in bands.windows(2) {
            let (below, above) = (&pair[0], &pair[1]);

            if above.lower_bound <= below.upper_bound {
                return Err(GradeError::scale(format!(
                    "bands '{}' and '{}' both claim mark {}",
                    below.letter, above.letter, above.lower_bound
                )));
            }
            if above.lower_bound > below.upper_bound + 1.0 {
                return Err(GradeError::scale(format!(
                    "marks {}..={} are not covered",
                    below.upper_bound + 1.0,
                    above.lower_bound - 1.0
                )));
            }
        }

        let last = &bands[bands.len() - 1];
        if last.upper_bound < MAX_MARK {
            return Err(GradeError::scale(format!(
                "marks {}..={} are not covered",
                last.upper_bound + 1.0,
                MAX_MARK
            )));
        }

        bands.reverse();

        Ok(Self { name, bands })
    }

    /// Returns the band a mark falls into.
    ///
    /// # Errors
    ///
    /// Returns [`GradeError::OutOfRange`] for marks below [`MIN_MARK`], above
    /// [`MAX_MARK`], or NaN. Marks are never clamped.
    pub fn lookup(&self, mark: f64) -> Result<&GradeBand> {
        let out_of_range = || GradeError::OutOfRange {
            mark,
            min: MIN_MARK,
            max: MAX_MARK,
        };

        if !(MIN_MARK..=MAX_MARK).contains(&mark) {
            return Err(out_of_range());
        }

        self.bands
            .iter()
            .find(|band| band.lower_bound <= mark)
            .ok_or_else(out_of_range)
    }

    /// Bands in descending order of lower bound.
    pub fn bands(&self) -> &[GradeBand] {
        &self.bands
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn max_grade_point(&self) -> f64 {
        self.bands
            .iter()
            .map(|band| band.grade_point)
            .fold(0.0, f64::max)
    }

    /// Lowest mark that earns a non-zero grade point, if any band does.
    pub fn pass_mark(&self) -> Option<f64> {
        self.bands
            .iter()
            .filter(|band| band.grade_point > 0.0)
            .map(|band| band.lower_bound)
            .reduce(f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands(rows: &[(f64, f64, &str, f64)]) -> Vec<GradeBand> {
        rows.iter()
            .map(|&(lo, hi, letter, gp)| GradeBand::new(lo, hi, letter, gp))
            .collect()
    }

    fn pass_fail() -> GradingTable {
        GradingTable::new(bands(&[(0.0, 49.0, "F", 0.0), (50.0, 100.0, "P", 1.0)])).unwrap()
    }

    fn assert_invalid(result: Result<GradingTable>, needle: &str) {
        match result {
            Err(GradeError::InvalidScale { reason }) => {
                assert!(reason.contains(needle), "unexpected reason: {reason}")
            }
            other => panic!("expected InvalidScale, got {other:?}"),
        }
    }

    #[test]
    fn test_bands_are_stored_descending() {
        let table = pass_fail();
        let lows: Vec<f64> = table.bands().iter().map(|b| b.lower_bound).collect();
        assert_eq!(lows, vec![50.0, 0.0]);
    }

    #[test]
    fn test_lookup_boundaries() {
        let table = pass_fail();
        assert_eq!(table.lookup(0.0).unwrap().letter, "F");
        assert_eq!(table.lookup(49.0).unwrap().letter, "F");
        assert_eq!(table.lookup(50.0).unwrap().letter, "P");
        assert_eq!(table.lookup(100.0).unwrap().letter, "P");
    }

    #[test]
    fn test_fractional_mark_uses_lower_band() {
        let table = pass_fail();
        assert_eq!(table.lookup(49.5).unwrap().letter, "F");
        assert_eq!(table.lookup(99.9).unwrap().letter, "P");
    }

    #[test]
    fn test_lookup_out_of_range() {
        let table = pass_fail();
        for mark in [-0.1, 100.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                table.lookup(mark),
                Err(GradeError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_empty_scale_rejected() {
        assert_invalid(GradingTable::new(vec![]), "no bands");
    }

    #[test]
    fn test_gap_rejected() {
        let result = GradingTable::new(bands(&[
            (0.0, 49.0, "F", 0.0),
            (55.0, 100.0, "P", 1.0),
        ]));
        assert_invalid(result, "50..=54");
    }

    #[test]
    fn test_overlap_rejected() {
        let result = GradingTable::new(bands(&[
            (0.0, 70.0, "F", 0.0),
            (70.0, 100.0, "P", 1.0),
        ]));
        assert_invalid(result, "both claim mark 70");
    }

    #[test]
    fn test_missing_ends_rejected() {
        assert_invalid(
            GradingTable::new(bands(&[(1.0, 100.0, "P", 1.0)])),
            "0..=0",
        );
        assert_invalid(
            GradingTable::new(bands(&[(0.0, 99.0, "P", 1.0)])),
            "100..=100",
        );
    }

    #[test]
    fn test_malformed_bands_rejected() {
        assert_invalid(
            GradingTable::new(bands(&[(0.0, 100.0, "P", -1.0)])),
            "grade point",
        );
        assert_invalid(
            GradingTable::new(bands(&[(0.0, 100.0, " ", 1.0)])),
            "empty letter",
        );
        assert_invalid(
            GradingTable::new(bands(&[(0.0, 100.5, "P", 1.0)])),
            "whole-mark",
        );
        assert_invalid(
            GradingTable::new(bands(&[(-10.0, 100.0, "P", 1.0)])),
            "outside",
        );
        assert_invalid(
            GradingTable::new(bands(&[(60.0, 40.0, "P", 1.0)])),
            "lower bound above",
        );
    }

    #[test]
    fn test_pass_mark_and_max_grade_point() {
        let table = pass_fail();
        assert_eq!(table.pass_mark(), Some(50.0));
        assert_eq!(table.max_grade_point(), 1.0);

        let all_fail = GradingTable::new(bands(&[(0.0, 100.0, "F", 0.0)])).unwrap();
        assert_eq!(all_fail.pass_mark(), None);
    }

    #[test]
    fn test_named_table() {
        let table = GradingTable::named("pass/fail", bands(&[(0.0, 100.0, "P", 1.0)])).unwrap();
        assert_eq!(table.name(), Some("pass/fail"));
        assert_eq!(pass_fail().name(), None);
    }
}
