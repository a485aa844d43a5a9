use std::fmt;

use clap::ValueEnum;

use crate::error::Result;
use crate::grading::table::{GradeBand, GradingTable};

/// Eight-band scale.
///
/// | Marks    | Grade | Points |
/// |----------|-------|--------|
/// | 85–100   | A     | 4.00   |
/// | 80–84    | B+    | 3.33   |
/// | 75–79    | B     | 3.00   |
/// | 70–74    | C+    | 2.33   |
/// | 65–69    | C     | 2.00   |
/// | 60–64    | D+    | 1.33   |
/// | 50–59    | D     | 1.00   |
/// | 0–49     | F     | 0.00   |
static EIGHT_BAND: &[(f64, f64, &str, f64)] = &[
    (85.0, 100.0, "A", 4.0),
    (80.0, 84.0, "B+", 3.33),
    (75.0, 79.0, "B", 3.0),
    (70.0, 74.0, "C+", 2.33),
    (65.0, 69.0, "C", 2.0),
    (60.0, 64.0, "D+", 1.33),
    (50.0, 59.0, "D", 1.0),
    (0.0, 49.0, "F", 0.0),
];

/// Nine-band scale. Adds "B-" and shifts the lower bands, so marks 65–74
/// grade differently than on [`EIGHT_BAND`].
///
/// | Marks    | Grade | Points |
/// |----------|-------|--------|
/// | 85–100   | A     | 4.00   |
/// | 80–84    | B+    | 3.33   |
/// | 75–79    | B     | 3.00   |
/// | 70–74    | B-    | 2.66   |
/// | 65–69    | C+    | 2.33   |
/// | 60–64    | C     | 2.00   |
/// | 55–59    | D+    | 1.33   |
/// | 50–54    | D     | 1.00   |
/// | 0–49     | F     | 0.00   |
static NINE_BAND: &[(f64, f64, &str, f64)] = &[
    (85.0, 100.0, "A", 4.0),
    (80.0, 84.0, "B+", 3.33),
    (75.0, 79.0, "B", 3.0),
    (70.0, 74.0, "B-", 2.66),
    (65.0, 69.0, "C+", 2.33),
    (60.0, 64.0, "C", 2.0),
    (55.0, 59.0, "D+", 1.33),
    (50.0, 54.0, "D", 1.0),
    (0.0, 49.0, "F", 0.0),
];

/// Built-in scales, selectable from the command line or `GPA_SCALE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScaleName {
    #[default]
    EightBand,
    NineBand,
}

impl ScaleName {
    fn rows(self) -> &'static [(f64, f64, &'static str, f64)] {
        match self {
            ScaleName::EightBand => EIGHT_BAND,
            ScaleName::NineBand => NINE_BAND,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScaleName::EightBand => "eight-band",
            ScaleName::NineBand => "nine-band",
        }
    }

    /// Builds the table for this scale. Each call returns a fresh, validated
    /// table; nothing is shared between the two scales.
    pub fn table(self) -> Result<GradingTable> {
        let bands = self
            .rows()
            .iter()
            .map(|&(lo, hi, letter, gp)| GradeBand::new(lo, hi, letter, gp))
            .collect();

        GradingTable::named(self.as_str(), bands)
    }
}

impl fmt::Display for ScaleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GradingTable {
    /// The A/B+/B/C+/C/D+/D/F scale.
    pub fn eight_band() -> Result<Self> {
        ScaleName::EightBand.table()
    }

    /// The A/B+/B/B-/C+/C/D+/D/F scale.
    pub fn nine_band() -> Result<Self> {
        ScaleName::NineBand.table()
    }
}
