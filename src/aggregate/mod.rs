//! Credit-weighted aggregation.
//!
//! Courses are graded and reduced to a semester GPA, and semester records are
//! reduced to a CGPA. Both levels go through the same [`weighted_average`]
//! reduction and keep full precision; rounding is left to the caller.

pub mod cumulative;
pub mod semester;
pub mod types;
pub mod utility;

pub use cumulative::{compute_cgpa, compute_cgpa_on_scale};
pub use semester::grade_courses;
pub use types::{
    CourseEntry, CumulativeResult, Diagnostic, GradedCourse, SemesterRecord, SemesterResult,
};
pub use utility::weighted_average;
