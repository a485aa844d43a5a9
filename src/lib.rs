pub mod aggregate;
pub mod config;
pub mod error;
pub mod grading;
pub mod output;
pub mod parser;
pub mod stats;

pub use aggregate::{
    CourseEntry, CumulativeResult, SemesterRecord, SemesterResult, compute_cgpa,
    compute_cgpa_on_scale, grade_courses, weighted_average,
};
pub use error::GradeError;
pub use grading::{GradeBand, GradingTable, ScaleName};
