//! Mark-to-grade mapping.
//!
//! A [`GradingTable`] binds inclusive mark ranges to a letter grade and a
//! grade point, and is validated once at construction so that every mark in
//! `0..=100` resolves to exactly one band. Two built-in scales are available
//! through [`ScaleName`].

pub mod scales;
pub mod table;

pub use scales::ScaleName;
pub use table::{GradeBand, GradingTable, MAX_MARK, MIN_MARK};
