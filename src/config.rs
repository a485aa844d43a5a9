//! Environment-driven defaults for the command line.
//!
//! Values come from the process environment, which `main` first populates from
//! a `.env` file via `dotenvy`. Command-line flags override them, and an
//! environment value is only interpreted when no flag replaces it.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use clap::ValueEnum;

use crate::grading::{GradingTable, ScaleName};
use crate::parser::load_scale;

pub const DEFAULT_LOG_FILE: &str = "logs/gpa_rater.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `GPA_SCALE`, kept raw until a command needs it.
    pub scale: Option<String>,
    /// `GPA_SCALE_FILE`
    pub scale_file: Option<PathBuf>,
    /// `LOG_FILE_PATH`
    pub log_file_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: None,
            scale_file: None,
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Settings {
            scale: get("GPA_SCALE"),
            scale_file: get("GPA_SCALE_FILE").map(PathBuf::from),
            log_file_path: get("LOG_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }

    /// The built-in scale named by `GPA_SCALE`, or the default one.
    pub fn scale_name(&self) -> Result<ScaleName> {
        match &self.scale {
            Some(value) => ScaleName::from_str(value, true)
                .map_err(|_| anyhow!("GPA_SCALE has unknown scale '{value}'")),
            None => Ok(ScaleName::default()),
        }
    }

    /// Picks the grading table for a command.
    ///
    /// Flags win over the environment and a file wins over a name, at each
    /// level. `GPA_SCALE` is only parsed when neither flag is given.
    pub fn resolve_table(
        &self,
        scale: Option<ScaleName>,
        scale_file: Option<&Path>,
    ) -> Result<GradingTable> {
        match (scale_file, scale) {
            (Some(path), _) => load_scale(path),
            (None, Some(name)) => Ok(name.table()?),
            (None, None) => match &self.scale_file {
                Some(path) => load_scale(path),
                None => Ok(self.scale_name()?.table()?),
            },
        }
    }
}
