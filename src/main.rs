//! CLI entry point for the GPA rater.
//!
//! Provides subcommands for grading a semester of courses, combining semesters
//! into a CGPA, and inspecting grading scales.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use gpa_rater::aggregate::{SemesterRecord, compute_cgpa_on_scale, grade_courses};
use gpa_rater::config::Settings;
use gpa_rater::grading::{GradingTable, ScaleName};
use gpa_rater::output::{
    CumulativeTable, ResultRecord, ScaleTable, SemesterTable, append_record, print_pretty, round2,
    to_json,
};
use gpa_rater::parser::{load_courses, load_semesters};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gpa_rater")]
#[command(about = "Grade courses and compute GPA / CGPA", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ScaleArgs {
    /// Built-in grading scale (defaults to GPA_SCALE, then eight-band)
    #[arg(short, long, value_enum)]
    scale: Option<ScaleName>,

    /// JSON file with a custom grading scale
    #[arg(long, value_name = "PATH", conflicts_with = "scale")]
    scale_file: Option<PathBuf>,
}

impl ScaleArgs {
    fn resolve(&self, settings: &Settings) -> Result<GradingTable> {
        settings.resolve_table(self.scale, self.scale_file.as_deref())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a semester of courses from a CSV file and compute its GPA
    Gpa {
        /// CSV with `code,title,credit_hours,mark` columns
        #[arg(value_name = "COURSES_CSV")]
        courses: PathBuf,

        #[command(flatten)]
        scale: ScaleArgs,

        /// CSV file to append a result summary to
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Print the result as JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Combine semesters into a cumulative GPA
    Cgpa {
        /// CSV with `gpa,total_credits` columns, oldest semester first
        #[arg(value_name = "SEMESTERS_CSV")]
        semesters: Option<PathBuf>,

        /// CGPA over all earlier semesters
        #[arg(long, requires = "previous_credits")]
        previous_cgpa: Option<f64>,

        /// Credit hours behind --previous-cgpa
        #[arg(long, requires = "previous_cgpa")]
        previous_credits: Option<f64>,

        /// GPA of the current semester
        #[arg(long, requires = "current_credits")]
        current_gpa: Option<f64>,

        /// Credit hours of the current semester
        #[arg(long, requires = "current_gpa")]
        current_credits: Option<f64>,

        /// Scale the GPAs were earned on; no GPA may exceed its top grade point
        #[command(flatten)]
        scale: ScaleArgs,

        /// Print the result as JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the bands of a grading scale
    Scale {
        #[command(flatten)]
        scale: ScaleArgs,

        /// Print the scale as JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Grade a single mark
    Lookup {
        #[arg(value_name = "MARK", allow_negative_numbers = true)]
        mark: f64,

        #[command(flatten)]
        scale: ScaleArgs,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let settings = Settings::from_env();

    let _file_guard = match init_logging(&settings.log_file_path) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("failed to initialise logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "Command failed");
            ExitCode::FAILURE
        }
    }
}

/// Colored stderr output plus a JSON rolling log file.
fn init_logging(log_file_path: &Path) -> Result<WorkerGuard> {
    let log_dir = log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or(OsStr::new("gpa_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

fn run(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Gpa {
            courses,
            scale,
            output,
            json,
        } => {
            let table = scale.resolve(settings)?;
            let entries = load_courses(&courses)?;
            let result = grade_courses(&entries, &table)?;
            print_pretty(&result);

            info!(
                scale = table.name().unwrap_or("custom"),
                courses = entries.len(),
                total_credits = result.total_credits,
                gpa = round2(result.gpa),
                "Semester graded"
            );

            if json {
                println!("{}", to_json(&result)?);
            } else {
                print!("{}", SemesterTable(&result));
            }

            if let Some(path) = output {
                append_record(&path, &ResultRecord::from_semester(&table, &result))?;
                info!(path = %path.display(), "Result appended");
            }
        }
        Commands::Cgpa {
            semesters,
            previous_cgpa,
            previous_credits,
            current_gpa,
            current_credits,
            scale,
            json,
        } => {
            let table = scale.resolve(settings)?;
            let mut records = match &semesters {
                Some(path) => load_semesters(path)?,
                None => Vec::new(),
            };
            if let (Some(gpa), Some(credits)) = (previous_cgpa, previous_credits) {
                records.push(SemesterRecord::new(gpa, credits));
            }
            if let (Some(gpa), Some(credits)) = (current_gpa, current_credits) {
                records.push(SemesterRecord::new(gpa, credits));
            }

            if records.is_empty() {
                bail!("no semesters given: pass a CSV file or --previous-*/--current-* values");
            }

            let result = compute_cgpa_on_scale(&records, &table)?;
            print_pretty(&result);

            if result.total_credits == 0.0 {
                warn!("Every semester has zero credit hours; CGPA reported as 0");
            }
            info!(
                semesters = records.len(),
                total_credits = result.total_credits,
                cgpa = round2(result.cgpa),
                "Cumulative GPA computed"
            );

            if json {
                println!("{}", to_json(&result)?);
            } else {
                print!("{}", CumulativeTable(&result));
            }
        }
        Commands::Scale { scale, json } => {
            let table = scale.resolve(settings)?;
            if json {
                println!("{}", to_json(&table)?);
            } else {
                print!("{}", ScaleTable(&table));
            }
        }
        Commands::Lookup { mark, scale } => {
            let table = scale.resolve(settings)?;
            let band = table.lookup(mark)?;
            println!("{mark} -> {} ({:.2})", band.letter, band.grade_point);
        }
    }

    Ok(())
}
