//! CLI entry point for the SGPA calculator.
//!
//! Provides subcommands for calculating an SGPA from a semester file or a
//! marks CSV, filling in marks interactively, and looking up the grade point
//! or tier of a single value.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use sgpa_calc::{
    calculator::{ValidationError, classify, grade_point},
    config::SemesterConfig,
    form::{FieldState, Form, FormOutcome, evaluate, input_feedback},
    input::load_marks_csv,
    output::{Report, print_pretty, render_json, render_text},
};
use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sgpa_calc")]
#[command(about = "Semester grade point average calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the SGPA from marks given on the command line or in a CSV file
    Calculate {
        /// Semester JSON file listing subjects and credits
        #[arg(short, long, env = "SGPA_SEMESTER")]
        semester: Option<String>,

        /// Mark for a subject of the semester, as ID=VALUE (repeatable)
        #[arg(short, long = "mark", value_name = "ID=VALUE")]
        marks_args: Vec<String>,

        /// CSV file with id,credits,mark columns
        #[arg(long)]
        marks: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Prompt for each subject's mark and calculate on Enter
    Interactive {
        /// Semester JSON file listing subjects and credits
        #[arg(short, long, env = "SGPA_SEMESTER")]
        semester: String,
    },
    /// Print the grade point for a mark
    GradePoint {
        #[arg(allow_hyphen_values = true)]
        mark: i64,
    },
    /// Print the performance tier for an SGPA
    Classify {
        #[arg(allow_hyphen_values = true)]
        sgpa: f64,
    },
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/sgpa_calc.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sgpa_calc.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

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

    let cli = Cli::parse();

    match cli.command {
        Commands::Calculate {
            semester,
            marks_args,
            marks,
            format,
        } => calculate(semester.as_deref(), &marks_args, marks.as_deref(), format),
        Commands::Interactive { semester } => {
            let config = SemesterConfig::load(&semester)?;
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            let outcome = interactive(&config, stdin.lock(), &mut stdout)?;
            write!(stdout, "{}", render_text(&outcome))?;
            Ok(exit_code(&outcome))
        }
        Commands::GradePoint { mark } => {
            if !(0..=100).contains(&mark) {
                warn!(mark, "Mark is outside 0-100");
            }
            println!("{}", grade_point(mark));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Classify { sgpa } => {
            let category = classify(sgpa);
            println!("{} {}", category.kind, category.badge);
            println!("{}", category.message);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Runs one calculation request from a semester file plus `ID=VALUE` marks,
/// or from a marks CSV.
#[tracing::instrument(skip(marks_args, format))]
fn calculate(
    semester: Option<&str>,
    marks_args: &[String],
    marks: Option<&str>,
    format: OutputFormat,
) -> Result<ExitCode> {
    // a marks CSV carries its own credits, so it takes over from the semester file
    let (outcome, semester_name) = match (semester, marks) {
        (_, Some(path)) => {
            if !marks_args.is_empty() {
                bail!("--mark cannot be combined with --marks");
            }
            (evaluate(load_marks_csv(path)?), None)
        }
        (Some(path), None) => {
            let config = SemesterConfig::load(path)?;
            let mut form = Form::new(&config);
            for arg in marks_args {
                let (id, value) = arg
                    .split_once('=')
                    .with_context(|| format!("expected ID=VALUE, got {arg:?}"))?;
                if !form.set(id.trim(), value) {
                    bail!("unknown subject {:?} in semester {:?}", id.trim(), config.name);
                }
            }
            (form.calculate(), Some(config.name.clone()))
        }
        (None, None) => bail!("either --semester or --marks is required"),
    };

    let mut report = Report::from_outcome(&outcome);
    if let Some(name) = &semester_name {
        report = report.with_semester(name);
    }
    print_pretty(&report);

    match format {
        OutputFormat::Text => print!("{}", render_text(&outcome)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    Ok(exit_code(&outcome))
}

fn exit_code(outcome: &FormOutcome) -> ExitCode {
    if outcome.result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Prompts for every subject, then re-prompts only the fields flagged invalid
/// until the calculation goes through. Zero total credits cannot be fixed
/// from the prompt and ends the session with that outcome.
#[tracing::instrument(skip_all, fields(semester = %config.name))]
fn interactive<R: BufRead, W: Write>(
    config: &SemesterConfig,
    mut input: R,
    out: &mut W,
) -> Result<FormOutcome> {
    let mut form = Form::new(config);
    let mut pending: Vec<String> = config.subjects.iter().map(|s| s.id.clone()).collect();

    loop {
        for id in &pending {
            let Some(subject) = config.subject(id) else {
                continue;
            };
            loop {
                write!(out, "{} ({} cr): ", subject.name(), subject.credits)?;
                out.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    bail!("input closed before all marks were entered");
                }
                let raw = line.trim_end_matches(['\r', '\n']);

                if input_feedback(raw) == FieldState::Invalid {
                    writeln!(out, "  marks must be between 0 and 100")?;
                    continue;
                }
                form.set(id, raw);
                break;
            }
        }

        let outcome = form.calculate();
        if !matches!(outcome.result, Err(ValidationError::InvalidMark { .. })) {
            return Ok(outcome);
        }

        writeln!(out, "{}", outcome.view.toast.message)?;
        pending = outcome.invalid_fields().map(str::to_string).collect();
        debug!(pending = pending.len(), "Re-prompting invalid fields");
        info!(invalid = ?pending, "Marks rejected");
    }
}
