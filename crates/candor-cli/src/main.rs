//! Candor - screen first-person dating experience posts from the command line.
//!
//! Each subcommand reads text from an argument, a file, or stdin and prints
//! JSON to stdout. Logs go to stderr and, with `--log-dir`, to a rolling file.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use candor_core::catalog::{patterns_for, tooltip};
use candor_core::{
    CandorConfig, Confirmations, PostScreener, PostSubmission, RewriteRequest, TriggerCategory,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Candor - content-safety screening for experience posts
#[derive(Parser, Debug)]
#[command(name = "candor", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Also write logs to daily rotated files in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List trigger categories with their guidance.
    Categories,
    /// Scan text for trigger phrases (offline).
    Scan(TextInput),
    /// Scan and moderate, reporting whether review would be needed.
    Preview(TextInput),
    /// Full submission screening: scan, moderate, and decide.
    Screen(TextInput),
    /// Ask for rewrite suggestions for one category.
    Rewrite {
        /// Category the text was flagged under (e.g. diagnoses)
        #[arg(long)]
        category: TriggerCategory,
        #[command(flatten)]
        input: TextInput,
    },
    /// Check a post submission against the submission rules.
    Validate {
        /// Confirm the post reflects personal experience
        #[arg(long)]
        first_person: bool,
        /// Agree not to harass or threaten
        #[arg(long)]
        no_harassment: bool,
        /// Acknowledge the subject may read the post
        #[arg(long)]
        understands_public: bool,
        #[command(flatten)]
        input: TextInput,
    },
}

#[derive(ClapArgs, Debug)]
struct TextInput {
    /// Text to process (reads stdin when neither text nor --file is given)
    text: Option<String>,

    /// Read text from a file
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl TextInput {
    fn read(&self) -> anyhow::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.file {
            return read_file(path);
        }
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[derive(Serialize)]
struct CategoryInfo {
    category: TriggerCategory,
    name: &'static str,
    message: &'static str,
    rewrite_options: &'static [&'static str],
    patterns: usize,
    blocking_patterns: usize,
}

fn category_listing() -> Vec<CategoryInfo> {
    TriggerCategory::all()
        .iter()
        .map(|&category| {
            let rules = patterns_for(category);
            let tip = tooltip(category);
            CategoryInfo {
                category,
                name: category.name(),
                message: tip.message,
                rewrite_options: tip.rewrite_options,
                patterns: rules.len(),
                blocking_patterns: rules.iter().filter(|r| r.severity.is_block()).count(),
            }
        })
        .collect()
}

#[derive(Serialize)]
struct ScreenReport<'a> {
    #[serde(flatten)]
    outcome: &'a candor_core::ScreeningOutcome,
    notice: &'static str,
}

#[derive(Serialize)]
struct ValidationReport {
    valid: bool,
    errors: Vec<candor_core::FieldError>,
}

/// Initialize logging. Console output goes to stderr so stdout stays JSON.
fn init_logging(args: &Args) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_level = if args.debug { "debug" } else { &args.log_level };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("candor={},candor_core={},warn", log_level, log_level))
    });

    if let Some(log_dir) = &args.log_dir {
        if std::fs::create_dir_all(log_dir).is_ok() {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix("candor")
                .filename_suffix("log")
                .build(log_dir)
                .ok();

            if let Some(appender) = file_appender {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_writer(std::io::stderr))
                    .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                    .init();

                tracing::debug!("Logging to {:?}", log_dir);
                return Some(guard);
            }
        }

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        tracing::warn!("File logging unavailable in {:?}, using console only", log_dir);
        return None;
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    None
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", out);
    Ok(())
}

fn load_screener(args: &Args) -> anyhow::Result<PostScreener> {
    let config = CandorConfig::resolve(args.config.as_deref()).context("Failed to load config")?;
    PostScreener::from_config(&config).context("Failed to build screener")
}

async fn run(args: &Args) -> anyhow::Result<ExitCode> {
    match &args.command {
        Command::Categories => print_json(&category_listing(), args.compact)?,

        Command::Scan(input) => {
            let text = input.read()?;
            let analysis = candor_core::ContentScanner::shared().scan(&text);
            print_json(&analysis, args.compact)?;
        }

        Command::Preview(input) => {
            let text = input.read()?;
            let screener = load_screener(args)?;
            print_json(&screener.preview(&text).await, args.compact)?;
        }

        Command::Screen(input) => {
            let text = input.read()?;
            let screener = load_screener(args)?;
            let outcome = screener.screen(&text).await;
            let report = ScreenReport {
                outcome: &outcome,
                notice: outcome.decision.notice(),
            };
            print_json(&report, args.compact)?;
        }

        Command::Rewrite { category, input } => {
            let request = RewriteRequest::new(input.read()?, *category);
            if let Err(errors) = request.validate() {
                bail!("Invalid rewrite request: {}", errors);
            }
            let screener = load_screener(args)?;
            let result = screener
                .suggest_rewrites(&request.text, request.trigger_category)
                .await;
            print_json(&result, args.compact)?;
            if !result.success {
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Validate {
            first_person,
            no_harassment,
            understands_public,
            input,
        } => {
            let submission = PostSubmission::new(
                input.read()?,
                Confirmations {
                    first_person: *first_person,
                    no_harassment: *no_harassment,
                    understands_public: *understands_public,
                },
            );
            let report = match submission.validate() {
                Ok(()) => ValidationReport {
                    valid: true,
                    errors: Vec::new(),
                },
                Err(errors) => ValidationReport {
                    valid: false,
                    errors: errors.0,
                },
            };
            print_json(&report, args.compact)?;
            if !report.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let _log_guard = init_logging(&args);

    tracing::debug!("Running {:?}", args.command);
    run(&args).await
}
