use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use readme_contributors::output::{
    outcome_message, write_diagnostics, write_diagnostics_json, write_json,
};
use readme_contributors::{
    DEFAULT_AVATAR_SIZE, DEFAULT_CONTRIBUTORS_PATH, DEFAULT_README_PATH, Diagnostics, ErrorKind,
    Inputs, MarkerPair, UpdateConfig, UpdateError, UpdateOutcome, UpdateReport, apply_plan,
    plan_update,
};
use tracing::debug;

use crate::logging;

/// Environment variable naming the author of the triggering pull request.
const PR_AUTHOR_ENV: &str = "PR_AUTHOR";

/// Environment variable holding `owner/name` of the repository.
const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Diagnostic lines followed by a status line.
    Human,
    /// One JSON report on stdout.
    Json,
}

/// Regenerate the contributors section of a README from a JSON contributor list.
#[derive(Parser, Debug)]
#[command(name = "update-contributors")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON array of contributor records
    #[arg(long, default_value = DEFAULT_CONTRIBUTORS_PATH)]
    pub contributors: PathBuf,

    /// README to update (a missing file is treated as empty)
    #[arg(long, default_value = DEFAULT_README_PATH)]
    pub readme: PathBuf,

    /// Author of the triggering pull request (env `PR_AUTHOR`)
    #[arg(long)]
    pub pr_author: Option<String>,

    /// Repository as owner/name, used for the insights links (env `GITHUB_REPOSITORY`)
    #[arg(long)]
    pub repository: Option<String>,

    /// Additional login to leave out of the table (repeatable)
    #[arg(long = "exclude", value_name = "LOGIN")]
    pub exclude: Vec<String>,

    /// Marker opening the generated block
    #[arg(long, default_value = readme_contributors::merge::DEFAULT_START_MARKER)]
    pub start_marker: String,

    /// Marker closing the generated block
    #[arg(long, default_value = readme_contributors::merge::DEFAULT_END_MARKER)]
    pub end_marker: String,

    /// Avatar size in pixels
    #[arg(long, default_value_t = DEFAULT_AVATAR_SIZE)]
    pub avatar_size: u32,

    /// Exit code to use when the README is already up to date
    #[arg(long, default_value_t = 0)]
    pub no_change_exit_code: u8,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Verbosity (-v info, -vv debug); `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Non-empty value of an environment variable.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

impl Cli {
    /// Layer flags over environment variables over library defaults.
    fn to_config(&self) -> UpdateConfig {
        let mut config = UpdateConfig::default();
        config.contributors_path.clone_from(&self.contributors);
        config.readme_path.clone_from(&self.readme);
        config.markers = MarkerPair::new(self.start_marker.as_str(), self.end_marker.as_str());
        config.pr_author = self.pr_author.clone().or_else(|| env_value(PR_AUTHOR_ENV));
        config.render.repository = self
            .repository
            .clone()
            .or_else(|| std::env::var(REPOSITORY_ENV).ok());
        config
            .render
            .excluded_logins
            .extend(self.exclude.iter().cloned());
        config.render.avatar_size = self.avatar_size;
        config
    }
}

/// Parse arguments, run one update and map the result to an exit code.
///
/// Failures are reported on stderr with a kind-specific prefix and exit code 1.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    colored::control::set_override(std::io::stderr().is_terminal());

    let config = cli.to_config();
    debug!(?config, "resolved configuration");

    match execute(&config, cli.format) {
        Ok(outcome) => exit_code_for(&outcome, cli.no_change_exit_code),
        Err(e) => {
            eprintln!("{}", error_line(&e).red());
            ExitCode::FAILURE
        }
    }
}

/// Stderr line for a failed run: the kind's prefix followed by the detail.
fn error_line(error: &anyhow::Error) -> String {
    error.downcast_ref::<UpdateError>().map_or_else(
        || format!("{}{error:#}", ErrorKind::Unexpected.prefix()),
        |e| format!("{}{e}", e.kind().prefix()),
    )
}

/// Run the pipeline stage by stage so diagnostics precede any decision.
fn execute(config: &UpdateConfig, format: OutputFormat) -> Result<UpdateOutcome> {
    let mut stdout = std::io::stdout().lock();

    let inputs = Inputs::load(config)?;
    let diagnostics =
        Diagnostics::collect(&inputs.readme, config.effective_pr_author(), &config.markers);
    if format == OutputFormat::Human {
        write_diagnostics(&diagnostics, &mut stdout)?;
        stdout.flush()?;
    }

    let outcome = match plan_update(&inputs, config)
        .and_then(|plan| apply_plan(plan, &config.readme_path))
    {
        Ok(outcome) => outcome,
        Err(e) => {
            if format == OutputFormat::Json {
                write_diagnostics_json(&diagnostics, &mut stdout)?;
            }
            return Err(e.into());
        }
    };

    match format {
        OutputFormat::Human => {
            let readme = config.readme_display_name();
            writeln!(stdout, "{}", outcome_message(&outcome, &readme))?;
        }
        OutputFormat::Json => {
            let report = UpdateReport::new(diagnostics, outcome.clone());
            write_json(&report, &mut stdout)?;
        }
    }
    Ok(outcome)
}

fn exit_code_for(outcome: &UpdateOutcome, no_change_exit_code: u8) -> ExitCode {
    if *outcome == UpdateOutcome::Unchanged {
        ExitCode::from(no_change_exit_code)
    } else {
        ExitCode::SUCCESS
    }
}
