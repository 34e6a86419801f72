//! datelog - CLI entry point.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use datelog::changelog::DEFAULT_TITLE;
use datelog::git::source::{is_repository, GitCommand, RepositoryLog};
use datelog::{run, Config, LogFormat, LogSource};

/// Where commit history is read from.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Source {
    /// Run the system `git` binary
    Git,
    /// Read the repository in-process with libgit2
    Libgit2,
}

/// Generate a date-grouped changelog from conventional commits.
#[derive(Parser, Debug)]
#[command(name = "datelog")]
#[command(about = "Generate a date-grouped changelog from conventional commits")]
#[command(version)]
struct Cli {
    /// Repository to read history from
    #[arg(short = 'C', long, default_value = ".")]
    repo: PathBuf,

    /// Path to changelog file
    #[arg(short = 'o', long, default_value = "CHANGELOG.md")]
    output: PathBuf,

    /// Top-level heading of the changelog
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// How to read the commit log
    #[arg(long, value_enum, default_value_t = Source::Git)]
    source: Source,

    /// Read author dates (%as) instead of timestamps (%at)
    #[arg(long)]
    date_only: bool,

    /// Dry run - print changelog without writing
    #[arg(long)]
    dry_run: bool,

    /// Print the grouped commits as JSON without writing
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if !is_repository(&cli.repo) {
        bail!(
            "{} is not a git repository. Run datelog from within a git repository or pass --repo.",
            cli.repo.display()
        );
    }

    let format = if cli.date_only {
        LogFormat::Date
    } else {
        LogFormat::Timestamp
    };

    let config = Config {
        output: cli.output.clone(),
        title: cli.title.clone(),
        dry_run: cli.dry_run || cli.json,
    };

    let source: Box<dyn LogSource> = match cli.source {
        Source::Git => Box::new(GitCommand::new(&cli.repo, format)),
        Source::Libgit2 => Box::new(RepositoryLog::new(&cli.repo, format)),
    };

    let outcome = run(source.as_ref(), &config).context("Failed to generate changelog")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&outcome.document)
            .context("Failed to serialize changelog")?;
        println!("{}", json);
    } else if cli.dry_run {
        print!("{}", outcome.markdown);
    } else {
        println!("✓ {}", outcome.summary);
        println!("Wrote {}", config.output.display());
    }

    Ok(())
}
