//! End-to-end changelog generation: log text in, markdown out.

use std::path::PathBuf;

use chrono::{Local, TimeZone};
use tracing::info;

use crate::changelog::{
    group_in, render, summary, write_changelog, ChangelogDocument, DEFAULT_TITLE,
};
use crate::error::PipelineError;
use crate::git::{parse_log, LogSource};

/// Settings for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the changelog is written.
    pub output: PathBuf,
    /// Top-level heading of the document.
    pub title: String,
    /// Render without writing.
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("CHANGELOG.md"),
            title: DEFAULT_TITLE.to_string(),
            dry_run: false,
        }
    }
}

/// Result of a run.
#[derive(Debug)]
pub struct Outcome {
    pub document: ChangelogDocument,
    pub markdown: String,
    pub summary: String,
}

/// Parse and group log text, newest commit first, with dates in `tz`.
pub fn build_document_in<Tz: TimeZone>(log_text: &str, tz: &Tz) -> ChangelogDocument {
    let mut records = parse_log(log_text);
    // Stable, so commits sharing a timestamp keep their log order.
    records.sort_by(|a, b| b.timestamp.sort_key(tz).cmp(&a.timestamp.sort_key(tz)));
    group_in(records, tz)
}

/// Markdown changelog for `log_text`, with dates in local time.
pub fn generate(log_text: &str, title: &str) -> String {
    generate_in(log_text, title, &Local)
}

/// Markdown changelog for `log_text`, with dates in `tz`.
pub fn generate_in<Tz: TimeZone>(log_text: &str, title: &str, tz: &Tz) -> String {
    render(&build_document_in(log_text, tz), title)
}

/// Read the log from `source`, render it and write it to `config.output`.
///
/// Nothing is written if the source fails or `config.dry_run` is set.
pub fn run<S: LogSource + ?Sized>(
    source: &S,
    config: &Config,
) -> Result<Outcome, PipelineError> {
    run_in(source, config, &Local)
}

/// [`run`] with dates in `tz`.
pub fn run_in<S: LogSource + ?Sized, Tz: TimeZone>(
    source: &S,
    config: &Config,
    tz: &Tz,
) -> Result<Outcome, PipelineError> {
    let log_text = source.read_log()?;

    let document = build_document_in(&log_text, tz);
    let markdown = render(&document, &config.title);
    let summary = summary(&document);

    if config.dry_run {
        info!("Dry run, not writing {}", config.output.display());
    } else {
        write_changelog(&config.output, &markdown)?;
        info!("Wrote {}", config.output.display());
    }

    Ok(Outcome {
        document,
        markdown,
        summary,
    })
}
