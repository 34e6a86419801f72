//! Error types for datelog modules using thiserror.

use thiserror::Error;

/// Errors from reading the commit log.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found in PATH. Install git or use --source libgit2")]
    NotInstalled,

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git log exited with {}: {stderr}",
             code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    Revwalk(#[source] git2::Error),

    #[error("Failed to read commit: {0}")]
    FindCommit(#[source] git2::Error),
}

/// A log line that could not be turned into a commit record.
///
/// Never fatal: the parser logs these and skips the line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 3 fields, found {found}")]
    FieldCount { found: usize },

    #[error("field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

/// Errors from writing the changelog.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to create temporary file: {0}")]
    TempFileFailed(#[source] std::io::Error),

    #[error("Failed to write changelog: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to replace changelog: {0}")]
    PersistFailed(#[source] std::io::Error),
}

/// Errors from a full pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] GitError),

    #[error(transparent)]
    Write(#[from] ChangelogError),
}
