//! Log sources: produce raw `<timestamp>|**|<subject>|**|<short id>` text.

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Repository, Sort};
use tracing::debug;

use crate::error::GitError;

use super::record::DELIMITER;

/// Which timestamp field the log carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Author time as epoch seconds (`%at`).
    #[default]
    Timestamp,
    /// Author date as `YYYY-MM-DD` (`%as`).
    Date,
}

impl LogFormat {
    /// The `git log --format` string for this format.
    pub fn pretty(&self) -> String {
        let time = match self {
            Self::Timestamp => "%at",
            Self::Date => "%as",
        };
        format!("{time}{DELIMITER}%s{DELIMITER}%h")
    }
}

/// Anything that can produce commit log text, newest commit first.
///
/// This abstraction allows mocking the log source in tests.
#[cfg_attr(test, mockall::automock)]
pub trait LogSource {
    /// Read the full log as text, one record per line.
    fn read_log(&self) -> Result<String, GitError>;
}

/// Reads the log by running the system `git` binary.
#[derive(Debug, Clone)]
pub struct GitCommand {
    pub repo_dir: PathBuf,
    pub format: LogFormat,
}

impl GitCommand {
    pub fn new(repo_dir: impl Into<PathBuf>, format: LogFormat) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            format,
        }
    }
}

impl LogSource for GitCommand {
    fn read_log(&self) -> Result<String, GitError> {
        if which::which("git").is_err() {
            return Err(GitError::NotInstalled);
        }

        let format_arg = format!("--format={}", self.format.pretty());
        debug!("Running git log {} in {}", format_arg, self.repo_dir.display());

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .args(["log", "--no-color", &format_arg])
            .output()
            .map_err(GitError::SpawnFailed)?;

        if !output.status.success() {
            return Err(GitError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Reads the log in-process with libgit2.
#[derive(Debug, Clone)]
pub struct RepositoryLog {
    pub repo_dir: PathBuf,
    pub format: LogFormat,
}

impl RepositoryLog {
    pub fn new(repo_dir: impl Into<PathBuf>, format: LogFormat) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            format,
        }
    }
}

impl LogSource for RepositoryLog {
    fn read_log(&self) -> Result<String, GitError> {
        let repo = Repository::discover(&self.repo_dir).map_err(GitError::OpenRepository)?;
        log_lines(&repo, self.format)
    }
}

/// Walk history from HEAD, newest first, formatting each commit as a log line.
pub fn log_lines(repo: &Repository, format: LogFormat) -> Result<String, GitError> {
    let mut revwalk = repo.revwalk().map_err(GitError::Revwalk)?;
    revwalk.set_sorting(Sort::TIME).map_err(GitError::Revwalk)?;
    revwalk.push_head().map_err(GitError::Revwalk)?;

    let mut text = String::new();

    for oid_result in revwalk {
        let oid = oid_result.map_err(GitError::Revwalk)?;
        let commit = repo.find_commit(oid).map_err(GitError::FindCommit)?;

        let short_id = commit
            .as_object()
            .short_id()
            .map_err(GitError::FindCommit)?;
        let short_id = String::from_utf8_lossy(&short_id);

        let author_time = commit.author().when();
        let time = match format {
            LogFormat::Timestamp => author_time.seconds().to_string(),
            LogFormat::Date => author_date(&author_time),
        };

        // Messages need not be UTF-8; match the lossy decoding of the git CLI source.
        let subject = String::from_utf8_lossy(commit.summary_bytes().unwrap_or_default());

        text.push_str(&format!("{time}{DELIMITER}{subject}{DELIMITER}{short_id}\n"));
    }

    Ok(text)
}

/// `YYYY-MM-DD` in the author's own offset, matching `git log --format=%as`.
fn author_date(time: &git2::Time) -> String {
    chrono::FixedOffset::east_opt(time.offset_minutes() * 60)
        .and_then(|offset| chrono::TimeZone::timestamp_opt(&offset, time.seconds(), 0).single())
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Whether `path` is inside a git repository.
pub fn is_repository(path: &Path) -> bool {
    Repository::discover(path).is_ok()
}
