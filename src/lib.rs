//! datelog - generate a date-grouped changelog from conventional commits.
//!
//! # Overview
//!
//! datelog reads one-line commit summaries from git, keeps the ones with a
//! recognized conventional-commit prefix, groups them by calendar date and
//! type, and writes them as markdown.

pub mod changelog;
pub mod error;
pub mod git;
pub mod pipeline;

// Re-export commonly used types
pub use changelog::{ChangelogDocument, ClassifiedCommit, CommitType};
pub use error::{ChangelogError, GitError, PipelineError, RecordError};
pub use git::{CommitRecord, LogFormat, LogSource, Timestamp};
pub use pipeline::{generate, generate_in, run, Config, Outcome};
