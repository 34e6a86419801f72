//! Conventional commit type classification.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Serialize;

/// Conventional commit types that make it into the changelog.
///
/// `docs` is intentionally absent so documentation-only commits are left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Build,
    Ci,
    Perf,
    Refactor,
    Style,
    Test,
}

impl CommitType {
    /// Canonical section order within a date.
    pub const PRIORITY: [CommitType; 8] = [
        Self::Feat,
        Self::Fix,
        Self::Build,
        Self::Ci,
        Self::Perf,
        Self::Refactor,
        Self::Style,
        Self::Test,
    ];

    /// The prefix token as written in a commit subject.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Perf => "perf",
            Self::Refactor => "refactor",
            Self::Style => "style",
            Self::Test => "test",
        }
    }

    /// Get the section heading for the type.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Feat => "Features",
            Self::Fix => "Fixes",
            Self::Build => "Build",
            Self::Ci => "CI",
            Self::Perf => "Performance",
            Self::Refactor => "Refactor",
            Self::Style => "Styles",
            Self::Test => "Tests",
        }
    }

    /// Position in [`CommitType::PRIORITY`].
    pub fn order(&self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|t| t == self)
            .unwrap_or(Self::PRIORITY.len())
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRIORITY
            .into_iter()
            .find(|t| t.token() == s)
            .ok_or_else(|| format!("Unknown commit type: {}", s))
    }
}

static PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(build|ci|feat|fix|perf|refactor|style|test):")
        .expect("prefix pattern is valid")
});

/// Classify a commit subject by its leading `<type>:` prefix.
///
/// Case-sensitive and anchored: `Feat: x`, `feat(api): x` and ` feat: x` all
/// return `None`.
pub fn classify(subject: &str) -> Option<CommitType> {
    let caps = PREFIX.captures(subject)?;
    caps.get(1)?.as_str().parse().ok()
}
