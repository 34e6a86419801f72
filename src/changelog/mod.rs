//! Classification, grouping, rendering and writing of the changelog.

pub mod classify;
pub mod group;
pub mod render;
pub mod writer;

pub use classify::{classify, CommitType};
pub use group::{
    calendar_date, display_datetime, group, group_in, ChangelogDocument, ClassifiedCommit,
    DateSection, TypeSection,
};
pub use render::{render, summary, DEFAULT_TITLE};
pub use writer::write_changelog;
