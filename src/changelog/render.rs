//! Markdown rendering of a grouped changelog.

use super::group::{ChangelogDocument, ClassifiedCommit};

/// Default document title.
pub const DEFAULT_TITLE: &str = "Change Log";

/// Render the document as markdown.
///
/// One `##` heading per date in document order, one `###` heading per type
/// in canonical order, one bullet per commit. Every line ends in `\n`.
pub fn render(doc: &ChangelogDocument, title: &str) -> String {
    let mut out = format!("# {}\n", title);

    for date_section in doc.dates() {
        out.push_str(&format!("## {}\n", date_section.date.format("%Y-%m-%d")));

        for section in date_section.sections() {
            out.push_str(&format!("### {}\n", section.commit_type.label()));

            for commit in section.commits {
                out.push_str(&entry_line(commit));
                out.push('\n');
            }
        }
    }

    out
}

/// `* <subject> ([<id>](../../commit/<id>))`
fn entry_line(commit: &ClassifiedCommit) -> String {
    let id = &commit.record.short_id;
    format!("* {} ([{}](../../commit/{}))", commit.record.subject, id, id)
}

/// Generate a summary message for the user.
pub fn summary(doc: &ChangelogDocument) -> String {
    let total = doc.entry_count();
    if total == 0 {
        return "No conventional commits found.".to_string();
    }

    let details: Vec<String> = doc
        .count_by_type()
        .iter()
        .map(|(ty, count)| format!("{}: {}", ty.label(), count))
        .collect();

    let entry_word = if total == 1 { "entry" } else { "entries" };
    let dates = doc.dates().len();
    let date_word = if dates == 1 { "date" } else { "dates" };

    format!(
        "{} {} across {} {} ({})",
        total,
        entry_word,
        dates,
        date_word,
        details.join(", ")
    )
}
