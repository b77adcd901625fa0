//! Preview, inspection and summary reports.

use console::style;

use crate::fs::{group_by_course, FileCandidate};
use crate::workflow::Session;

/// Print the pending changes grouped by course.
pub fn print_preview(session: &Session) {
    println!();
    println!("{}", style("Pending changes:").cyan().bold());
    println!();

    for (course, entries) in session.by_course() {
        println!("{}", style(format!("📘 {}", course)).yellow());
        let last = entries.len().saturating_sub(1);
        for (i, entry) in entries.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            println!(
                "   {} {} ({})",
                branch,
                entry.filename,
                entry.category.label()
            );
        }
    }
    println!();
}

/// Print the hints inferred for every staged file, grouped by course hint.
pub fn print_hints(candidates: &[FileCandidate]) {
    println!();
    for (course, files) in group_by_course(candidates) {
        println!("{}", style(format!("📘 {} ({})", course, files.len())).yellow().bold());
        for file in files {
            let category = file
                .hints
                .category
                .map(|c| c.label())
                .unwrap_or("-");
            let year = file.hints.year.as_deref().unwrap_or("-");
            println!(
                "   {}  {} {}  {} {}",
                file.relative_path.display(),
                style("category:").dim(),
                category,
                style("year:").dim(),
                year
            );
        }
    }
    println!();
}

/// Print the final one-line summary of a run.
pub fn print_summary(processed: usize, courses: usize, pr_url: Option<&str>) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "Processed: {} files across {} courses",
        style(processed).green(),
        style(courses).green()
    );
    if let Some(url) = pr_url {
        println!("Pull request: {}", style(url).cyan().underlined());
    }
    println!("{}", style("═".repeat(50)).dim());
}
