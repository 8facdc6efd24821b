//! The `gpacalc validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gpacalc_core::config::load_config_from;
use gpacalc_core::parser::{self, Severity};

pub fn execute(roster_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let files = if roster_path.is_dir() {
        parser::load_roster_directory(&roster_path)?
    } else {
        vec![(roster_path.clone(), parser::parse_roster(&roster_path)?)]
    };

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for (path, file) in &files {
        let layout = file.layout_or(config.default_layout);
        let courses: usize = file.periods.iter().map(|p| p.courses.len()).sum();
        println!(
            "Roster: {} ({layout}, {} periods, {courses} courses)",
            path.display(),
            file.periods.len()
        );

        let issues = parser::validate_roster(file, config.default_layout);
        for issue in &issues {
            let prefix = issue
                .period
                .as_ref()
                .map(|p| format!("  [{p}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} {}: {}", issue.severity, issue.message);
            match issue.severity {
                Severity::Error => total_errors += 1,
                Severity::Warning => total_warnings += 1,
            }
        }
    }

    if total_errors == 0 && total_warnings == 0 {
        println!("All rosters valid.");
    } else {
        println!("\n{total_errors} error(s), {total_warnings} warning(s) found.");
    }

    anyhow::ensure!(
        total_errors == 0,
        "validation failed with {total_errors} error(s)"
    );
    Ok(())
}
