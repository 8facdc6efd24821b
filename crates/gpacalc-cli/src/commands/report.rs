//! The `gpacalc report` command.

use std::path::PathBuf;

use anyhow::Result;

use gpacalc_core::config::load_config_from;
use gpacalc_core::parser;
use gpacalc_core::Session;
use gpacalc_report::{write_html_report, write_json_report};

pub fn execute(
    roster_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    print: bool,
    dark: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let file = parser::parse_roster(&roster_path)?;
    let mut session = parser::build_session(&file, config.default_layout)?;
    tracing::debug!(
        roster = %roster_path.display(),
        layout = %session.layout(),
        "loaded roster"
    );
    if dark {
        session.toggle_theme();
    }

    print_summary(&session);

    if print {
        println!("\n{}", session.report());
        return Ok(());
    }

    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let format = format.unwrap_or_else(|| config.default_format.clone());
    let formats: Vec<&str> = if format == "all" {
        vec!["text", "html", "json"]
    } else {
        format.split(',').map(|f| f.trim()).collect()
    };

    if let Some(bad) = formats
        .iter()
        .find(|f| !matches!(**f, "text" | "txt" | "html" | "json"))
    {
        anyhow::bail!("unknown format: {bad} (expected text, html, json, all)");
    }

    let text_path = output.join(&config.report_file_name);
    for fmt in &formats {
        match *fmt {
            "text" | "txt" => {
                session.export_report(&text_path)?;
                println!("Report saved to: {}", text_path.display());
            }
            "html" => {
                let path = text_path.with_extension("html");
                write_html_report(&session, &path)?;
                println!("HTML report: {}", path.display());
            }
            "json" => {
                let path = text_path.with_extension("json");
                write_json_report(&session, &path)?;
                println!("JSON summary: {}", path.display());
            }
            _ => unreachable!("formats are checked above"),
        }
    }

    Ok(())
}

fn print_summary(session: &Session) {
    use comfy_table::{Cell, Table};

    let summary = session.summary();
    let mut table = Table::new();
    table.set_header(vec!["Semester", "Courses", "Credits", "GPA"]);

    for period in &summary.periods {
        let gpa = if period.is_empty() {
            "-".to_string()
        } else {
            format!("{:.2}", period.average)
        };
        table.add_row(vec![
            Cell::new(&period.name),
            Cell::new(period.course_count),
            Cell::new(period.credits),
            Cell::new(gpa),
        ]);
    }

    println!("{table}");
    println!("Overall GPA: {:.2}", summary.overall);
    println!("Cumulative GPA (CGPA): {:.2}", summary.cumulative);
}
