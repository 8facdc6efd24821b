//! The `gpacalc init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create gpacalc.toml
    if std::path::Path::new("gpacalc.toml").exists() {
        println!("gpacalc.toml already exists, skipping.");
    } else {
        std::fs::write("gpacalc.toml", SAMPLE_CONFIG)?;
        println!("Created gpacalc.toml");
    }

    // Create example roster
    std::fs::create_dir_all("rosters")?;
    let example_path = std::path::Path::new("rosters/example.toml");
    if example_path.exists() {
        println!("rosters/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ROSTER)?;
        println!("Created rosters/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your courses to rosters/example.toml");
    println!("  2. Run: gpacalc validate --roster rosters/example.toml");
    println!("  3. Run: gpacalc report --roster rosters/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gpacalc configuration

# Layout for roster files without a [roster] layout: "flat" or "nested"
default_layout = "flat"

# Where reports are written (supports ${VAR} references)
output_dir = "."

report_file_name = "gpa_report.txt"

# text, html, json, or all
default_format = "text"
"#;

const EXAMPLE_ROSTER: &str = r#"[roster]
layout = "flat"

[[periods]]
name = "Semester 1"

[[periods.courses]]
name = "Mathematics 101"
credits = 3
grade = "A"

[[periods.courses]]
name = "Introduction to Physics"
credits = 2
grade = "B"

[[periods]]
name = "Semester 2"

[[periods.courses]]
name = "Mathematics 102"
credits = 3
grade = "B"

[[periods.courses]]
name = "General Studies"
credits = 1
grade = "C"
"#;
