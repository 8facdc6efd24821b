//! Plain-text GPA report.
//!
//! The report is meant for people, not programs: it is never parsed back.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Course, Period, Roster};
use crate::statistics::period_average;

/// Default file name for an exported report.
pub const DEFAULT_REPORT_FILE: &str = "gpa_report.txt";

/// Render the report for `roster` with precomputed headline averages.
///
/// Periods without courses are left out.
pub fn serialize_report(roster: &Roster, overall: f64, cumulative: f64) -> String {
    let mut out = format!("Overall GPA: {overall:.2}\nCumulative GPA (CGPA): {cumulative:.2}\n\n");

    let blocks: Vec<String> = roster
        .periods()
        .iter()
        .filter(|p| !p.is_empty())
        .map(period_block)
        .collect();
    out.push_str(&blocks.join("\n\n"));
    out
}

fn period_block(period: &Period) -> String {
    let mut block = format!(
        "{}\nGPA: {:.2}\n",
        period.display_name(),
        period_average(&period.courses)
    );
    let lines: Vec<String> = period.courses.iter().map(course_line).collect();
    block.push_str(&lines.join("\n"));
    block
}

fn course_line(course: &Course) -> String {
    format!(
        "{}: {} credits, Grade: {}",
        course.name, course.credits, course.grade
    )
}

/// Write a rendered report to disk, creating parent directories.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Session;
    use crate::model::{CourseInput, Layout};

    fn two_semester_session() -> Session {
        let mut session = Session::new(Layout::Flat);
        session
            .add_course_to_selected(CourseInput::new("Mathematics 101", "3", "A"))
            .unwrap();
        session.add_semester().unwrap();
        session
            .add_course_to_selected(CourseInput::new("Physics", "2", "B"))
            .unwrap();
        session
            .add_course_to_selected(CourseInput::new("Lab", "0.5", "C"))
            .unwrap();
        session
    }

    #[test]
    fn report_layout() {
        let session = two_semester_session();
        let expected = "Overall GPA: 4.45\n\
                        Cumulative GPA (CGPA): 4.40\n\
                        \n\
                        Semester 1\n\
                        GPA: 5.00\n\
                        Mathematics 101: 3 credits, Grade: A\n\
                        \n\
                        Semester 2\n\
                        GPA: 3.80\n\
                        Physics: 2 credits, Grade: B\n\
                        Lab: 0.5 credits, Grade: C";
        assert_eq!(session.report(), expected);
    }

    #[test]
    fn report_omits_empty_periods() {
        let mut session = Session::new(Layout::Flat);
        session.add_semester().unwrap();
        session
            .add_course_to_selected(CourseInput::new("Chemistry", "4", "D"))
            .unwrap();
        session.add_semester().unwrap();

        let report = session.report();
        assert!(!report.contains("Semester 1"));
        assert!(!report.contains("Semester 3"));
        assert!(report.contains("Semester 2\nGPA: 2.00\nChemistry: 4 credits, Grade: D"));
    }

    #[test]
    fn empty_roster_has_only_headline() {
        let session = Session::new(Layout::Nested);
        assert_eq!(
            session.report(),
            "Overall GPA: 0.00\nCumulative GPA (CGPA): 0.00\n\n"
        );
    }

    #[test]
    fn nested_periods_include_level() {
        let mut session = Session::new(Layout::Nested);
        let id = session.roster().find("100 Level", "Second Semester").unwrap();
        session
            .add_course(id, CourseInput::new("GST 102", "2", "E"))
            .unwrap();
        assert!(session
            .report()
            .contains("100 Level - Second Semester\nGPA: 1.00\nGST 102: 2 credits, Grade: E"));
    }

    #[test]
    fn report_is_idempotent() {
        let session = two_semester_session();
        assert_eq!(session.report(), session.report());
    }

    #[test]
    fn headline_uses_supplied_averages() {
        let roster = Roster::new(Layout::Flat);
        let text = serialize_report(&roster, 3.456, 2.0);
        assert!(text.starts_with("Overall GPA: 3.46\nCumulative GPA (CGPA): 2.00\n"));
    }

    #[test]
    fn write_report_to_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join(DEFAULT_REPORT_FILE);
        write_report("hello", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }
}
