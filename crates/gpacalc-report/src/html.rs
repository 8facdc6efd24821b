//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined, laid out like
//! the calculator screen: one section per semester, then the headline GPAs.

use std::path::Path;

use anyhow::{Context, Result};

use gpacalc_core::engine::Theme;
use gpacalc_core::model::Period;
use gpacalc_core::statistics::{period_average, PeriodStats};
use gpacalc_core::Session;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page for a session.
pub fn generate_html(session: &Session) -> String {
    let summary = session.summary();
    let mut html = String::new();

    let class = match session.theme() {
        Theme::Dark => " class=\"dark\"",
        Theme::Light => "",
    };
    html.push_str(&format!("<!DOCTYPE html>\n<html lang=\"en\"{class}>\n<head>\n"));
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Student GPA Calculator</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n<main>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Student GPA Calculator</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} courses | {} credits | {} layout | {}</p>\n",
        summary.course_count,
        summary.total_credits,
        session.layout(),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Periods
    for period in session.roster().periods() {
        html.push_str(&period_section(period));
    }

    // Headline
    html.push_str("<section class=\"totals\">\n");
    html.push_str("<h3>Overall GPA</h3>\n");
    html.push_str(&format!("<p class=\"gpa\">{:.2}</p>\n", summary.overall));
    html.push_str("<h3>Cumulative GPA (CGPA)</h3>\n");
    html.push_str(&format!("<p class=\"gpa\">{:.2}</p>\n", summary.cumulative));
    html.push_str("</section>\n");

    let graded: Vec<&PeriodStats> = summary.periods.iter().filter(|p| !p.is_empty()).collect();
    if !graded.is_empty() {
        html.push_str("<section class=\"chart\">\n<h2>Semester GPA</h2>\n");
        html.push_str(&generate_bar_chart(&graded));
        html.push_str("</section>\n");
    }

    html.push_str("</main>\n</body>\n</html>");
    html
}

fn period_section(period: &Period) -> String {
    let mut section = String::from("<section class=\"period\">\n");
    section.push_str(&format!(
        "<h3>{}</h3>\n",
        html_escape(&period.display_name())
    ));

    if period.is_empty() {
        section.push_str("<p class=\"empty\">No courses added yet.</p>\n");
    } else {
        section.push_str("<ul>\n");
        for course in &period.courses {
            section.push_str(&format!(
                "<li>{} ({} credits) - {}</li>\n",
                html_escape(&course.name),
                course.credits,
                course.grade
            ));
        }
        section.push_str("</ul>\n");
    }

    section.push_str(&format!(
        "<p>Semester GPA: {:.2}</p>\n",
        period_average(&period.courses)
    ));
    section.push_str("</section>\n");
    section
}

/// Write an HTML report to a file.
pub fn write_html_report(session: &Session, path: &Path) -> Result<()> {
    let html = generate_html(session);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn generate_bar_chart(periods: &[&PeriodStats]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 260;

    let total_height = periods.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, period) in periods.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let ratio = period.average / 5.0;
        let width = (ratio * max_width as f64) as usize;

        let color = if period.average >= 4.5 {
            "#22c55e"
        } else if period.average >= 3.5 {
            "#3b82f6"
        } else if period.average >= 2.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&period.name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.2}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            period.average
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --secondary: #f3f4f6; }
html.dark { --bg: #111827; --fg: #f9fafb; --border: #374151; --secondary: #1f2937; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
main { max-width: 42rem; margin: 0 auto; }
h1 { font-size: 1.5rem; }
h3 { margin: 2rem 0 0.5rem; }
.meta { color: #6b7280; }
ul { list-style: none; padding: 0; }
li { background: var(--secondary); padding: 0.5rem; border-radius: 4px; margin: 0.5rem 0; }
.gpa { font-size: 1.875rem; font-weight: bold; margin: 0; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use gpacalc_core::model::{CourseInput, Layout};

    fn make_session() -> Session {
        let mut session = Session::new(Layout::Flat);
        session
            .add_course_to_selected(CourseInput::new("Maths <Honours>", "3", "A"))
            .unwrap();
        session.add_semester().unwrap();
        session
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_session());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Semester 1"));
        assert!(html.contains("Maths &lt;Honours&gt; (3 credits) - A"));
        assert!(html.contains("Semester GPA: 5.00"));
        assert!(html.contains("No courses added yet."));
        assert!(html.contains("Cumulative GPA (CGPA)"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn html_report_follows_theme() {
        let mut session = make_session();
        assert!(!generate_html(&session).contains("<html lang=\"en\" class=\"dark\">"));
        session.toggle_theme();
        assert!(generate_html(&session).contains("<html lang=\"en\" class=\"dark\">"));
    }

    #[test]
    fn empty_session_has_no_chart() {
        let html = generate_html(&Session::new(Layout::Nested));
        assert!(!html.contains("<svg"));
        assert!(html.contains("500 Level - Second Semester"));
    }

    #[test]
    fn html_report_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&make_session(), &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
