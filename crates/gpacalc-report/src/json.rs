//! JSON summary output.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use gpacalc_core::Session;

/// Build a JSON document with the computed averages and every course.
pub fn generate_json(session: &Session) -> serde_json::Value {
    let summary = session.summary();
    let periods: Vec<serde_json::Value> = session
        .roster()
        .periods()
        .iter()
        .zip(&summary.periods)
        .map(|(period, stats)| {
            json!({
                "id": period.id,
                "name": period.name,
                "level": period.level,
                "gpa": stats.average,
                "credits": stats.credits,
                "courses": period.courses,
            })
        })
        .collect();

    json!({
        "layout": session.layout(),
        "overall_gpa": summary.overall,
        "cumulative_gpa": summary.cumulative,
        "total_credits": summary.total_credits,
        "course_count": summary.course_count,
        "periods": periods,
    })
}

/// Write a pretty-printed JSON summary to a file.
pub fn write_json_report(session: &Session, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&generate_json(session))
        .context("failed to serialize summary")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write JSON summary to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpacalc_core::model::{CourseInput, Layout};

    #[test]
    fn json_contains_averages_and_courses() {
        let mut session = Session::new(Layout::Flat);
        session
            .add_course_to_selected(CourseInput::new("Maths", "3", "A"))
            .unwrap();
        session.add_semester().unwrap();
        session
            .add_course_to_selected(CourseInput::new("Physics", "2", "B"))
            .unwrap();

        let value = generate_json(&session);
        assert_eq!(value["layout"], "flat");
        assert_eq!(value["course_count"], 2);
        assert!((value["overall_gpa"].as_f64().unwrap() - 4.6).abs() < 1e-9);
        assert!((value["cumulative_gpa"].as_f64().unwrap() - 4.5).abs() < 1e-9);

        let periods = value["periods"].as_array().unwrap();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[1]["name"], "Semester 2");
        assert_eq!(periods[1]["courses"][0]["grade"], "B");
        assert!(periods[0]["level"].is_null());
    }

    #[test]
    fn write_json_to_file() {
        let session = Session::new(Layout::Nested);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        write_json_report(&session, &path).unwrap();
        let loaded: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded["periods"].as_array().unwrap().len(), 10);
        assert_eq!(loaded["periods"][0]["level"], "100 Level");
    }
}
