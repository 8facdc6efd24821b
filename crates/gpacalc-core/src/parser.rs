//! TOML roster file parser.
//!
//! Loads roster descriptions from TOML files and directories, builds a
//! [`Session`] from them, and validates them.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::engine::Session;
use crate::error::GpaError;
use crate::model::{Course, CourseInput, Layout, PeriodId};

/// Intermediate TOML structure for parsing roster files.
#[derive(Debug, Deserialize)]
struct TomlRosterFile {
    #[serde(default)]
    roster: TomlRosterHeader,
    #[serde(default)]
    periods: Vec<TomlPeriod>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlRosterHeader {
    #[serde(default)]
    layout: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlPeriod {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    semester: Option<String>,
    #[serde(default)]
    courses: Vec<TomlCourse>,
}

#[derive(Debug, Deserialize)]
struct TomlCourse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    credits: Option<TomlCredits>,
    #[serde(default)]
    grade: String,
}

/// Credits may be written as a TOML number or as text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlCredits {
    Number(f64),
    Text(String),
}

impl TomlCredits {
    fn into_text(self) -> String {
        match self {
            TomlCredits::Number(n) => n.to_string(),
            TomlCredits::Text(s) => s,
        }
    }
}

/// A parsed roster file, before any course has been validated.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterFile {
    /// Layout named in the file, if any.
    pub layout: Option<Layout>,
    pub periods: Vec<PeriodEntry>,
}

/// One `[[periods]]` table.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodEntry {
    pub name: Option<String>,
    pub level: Option<String>,
    pub semester: Option<String>,
    pub courses: Vec<CourseInput>,
}

impl PeriodEntry {
    /// Label used in error messages.
    pub fn label(&self, index: usize) -> String {
        match (&self.level, self.semester.as_ref().or(self.name.as_ref())) {
            (Some(level), Some(sem)) => format!("{level} - {sem}"),
            (None, Some(name)) => name.clone(),
            _ => format!("period {}", index + 1),
        }
    }
}

impl RosterFile {
    /// Layout from the file, falling back to `default`.
    pub fn layout_or(&self, default: Layout) -> Layout {
        self.layout.unwrap_or(default)
    }
}

/// Parse a single TOML file into a `RosterFile`.
pub fn parse_roster(path: &Path) -> Result<RosterFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file: {}", path.display()))?;

    parse_roster_str(&content, path)
}

/// Parse a TOML string into a `RosterFile` (useful for testing).
pub fn parse_roster_str(content: &str, source_path: &Path) -> Result<RosterFile> {
    let parsed: TomlRosterFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let layout = parsed
        .roster
        .layout
        .map(|l| l.parse::<Layout>().map_err(|e| anyhow::anyhow!("{}", e)))
        .transpose()?;

    let periods = parsed
        .periods
        .into_iter()
        .map(|p| PeriodEntry {
            name: p.name,
            level: p.level,
            semester: p.semester,
            courses: p
                .courses
                .into_iter()
                .map(|c| CourseInput {
                    name: c.name,
                    credits: c.credits.map(TomlCredits::into_text).unwrap_or_default(),
                    grade: c.grade,
                })
                .collect(),
        })
        .collect();

    Ok(RosterFile { layout, periods })
}

/// Recursively load all `.toml` roster files from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_roster_directory(dir: &Path) -> Result<Vec<(PathBuf, RosterFile)>> {
    let mut files = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            files.extend(load_roster_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_roster(&path) {
                Ok(file) => files.push((path, file)),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(files)
}

/// Resolve the period a `[[periods]]` entry refers to, creating flat
/// semesters as needed.
fn resolve_period(session: &mut Session, entry: &PeriodEntry, index: usize) -> Result<PeriodId, GpaError> {
    match session.layout() {
        Layout::Flat => {
            let existing = session.roster().periods().get(index).map(|p| p.id);
            match existing {
                Some(id) => {
                    if let Some(name) = &entry.name {
                        session.rename_period(id, name.clone())?;
                    }
                    Ok(id)
                }
                None => match &entry.name {
                    Some(name) => session.add_named_semester(name.clone()),
                    None => session.add_semester(),
                },
            }
        }
        Layout::Nested => {
            let level = entry.level.clone().unwrap_or_default();
            let semester = entry
                .semester
                .clone()
                .or_else(|| entry.name.clone())
                .unwrap_or_default();
            session
                .roster()
                .find(&level, &semester)
                .ok_or(GpaError::UnknownPeriod { level, semester })
        }
    }
}

/// Build a session by feeding every course in `file` through
/// [`Session::add_course`].
///
/// Stops at the first rejected course.
pub fn build_session(file: &RosterFile, default_layout: Layout) -> Result<Session> {
    let mut session = Session::new(file.layout_or(default_layout));

    for (index, entry) in file.periods.iter().enumerate() {
        let label = entry.label(index);
        let period = resolve_period(&mut session, entry, index)
            .with_context(|| format!("in {label}"))?;
        for (pos, input) in entry.courses.iter().enumerate() {
            session
                .add_course(period, input.clone())
                .with_context(|| format!("in {label}, course {}", pos + 1))?;
        }
    }

    if let Some(first) = session.roster().periods().first().map(|p| p.id) {
        session.select_period(first)?;
    }
    tracing::debug!(
        layout = %session.layout(),
        courses = session.roster().course_count(),
        "built session from roster file"
    );
    Ok(session)
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The file would be rejected when loaded.
    Error,
    /// The file loads, but probably not as intended.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// A finding from roster validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// The period label (if applicable).
    pub period: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    fn error(period: Option<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            period,
            message: message.into(),
        }
    }

    fn warning(period: Option<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            period,
            message: message.into(),
        }
    }
}

/// Validate a roster file, collecting every problem instead of stopping at
/// the first.
pub fn validate_roster(file: &RosterFile, default_layout: Layout) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let layout = file.layout_or(default_layout);
    let mut scratch = Session::new(layout);
    let mut seen_periods = HashSet::new();

    for (index, entry) in file.periods.iter().enumerate() {
        let label = entry.label(index);

        if layout == Layout::Flat && (entry.level.is_some() || entry.semester.is_some()) {
            issues.push(ValidationIssue::warning(
                Some(label.clone()),
                "level/semester keys are ignored in the flat layout; set layout = \"nested\" to use them",
            ));
        }

        match resolve_period(&mut scratch, entry, index) {
            Ok(id) => {
                if layout == Layout::Nested && !seen_periods.insert(id) {
                    issues.push(ValidationIssue::warning(
                        Some(label.clone()),
                        "period listed more than once; courses will be merged",
                    ));
                }
            }
            Err(e) => issues.push(ValidationIssue::error(Some(label.clone()), e.to_string())),
        }

        if entry.courses.is_empty() {
            issues.push(ValidationIssue::warning(
                Some(label.clone()),
                "period has no courses and will be left out of the report",
            ));
        }

        let mut seen_names = HashSet::new();
        for (pos, input) in entry.courses.iter().enumerate() {
            if let Err(e) = Course::from_input(input) {
                issues.push(ValidationIssue::error(
                    Some(label.clone()),
                    format!("course {}: {e}", pos + 1),
                ));
            }
            let key = input.name.trim().to_lowercase();
            if !key.is_empty() && !seen_names.insert(key) {
                issues.push(ValidationIssue::warning(
                    Some(label.clone()),
                    format!("duplicate course name: {}", input.name.trim()),
                ));
            }
        }
    }

    if file.periods.iter().all(|p| p.courses.is_empty()) {
        issues.push(ValidationIssue::warning(None, "roster has no courses"));
    }

    issues
}
