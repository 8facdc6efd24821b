//! Core data model types for gpacalc.
//!
//! These are the fundamental types the rest of the system uses to represent
//! grades, courses, periods, and the roster that groups them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CourseField, GpaError};

/// Level names of the nested layout, in display order.
pub const LEVELS: [&str; 5] = ["100 Level", "200 Level", "300 Level", "400 Level", "500 Level"];

/// Semester names inside every level of the nested layout.
pub const SEMESTERS: [&str; 2] = ["First Semester", "Second Semester"];

/// Largest credit load accepted for a single course.
pub const MAX_CREDITS: f64 = 1000.0;

/// A letter grade on the five-point scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Grade; 6] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E, Grade::F];

    /// Grade points for this symbol.
    pub fn points(self) -> f64 {
        match self {
            Grade::A => 5.0,
            Grade::B => 4.0,
            Grade::C => 3.0,
            Grade::D => 2.0,
            Grade::E => 1.0,
            Grade::F => 0.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Grade {
    type Err = GpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = s.trim();
        if symbol.is_empty() {
            return Err(GpaError::invalid(CourseField::Grade, "grade is required"));
        }
        Grade::ALL
            .into_iter()
            .find(|g| g.symbol().eq_ignore_ascii_case(symbol))
            .ok_or_else(|| {
                GpaError::invalid(
                    CourseField::Grade,
                    format!("unknown grade '{symbol}' (expected one of A, B, C, D, E, F)"),
                )
            })
    }
}

/// Unique course identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw course form values, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseInput {
    pub name: String,
    pub credits: String,
    pub grade: String,
}

impl CourseInput {
    pub fn new(
        name: impl Into<String>,
        credits: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            credits: credits.into(),
            grade: grade.into(),
        }
    }
}

/// A course recorded in a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier, assigned when the course is added.
    pub id: CourseId,
    /// Course name, never blank.
    pub name: String,
    /// Credit units, always finite and greater than zero.
    pub credits: f64,
    pub grade: Grade,
}

impl Course {
    /// Validate form input and build a course with a fresh id.
    ///
    /// Fields are checked in form order (name, credits, grade) and the first
    /// failure is returned.
    pub fn from_input(input: &CourseInput) -> Result<Self, GpaError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(GpaError::invalid(CourseField::Name, "course name is required"));
        }
        let credits = parse_credits(&input.credits)?;
        let grade: Grade = input.grade.parse()?;

        Ok(Self {
            id: CourseId::new(),
            name: name.to_string(),
            credits,
            grade,
        })
    }

    /// Grade points weighted by credit units.
    pub fn quality_points(&self) -> f64 {
        self.grade.points() * self.credits
    }
}

fn parse_credits(raw: &str) -> Result<f64, GpaError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(GpaError::invalid(CourseField::Credits, "credits are required"));
    }
    let credits: f64 = raw.parse().map_err(|_| {
        GpaError::invalid(CourseField::Credits, format!("'{raw}' is not a number"))
    })?;
    if !credits.is_finite() || credits <= 0.0 {
        return Err(GpaError::invalid(
            CourseField::Credits,
            format!("must be greater than zero, got {raw}"),
        ));
    }
    if credits > MAX_CREDITS {
        return Err(GpaError::invalid(
            CourseField::Credits,
            format!("must be at most {MAX_CREDITS}, got {raw}"),
        ));
    }
    Ok(credits)
}

/// Period identifier, unique within a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodId(pub u32);

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A semester and its courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: PeriodId,
    /// Semester name (e.g. "Semester 2" or "First Semester").
    pub name: String,
    /// Owning level in the nested layout.
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Period {
    /// Name shown in reports: "<level> - <semester>" when nested.
    pub fn display_name(&self) -> String {
        match &self.level {
            Some(level) => format!("{level} - {}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn total_credits(&self) -> f64 {
        self.courses.iter().map(|c| c.credits).sum()
    }
}

/// How periods are organised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// A growable list of "Semester N" periods.
    #[default]
    Flat,
    /// Fixed levels, each with a first and second semester.
    Nested,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Flat => write!(f, "flat"),
            Layout::Nested => write!(f, "nested"),
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" | "semesters" => Ok(Layout::Flat),
            "nested" | "levels" => Ok(Layout::Nested),
            other => Err(format!("unknown layout: {other}")),
        }
    }
}

/// The ordered collection of periods owned by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub layout: Layout,
    periods: Vec<Period>,
}

impl Roster {
    /// Create the initial roster for a layout.
    ///
    /// Flat starts with a single "Semester 1"; nested holds every
    /// level/semester pair up front.
    pub fn new(layout: Layout) -> Self {
        let periods = match layout {
            Layout::Flat => vec![Period {
                id: PeriodId(1),
                name: "Semester 1".into(),
                level: None,
                courses: Vec::new(),
            }],
            Layout::Nested => LEVELS
                .iter()
                .flat_map(|level| SEMESTERS.iter().map(move |sem| (*level, *sem)))
                .zip(1..)
                .map(|((level, sem), id)| Period {
                    id: PeriodId(id),
                    name: sem.to_string(),
                    level: Some(level.to_string()),
                    courses: Vec::new(),
                })
                .collect(),
        };
        Self { layout, periods }
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn period(&self, id: PeriodId) -> Option<&Period> {
        self.periods.iter().find(|p| p.id == id)
    }

    pub(crate) fn period_mut(&mut self, id: PeriodId) -> Option<&mut Period> {
        self.periods.iter_mut().find(|p| p.id == id)
    }

    /// Every course of every period, in roster order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.periods.iter().flat_map(|p| p.courses.iter())
    }

    pub fn course_count(&self) -> usize {
        self.periods.iter().map(|p| p.courses.len()).sum()
    }

    /// Resolve a nested-layout period by level and semester name.
    pub fn find(&self, level: &str, semester: &str) -> Option<PeriodId> {
        self.periods
            .iter()
            .find(|p| {
                p.level
                    .as_deref()
                    .is_some_and(|l| l.eq_ignore_ascii_case(level.trim()))
                    && p.name.eq_ignore_ascii_case(semester.trim())
            })
            .map(|p| p.id)
    }

    /// Append the next "Semester N" period (flat layout only).
    pub(crate) fn push_semester(&mut self, name: Option<String>) -> Result<PeriodId, GpaError> {
        if self.layout == Layout::Nested {
            return Err(GpaError::FixedLayout);
        }
        let next = self.periods.len() + 1;
        let id = PeriodId(self.periods.iter().map(|p| p.id.0).max().unwrap_or(0) + 1);
        self.periods.push(Period {
            id,
            name: name.unwrap_or_else(|| format!("Semester {next}")),
            level: None,
            courses: Vec::new(),
        });
        Ok(id)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(Layout::Flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_display_and_parse() {
        assert_eq!(Grade::A.to_string(), "A");
        assert_eq!("b".parse::<Grade>().unwrap(), Grade::B);
        assert_eq!(" F ".parse::<Grade>().unwrap(), Grade::F);
        assert!("G".parse::<Grade>().is_err());
        assert!("AB".parse::<Grade>().is_err());

        let err = "".parse::<Grade>().unwrap_err();
        assert_eq!(err.field(), Some(CourseField::Grade));
    }

    #[test]
    fn grade_scale_is_five_point_descending() {
        let points: Vec<f64> = Grade::ALL.iter().map(|g| g.points()).collect();
        assert_eq!(points, vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn course_from_valid_input() {
        let course = Course::from_input(&CourseInput::new(" Mathematics 101 ", "3", "a")).unwrap();
        assert_eq!(course.name, "Mathematics 101");
        assert_eq!(course.credits, 3.0);
        assert_eq!(course.grade, Grade::A);
        assert_eq!(course.quality_points(), 15.0);
    }

    #[test]
    fn course_input_reports_first_bad_field() {
        let cases = [
            (CourseInput::new("", "3", "A"), CourseField::Name),
            (CourseInput::new("   ", "x", "Z"), CourseField::Name),
            (CourseInput::new("Physics", "", "A"), CourseField::Credits),
            (CourseInput::new("Physics", "three", "A"), CourseField::Credits),
            (CourseInput::new("Physics", "0", "A"), CourseField::Credits),
            (CourseInput::new("Physics", "-2", "A"), CourseField::Credits),
            (CourseInput::new("Physics", "inf", "A"), CourseField::Credits),
            (CourseInput::new("Physics", "NaN", "A"), CourseField::Credits),
            (CourseInput::new("Physics", "1e308", "A"), CourseField::Credits),
            (CourseInput::new("Physics", "1000.5", "A"), CourseField::Credits),
            (CourseInput::new("Physics", "2", ""), CourseField::Grade),
            (CourseInput::new("Physics", "2", "A+"), CourseField::Grade),
        ];
        for (input, field) in cases {
            let err = Course::from_input(&input).unwrap_err();
            assert_eq!(err.field(), Some(field), "input: {input:?}");
        }
    }

    #[test]
    fn credits_ceiling_is_inclusive() {
        let course = Course::from_input(&CourseInput::new("Thesis", "1000", "B")).unwrap();
        assert_eq!(course.credits, MAX_CREDITS);

        let err = Course::from_input(&CourseInput::new("Thesis", "1e308", "B")).unwrap_err();
        assert!(err.to_string().contains("at most 1000"), "{err}");
    }

    #[test]
    fn course_ids_are_unique() {
        let input = CourseInput::new("Chem", "2", "C");
        let ids: std::collections::HashSet<CourseId> = (0..1000)
            .map(|_| Course::from_input(&input).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn flat_roster_starts_with_one_semester() {
        let roster = Roster::new(Layout::Flat);
        assert_eq!(roster.periods().len(), 1);
        assert_eq!(roster.periods()[0].name, "Semester 1");
        assert_eq!(roster.periods()[0].display_name(), "Semester 1");
    }

    #[test]
    fn nested_roster_has_every_level_and_semester() {
        let roster = Roster::new(Layout::Nested);
        assert_eq!(roster.periods().len(), LEVELS.len() * SEMESTERS.len());
        assert_eq!(roster.periods()[0].display_name(), "100 Level - First Semester");
        assert_eq!(roster.periods()[9].display_name(), "500 Level - Second Semester");

        let id = roster.find("300 level", "second semester").unwrap();
        assert_eq!(roster.period(id).unwrap().level.as_deref(), Some("300 Level"));
        assert!(roster.find("600 Level", "First Semester").is_none());
    }

    #[test]
    fn push_semester_numbers_sequentially() {
        let mut roster = Roster::new(Layout::Flat);
        let id = roster.push_semester(None).unwrap();
        assert_eq!(id, PeriodId(2));
        assert_eq!(roster.period(id).unwrap().name, "Semester 2");

        let named = roster.push_semester(Some("Summer".into())).unwrap();
        assert_eq!(roster.period(named).unwrap().name, "Summer");
    }

    #[test]
    fn nested_roster_refuses_new_semesters() {
        let mut roster = Roster::new(Layout::Nested);
        assert_eq!(roster.push_semester(None), Err(GpaError::FixedLayout));
    }

    #[test]
    fn layout_display_and_parse() {
        assert_eq!(Layout::Nested.to_string(), "nested");
        assert_eq!("FLAT".parse::<Layout>().unwrap(), Layout::Flat);
        assert_eq!("levels".parse::<Layout>().unwrap(), Layout::Nested);
        assert!("grid".parse::<Layout>().is_err());
    }
}
