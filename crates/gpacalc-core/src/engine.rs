//! Session state and the operations that update it.
//!
//! A [`Session`] owns the roster for as long as the calculator runs. Every
//! user action maps to one method here; front ends read the roster back and
//! render it.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::GpaError;
use crate::model::{Course, CourseId, CourseInput, Layout, PeriodId, Roster};
use crate::report;
use crate::statistics::{self, RosterSummary};

/// Light or dark rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// The calculator's application state.
#[derive(Debug, Clone)]
pub struct Session {
    roster: Roster,
    selected: PeriodId,
    theme: Theme,
}

impl Session {
    pub fn new(layout: Layout) -> Self {
        let roster = Roster::new(layout);
        let selected = roster.periods()[0].id;
        Self {
            roster,
            selected,
            theme: Theme::default(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn layout(&self) -> Layout {
        self.roster.layout
    }

    /// The period new courses go to by default.
    pub fn selected(&self) -> PeriodId {
        self.selected
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.theme
    }

    /// Move the cursor to another period.
    pub fn select_period(&mut self, period: PeriodId) -> Result<(), GpaError> {
        if self.roster.period(period).is_none() {
            return Err(GpaError::PeriodNotFound(period));
        }
        self.selected = period;
        Ok(())
    }

    /// Append a "Semester N" period and select it.
    pub fn add_semester(&mut self) -> Result<PeriodId, GpaError> {
        self.push_semester(None)
    }

    /// Append a semester with an explicit name and select it.
    pub fn add_named_semester(&mut self, name: impl Into<String>) -> Result<PeriodId, GpaError> {
        self.push_semester(Some(name.into()))
    }

    /// Rename a flat-layout semester.
    pub fn rename_period(&mut self, period: PeriodId, name: impl Into<String>) -> Result<(), GpaError> {
        if self.layout() == Layout::Nested {
            return Err(GpaError::FixedLayout);
        }
        let target = self
            .roster
            .period_mut(period)
            .ok_or(GpaError::PeriodNotFound(period))?;
        target.name = name.into();
        Ok(())
    }

    fn push_semester(&mut self, name: Option<String>) -> Result<PeriodId, GpaError> {
        let id = self.roster.push_semester(name)?;
        self.selected = id;
        tracing::debug!(period = %id, "added semester");
        Ok(id)
    }

    /// Validate `input` and append it to `period`.
    ///
    /// On error the roster is left untouched.
    pub fn add_course(&mut self, period: PeriodId, input: CourseInput) -> Result<CourseId, GpaError> {
        let target = self
            .roster
            .period_mut(period)
            .ok_or(GpaError::PeriodNotFound(period))?;
        let course = Course::from_input(&input)?;
        let id = course.id;
        tracing::debug!(
            period = %period,
            course = %course.name,
            credits = course.credits,
            grade = %course.grade,
            "added course"
        );
        target.courses.push(course);
        Ok(id)
    }

    /// Add a course to the selected period.
    pub fn add_course_to_selected(&mut self, input: CourseInput) -> Result<CourseId, GpaError> {
        self.add_course(self.selected, input)
    }

    /// Remove a course; `None` if the period or course does not exist.
    pub fn remove_course(&mut self, period: PeriodId, course: CourseId) -> Option<Course> {
        let target = self.roster.period_mut(period)?;
        let index = target.courses.iter().position(|c| c.id == course)?;
        let removed = target.courses.remove(index);
        tracing::debug!(period = %period, course = %removed.name, "removed course");
        Some(removed)
    }

    pub fn overall_average(&self) -> f64 {
        statistics::overall_average(&self.roster)
    }

    pub fn cumulative_average(&self) -> f64 {
        statistics::cumulative_average(&self.roster)
    }

    pub fn summary(&self) -> RosterSummary {
        statistics::summarize(&self.roster)
    }

    /// Render the plain-text report for the current roster.
    pub fn report(&self) -> String {
        report::serialize_report(
            &self.roster,
            self.overall_average(),
            self.cumulative_average(),
        )
    }

    /// Write the plain-text report to `path`.
    pub fn export_report(&self, path: &Path) -> Result<()> {
        report::write_report(&self.report(), path)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}
