//! Grade-point averages and roster summaries.
//!
//! Two averages are kept deliberately distinct:
//!
//! - the overall GPA weights every course by its credit units across the
//!   whole roster;
//! - the cumulative GPA (CGPA) is the plain mean of each non-empty period's
//!   own GPA, so a light semester counts as much as a heavy one.

use serde::{Deserialize, Serialize};

use crate::model::{Course, PeriodId, Roster};

/// Credit-weighted average of grade points.
///
/// Returns 0.0 for an empty list.
pub fn period_average<'a, I>(courses: I) -> f64
where
    I: IntoIterator<Item = &'a Course>,
{
    let (points, credits) = courses
        .into_iter()
        .fold((0.0f64, 0.0f64), |(points, credits), c| {
            (points + c.quality_points(), credits + c.credits)
        });
    if credits == 0.0 {
        return 0.0;
    }
    points / credits
}

/// Credit-weighted average over every course in the roster.
pub fn overall_average(roster: &Roster) -> f64 {
    period_average(roster.courses())
}

/// Mean of the per-period averages, skipping periods with no courses.
///
/// Returns 0.0 when no period has a course.
pub fn cumulative_average(roster: &Roster) -> f64 {
    let averages: Vec<f64> = roster
        .periods()
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| period_average(&p.courses))
        .collect();
    if averages.is_empty() {
        return 0.0;
    }
    averages.iter().sum::<f64>() / averages.len() as f64
}

/// Computed figures for a whole roster, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSummary {
    /// Credit-weighted GPA across all courses.
    pub overall: f64,
    /// Unweighted mean of non-empty period GPAs.
    pub cumulative: f64,
    pub total_credits: f64,
    pub course_count: usize,
    pub periods: Vec<PeriodStats>,
}

/// Computed figures for a single period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub id: PeriodId,
    pub name: String,
    pub level: Option<String>,
    pub course_count: usize,
    pub credits: f64,
    pub average: f64,
}

impl PeriodStats {
    pub fn is_empty(&self) -> bool {
        self.course_count == 0
    }
}

/// Compute every figure a renderer needs from a roster.
pub fn summarize(roster: &Roster) -> RosterSummary {
    let periods = roster
        .periods()
        .iter()
        .map(|p| PeriodStats {
            id: p.id,
            name: p.display_name(),
            level: p.level.clone(),
            course_count: p.courses.len(),
            credits: p.total_credits(),
            average: period_average(&p.courses),
        })
        .collect();

    RosterSummary {
        overall: overall_average(roster),
        cumulative: cumulative_average(roster),
        total_credits: roster.courses().map(|c| c.credits).sum(),
        course_count: roster.course_count(),
        periods,
    }
}
