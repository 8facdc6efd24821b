//! gpacalc-core — GPA engine, grade scale, averages, and text reports.
//!
//! This crate defines the roster data model, the session state that owns it,
//! and the two averaging rules (credit-weighted overall GPA and the
//! unweighted cumulative CGPA) that the rest of gpacalc builds on.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;

pub use engine::Session;
pub use error::{CourseField, GpaError};
pub use model::{Course, CourseId, CourseInput, Grade, Layout, Period, PeriodId, Roster};
