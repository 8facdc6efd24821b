//! gpacalc-report — alternate renderings of a GPA session.
//!
//! The plain-text report lives in `gpacalc-core`; this crate adds a
//! self-contained HTML page and a machine-readable JSON summary.

pub mod html;
pub mod json;

pub use html::{generate_html, write_html_report};
pub use json::{generate_json, write_json_report};
