//! The `gpacalc levels` command.

use anyhow::Result;

use gpacalc_core::model::{LEVELS, SEMESTERS};

pub fn execute() -> Result<()> {
    for level in LEVELS {
        println!("{level}");
        for semester in SEMESTERS {
            println!("  {semester}");
        }
    }
    Ok(())
}
