//! The `gpacalc grades` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gpacalc_core::Grade;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Grade", "Points"]);
    for grade in Grade::ALL {
        table.add_row(vec![
            Cell::new(grade),
            Cell::new(format!("{:.1}", grade.points())),
        ]);
    }
    println!("{table}");
    Ok(())
}
