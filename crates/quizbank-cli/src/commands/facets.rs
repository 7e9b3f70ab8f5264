//! The `quizbank facets` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::{ensure_loaded, open_session};
use crate::SourceArgs;

pub async fn execute(source: SourceArgs) -> Result<()> {
    let session = open_session(source).await?;
    ensure_loaded(&session)?;

    let counts = session.facet_counts();

    let mut difficulties = Table::new();
    difficulties.set_header(vec!["Difficulty", "Questions"]);
    difficulties.add_row(vec![Cell::new("All difficulties"), Cell::new(counts.total)]);
    for (level, n) in &counts.difficulties {
        difficulties.add_row(vec![Cell::new(level), Cell::new(n)]);
    }

    let mut categories = Table::new();
    categories.set_header(vec!["Category", "Questions"]);
    categories.add_row(vec![Cell::new("All categories"), Cell::new(counts.total)]);
    for (name, n) in &counts.categories {
        categories.add_row(vec![Cell::new(name), Cell::new(n)]);
    }

    println!("{difficulties}");
    println!("{categories}");

    Ok(())
}
