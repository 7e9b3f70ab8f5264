//! The `quizbank list` command.

use anyhow::Result;

use quizbank_core::model::SortMode;
use quizbank_core::ViewStatus;

use super::{ensure_loaded, open_session, question_table};
use crate::SourceArgs;

pub async fn execute(
    difficulties: Vec<u8>,
    categories: Vec<String>,
    search: Option<String>,
    sort: String,
    favorites_only: bool,
    format: String,
    source: SourceArgs,
) -> Result<()> {
    let sort: SortMode = sort.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format: {format}"
    );

    let mut session = open_session(source).await?;
    ensure_loaded(&session)?;

    // Replay the flags as the events a user would trigger: uncheck the
    // group's master, then check each wanted child.
    if !difficulties.is_empty() {
        session.set_all_difficulties(false);
        for level in difficulties {
            session.set_difficulty(level, true);
        }
    }
    if !categories.is_empty() {
        session.set_all_categories(false);
        for name in categories {
            session.set_category(name.trim(), true);
        }
    }
    if let Some(text) = search {
        session.set_search_query(&text);
    }
    session.set_sort_mode(sort);
    if favorites_only {
        session.toggle_favorites_only();
    }

    let view = session.view();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    match view.status {
        ViewStatus::NoResults => println!("No matching questions."),
        _ => {
            println!("{}", question_table(&view.questions));
            println!(
                "{} of {} questions shown, {} favorite(s)",
                view.visible_count, view.facet_counts.total, view.favorite_count
            );
        }
    }

    Ok(())
}
