//! The `quizbank favorites` command.

use anyhow::Result;

use super::{ensure_loaded, open_session, question_table};
use crate::SourceArgs;

pub async fn execute(source: SourceArgs) -> Result<()> {
    let session = open_session(source).await?;
    ensure_loaded(&session)?;

    let favorites = session.favorites_view();
    if favorites.is_empty() {
        println!("No favorite questions.");
    } else {
        println!("{}", question_table(&favorites));
        println!("{} favorite(s)", favorites.len());
    }

    Ok(())
}
