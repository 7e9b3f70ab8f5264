//! The `quizbank favorite` command.

use anyhow::Result;

use super::open_session;
use crate::SourceArgs;

pub async fn execute(id: u32, source: SourceArgs) -> Result<()> {
    let mut session = open_session(source).await?;

    match session.load_error() {
        Some(e) => eprintln!("Warning: questions unavailable ({e}); toggling id {id} anyway."),
        None => {
            let known = session.questions().iter().any(|q| q.id == id);
            // Unknown ids may still be removed, e.g. after the bank changed.
            if !known && !session.favorites().is_favorite(id) {
                anyhow::bail!("no question with id {id}");
            }
        }
    }

    let view = session.toggle_favorite(id);
    if session.favorites().is_favorite(id) {
        println!("Added question {id} to favorites ({} total)", view.favorite_count);
    } else {
        println!(
            "Removed question {id} from favorites ({} total)",
            view.favorite_count
        );
    }

    Ok(())
}
