pub mod facets;
pub mod favorite;
pub mod favorites;
pub mod init;
pub mod list;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizbank_core::config::load_config_from;
use quizbank_core::favorites::FavoritesStore;
use quizbank_core::loader::open_source;
use quizbank_core::session::VisibleQuestion;
use quizbank_core::storage::FileStore;
use quizbank_core::Session;

use crate::SourceArgs;

/// Resolve config and flags, restore favorites, then load the bank once.
pub async fn open_session(args: SourceArgs) -> Result<Session> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(questions) = args.questions {
        config.questions = questions;
    }
    if let Some(storage) = args.storage {
        config.storage_path = storage;
    }
    tracing::debug!(
        questions = %config.questions,
        storage = %config.storage_path.display(),
        "opening session"
    );

    let favorites = FavoritesStore::open(
        Box::new(FileStore::new(&config.storage_path)),
        &config.favorites_key,
    );

    let session = match open_source(&config.questions, config.request_timeout()) {
        Ok(source) => Session::start(source.as_ref(), favorites).await,
        Err(e) => Session::new(Err(e), favorites),
    };
    Ok(session)
}

/// Fail with the terminal load error, if there is one.
pub fn ensure_loaded(session: &Session) -> Result<()> {
    match session.load_error() {
        Some(e) => anyhow::bail!("failed to load questions: {e}"),
        None => Ok(()),
    }
}

pub fn question_table(questions: &[VisibleQuestion]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Fav",
        "Difficulty",
        "Question",
        "Answer",
        "Categories",
    ]);

    for q in questions {
        table.add_row(vec![
            Cell::new(q.question.id),
            Cell::new(if q.is_favorite { "*" } else { "" }),
            Cell::new(format!("{}/5", q.question.difficulty)),
            Cell::new(&q.question.question),
            Cell::new(&q.question.answer),
            Cell::new(q.question.categories.join(", ")),
        ]);
    }

    table
}
