//! Question bank loading.
//!
//! Reads the bank once at startup from a file or an HTTP endpoint and turns
//! it into an immutable [`QuestionStore`].

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::error::LoadError;
use crate::model::{Question, QuestionRecord};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The loaded questions and the categories they use.
#[derive(Debug, Clone, Default)]
pub struct QuestionStore {
    questions: Vec<Question>,
    categories: BTreeSet<String>,
}

impl QuestionStore {
    /// Build a store from raw records, assigning positional ids where missing.
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        let questions: Vec<Question> = records
            .into_iter()
            .zip(1u32..)
            .map(|(record, position)| record.into_question(position))
            .collect();
        Self::from_questions(questions)
    }

    /// Build a store from already-identified questions.
    pub fn from_questions(questions: Vec<Question>) -> Self {
        let categories = questions
            .iter()
            .flat_map(|q| q.categories.iter().cloned())
            .collect();
        Self {
            questions,
            categories,
        }
    }

    /// All questions in load order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Every distinct category, sorted.
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn get(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Parse a JSON question list (useful for testing).
pub fn parse_questions_str(content: &str, source_name: &str) -> Result<QuestionStore, LoadError> {
    let records: Vec<QuestionRecord> =
        serde_json::from_str(content).map_err(|e| LoadError::Malformed {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
    Ok(QuestionStore::from_records(records))
}

/// Where the question bank comes from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (path or URL).
    fn name(&self) -> &str;

    /// Fetch the raw JSON text of the bank.
    async fn fetch(&self) -> Result<String, LoadError>;
}

/// Load and parse the bank from `source`. Called once per session.
#[instrument(skip(source), fields(bank = %source.name()))]
pub async fn load_questions(source: &dyn QuestionSource) -> Result<QuestionStore, LoadError> {
    let content = source.fetch().await?;
    let store = parse_questions_str(&content, source.name())?;
    tracing::info!(
        questions = store.len(),
        categories = store.categories().len(),
        "question bank loaded"
    );
    Ok(store)
}

/// A question bank stored in a local JSON file.
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Unreachable {
                source_name: self.name.clone(),
                message: e.to_string(),
            })
    }
}

/// A question bank served over HTTP.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Unreachable {
                source_name: url.to_string(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    fn unreachable(&self, message: String) -> LoadError {
        LoadError::Unreachable {
            source_name: self.url.clone(),
            message,
        }
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    self.unreachable("request timed out".into())
                } else {
                    self.unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.unreachable(format!("HTTP {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| self.unreachable(format!("failed to read body: {e}")))
    }
}

/// Pick a source for `location`: `http(s)://` URLs go over HTTP, anything
/// else is treated as a file path.
pub fn open_source(location: &str, timeout: Duration) -> Result<Box<dyn QuestionSource>, LoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}
