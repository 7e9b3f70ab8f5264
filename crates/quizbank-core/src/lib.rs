//! quizbank-core — Question bank model, faceted filtering, and favorites.
//!
//! This crate holds the state and rules behind browsing a quiz bank: which
//! questions are visible for a combination of facet filters and search text,
//! how "all" controls stay in sync with their children, how results are
//! ordered, and how favorites persist between sessions. Rendering is left to
//! the caller, which receives plain [`session::ViewSnapshot`] values.

pub mod collation;
pub mod config;
pub mod error;
pub mod facets;
pub mod favorites;
pub mod filter;
pub mod loader;
pub mod model;
pub mod session;
pub mod storage;
pub mod sync;

pub use error::LoadError;
pub use session::{Session, ViewSnapshot, ViewStatus};
