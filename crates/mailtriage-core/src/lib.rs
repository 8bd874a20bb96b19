#![deny(missing_docs)]

//! # mailtriage-core: Foundational Types for mailtriage
//!
//! Everything the classification service and its clients agree on lives
//! here, with no HTTP or runtime dependencies:
//!
//! - [`Category`] and [`Scores`]: the two-label vocabulary and its wire
//!   format (`"Produtivo"` / `"Improdutivo"`).
//! - [`preprocess`]: lowercase, strip punctuation and digits, drop English
//!   stopwords, Porter-stem.
//! - [`KeywordClassifier`]: the rule-based classifier used whenever no
//!   remote model is configured, and as the fallback when one fails.
//! - [`replies`]: predefined replies per category.
//! - [`extract`]: text extraction from uploaded `.txt` and `.pdf` files.

pub mod category;
pub mod error;
pub mod extract;
pub mod keywords;
pub mod porter;
pub mod preprocess;
pub mod replies;
mod stopwords;

pub use category::{Category, Classification, ParseCategoryError, Scores};
pub use error::ExtractError;
pub use extract::extract_text;
pub use keywords::KeywordClassifier;
pub use preprocess::preprocess;
pub use replies::canned_reply;
