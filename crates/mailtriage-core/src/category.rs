//! # Email Categories
//!
//! Defines the closed [`Category`] vocabulary. Every classifier backend and
//! every API payload uses this enum; free-form label strings only exist at
//! the wire boundary, where they are parsed with [`Category::from_str`].
//!
//! The wire names are the Portuguese labels of the service contract
//! (`"Produtivo"`, `"Improdutivo"`), which is also what the zero-shot
//! model is prompted with as candidate labels.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification outcome for a single email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Requires action or a reply (support requests, status checks, invoices).
    #[serde(rename = "Produtivo")]
    Productive,
    /// Needs no action (greetings, thanks, season's wishes).
    #[serde(rename = "Improdutivo")]
    Unproductive,
}

impl Category {
    /// Both categories, in the order they are offered to classifiers.
    pub fn all() -> &'static [Category] {
        &[Self::Productive, Self::Unproductive]
    }

    /// Wire name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Productive => "Produtivo",
            Self::Unproductive => "Improdutivo",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label string names no known [`Category`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category label: \"{0}\"")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts the wire names and their English equivalents, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "produtivo" | "productive" => Ok(Self::Productive),
            "improdutivo" | "unproductive" => Ok(Self::Unproductive),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// Per-category confidence scores in `0.0..=1.0`.
///
/// Always carries an entry for every [`Category`]; missing entries read as
/// `0.0`. Serializes as a JSON object keyed by wire name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scores(BTreeMap<Category, f64>);

impl Scores {
    /// Build scores from the two category values.
    pub fn new(productive: f64, unproductive: f64) -> Self {
        let mut map = BTreeMap::new();
        map.insert(Category::Productive, productive);
        map.insert(Category::Unproductive, unproductive);
        Self(map)
    }

    /// Build scores from `(category, score)` pairs. Categories absent from
    /// the input are filled with `0.0`; later duplicates win.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Category, f64)>) -> Self {
        let mut scores = Self::new(0.0, 0.0);
        for (category, score) in pairs {
            scores.0.insert(category, score);
        }
        scores
    }

    /// Score for one category.
    pub fn get(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    /// Iterate `(category, score)` pairs in [`Category::all`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::all().iter().map(|c| (*c, self.get(*c)))
    }
}

/// A predicted category together with the scores that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Predicted category.
    pub category: Category,
    /// Scores for every category.
    pub scores: Scores,
}
