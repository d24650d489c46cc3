//! Language partner model.

use serde::{Deserialize, Serialize};

/// A language partner the user can schedule sessions with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    /// Language the partner teaches; used as the session language.
    pub native_language: String,
    /// Language the partner is learning.
    pub learning_language: String,
    /// Average rating out of 5.
    #[serde(default)]
    pub rating: f32,
    /// Free-form availability description, e.g. "Evenings & Weekends".
    #[serde(default)]
    pub availability: String,
}

impl Partner {
    /// Uppercase initials of the display name, e.g. "MR" for "Maria Rodriguez".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Case-insensitive match on name or either language.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.name, &self.native_language, &self.learning_language]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}
