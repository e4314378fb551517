//! Page Budget: per-entity content limits that keep a rendered résumé on one page.
//!
//! # Budget rules
//! - Experience bullets: at most `max_bullets`, at least `min_bullets` when sources allow
//! - Bullet length: at most `max_words_per_bullet` words
//! - Education description: at most `max_description_chars` characters
//!
//! The numbers come from configuration (see `Config::page_budget`).

use serde::{Deserialize, Serialize};

use crate::document::normalize::clean_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBudget {
    pub min_bullets: usize,
    pub max_bullets: usize,
    pub max_words_per_bullet: usize,
    pub max_description_chars: usize,
}

impl Default for PageBudget {
    fn default() -> Self {
        Self {
            min_bullets: 3,
            max_bullets: 5,
            max_words_per_bullet: 20,
            max_description_chars: 300,
        }
    }
}

impl PageBudget {
    /// Keeps the first `max_words_per_bullet` words of a bullet.
    pub fn cap_words(&self, bullet: &str) -> String {
        bullet
            .split_whitespace()
            .take(self.max_words_per_bullet)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Cleans every bullet, drops empty ones, caps the list and each bullet's length.
    pub fn trim_bullets(&self, bullets: &[String]) -> Vec<String> {
        bullets
            .iter()
            .map(|b| self.cap_words(&clean_string(b)))
            .filter(|b| !b.is_empty())
            .take(self.max_bullets)
            .collect()
    }

    /// Cuts a description to `max_description_chars` characters (not bytes).
    pub fn truncate_description(&self, description: &str) -> String {
        description.chars().take(self.max_description_chars).collect()
    }
}
