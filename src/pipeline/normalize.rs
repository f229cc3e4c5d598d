//! Symptom normalization: one raw user token → canonical vocabulary key.
//!
//! Matching is structural only. Each stage rewrites the input in a fixed way
//! and looks the result up exactly; the first hit wins. There is no
//! edit-distance guessing, so a typo stays unrecognized instead of silently
//! flipping a neighbouring feature.

use std::collections::HashMap;
use std::sync::Arc;

use crate::vocabulary::SymptomVocabulary;

/// A superficial rewrite tried after the primary lookups fail.
pub type Rewrite = fn(&str) -> String;

/// Fallback rewrites, tried in this order against the trimmed lower-case input.
pub const FALLBACK_REWRITES: &[(&str, Rewrite)] = &[
    ("space_to_underscore", space_to_underscore),
    ("hyphen_to_underscore", hyphen_to_underscore),
    ("remove_periods", remove_periods),
    ("strip_parentheses", strip_parentheses),
];

fn space_to_underscore(s: &str) -> String {
    s.replace(' ', "_")
}

fn hyphen_to_underscore(s: &str) -> String {
    s.replace('-', "_")
}

fn remove_periods(s: &str) -> String {
    s.replace('.', "")
}

fn strip_parentheses(s: &str) -> String {
    s.replace(&['(', ')'][..], "")
}

/// Underscores as spaces, lower-cased, runs of whitespace collapsed.
fn space_rendered(s: &str) -> String {
    s.replace('_', " ")
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone)]
pub struct SymptomNormalizer {
    vocabulary: Arc<SymptomVocabulary>,
    /// Space-rendered key → vocabulary index. Lowest index wins on collision.
    rendered: HashMap<String, usize>,
}

impl SymptomNormalizer {
    pub fn new(vocabulary: Arc<SymptomVocabulary>) -> Self {
        let mut rendered = HashMap::with_capacity(vocabulary.len());
        for (i, key) in vocabulary.keys().enumerate() {
            rendered.entry(space_rendered(key)).or_insert(i);
        }
        Self { vocabulary, rendered }
    }

    pub fn vocabulary(&self) -> &Arc<SymptomVocabulary> {
        &self.vocabulary
    }

    /// Resolve `raw` to a canonical key, or `None` when nothing matches.
    pub fn normalize(&self, raw: &str) -> Option<&str> {
        self.resolve(raw)
            .and_then(|index| self.vocabulary.key_at(index))
    }

    /// Resolve `raw` to its feature index.
    pub fn resolve(&self, raw: &str) -> Option<usize> {
        let candidate = raw.trim().to_lowercase();
        if candidate.is_empty() {
            return None;
        }

        if let Some(index) = self.vocabulary.index_of(&candidate) {
            return Some(index);
        }

        if let Some(index) = self.vocabulary.index_of(&space_to_underscore(&candidate)) {
            return Some(index);
        }

        if let Some(&index) = self.rendered.get(&space_rendered(&candidate)) {
            return Some(index);
        }

        FALLBACK_REWRITES
            .iter()
            .find_map(|(_, rewrite)| self.vocabulary.index_of(&rewrite(&candidate)))
    }
}
