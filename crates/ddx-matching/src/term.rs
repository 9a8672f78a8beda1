//! Term matching: normalization, alias resolution and the substring
//! fallback.
//!
//! Normalization is lowercase + trim and nothing else. Exact lookups go
//! through an [`AliasIndex`]; the containment check in [`fuzzy_distance`]
//! is a separate, lower-confidence tier that callers only reach after an
//! exact lookup has failed.

use std::collections::HashMap;

use ddx_core::models::answer_key::AnswerKeyEntry;
pub use ddx_core::models::comparison::AliasCollision;
use tracing::warn;

pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Normalized canonical name or alias → answer-key entry.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    lookup: HashMap<String, usize>,
    canonical: Vec<String>,
    collisions: Vec<AliasCollision>,
}

impl AliasIndex {
    /// Register every entry's canonical name, then its aliases, in array
    /// order. Collisions are recorded and logged, never rejected.
    pub fn build(answer_key: &[AnswerKeyEntry]) -> Self {
        let mut index = Self {
            lookup: HashMap::new(),
            canonical: answer_key.iter().map(|e| e.diagnosis.clone()).collect(),
            collisions: Vec::new(),
        };

        for (position, entry) in answer_key.iter().enumerate() {
            for name in entry.names() {
                index.register(name, position);
            }
        }

        index
    }

    fn register(&mut self, name: &str, position: usize) {
        let key = normalize(name);
        if key.is_empty() {
            return;
        }
        match self.lookup.get(&key) {
            None => {
                self.lookup.insert(key, position);
            }
            Some(&owner) if owner == position => {}
            Some(&owner) => {
                let collision = AliasCollision {
                    alias: key,
                    kept: self.canonical[owner].clone(),
                    ignored: self.canonical[position].clone(),
                };
                warn!(
                    alias = %collision.alias,
                    kept = %collision.kept,
                    ignored = %collision.ignored,
                    "duplicate alias in answer key"
                );
                self.collisions.push(collision);
            }
        }
    }

    /// Position in the answer key of the entry `candidate` names exactly.
    pub fn position(&self, candidate: &str) -> Option<usize> {
        self.lookup.get(&normalize(candidate)).copied()
    }

    /// Canonical name for `candidate`, exact lookup only.
    pub fn resolve(&self, candidate: &str) -> Option<&str> {
        self.position(candidate).map(|p| self.canonical[p].as_str())
    }

    pub fn collisions(&self) -> &[AliasCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

/// Containment check on two already-normalized strings.
///
/// Returns the difference in character length when one contains the other.
/// Empty strings never match.
pub fn fuzzy_distance(a: &str, b: &str) -> Option<usize> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    if a.contains(b) || b.contains(a) {
        Some(a.chars().count().abs_diff(b.chars().count()))
    } else {
        None
    }
}

/// Closest containment match of `candidate` among the entries `eligible`
/// allows. Ties go to the earlier answer-key entry.
pub fn best_fuzzy(
    candidate: &str,
    answer_key: &[AnswerKeyEntry],
    eligible: impl Fn(usize) -> bool,
) -> Option<(usize, usize)> {
    let candidate = normalize(candidate);
    let mut best: Option<(usize, usize)> = None;

    for (position, entry) in answer_key.iter().enumerate() {
        if !eligible(position) {
            continue;
        }
        for name in entry.names() {
            if let Some(distance) = fuzzy_distance(&candidate, &normalize(name))
                && best.is_none_or(|(_, d)| distance < d)
            {
                best = Some((position, distance));
            }
        }
    }

    best
}
