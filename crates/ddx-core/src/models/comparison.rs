use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::answer_key::{Tier, VindicateCategory};

/// How a student entry was tied to an answer-key entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum MatchKind {
    /// Normalized text equals the canonical name or an alias.
    Exact,
    /// One normalized string contains the other. `distance_hint` is the
    /// difference in character length; lower means a tighter fit.
    Fuzzy { distance_hint: usize },
}

impl MatchKind {
    pub fn is_exact(&self) -> bool {
        matches!(self, MatchKind::Exact)
    }
}

/// A student entry paired with the answer-key entry it claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiagnosisMatch {
    pub student: String,
    pub matched_to: String,
    /// The student's `sort_order` for this entry.
    pub rank: u32,
    pub kind: MatchKind,
}

/// An inexact pairing, listed separately so soft matches can be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FuzzyMatch {
    pub student: String,
    pub matched_to: String,
}

/// Two answer-key entries claimed the same normalized name or alias.
/// The entry registered first keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AliasCollision {
    pub alias: String,
    pub kept: String,
    pub ignored: String,
}

/// Hit/miss split of one answer-key slice, by canonical name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coverage {
    pub hit: Vec<String>,
    pub missed: Vec<String>,
}

impl Coverage {
    pub fn matched(&self) -> usize {
        self.hit.len()
    }

    pub fn total(&self) -> usize {
        self.hit.len() + self.missed.len()
    }

    pub fn record(&mut self, diagnosis: &str, hit: bool) {
        if hit {
            self.hit.push(diagnosis.to_string());
        } else {
            self.missed.push(diagnosis.to_string());
        }
    }
}

/// One coverage bucket per tier. Every tier is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TieredCoverage {
    pub most_likely: Coverage,
    pub moderate: Coverage,
    pub less_likely: Coverage,
    pub unlikely_important: Coverage,
}

impl TieredCoverage {
    pub fn tier(&self, tier: Tier) -> &Coverage {
        match tier {
            Tier::MostLikely => &self.most_likely,
            Tier::Moderate => &self.moderate,
            Tier::LessLikely => &self.less_likely,
            Tier::UnlikelyImportant => &self.unlikely_important,
        }
    }

    pub fn tier_mut(&mut self, tier: Tier) -> &mut Coverage {
        match tier {
            Tier::MostLikely => &mut self.most_likely,
            Tier::Moderate => &mut self.moderate,
            Tier::LessLikely => &mut self.less_likely,
            Tier::UnlikelyImportant => &mut self.unlikely_important,
        }
    }

    pub fn matched(&self) -> usize {
        Tier::ALL.iter().map(|t| self.tier(*t).matched()).sum()
    }

    pub fn total(&self) -> usize {
        Tier::ALL.iter().map(|t| self.tier(*t).total()).sum()
    }
}

/// Deterministic comparison of a ranked differential against an answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComparisonResult {
    pub tiers: TieredCoverage,
    pub common_hit: Vec<String>,
    pub common_missed: Vec<String>,
    pub cant_miss_hit: Vec<String>,
    pub cant_miss_missed: Vec<String>,
    /// Every VINDICATE letter is present; `true` iff a hit entry carries it.
    pub vindicate_coverage: BTreeMap<VindicateCategory, bool>,
    /// Student text with no answer-key match, in rank order.
    pub unmatched: Vec<String>,
    pub fuzzy_matched: Vec<FuzzyMatch>,
    /// Every pairing made, exact and fuzzy, in rank order.
    pub matches: Vec<DiagnosisMatch>,
    /// Shared aliases found while indexing the answer key.
    #[serde(default)]
    pub alias_collisions: Vec<AliasCollision>,
}

impl ComparisonResult {
    pub fn empty_vindicate_coverage() -> BTreeMap<VindicateCategory, bool> {
        VindicateCategory::ALL.iter().map(|c| (*c, false)).collect()
    }
}
