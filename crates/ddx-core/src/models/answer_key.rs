use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Coarse likelihood bucket assigned to an answer-key entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Tier {
    MostLikely,
    Moderate,
    LessLikely,
    UnlikelyImportant,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::MostLikely,
        Tier::Moderate,
        Tier::LessLikely,
        Tier::UnlikelyImportant,
    ];
}

/// VINDICATE etiology letter.
///
/// The mnemonic uses `I` twice (Infectious and Iatrogenic/Intoxication);
/// both share the single `I` letter here, so there are eight categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum VindicateCategory {
    #[serde(rename = "V")]
    Vascular,
    #[serde(rename = "I")]
    InfectiousIatrogenic,
    #[serde(rename = "N")]
    Neoplastic,
    #[serde(rename = "D")]
    Degenerative,
    #[serde(rename = "C")]
    Congenital,
    #[serde(rename = "A")]
    Autoimmune,
    #[serde(rename = "T")]
    Traumatic,
    #[serde(rename = "E")]
    Endocrine,
}

impl VindicateCategory {
    pub const ALL: [VindicateCategory; 8] = [
        VindicateCategory::Vascular,
        VindicateCategory::InfectiousIatrogenic,
        VindicateCategory::Neoplastic,
        VindicateCategory::Degenerative,
        VindicateCategory::Congenital,
        VindicateCategory::Autoimmune,
        VindicateCategory::Traumatic,
        VindicateCategory::Endocrine,
    ];

    pub fn letter(&self) -> char {
        match self {
            VindicateCategory::Vascular => 'V',
            VindicateCategory::InfectiousIatrogenic => 'I',
            VindicateCategory::Neoplastic => 'N',
            VindicateCategory::Degenerative => 'D',
            VindicateCategory::Congenital => 'C',
            VindicateCategory::Autoimmune => 'A',
            VindicateCategory::Traumatic => 'T',
            VindicateCategory::Endocrine => 'E',
        }
    }
}

/// One authoritative diagnosis possibility for a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerKeyEntry {
    /// Canonical name. Unique within one answer key.
    pub diagnosis: String,
    pub tier: Tier,
    pub vindicate_category: VindicateCategory,
    #[serde(default)]
    pub is_common: bool,
    /// Dangerous if missed. Tracked independently of tier.
    #[serde(default)]
    pub is_cant_miss: bool,
    /// Alternate names and abbreviations, in registration order.
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<String>,
}

impl AnswerKeyEntry {
    /// Most-likely or can't-miss: the entries a student must not leave out.
    pub fn is_important(&self) -> bool {
        self.tier == Tier::MostLikely || self.is_cant_miss
    }

    /// Canonical name followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.diagnosis.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Parse an answer key stored as a JSON array of entries.
pub fn parse_answer_key(json: &str) -> Result<Vec<AnswerKeyEntry>, CoreError> {
    Ok(serde_json::from_str(json)?)
}
