use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::answer_key::VindicateCategory;
use crate::error::CoreError;

/// One item in a student's ranked differential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiagnosisEntry {
    /// Free text as typed or selected.
    pub diagnosis: String,
    /// Student-asserted etiology letters. Not used for coverage scoring.
    #[serde(default)]
    pub vindicate_categories: Vec<VindicateCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// 1 (guess) to 5 (certain).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// 0-based rank, unique and contiguous within a submission.
    pub sort_order: u32,
}

impl DiagnosisEntry {
    pub fn new(diagnosis: impl Into<String>, sort_order: u32) -> Self {
        Self {
            diagnosis: diagnosis.into(),
            vindicate_categories: Vec::new(),
            reasoning: None,
            confidence: None,
            sort_order,
        }
    }
}

/// A student's ranked differential.
///
/// Owns the entries and keeps `sort_order` equal to each entry's position
/// after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Differential {
    entries: Vec<DiagnosisEntry>,
}

impl Differential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries: sort by `sort_order`, then compact gaps
    /// and duplicates so ranks are contiguous again.
    pub fn from_entries(mut entries: Vec<DiagnosisEntry>) -> Self {
        entries.sort_by_key(|e| e.sort_order);
        let mut differential = Self { entries };
        differential.renumber();
        differential
    }

    /// Parse a submission stored as a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let entries: Vec<DiagnosisEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    pub fn entries(&self) -> &[DiagnosisEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a diagnosis at the lowest rank.
    pub fn add(&mut self, diagnosis: impl Into<String>) -> Result<&DiagnosisEntry, CoreError> {
        let diagnosis = diagnosis.into();
        if diagnosis.trim().is_empty() {
            return Err(CoreError::BlankDiagnosis);
        }
        let sort_order = self.entries.len() as u32;
        self.entries.push(DiagnosisEntry::new(diagnosis, sort_order));
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Move the entry at `from` to position `to`, reassigning every rank.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.renumber();
        Ok(())
    }

    pub fn set_confidence(
        &mut self,
        index: usize,
        confidence: Option<u8>,
    ) -> Result<(), CoreError> {
        self.check_index(index)?;
        if let Some(value) = confidence
            && !(1..=5).contains(&value)
        {
            return Err(CoreError::ConfidenceOutOfRange(value));
        }
        self.entries[index].confidence = confidence;
        Ok(())
    }

    pub fn set_reasoning(
        &mut self,
        index: usize,
        reasoning: Option<String>,
    ) -> Result<(), CoreError> {
        self.check_index(index)?;
        self.entries[index].reasoning = reasoning.filter(|r| !r.trim().is_empty());
        Ok(())
    }

    /// Remove an entry; the ones below it move up one rank.
    pub fn remove(&mut self, index: usize) -> Result<DiagnosisEntry, CoreError> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        self.renumber();
        Ok(removed)
    }

    fn check_index(&self, index: usize) -> Result<(), CoreError> {
        if index >= self.entries.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }

    fn renumber(&mut self) {
        for (rank, entry) in self.entries.iter_mut().enumerate() {
            entry.sort_order = rank as u32;
        }
    }
}
