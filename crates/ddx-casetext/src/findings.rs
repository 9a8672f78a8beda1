//! Bullet text → atomic findings for the evidence-mapping UI.
//!
//! Findings are plain strings and are identified by their exact text. The
//! same fact phrased or cased differently is a different finding, so a
//! selection made against one rendering of a case does not carry over to a
//! regenerated one; [`FindingSelection::retain_available`] drops such
//! orphans.

use std::collections::HashSet;

use ddx_core::models::case_text::BulletizedCase;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bulletize::{NO_OBJECTIVE, NO_SUBJECTIVE};

/// Lines that only label a section, compared lowercase without a trailing
/// colon.
const SECTION_HEADERS: &[&str] = &[
    "history",
    "history of present illness",
    "past medical history",
    "social history",
    "family history",
    "review of systems",
    "physical examination",
    "physical exam",
    "examination",
    "vital signs",
    "vitals",
    "test results",
    "laboratory results",
    "labs",
    "subjective",
    "objective",
];

const BULLET_MARKERS: &[char] = &['-', '*', '\u{2022}', '\u{00b7}', '\u{2013}'];

const SUB_ITEM_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindingLimits {
    /// Lines with fewer characters are dropped before splitting.
    pub min_len: usize,
    /// Findings with more characters are dropped, never truncated.
    pub max_len: usize,
}

impl Default for FindingLimits {
    fn default() -> Self {
        Self {
            min_len: 5,
            max_len: 200,
        }
    }
}

pub fn extract_findings(text: &str) -> Vec<String> {
    extract_findings_with(text, FindingLimits::default())
}

/// Findings from both sections of a bulletized case, subjective first.
pub fn extract_case_findings(case: &BulletizedCase, limits: FindingLimits) -> Vec<String> {
    extract_findings_with(&case.combined(), limits)
}

/// Split bullet text into findings, in order of appearance, each exact
/// text at most once.
pub fn extract_findings_with(text: &str, limits: FindingLimits) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut findings = Vec::new();

    for line in text.lines() {
        let line = clean_line(line);
        if line.chars().count() < limits.min_len || is_header(&line) {
            continue;
        }

        let candidates: Vec<&str> = if line.contains(SUB_ITEM_SEPARATOR) {
            line.split(SUB_ITEM_SEPARATOR)
                .map(str::trim)
                .filter(|segment| !segment.is_empty() && !is_header(segment))
                .collect()
        } else {
            vec![line.as_str()]
        };

        for finding in candidates {
            if finding.chars().count() > limits.max_len {
                continue;
            }
            if seen.insert(finding.to_string()) {
                findings.push(finding.to_string());
            }
        }
    }

    debug!(findings = findings.len(), "findings extracted");
    findings
}

/// Strip bullet markers and leftover JSON punctuation.
fn clean_line(line: &str) -> String {
    let stripped = line.trim().trim_start_matches(|c: char| {
        BULLET_MARKERS.contains(&c) || c.is_whitespace()
    });
    let cleaned: String = stripped
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '[' | ']' | '"'))
        .collect();
    cleaned.trim().trim_end_matches(',').trim().to_string()
}

fn is_header(text: &str) -> bool {
    let trimmed = text.trim();
    let label = trimmed.trim_end_matches(':').trim().to_lowercase();
    if label.is_empty() {
        return true;
    }
    if SECTION_HEADERS.contains(&label.as_str()) {
        return true;
    }
    // "Vitals:" style labels with nothing after them
    if trimmed.ends_with(':') && !label.contains(':') {
        return true;
    }
    label == NO_SUBJECTIVE.to_lowercase() || label == NO_OBJECTIVE.to_lowercase()
}

/// Findings a student has picked as evidence, by exact text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FindingSelection {
    selected: Vec<String>,
}

impl FindingSelection {
    pub fn new(selected: Vec<String>) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, finding: &str) -> bool {
        self.selected.iter().any(|s| s == finding)
    }

    /// Select or deselect. Returns whether `finding` is selected afterwards.
    pub fn toggle(&mut self, finding: &str) -> bool {
        if let Some(position) = self.selected.iter().position(|s| s == finding) {
            self.selected.remove(position);
            false
        } else {
            self.selected.push(finding.to_string());
            true
        }
    }

    /// Forget selections that no longer appear among `available` findings.
    /// Returns the dropped ones.
    pub fn retain_available(&mut self, available: &[String]) -> Vec<String> {
        let (kept, dropped): (Vec<String>, Vec<String>) = std::mem::take(&mut self.selected)
            .into_iter()
            .partition(|s| available.contains(s));
        self.selected = kept;
        dropped
    }
}
