//! OSCE encounter scoring across door prep and SOAP note.
//!
//! Diagnosis coverage uses exact alias-index matches only. Everything else
//! is counting over the submitted structures.

use std::collections::HashSet;

use ddx_core::models::answer_key::{AnswerKeyEntry, Tier};
use ddx_core::models::comparison::TieredCoverage;
use ddx_core::models::osce::{DoorPrep, OsceDeterministicResult, SoapNote};
use tracing::debug;

use crate::term::{normalize, AliasIndex};

/// Score one encounter.
///
/// `reference` names the correct diagnosis for unstructured or practice
/// cases. When absent, the first most-likely answer-key entry is used, or
/// the first entry if no entry is most-likely.
pub fn compare_osce(
    door_prep: &DoorPrep,
    soap: &SoapNote,
    answer_key: &[AnswerKeyEntry],
    reference: Option<&str>,
) -> OsceDeterministicResult {
    let index = AliasIndex::build(answer_key);

    let door_claims = exact_claims(
        door_prep.diagnoses.iter().map(|d| d.diagnosis.as_str()),
        &index,
        answer_key.len(),
    );
    let soap_claims = exact_claims(
        soap.diagnoses.iter().map(|d| d.diagnosis.as_str()),
        &index,
        answer_key.len(),
    );

    let mut soap_coverage = TieredCoverage::default();
    let mut missed_important = Vec::new();
    for (entry, hit) in answer_key.iter().zip(&soap_claims) {
        soap_coverage.tier_mut(entry.tier).record(&entry.diagnosis, *hit);
        if !hit && entry.is_important() {
            missed_important.push(entry.diagnosis.clone());
        }
    }

    let correct_diagnosis_included =
        correct_diagnosis_included(soap, answer_key, &index, reference);

    let door_keys = phase_keys(
        door_prep.diagnoses.iter().map(|d| d.diagnosis.as_str()),
        &index,
    );
    let soap_keys = phase_keys(soap.diagnoses.iter().map(|d| d.diagnosis.as_str()), &index);
    let diagnoses_added = difference(&soap_keys, &door_keys);
    let diagnoses_dropped = difference(&door_keys, &soap_keys);

    let total_questions: usize = door_prep
        .diagnoses
        .iter()
        .map(|d| count_filled(&d.history_questions))
        .sum();

    let unique_maneuvers = door_prep
        .diagnoses
        .iter()
        .flat_map(|d| &d.exam_maneuvers)
        .map(|m| normalize(m))
        .filter(|m| !m.is_empty())
        .collect::<HashSet<_>>()
        .len();

    let door_prep_diagnosis_count = door_prep.diagnoses.len();
    let avg_questions_per_diagnosis = if door_prep_diagnosis_count == 0 {
        0.0
    } else {
        total_questions as f64 / door_prep_diagnosis_count as f64
    };

    let evidence_mapped: usize = soap
        .diagnoses
        .iter()
        .map(|d| count_filled(&d.supporting_evidence) + count_filled(&d.refuting_evidence))
        .sum();
    let assessments_written = soap
        .diagnoses
        .iter()
        .filter(|d| d.assessment.as_deref().is_some_and(|a| !a.trim().is_empty()))
        .count();
    let diagnostic_plan_items: usize = soap
        .diagnoses
        .iter()
        .map(|d| count_filled(&d.diagnostic_plan))
        .sum();
    let therapeutic_plan_items: usize = soap
        .diagnoses
        .iter()
        .map(|d| count_filled(&d.therapeutic_plan))
        .sum();

    let result = OsceDeterministicResult {
        door_prep_diagnosis_count,
        soap_diagnosis_count: soap.diagnoses.len(),
        door_prep_matched: claimed_names(answer_key, &door_claims),
        soap_matched: claimed_names(answer_key, &soap_claims),
        soap_coverage,
        missed_important,
        correct_diagnosis_included,
        diagnoses_added,
        diagnoses_dropped,
        total_questions,
        unique_maneuvers,
        avg_questions_per_diagnosis,
        evidence_mapped,
        assessments_written,
        diagnostic_plan_items,
        therapeutic_plan_items,
    };

    debug!(
        door_prep = result.door_prep_diagnosis_count,
        soap = result.soap_diagnosis_count,
        soap_matched = result.soap_matched.len(),
        missed_important = result.missed_important.len(),
        correct = result.correct_diagnosis_included,
        "osce encounter compared"
    );

    result
}

fn exact_claims<'a>(
    diagnoses: impl Iterator<Item = &'a str>,
    index: &AliasIndex,
    key_len: usize,
) -> Vec<bool> {
    let mut claimed = vec![false; key_len];
    for diagnosis in diagnoses {
        if let Some(position) = index.position(diagnosis) {
            claimed[position] = true;
        }
    }
    claimed
}

fn claimed_names(answer_key: &[AnswerKeyEntry], claimed: &[bool]) -> Vec<String> {
    answer_key
        .iter()
        .zip(claimed)
        .filter(|(_, hit)| **hit)
        .map(|(entry, _)| entry.diagnosis.clone())
        .collect()
}

fn correct_diagnosis_included(
    soap: &SoapNote,
    answer_key: &[AnswerKeyEntry],
    index: &AliasIndex,
    reference: Option<&str>,
) -> bool {
    let designated = reference
        .filter(|r| !r.trim().is_empty())
        .or_else(|| {
            answer_key
                .iter()
                .find(|e| e.tier == Tier::MostLikely)
                .or_else(|| answer_key.first())
                .map(|e| e.diagnosis.as_str())
        });

    let Some(designated) = designated else {
        return false;
    };

    let target = normalize(designated);
    let target_position = index.position(designated);

    soap.diagnoses.iter().any(|d| {
        normalize(&d.diagnosis) == target
            || target_position.is_some_and(|p| index.position(&d.diagnosis) == Some(p))
    })
}

/// Phase identity for each diagnosis: the answer-key position when it
/// resolves, else its normalized text. Blank entries are skipped, first
/// occurrence kept.
fn phase_keys<'a>(
    diagnoses: impl Iterator<Item = &'a str>,
    index: &AliasIndex,
) -> Vec<(PhaseKey, String)> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for diagnosis in diagnoses {
        let text = normalize(diagnosis);
        if text.is_empty() {
            continue;
        }
        let key = match index.position(diagnosis) {
            Some(position) => PhaseKey::Entry(position),
            None => PhaseKey::Text(text.clone()),
        };
        if seen.insert(key.clone()) {
            keys.push((key, text));
        }
    }
    keys
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PhaseKey {
    Entry(usize),
    Text(String),
}

fn difference(from: &[(PhaseKey, String)], other: &[(PhaseKey, String)]) -> Vec<String> {
    let other: HashSet<&PhaseKey> = other.iter().map(|(k, _)| k).collect();
    from.iter()
        .filter(|(k, _)| !other.contains(k))
        .map(|(_, text)| text.clone())
        .collect()
}

fn count_filled(items: &[String]) -> usize {
    items.iter().filter(|i| !i.trim().is_empty()).count()
}
