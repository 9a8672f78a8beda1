//! Ranked differential vs. tiered answer key.

use ddx_core::models::answer_key::AnswerKeyEntry;
use ddx_core::models::comparison::{
    ComparisonResult, DiagnosisMatch, FuzzyMatch, MatchKind, TieredCoverage,
};
use ddx_core::models::diagnosis::DiagnosisEntry;
use tracing::debug;

use crate::term::{best_fuzzy, AliasIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    /// Fall back to substring containment when exact alias lookup fails.
    pub fuzzy_fallback: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            fuzzy_fallback: true,
        }
    }
}

/// Compare with the default options (fuzzy fallback on).
pub fn compare(student: &[DiagnosisEntry], answer_key: &[AnswerKeyEntry]) -> ComparisonResult {
    compare_with(student, answer_key, CompareOptions::default())
}

/// Score a student's differential against an answer key.
///
/// Student entries are processed in `sort_order`. Each one claims at most
/// one answer-key entry and each answer-key entry is claimed at most once,
/// by the highest-ranked student entry that reaches it. An exact hit on an
/// entry that is already claimed falls through to the fuzzy pass against
/// the entries still unclaimed. Shared aliases found while indexing the
/// answer key are reported in `alias_collisions`.
pub fn compare_with(
    student: &[DiagnosisEntry],
    answer_key: &[AnswerKeyEntry],
    options: CompareOptions,
) -> ComparisonResult {
    let index = AliasIndex::build(answer_key);

    let mut ranked: Vec<&DiagnosisEntry> = student.iter().collect();
    ranked.sort_by_key(|e| e.sort_order);

    let mut claimed = vec![false; answer_key.len()];
    let mut matches = Vec::new();
    let mut fuzzy_matched = Vec::new();
    let mut unmatched = Vec::new();

    for entry in ranked {
        let exact = index.position(&entry.diagnosis).filter(|p| !claimed[*p]);

        let found = match exact {
            Some(position) => Some((position, MatchKind::Exact)),
            None if options.fuzzy_fallback => {
                best_fuzzy(&entry.diagnosis, answer_key, |p| !claimed[p]).map(
                    |(position, distance_hint)| (position, MatchKind::Fuzzy { distance_hint }),
                )
            }
            None => None,
        };

        let Some((position, kind)) = found else {
            unmatched.push(entry.diagnosis.clone());
            continue;
        };

        claimed[position] = true;
        let matched_to = answer_key[position].diagnosis.clone();

        if let MatchKind::Fuzzy { distance_hint } = kind {
            debug!(
                student = %entry.diagnosis,
                matched_to = %matched_to,
                distance_hint,
                "fuzzy diagnosis match"
            );
            fuzzy_matched.push(FuzzyMatch {
                student: entry.diagnosis.clone(),
                matched_to: matched_to.clone(),
            });
        }

        matches.push(DiagnosisMatch {
            student: entry.diagnosis.clone(),
            matched_to,
            rank: entry.sort_order,
            kind,
        });
    }

    let mut tiers = TieredCoverage::default();
    let mut common_hit = Vec::new();
    let mut common_missed = Vec::new();
    let mut cant_miss_hit = Vec::new();
    let mut cant_miss_missed = Vec::new();
    let mut vindicate_coverage = ComparisonResult::empty_vindicate_coverage();

    for (entry, hit) in answer_key.iter().zip(&claimed) {
        let hit = *hit;
        tiers.tier_mut(entry.tier).record(&entry.diagnosis, hit);

        if entry.is_common {
            let bucket = if hit { &mut common_hit } else { &mut common_missed };
            bucket.push(entry.diagnosis.clone());
        }
        if entry.is_cant_miss {
            let bucket = if hit {
                &mut cant_miss_hit
            } else {
                &mut cant_miss_missed
            };
            bucket.push(entry.diagnosis.clone());
        }
        if hit {
            vindicate_coverage.insert(entry.vindicate_category, true);
        }
    }

    debug!(
        submitted = student.len(),
        answer_key = answer_key.len(),
        matched = matches.len(),
        fuzzy = fuzzy_matched.len(),
        unmatched = unmatched.len(),
        "differential compared"
    );

    ComparisonResult {
        tiers,
        common_hit,
        common_missed,
        cant_miss_hit,
        cant_miss_missed,
        vindicate_coverage,
        unmatched,
        fuzzy_matched,
        matches,
        alias_collisions: index.collisions().to_vec(),
    }
}
