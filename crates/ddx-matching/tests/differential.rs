use ddx_core::models::answer_key::{AnswerKeyEntry, Tier, VindicateCategory};
use ddx_core::models::comparison::{AliasCollision, DiagnosisMatch, FuzzyMatch, MatchKind};
use ddx_core::models::diagnosis::DiagnosisEntry;
use ddx_matching::{compare, compare_with, CompareOptions};
use pretty_assertions::assert_eq;

fn mi() -> AnswerKeyEntry {
    AnswerKeyEntry {
        diagnosis: "Myocardial Infarction".to_string(),
        tier: Tier::MostLikely,
        vindicate_category: VindicateCategory::Vascular,
        is_common: true,
        is_cant_miss: true,
        aliases: vec!["MI".to_string(), "Heart Attack".to_string()],
        likelihood: Some("high".to_string()),
    }
}

fn chest_pain_key() -> Vec<AnswerKeyEntry> {
    vec![
        mi(),
        AnswerKeyEntry {
            diagnosis: "Pulmonary Embolism".to_string(),
            tier: Tier::Moderate,
            vindicate_category: VindicateCategory::Vascular,
            is_common: false,
            is_cant_miss: true,
            aliases: vec!["PE".to_string()],
            likelihood: None,
        },
        AnswerKeyEntry {
            diagnosis: "Pneumonia".to_string(),
            tier: Tier::LessLikely,
            vindicate_category: VindicateCategory::InfectiousIatrogenic,
            is_common: true,
            is_cant_miss: false,
            aliases: vec![],
            likelihood: None,
        },
        AnswerKeyEntry {
            diagnosis: "Aortic Dissection".to_string(),
            tier: Tier::UnlikelyImportant,
            vindicate_category: VindicateCategory::Traumatic,
            is_common: false,
            is_cant_miss: true,
            aliases: vec![],
            likelihood: None,
        },
    ]
}

fn submission(diagnoses: &[&str]) -> Vec<DiagnosisEntry> {
    diagnoses
        .iter()
        .enumerate()
        .map(|(rank, d)| DiagnosisEntry::new(*d, rank as u32))
        .collect()
}

#[test]
fn exact_alias_hits_cant_miss() {
    let result = compare(&submission(&["MI"]), &[mi()]);

    assert_eq!(result.cant_miss_hit, vec!["Myocardial Infarction"]);
    assert!(result.cant_miss_missed.is_empty());
    assert!(result.unmatched.is_empty());
    assert!(result.fuzzy_matched.is_empty());
    assert_eq!(result.tiers.most_likely.hit, vec!["Myocardial Infarction"]);
    assert_eq!(
        result.matches,
        vec![DiagnosisMatch {
            student: "MI".to_string(),
            matched_to: "Myocardial Infarction".to_string(),
            rank: 0,
            kind: MatchKind::Exact,
        }]
    );
}

#[test]
fn substring_match_is_recorded_as_fuzzy() {
    let result = compare(&submission(&["Acute MI syndrome"]), &[mi()]);

    assert_eq!(
        result.fuzzy_matched,
        vec![FuzzyMatch {
            student: "Acute MI syndrome".to_string(),
            matched_to: "Myocardial Infarction".to_string(),
        }]
    );
    assert!(result.unmatched.is_empty());
    assert_eq!(result.cant_miss_hit, vec!["Myocardial Infarction"]);
    assert_eq!(result.matches[0].kind, MatchKind::Fuzzy { distance_hint: 15 });
    assert!(!result.matches[0].kind.is_exact());
}

#[test]
fn exact_only_leaves_substring_unmatched() {
    let options = CompareOptions {
        fuzzy_fallback: false,
    };
    let result = compare_with(&submission(&["Acute MI syndrome"]), &[mi()], options);

    assert_eq!(result.unmatched, vec!["Acute MI syndrome"]);
    assert_eq!(result.cant_miss_missed, vec!["Myocardial Infarction"]);
    assert!(result.fuzzy_matched.is_empty());
}

#[test]
fn empty_submission_misses_everything() {
    let key = chest_pain_key();
    let result = compare(&[], &key);

    assert_eq!(result.tiers.matched(), 0);
    assert_eq!(result.tiers.total(), 4);
    assert_eq!(result.tiers.most_likely.missed, vec!["Myocardial Infarction"]);
    assert_eq!(result.tiers.moderate.missed, vec!["Pulmonary Embolism"]);
    assert_eq!(result.tiers.less_likely.missed, vec!["Pneumonia"]);
    assert_eq!(result.tiers.unlikely_important.missed, vec!["Aortic Dissection"]);
    assert_eq!(result.common_missed, vec!["Myocardial Infarction", "Pneumonia"]);
    assert_eq!(
        result.cant_miss_missed,
        vec!["Myocardial Infarction", "Pulmonary Embolism", "Aortic Dissection"]
    );
    assert!(result.vindicate_coverage.values().all(|covered| !covered));
    assert_eq!(result.vindicate_coverage.len(), 8);
}

#[test]
fn empty_answer_key_leaves_everything_unmatched() {
    let result = compare(&submission(&["GERD", "Costochondritis"]), &[]);

    assert_eq!(result.unmatched, vec!["GERD", "Costochondritis"]);
    assert_eq!(result.tiers.total(), 0);
    assert!(result.common_hit.is_empty());
    assert!(result.common_missed.is_empty());
    assert!(result.cant_miss_hit.is_empty());
    assert!(result.cant_miss_missed.is_empty());
    assert!(result.matches.is_empty());
}

#[test]
fn vindicate_coverage_follows_hit_entries_only() {
    let result = compare(&submission(&["pneumonia"]), &chest_pain_key());

    assert_eq!(
        result.vindicate_coverage[&VindicateCategory::InfectiousIatrogenic],
        true
    );
    assert_eq!(result.vindicate_coverage[&VindicateCategory::Vascular], false);
    assert_eq!(result.vindicate_coverage[&VindicateCategory::Traumatic], false);
}

#[test]
fn higher_rank_claims_the_entry_first() {
    // Ranks are taken from sort_order, not slice position.
    let student = vec![
        DiagnosisEntry::new("Heart attack", 1),
        DiagnosisEntry::new("MI", 0),
    ];
    let result = compare(&student, &[mi()]);

    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].student, "MI");
    assert_eq!(result.unmatched, vec!["Heart attack"]);
}

#[test]
fn duplicate_exact_hit_falls_through_to_remaining_entries() {
    let key = vec![
        mi(),
        AnswerKeyEntry {
            diagnosis: "MI due to cocaine".to_string(),
            tier: Tier::LessLikely,
            vindicate_category: VindicateCategory::InfectiousIatrogenic,
            is_common: false,
            is_cant_miss: false,
            aliases: vec![],
            likelihood: None,
        },
    ];
    let result = compare(&submission(&["MI", "mi"]), &key);

    assert_eq!(result.tiers.most_likely.hit, vec!["Myocardial Infarction"]);
    assert_eq!(result.tiers.less_likely.hit, vec!["MI due to cocaine"]);
    assert_eq!(
        result.fuzzy_matched,
        vec![FuzzyMatch {
            student: "mi".to_string(),
            matched_to: "MI due to cocaine".to_string(),
        }]
    );
}

#[test]
fn every_entry_lands_in_exactly_one_bucket() {
    let key = chest_pain_key();
    let student = submission(&["PE", "pneumonia, aspiration", "Anxiety", "", "pulmonary embolism"]);
    let result = compare(&student, &key);

    assert_eq!(result.tiers.total(), key.len());
    assert_eq!(result.matches.len() + result.unmatched.len(), student.len());
    for entry in &key {
        let bucket = result.tiers.tier(entry.tier);
        let in_hit = bucket.hit.contains(&entry.diagnosis);
        let in_missed = bucket.missed.contains(&entry.diagnosis);
        assert!(in_hit ^ in_missed, "{} must be hit xor missed", entry.diagnosis);
    }
    assert_eq!(result.unmatched, vec!["Anxiety", "", "pulmonary embolism"]);
}

#[test]
fn comparing_twice_gives_identical_results() {
    let key = chest_pain_key();
    let student = submission(&["heart attack", "Acute PE", "GERD"]);
    let before = student.clone();

    let first = compare(&student, &key);
    let second = compare(&student, &key);

    assert_eq!(first, second);
    assert_eq!(student, before);
}

#[test]
fn shared_alias_is_reported_in_the_result() {
    let mut key = chest_pain_key();
    key[2].aliases = vec!["pe".to_string()];

    let result = compare(&submission(&["PE"]), &key);

    assert_eq!(result.matches[0].matched_to, "Pulmonary Embolism");
    assert_eq!(
        result.alias_collisions,
        vec![AliasCollision {
            alias: "pe".to_string(),
            kept: "Pulmonary Embolism".to_string(),
            ignored: "Pneumonia".to_string(),
        }]
    );
    assert!(compare(&submission(&["PE"]), &chest_pain_key())
        .alias_collisions
        .is_empty());
}
