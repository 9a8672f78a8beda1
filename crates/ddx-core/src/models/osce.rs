//! Two-phase OSCE encounter structures: door prep before the encounter,
//! SOAP note after it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::comparison::TieredCoverage;

/// A diagnosis drafted at the door, with the workup planned for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DoorPrepDiagnosis {
    pub diagnosis: String,
    #[serde(default)]
    pub history_questions: Vec<String>,
    #[serde(default)]
    pub exam_maneuvers: Vec<String>,
    #[serde(default)]
    pub sort_order: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DoorPrep {
    #[serde(default)]
    pub diagnoses: Vec<DoorPrepDiagnosis>,
}

/// A diagnosis as revised in the SOAP note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SoapDiagnosis {
    pub diagnosis: String,
    /// Findings cited for this diagnosis, by literal finding text.
    #[serde(default)]
    pub supporting_evidence: Vec<String>,
    #[serde(default)]
    pub refuting_evidence: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<String>,
    #[serde(default)]
    pub diagnostic_plan: Vec<String>,
    #[serde(default)]
    pub therapeutic_plan: Vec<String>,
    #[serde(default)]
    pub sort_order: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SoapNote {
    #[serde(default)]
    pub diagnoses: Vec<SoapDiagnosis>,
}

/// Deterministic scoring of one OSCE encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OsceDeterministicResult {
    pub door_prep_diagnosis_count: usize,
    pub soap_diagnosis_count: usize,
    /// Canonical names hit by the door-prep list (exact alias match only).
    pub door_prep_matched: Vec<String>,
    /// Canonical names hit by the SOAP-note list (exact alias match only).
    pub soap_matched: Vec<String>,
    /// Tier split of the answer key against the SOAP-note list.
    pub soap_coverage: TieredCoverage,
    /// Most-likely or can't-miss entries absent from the SOAP note.
    pub missed_important: Vec<String>,
    pub correct_diagnosis_included: bool,
    /// Normalized SOAP diagnoses that were not in door prep.
    pub diagnoses_added: Vec<String>,
    /// Normalized door-prep diagnoses that did not survive to the SOAP note.
    pub diagnoses_dropped: Vec<String>,
    pub total_questions: usize,
    pub unique_maneuvers: usize,
    pub avg_questions_per_diagnosis: f64,
    pub evidence_mapped: usize,
    pub assessments_written: usize,
    pub diagnostic_plan_items: usize,
    pub therapeutic_plan_items: usize,
}
