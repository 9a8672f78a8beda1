//! Case JSON → bullet text.
//!
//! Output never contains `{`, `}`, `[`, `]` or `"`: structure is expressed
//! with `label: value`, `, ` between list items and ` | ` between keys.

use ddx_core::models::case_text::BulletizedCase;
use serde_json::{Map, Value};
use tracing::debug;

/// Case fields rendered into the Subjective section, in order.
pub const SUBJECTIVE_FIELDS: &[&str] = &["chief_complaint", "patient_history"];

/// Case fields rendered into the Objective section, in order.
pub const OBJECTIVE_FIELDS: &[&str] = &["vital_signs", "physical_exam", "test_results"];

/// Objective fields that count as exam findings. Test results alone do not
/// make a case bulletizable.
const EXAM_FIELDS: &[&str] = &["vital_signs", "physical_exam"];

pub const NO_SUBJECTIVE: &str = "No subjective data available";
pub const NO_OBJECTIVE: &str = "No objective data available";

const BULLET: &str = "- ";

/// Bulletize a case.
///
/// Returns `None` when the case has no usable history or exam fields, so
/// the caller can fall back to generating the text another way.
pub fn bulletize_case(case: &Value) -> Option<BulletizedCase> {
    let fields = case.as_object()?;

    let subjective = section_bullets(fields, SUBJECTIVE_FIELDS);
    let exam_present = EXAM_FIELDS
        .iter()
        .any(|name| fields.get(*name).is_some_and(|v| !source_bullets(name, v).is_empty()));

    if subjective.is_empty() && !exam_present {
        debug!("case has no usable history or exam fields");
        return None;
    }

    let objective = section_bullets(fields, OBJECTIVE_FIELDS);

    debug!(
        subjective = subjective.len(),
        objective = objective.len(),
        "case bulletized"
    );

    Some(BulletizedCase {
        subjective: render_section(&subjective, NO_SUBJECTIVE),
        objective: render_section(&objective, NO_OBJECTIVE),
    })
}

fn section_bullets(fields: &Map<String, Value>, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| fields.get(*name).map(|value| source_bullets(name, value)))
        .flatten()
        .collect()
}

/// A top-level case field: objects contribute one labeled field per key,
/// anything else is a single labeled field.
fn source_bullets(name: &str, value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map
            .iter()
            .flat_map(|(key, value)| bulletize_field(key, value))
            .collect(),
        other => bulletize_field(name, other),
    }
}

fn render_section(bullets: &[String], placeholder: &str) -> String {
    if bullets.is_empty() {
        return format!("{BULLET}{placeholder}");
    }
    bullets
        .iter()
        .map(|b| format!("{BULLET}{b}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bullets for one labeled field, without bullet markers.
///
/// - A string with `;` or newlines becomes one bullet per segment longer
///   than two characters; any other string becomes `label: value`.
/// - An object becomes one `key: value` bullet per key.
/// - An array becomes one bullet per non-empty element.
pub fn bulletize_field(label: &str, value: &Value) -> Vec<String> {
    let label = humanize(label);
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => {
            let text = scrub(s);
            let text = text.trim();
            if text.is_empty() {
                Vec::new()
            } else if text.contains([';', '\n']) {
                text.split([';', '\n'])
                    .map(str::trim)
                    .filter(|segment| segment.chars().count() > 2)
                    .map(str::to_string)
                    .collect()
            } else {
                vec![labeled(&label, text)]
            }
        }
        Value::Bool(_) | Value::Number(_) => vec![labeled(&label, &flatten(value))],
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| {
                let flat = flatten(value);
                (!flat.is_empty()).then(|| labeled(&humanize(key), &flat))
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .map(flatten)
            .filter(|flat| !flat.is_empty())
            .collect(),
    }
}

/// One-line rendering of any JSON value.
pub fn flatten(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => scrub(s).trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(flatten)
            .filter(|flat| !flat.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| {
                let flat = flatten(value);
                (!flat.is_empty()).then(|| labeled(&humanize(key), &flat))
            })
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

fn labeled(label: &str, value: &str) -> String {
    if label.is_empty() {
        value.to_string()
    } else {
        format!("{label}: {value}")
    }
}

fn humanize(key: &str) -> String {
    scrub(&key.replace('_', " ")).trim().to_string()
}

/// Drop characters that read as JSON syntax.
fn scrub(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '{' | '}' | '[' | ']' | '"'))
        .collect()
}
