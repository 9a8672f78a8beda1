//! ddx-matching
//!
//! Deterministic scoring of student diagnoses against an answer key.
//! Pure functions over in-memory values: no I/O, no shared state, safe to
//! call concurrently from independent requests.

pub mod differential;
pub mod osce;
pub mod term;

pub use differential::{compare, compare_with, CompareOptions};
pub use osce::compare_osce;
pub use term::{normalize, AliasCollision, AliasIndex};
