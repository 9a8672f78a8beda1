//! ddx-casetext
//!
//! Turns nested case JSON into readable Subjective/Objective bullet text,
//! and bullet text back into atomic findings for evidence mapping.

pub mod bulletize;
pub mod findings;
