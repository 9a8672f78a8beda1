//! ddx-core
//!
//! Pure domain types for differential-diagnosis practice: answer keys,
//! student differentials, OSCE door-prep and SOAP-note structures, and the
//! derived results the engines produce. No scoring logic lives here; this is
//! the shared vocabulary between the engine crates and their callers.

pub mod error;
pub mod models;
