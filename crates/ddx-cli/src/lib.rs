//! ddx-cli
//!
//! Command-line harness around the scoring and case-text engines. Reads
//! JSON inputs from disk and prints JSON results to stdout; logs go to
//! stderr.

pub mod cli;
pub mod commands;
pub mod config;
