//! Integration tests module
//!
//! End-to-end tests of the twittp model pipeline, including:
//! - Complete feed -> build -> save -> load -> evaluate -> export flow
//! - Error handling for malformed or insufficient inputs

pub mod error_scenarios;
pub mod fixtures;
pub mod pipeline_test;
