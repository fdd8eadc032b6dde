//! Integration tests for the propplan timeline engine
//!
//! Tests are organized by topic:
//! - `scenarios` - End-to-end runs of representative plans
//! - `timeline_result` - Output structure, metrics and determinism
//! - `properties` - Property-based checks over generated profiles
