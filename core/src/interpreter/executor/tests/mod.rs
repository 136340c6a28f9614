//! Tests for the executor
//!
//! Organized by feature area

mod condition_tests;
mod helpers;
