//! Integration tests for glitch-rs crates.
//!
//! This crate contains end-to-end tests that verify the interaction
//! between the core, ops and io crates, plus the golden digest cases
//! used to detect output drift.

pub mod golden;
