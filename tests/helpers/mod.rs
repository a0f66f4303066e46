//! Test helpers
//!
//! Shared setup for integration tests. Each test binary that needs
//! these declares `mod helpers;` at its root.

#![allow(dead_code)]

pub mod test_context;

pub use test_context::TestContext;
