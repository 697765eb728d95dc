//! Common test utilities for Arbor integration tests.
//!
//! This module provides:
//! - `Harness`: in-memory storage, cache and event recorder wired to a browser
//! - `TestProject`: a temporary project directory plus a CLI runner
//! - Fixtures: the standard project layout

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
