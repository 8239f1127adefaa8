//! Test utilities and fixtures for luabundle
//!
//! Shared by the integration tests (tests/ directories) of the core and CLI
//! crates.

pub mod fixtures;
pub mod project;
