//! Runtime support code for luabundle artifacts.
//! Provides the Lua snippets spliced into every bundle, and an owned Rust
//! model of the lazy registry they implement.

pub mod module;
pub mod registry;
pub mod usage;

pub use registry::{Factory, ModuleRegistry};
