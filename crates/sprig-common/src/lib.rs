//! Common utilities for the sprig selector engine.
//!
//! This crate provides shared infrastructure used by the sprig crates:
//! - **Warning System** - deduplicated warnings routed through the `log` facade

pub mod warning;
