//! Domain models for traceability checking.
//!
//! This module contains the core domain types: traceability items, the
//! diagnostics they can produce, and run configuration.

/// Traceability items and kind inference.
pub mod item;
pub use item::{Item, Kind, LinkField, Origin};

mod config;
pub use config::Config;

/// Diagnostics produced by scanning and validation.
pub mod issue;
pub use issue::Issue;
