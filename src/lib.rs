//! Requirements traceability checking for plain-text documentation.
//!
//! Traceability items are declared inline in markdown documents and linked
//! by identifier. This crate extracts them, validates the cross-reference
//! graph, and builds a traceability report.

pub mod domain;
pub use domain::{Config, Issue, Item, Kind, LinkField, Origin};

/// Document scanning and item extraction.
pub mod scan;
pub use scan::{Document, DocumentSource, Extractor, FsSource, ReadError, ScanOutcome};

pub mod validate;
pub use validate::validate;

/// Traceability report rows and serializers.
pub mod report;
