//! Document scanning and item extraction.
//!
//! A [`DocumentSource`] yields fully materialized documents in canonical
//! path-sorted order; the [`Extractor`] recovers traceability items from
//! their lines.

mod extractor;
/// Document providers and the read boundary.
pub mod source;

pub use extractor::{Extractor, ScanOutcome};
pub use source::{Document, DocumentSource, FsSource, ReadError};
