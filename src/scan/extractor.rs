//! Extraction of traceability items from document lines.
//!
//! The extractor is a two-state machine: idle, or accumulating exactly one
//! in-progress item. An identifier line starts a new item (sealing any
//! in-progress one first); attribute lines mutate the in-progress item;
//! the end of a document flushes it. Sealing is a single reusable commit
//! step so duplicate handling is identical at every transition.

use std::collections::BTreeMap;

use regex::Regex;

use super::source::{Document, ReadError};
use crate::domain::{Issue, Item, LinkField, Origin};

/// The result of scanning a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Committed items, keyed by identifier. The first declaration of an
    /// identifier is authoritative.
    pub items: BTreeMap<String, Item>,
    /// Structural issues, in scan order.
    pub issues: Vec<Issue>,
}

/// Recovers traceability items from semi-structured document lines.
#[derive(Debug, Clone)]
pub struct Extractor {
    id_line: Regex,
    attribute_line: Regex,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Creates an extractor with the standard line patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id_line: Regex::new(r"^\s*ID:\s*([A-Z][A-Z0-9-]*)\s*$").expect("pattern is valid"),
            attribute_line: Regex::new(r"^\s*(Parent|Verification|Satisfies|Verifies):\s*(.+?)\s*$")
                .expect("pattern is valid"),
        }
    }

    /// Scans the given documents in order, producing committed items and
    /// structural issues.
    ///
    /// Documents that failed to load contribute one read issue and no
    /// items; scanning continues with the remaining documents. Callers
    /// supply documents in canonical path-sorted order (see
    /// [`DocumentSource::load`](super::DocumentSource::load)) so duplicate
    /// detection and diagnostics are reproducible.
    #[must_use]
    pub fn scan<I>(&self, documents: I) -> ScanOutcome
    where
        I: IntoIterator<Item = Result<Document, ReadError>>,
    {
        let mut outcome = ScanOutcome::default();

        for document in documents {
            match document {
                Ok(document) => self.scan_document(&document, &mut outcome),
                Err(error) => outcome.issues.push(Issue::Read {
                    path: error.path,
                    message: error.source.to_string(),
                }),
            }
        }

        outcome
    }

    fn scan_document(&self, document: &Document, outcome: &mut ScanOutcome) {
        let mut current: Option<Item> = None;

        for (index, line) in document.lines.iter().enumerate() {
            if let Some(captures) = self.id_line.captures(line) {
                if let Some(item) = current.take() {
                    commit(item, outcome);
                }

                let origin = Origin {
                    path: document.path.clone(),
                    line: index + 1,
                };
                current = Some(Item::new(captures[1].to_string(), origin));
                continue;
            }

            // Attribute lines attach only to an item already in progress;
            // anything before the first identifier is prose.
            if let Some(item) = current.as_mut() {
                if let Some(captures) = self.attribute_line.captures(line) {
                    if let Some(field) = LinkField::from_key(&captures[1]) {
                        item.extend_field(field, split_refs(&captures[2]));
                    }
                }
            }
        }

        if let Some(item) = current.take() {
            commit(item, outcome);
        }
    }
}

/// Seals an in-progress item into the collection.
///
/// A second declaration of an identifier is a structural issue, not an
/// overwrite: the first-seen item is retained and the duplicate discarded.
fn commit(item: Item, outcome: &mut ScanOutcome) {
    if let Some(first) = outcome.items.get(&item.id) {
        outcome.issues.push(Issue::DuplicateId {
            id: item.id.clone(),
            first: first.origin.clone(),
            second: item.origin,
        });
    } else {
        outcome.items.insert(item.id.clone(), item);
    }
}

/// Splits a comma-separated attribute value, trimming tokens and dropping
/// empty ones.
fn split_refs(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf};

    use super::*;
    use crate::domain::Kind;

    fn doc(path: &str, text: &str) -> Result<Document, ReadError> {
        Ok(Document {
            path: PathBuf::from(path),
            lines: text.lines().map(ToString::to_string).collect(),
        })
    }

    #[test]
    fn extracts_item_with_attributes() {
        let extractor = Extractor::new();
        let outcome = extractor.scan([doc(
            "spec/hw.md",
            "# Heading\n\
             ID: HW-010-RQ-001\n\
             Some prose about the requirement.\n\
             Parent: SYS-001\n\
             Verification: HW-010-TST-001, HW-010-TST-002\n",
        )]);

        assert!(outcome.issues.is_empty());
        let item = &outcome.items["HW-010-RQ-001"];
        assert_eq!(item.kind, Kind::Requirement);
        assert_eq!(item.origin.path, PathBuf::from("spec/hw.md"));
        assert_eq!(item.origin.line, 2);
        assert_eq!(item.parent, ["SYS-001"]);
        assert_eq!(item.verification, ["HW-010-TST-001", "HW-010-TST-002"]);
        assert!(item.satisfies.is_empty());
        assert!(item.verifies.is_empty());
    }

    #[test]
    fn identifier_without_attributes_commits_empty() {
        let outcome = Extractor::new().scan([doc("a.md", "ID: SYS-001\n")]);

        assert!(outcome.issues.is_empty());
        let item = &outcome.items["SYS-001"];
        for field in LinkField::ALL {
            assert!(item.field(field).is_empty());
        }
    }

    #[test]
    fn consecutive_identifier_lines_commit_both() {
        let outcome = Extractor::new().scan([doc(
            "a.md",
            "ID: SYS-001\nID: SYS-002\nParent: SYS-001\n",
        )]);

        assert!(outcome.issues.is_empty());
        assert!(outcome.items["SYS-001"].parent.is_empty());
        assert_eq!(outcome.items["SYS-002"].parent, ["SYS-001"]);
    }

    #[test]
    fn attribute_before_any_identifier_is_ignored() {
        let outcome = Extractor::new().scan([doc("a.md", "Parent: SYS-001\nID: SYS-002\n")]);

        assert!(outcome.issues.is_empty());
        assert!(outcome.items["SYS-002"].parent.is_empty());
    }

    #[test]
    fn empty_tokens_are_dropped() {
        let outcome =
            Extractor::new().scan([doc("a.md", "ID: HW-010-DSN-001\nSatisfies: , SYS-001,,  \n")]);

        assert_eq!(outcome.items["HW-010-DSN-001"].satisfies, ["SYS-001"]);
    }

    #[test]
    fn repeated_attribute_lines_accumulate() {
        let outcome = Extractor::new().scan([doc(
            "a.md",
            "ID: HW-010-RQ-001\nParent: SYS-001\nParent: SYS-002\n",
        )]);

        assert_eq!(
            outcome.items["HW-010-RQ-001"].parent,
            ["SYS-001", "SYS-002"]
        );
    }

    #[test]
    fn duplicate_identifier_keeps_first_and_reports() {
        let outcome = Extractor::new().scan([
            doc("a.md", "ID: SYS-001\nParent: SYS-000\n"),
            doc("b.md", "\nID: SYS-001\n"),
        ]);

        assert_eq!(outcome.items.len(), 1);
        let item = &outcome.items["SYS-001"];
        assert_eq!(item.origin.path, PathBuf::from("a.md"));
        assert_eq!(item.parent, ["SYS-000"]);

        assert_eq!(
            outcome.issues,
            [Issue::DuplicateId {
                id: "SYS-001".to_string(),
                first: Origin {
                    path: PathBuf::from("a.md"),
                    line: 1
                },
                second: Origin {
                    path: PathBuf::from("b.md"),
                    line: 2
                },
            }]
        );
    }

    #[test]
    fn duplicate_within_one_document_is_reported() {
        let outcome = Extractor::new().scan([doc("a.md", "ID: SYS-001\nID: SYS-001\n")]);

        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.issues.len(), 1);
    }

    #[test]
    fn read_failure_is_recorded_and_scan_continues() {
        let outcome = Extractor::new().scan([
            Err(ReadError {
                path: PathBuf::from("a.md"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            }),
            doc("b.md", "ID: SYS-001\n"),
        ]);

        assert_eq!(outcome.items.len(), 1);
        assert!(outcome.items.contains_key("SYS-001"));
        assert_eq!(
            outcome.issues,
            [Issue::Read {
                path: PathBuf::from("a.md"),
                message: "permission denied".to_string(),
            }]
        );
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let outcome =
            Extractor::new().scan([doc("a.md", "  ID: SYS-001  \n\tParent:  SYS-000 \n")]);

        assert_eq!(outcome.items["SYS-001"].parent, ["SYS-000"]);
    }

    #[test]
    fn non_matching_lines_are_prose() {
        let outcome = Extractor::new().scan([doc(
            "a.md",
            "ID: lowercase-not-an-id\n\
             id: SYS-001\n\
             Rationale: SYS-002\n\
             ID SYS-003\n",
        )]);

        assert!(outcome.items.is_empty());
        assert!(outcome.issues.is_empty());
    }
}
