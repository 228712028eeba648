use std::path::PathBuf;

use super::item::{LinkField, Origin};

/// A diagnostic recorded during scanning or validation.
///
/// Issues are collected, never propagated as control flow: a run always
/// completes extraction, validation, and report generation, and the full
/// issue list is the caller-visible signal. The `Display` output is the
/// line format emitted in CI logs, so it is kept stable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Issue {
    /// A document could not be loaded. The run continues with the
    /// remaining documents.
    #[error("Failed to read {}: {message}", path.display())]
    Read {
        /// Path of the unreadable document.
        path: PathBuf,
        /// Description of the underlying failure.
        message: String,
    },

    /// Two items declared the same identifier. The first declaration is
    /// authoritative; the second is discarded.
    #[error("Duplicate ID {id}:\n  - {first}\n  - {second}")]
    DuplicateId {
        /// The contested identifier.
        id: String,
        /// Declaration site of the retained item.
        first: Origin,
        /// Declaration site of the discarded item.
        second: Origin,
    },

    /// A declared link points at an identifier no item carries.
    #[error("{item} references missing {field} target: {target}  ({origin})")]
    MissingReference {
        /// Identifier of the item holding the reference.
        item: String,
        /// The field the reference appears in.
        field: LinkField,
        /// The unresolved target identifier.
        target: String,
        /// Declaration site of the referencing item.
        origin: Origin,
    },

    /// A derived requirement has no parent link.
    #[error("Requirement missing Parent: {id}  ({origin})")]
    MissingParent {
        /// Identifier of the requirement.
        id: String,
        /// Declaration site of the requirement.
        origin: Origin,
    },

    /// A requirement declares no verifying counterpart.
    #[error("Requirement missing Verification: {id}  ({origin})")]
    MissingVerification {
        /// Identifier of the requirement.
        id: String,
        /// Declaration site of the requirement.
        origin: Origin,
    },

    /// A design item satisfies nothing.
    #[error("Design item missing Satisfies: {id}  ({origin})")]
    MissingSatisfies {
        /// Identifier of the design item.
        id: String,
        /// Declaration site of the design item.
        origin: Origin,
    },

    /// A test case verifies nothing.
    #[error("Test case missing Verifies: {id}  ({origin})")]
    MissingVerifies {
        /// Identifier of the test case.
        id: String,
        /// Declaration site of the test case.
        origin: Origin,
    },

    /// A requirement claims a test verifies it, but the test does not
    /// reciprocate.
    #[error(
        "Trace mismatch: {requirement} says Verification {test}, but {test} does not Verifies {requirement} ({origin})"
    )]
    TraceMismatch {
        /// Identifier of the claiming requirement.
        requirement: String,
        /// Identifier of the non-reciprocating test.
        test: String,
        /// Declaration site of the requirement.
        origin: Origin,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(line: usize) -> Origin {
        Origin {
            path: PathBuf::from("spec/hw.md"),
            line,
        }
    }

    #[test]
    fn missing_reference_format() {
        let issue = Issue::MissingReference {
            item: "HW-010-DSN-001".to_string(),
            field: LinkField::Satisfies,
            target: "HW-010-RQ-009".to_string(),
            origin: origin(4),
        };
        assert_eq!(
            issue.to_string(),
            "HW-010-DSN-001 references missing Satisfies target: HW-010-RQ-009  (spec/hw.md:4)"
        );
    }

    #[test]
    fn duplicate_id_format_names_both_origins() {
        let issue = Issue::DuplicateId {
            id: "SYS-001".to_string(),
            first: origin(1),
            second: Origin {
                path: PathBuf::from("docs/other.md"),
                line: 7,
            },
        };
        assert_eq!(
            issue.to_string(),
            "Duplicate ID SYS-001:\n  - spec/hw.md:1\n  - docs/other.md:7"
        );
    }

    #[test]
    fn trace_mismatch_format() {
        let issue = Issue::TraceMismatch {
            requirement: "HW-010-RQ-001".to_string(),
            test: "HW-010-TST-001".to_string(),
            origin: origin(2),
        };
        assert_eq!(
            issue.to_string(),
            "Trace mismatch: HW-010-RQ-001 says Verification HW-010-TST-001, but HW-010-TST-001 does not Verifies HW-010-RQ-001 (spec/hw.md:2)"
        );
    }
}
