//! Semantic validation of the extracted item graph.
//!
//! Validation is a pure function over the committed item collection. Rules
//! run in a fixed order and every violation is collected before returning,
//! so one run surfaces the full defect set.

use std::collections::BTreeMap;

use crate::domain::{Issue, Item, Kind, LinkField};

/// Checks referential integrity and link obligations across the item
/// collection.
///
/// Three rule groups run in order:
///
/// 1. every declared reference must resolve to a known item;
/// 2. items carry the mandatory links their kind demands (requirements
///    need `Parent` unless their identifier starts with `SYS-`, and always
///    `Verification`; design items need `Satisfies`; tests need
///    `Verifies`; unknown items carry no obligations);
/// 3. a requirement's `Verification` claim must be reciprocated by the
///    named test's `Verifies` list. Unresolved claims are already covered
///    by the first group and are not reported twice.
///
/// Items are visited in identifier order, so the issue list is stable for
/// a given corpus.
#[must_use]
pub fn validate(items: &BTreeMap<String, Item>) -> Vec<Issue> {
    let mut issues = Vec::new();

    for item in items.values() {
        for field in LinkField::ALL {
            for target in item.field(field) {
                if !items.contains_key(target) {
                    issues.push(Issue::MissingReference {
                        item: item.id.clone(),
                        field,
                        target: target.clone(),
                        origin: item.origin.clone(),
                    });
                }
            }
        }
    }

    for item in items.values() {
        match item.kind {
            Kind::Requirement => {
                // Top-level SYS requirements have nothing to derive from.
                if !item.id.starts_with("SYS-") && item.parent.is_empty() {
                    issues.push(Issue::MissingParent {
                        id: item.id.clone(),
                        origin: item.origin.clone(),
                    });
                }
                if item.verification.is_empty() {
                    issues.push(Issue::MissingVerification {
                        id: item.id.clone(),
                        origin: item.origin.clone(),
                    });
                }
            }
            Kind::Design => {
                if item.satisfies.is_empty() {
                    issues.push(Issue::MissingSatisfies {
                        id: item.id.clone(),
                        origin: item.origin.clone(),
                    });
                }
            }
            Kind::Test => {
                if item.verifies.is_empty() {
                    issues.push(Issue::MissingVerifies {
                        id: item.id.clone(),
                        origin: item.origin.clone(),
                    });
                }
            }
            Kind::Unknown => {}
        }
    }

    for item in items.values().filter(|item| item.kind == Kind::Requirement) {
        for test_id in &item.verification {
            if let Some(test) = items.get(test_id) {
                if !test.verifies.contains(&item.id) {
                    issues.push(Issue::TraceMismatch {
                        requirement: item.id.clone(),
                        test: test_id.clone(),
                        origin: item.origin.clone(),
                    });
                }
            }
        }
    }

    issues
}
