//! Traceability report rows and serializers.
//!
//! The report builder consumes the committed item collection read-only and
//! produces one row per requirement, plus CSV and Markdown renderings of
//! those rows. Reports are written regardless of validation outcome, so CI
//! consumers get both the failure signal and the artifact.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::Path,
};

use crate::domain::{Item, Kind};

/// One report row, describing a single requirement's traces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    /// The requirement identifier.
    pub requirement: String,
    /// The requirement's parent list, comma-joined.
    pub parent: String,
    /// Sorted unique design identifiers whose `Satisfies` lists name this
    /// requirement.
    pub designs: Vec<String>,
    /// The requirement's declared verification claim, as written.
    pub verification: Vec<String>,
    /// Sorted unique test identifiers whose `Verifies` lists name this
    /// requirement.
    pub tests: Vec<String>,
    /// Declaration site, rendered as `path:line`.
    pub source: String,
}

/// Builds one row per requirement, in identifier order.
///
/// Design and test coverage is recovered by inverting the `Satisfies` and
/// `Verifies` lists of the other items; dangling references simply
/// contribute nothing.
#[must_use]
pub fn trace_rows(items: &BTreeMap<String, Item>) -> Vec<TraceRow> {
    let mut satisfied_by: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut verified_by: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for item in items.values() {
        match item.kind {
            Kind::Design => {
                for target in &item.satisfies {
                    satisfied_by.entry(target).or_default().insert(&item.id);
                }
            }
            Kind::Test => {
                for target in &item.verifies {
                    verified_by.entry(target).or_default().insert(&item.id);
                }
            }
            Kind::Requirement | Kind::Unknown => {}
        }
    }

    items
        .values()
        .filter(|item| item.kind == Kind::Requirement)
        .map(|item| TraceRow {
            requirement: item.id.clone(),
            parent: item.parent.join(","),
            designs: sorted_ids(satisfied_by.get(item.id.as_str())),
            verification: item.verification.clone(),
            tests: sorted_ids(verified_by.get(item.id.as_str())),
            source: item.origin.to_string(),
        })
        .collect()
}

fn sorted_ids(ids: Option<&BTreeSet<&str>>) -> Vec<String> {
    ids.into_iter()
        .flatten()
        .map(ToString::to_string)
        .collect()
}

const CSV_HEADER: &str = "RequirementID,Parent,DesignIDs,VerificationClaim,TestIDs,Source";

/// Writes the rows as `traceability.csv`-style CSV.
///
/// Parent directories are created if needed.
///
/// # Errors
///
/// Returns an error if the output directory or file cannot be written.
pub fn write_csv(rows: &[TraceRow], out: &Path) -> io::Result<()> {
    let mut text = String::from(CSV_HEADER);
    text.push('\n');

    for row in rows {
        let fields = [
            row.requirement.clone(),
            row.parent.clone(),
            row.designs.join(","),
            row.verification.join(","),
            row.tests.join(","),
            row.source.clone(),
        ];
        let line: Vec<String> = fields.iter().map(|field| csv_field(field)).collect();
        text.push_str(&line.join(","));
        text.push('\n');
    }

    write_report(out, &text)
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Writes the rows as a Markdown pipe table.
///
/// Parent directories are created if needed.
///
/// # Errors
///
/// Returns an error if the output directory or file cannot be written.
pub fn write_markdown(rows: &[TraceRow], out: &Path) -> io::Result<()> {
    let mut lines = vec![
        "# Traceability Report".to_string(),
        String::new(),
        "| Requirement | Parent | Design | Verification (Claim) | Tests (Actual) | Source |"
            .to_string(),
        "|---|---|---|---|---|---|".to_string(),
    ];

    for row in rows {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            row.requirement,
            row.parent,
            row.designs.join(","),
            row.verification.join(","),
            row.tests.join(","),
            row.source,
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    write_report(out, &text)
}

fn write_report(out: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(out, text)
}
