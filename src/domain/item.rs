use std::{fmt, path::PathBuf};

/// The category of a traceability item.
///
/// Kinds are inferred from markers embedded in the identifier itself rather
/// than declared explicitly, so a crafted identifier can contain more than
/// one marker. The precedence is Requirement > Design > Test, first match
/// wins; identifiers with a `SYS-` prefix and no marker are top-level
/// requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A capability statement that other items trace to (`-RQ-` or `SYS-`).
    Requirement,
    /// An artifact claiming to satisfy one or more requirements (`-DSN-`).
    Design,
    /// An artifact claiming to verify one or more requirements (`-TST-`).
    Test,
    /// An identifier carrying no recognized marker.
    Unknown,
}

impl Kind {
    /// Infers the kind from an identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use reqtrace::Kind;
    ///
    /// assert_eq!(Kind::infer("HW-010-RQ-001"), Kind::Requirement);
    /// assert_eq!(Kind::infer("HW-010-DSN-002"), Kind::Design);
    /// assert_eq!(Kind::infer("HW-010-TST-003"), Kind::Test);
    /// assert_eq!(Kind::infer("SYS-001"), Kind::Requirement);
    /// assert_eq!(Kind::infer("XYZ-1"), Kind::Unknown);
    /// ```
    #[must_use]
    pub fn infer(id: &str) -> Self {
        for (marker, kind) in [
            ("-RQ-", Self::Requirement),
            ("-DSN-", Self::Design),
            ("-TST-", Self::Test),
        ] {
            if id.contains(marker) {
                return kind;
            }
        }

        if id.starts_with("SYS-") {
            return Self::Requirement;
        }

        Self::Unknown
    }
}

/// The declaration site of an item, used only for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Path of the document the item was declared in.
    pub path: PathBuf,
    /// 1-based line number of the identifier line.
    pub line: usize,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// One of the four reference-list fields an item can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    /// Identifiers this item derives from or is part of.
    Parent,
    /// Requirements this item claims to fulfil (used by Design items).
    Satisfies,
    /// Requirements this item claims to verify (used by Test items).
    Verifies,
    /// Verifying counterparts this item claims (used by Requirements).
    Verification,
}

impl LinkField {
    /// All fields, in the order they are validated.
    pub const ALL: [Self; 4] = [
        Self::Parent,
        Self::Satisfies,
        Self::Verifies,
        Self::Verification,
    ];

    /// Resolves an attribute key to its field, if it names one.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Parent" => Some(Self::Parent),
            "Satisfies" => Some(Self::Satisfies),
            "Verifies" => Some(Self::Verifies),
            "Verification" => Some(Self::Verification),
            _ => None,
        }
    }

    /// Returns the attribute key naming this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "Parent",
            Self::Satisfies => "Satisfies",
            Self::Verifies => "Verifies",
            Self::Verification => "Verification",
        }
    }
}

impl fmt::Display for LinkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A uniquely identified traceability node.
///
/// Items are created when their identifier line is recognized, mutated by
/// the attribute lines that follow, and sealed when the next identifier
/// line (or the end of the document) is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique identifier, matching `[A-Z][A-Z0-9-]*`.
    pub id: String,
    /// Category inferred from the identifier.
    pub kind: Kind,
    /// Where the identifier was declared.
    pub origin: Origin,
    /// Identifiers this item derives from.
    pub parent: Vec<String>,
    /// Requirements this item claims to fulfil.
    pub satisfies: Vec<String>,
    /// Requirements this item claims to verify.
    pub verifies: Vec<String>,
    /// Verifying counterparts this item claims.
    pub verification: Vec<String>,
}

impl Item {
    /// Creates an item with empty reference lists, inferring its kind from
    /// the identifier.
    #[must_use]
    pub fn new(id: String, origin: Origin) -> Self {
        let kind = Kind::infer(&id);
        Self {
            id,
            kind,
            origin,
            parent: Vec::new(),
            satisfies: Vec::new(),
            verifies: Vec::new(),
            verification: Vec::new(),
        }
    }

    /// Returns the references held in the given field.
    #[must_use]
    pub fn field(&self, field: LinkField) -> &[String] {
        match field {
            LinkField::Parent => &self.parent,
            LinkField::Satisfies => &self.satisfies,
            LinkField::Verifies => &self.verifies,
            LinkField::Verification => &self.verification,
        }
    }

    /// Appends references to the given field.
    ///
    /// Callers are expected to have filtered out empty tokens already; the
    /// reference lists never contain empty strings.
    pub fn extend_field<I>(&mut self, field: LinkField, refs: I)
    where
        I: IntoIterator<Item = String>,
    {
        let list = match field {
            LinkField::Parent => &mut self.parent,
            LinkField::Satisfies => &mut self.satisfies,
            LinkField::Verifies => &mut self.verifies,
            LinkField::Verification => &mut self.verification,
        };
        list.extend(refs);
    }
}
