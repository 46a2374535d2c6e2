//! Structural records produced for each analyzed file.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::classify::Role;

/// Kind of type declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Record,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Record => "record",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One declared field name.
///
/// `int a, b;` produces two entries that share type, annotations and modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    /// Rendered type, `None` when the declaration has no type node.
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    /// Lowercased annotation names.
    pub annotations: Vec<String>,
    pub modifiers: Vec<String>,
}

/// One method declaration. Constructors are not methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    /// Lowercased annotation names.
    pub annotations: Vec<String>,
    pub modifiers: Vec<String>,
}

/// A class, interface, enum or record declaration with its nested types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Lowercased annotation names attached to the declaration.
    pub annotations: Vec<String>,
    pub modifiers: Vec<String>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    /// Never empty; `[Unknown]` when nothing matched.
    #[serde(rename = "type")]
    pub roles: Vec<Role>,
    pub nested_types: Vec<TypeDeclaration>,
}

impl TypeDeclaration {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn find_nested(&self, name: &str) -> Option<&TypeDeclaration> {
        self.nested_types.iter().find(|t| t.name == name)
    }

    /// Depth-first iterator over this declaration and every nested one.
    pub fn walk(&self) -> impl Iterator<Item = &TypeDeclaration> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.nested_types.iter().rev());
            Some(next)
        })
    }
}

/// Whole-file failure. Never mixed with declarations from the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub error: String,
}

/// Outcome of analyzing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Parsed(Vec<TypeDeclaration>),
    Failed(ParseError),
}

/// Analysis result for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn parsed(path: impl Into<String>, types: Vec<TypeDeclaration>) -> Self {
        Self {
            path: path.into(),
            outcome: FileOutcome::Parsed(types),
        }
    }

    pub fn failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            outcome: FileOutcome::Failed(ParseError {
                error: error.into(),
            }),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed(_))
    }

    /// Top-level declarations, empty for a failed file.
    pub fn types(&self) -> &[TypeDeclaration] {
        match &self.outcome {
            FileOutcome::Parsed(types) => types,
            FileOutcome::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&ParseError> {
        match &self.outcome {
            FileOutcome::Parsed(_) => None,
            FileOutcome::Failed(e) => Some(e),
        }
    }

    /// Flat record list for this file: one entry per top-level type, or a
    /// single error entry.
    pub fn records(&self) -> Vec<Record> {
        match &self.outcome {
            FileOutcome::Parsed(types) => types.iter().cloned().map(Record::Type).collect(),
            FileOutcome::Failed(e) => vec![Record::Error(e.clone())],
        }
    }
}

/// One entry of the flat output list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Error(ParseError),
    Type(TypeDeclaration),
}

/// Counts over a batch of file reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub files_parsed: usize,
    pub files_failed: usize,
    pub top_level_types: usize,
    /// Declarations per role, including nested declarations.
    pub roles: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match &report.outcome {
                FileOutcome::Failed(_) => summary.files_failed += 1,
                FileOutcome::Parsed(types) => {
                    summary.files_parsed += 1;
                    summary.top_level_types += types.len();
                    for decl in types.iter().flat_map(TypeDeclaration::walk) {
                        for role in &decl.roles {
                            *summary.roles.entry(role.to_string()).or_default() += 1;
                        }
                    }
                }
            }
        }
        summary
    }
}
