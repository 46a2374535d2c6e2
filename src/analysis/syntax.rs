//! Closed syntax layer between tree-sitter and record assembly.
//!
//! Language analyzers lower their parse trees into these types. Each node
//! kind has a fixed shape, so assembly never probes for optional attributes:
//! an interface simply has no field members if none were declared.

use super::records::TypeKind;

/// An annotation as written, e.g. `Entity` or `javax.inject.Inject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxAnnotation {
    pub name: String,
}

impl SyntaxAnnotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Bound direction of a wildcard type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardBound {
    Extends,
    Super,
}

/// A type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A simple type name such as `String`.
    Named(String),
    /// A primitive keyword such as `int` or `boolean`.
    Primitive(String),
    /// A qualified name; segments are in source order.
    Scoped(Vec<TypeRef>),
    /// `base<args>`.
    Generic { base: Box<TypeRef>, args: Vec<TypeRef> },
    /// `element` followed by `dimensions` pairs of brackets.
    Array { element: Box<TypeRef>, dimensions: usize },
    /// `?`, optionally bounded.
    Wildcard {
        bound: Option<(WildcardBound, Box<TypeRef>)>,
    },
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn generic(base: TypeRef, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic {
            base: Box::new(base),
            args,
        }
    }
}

/// A field declaration statement. One statement may bind several names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxField {
    pub annotations: Vec<SyntaxAnnotation>,
    pub modifiers: Vec<String>,
    pub ty: Option<TypeRef>,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxMethod {
    pub name: String,
    pub annotations: Vec<SyntaxAnnotation>,
    pub modifiers: Vec<String>,
}

/// A member of a type body, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxMember {
    Field(SyntaxField),
    Method(SyntaxMethod),
    Type(SyntaxType),
}

/// A class, interface, enum or record declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxType {
    pub kind: TypeKind,
    pub name: String,
    pub annotations: Vec<SyntaxAnnotation>,
    pub modifiers: Vec<String>,
    pub members: Vec<SyntaxMember>,
}

impl SyntaxType {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            annotations: Vec::new(),
            modifiers: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &SyntaxField> {
        self.members.iter().filter_map(|m| match m {
            SyntaxMember::Field(f) => Some(f),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &SyntaxMethod> {
        self.members.iter().filter_map(|m| match m {
            SyntaxMember::Method(m) => Some(m),
            _ => None,
        })
    }

    pub fn nested(&self) -> impl Iterator<Item = &SyntaxType> {
        self.members.iter().filter_map(|m| match m {
            SyntaxMember::Type(t) => Some(t),
            _ => None,
        })
    }
}

/// Parsed compilation unit: top-level declarations in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxUnit {
    pub package: Option<String>,
    pub types: Vec<SyntaxType>,
}
