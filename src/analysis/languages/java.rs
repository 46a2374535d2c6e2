//! Java language analyzer using tree-sitter.

use std::path::Path;

use tree_sitter::{Language, Node, Parser};

use crate::analysis::records::TypeKind;
use crate::analysis::syntax::{
    SyntaxAnnotation, SyntaxField, SyntaxMember, SyntaxMethod, SyntaxType, SyntaxUnit, TypeRef,
    WildcardBound,
};
use crate::analysis::{LanguageAnalyzer, ParsedFile};
use crate::error::{AnalysisError, Result};

/// Longest source excerpt quoted in a syntax error message.
const ERROR_EXCERPT_LEN: usize = 40;

pub struct JavaAnalyzer {
    language: Language,
}

impl JavaAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| AnalysisError::Language(format!("java: {}", e)))?;
        Ok(parser)
    }
}

impl Default for JavaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for JavaAnalyzer {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn parse(&self, path: &Path, source: &[u8]) -> Result<ParsedFile> {
        let file = path.to_string_lossy().to_string();
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AnalysisError::ParseSyntax {
                file: file.clone(),
                message: "parser produced no tree".to_string(),
            })?;

        let parsed = ParsedFile {
            tree,
            source: source.to_vec(),
            path: file,
        };

        let root = parsed.tree.root_node();
        if root.has_error() {
            let message = first_error(root)
                .map(|node| describe_error(&parsed, node))
                .unwrap_or_else(|| "syntax error".to_string());
            return Err(AnalysisError::ParseSyntax {
                file: parsed.path.clone(),
                message,
            });
        }

        Ok(parsed)
    }

    fn lower(&self, parsed: &ParsedFile, max_depth: usize) -> Result<SyntaxUnit> {
        Lowering { parsed, max_depth }.unit()
    }
}

/// First ERROR or MISSING node in document order.
fn first_error(root: Node) -> Option<Node> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

fn describe_error(parsed: &ParsedFile, node: Node) -> String {
    let pos = node.start_position();
    let (line, col) = (pos.row + 1, pos.column + 1);

    if node.is_missing() {
        return format!("missing {:?} at {}:{}", node.kind(), line, col);
    }

    let excerpt: String = parsed
        .node_text(node)
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .chars()
        .take(ERROR_EXCERPT_LEN)
        .collect();
    if excerpt.is_empty() {
        format!("syntax error at {}:{}", line, col)
    } else {
        format!("syntax error at {}:{} near {:?}", line, col, excerpt)
    }
}

fn type_kind(node_kind: &str) -> Option<TypeKind> {
    match node_kind {
        "class_declaration" => Some(TypeKind::Class),
        "interface_declaration" => Some(TypeKind::Interface),
        "enum_declaration" => Some(TypeKind::Enum),
        "record_declaration" => Some(TypeKind::Record),
        _ => None,
    }
}

fn is_annotation(node: Node) -> bool {
    matches!(node.kind(), "annotation" | "marker_annotation")
}

/// Tree-to-syntax lowering for one file.
struct Lowering<'a> {
    parsed: &'a ParsedFile,
    max_depth: usize,
}

impl<'a> Lowering<'a> {
    fn text(&self, node: Node) -> &'a str {
        let parsed: &'a ParsedFile = self.parsed;
        parsed.node_text(node)
    }

    /// Node text with all whitespace removed.
    fn compact(&self, node: Node) -> String {
        self.text(node).split_whitespace().collect()
    }

    fn unit(&self) -> Result<SyntaxUnit> {
        let root = self.parsed.tree.root_node();
        let mut unit = SyntaxUnit::default();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.kind() == "package_declaration" {
                unit.package = self.package_name(child);
            } else if let Some(kind) = type_kind(child.kind()) {
                unit.types.push(self.type_decl(child, kind, 1)?);
            }
        }

        Ok(unit)
    }

    fn package_name(&self, node: Node) -> Option<String> {
        let mut cursor = node.walk();
        let name = node
            .named_children(&mut cursor)
            .find(|n| matches!(n.kind(), "scoped_identifier" | "identifier"))
            .map(|n| self.compact(n));
        name
    }

    fn too_deep(&self, node: Node, what: &str) -> AnalysisError {
        let pos = node.start_position();
        AnalysisError::StructuralAssumptionViolation {
            file: self.parsed.path.clone(),
            message: format!(
                "{} nesting exceeds {} levels at {}:{}",
                what,
                self.max_depth,
                pos.row + 1,
                pos.column + 1
            ),
        }
    }

    fn type_decl(&self, node: Node, kind: TypeKind, depth: usize) -> Result<SyntaxType> {
        if depth > self.max_depth {
            return Err(self.too_deep(node, "type"));
        }

        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n))
            .unwrap_or("");
        let mut decl = SyntaxType::new(kind, name);
        (decl.annotations, decl.modifiers) = self.modifiers(node);

        if let Some(body) = node.child_by_field_name("body") {
            self.body(body, &mut decl, depth)?;
        }

        Ok(decl)
    }

    /// Collect members of a class, interface, enum or record body.
    ///
    /// Enum constants and their bodies, initializer blocks and constructors
    /// are skipped, so anonymous and local classes are never visited.
    fn body(&self, body: Node, decl: &mut SyntaxType, depth: usize) -> Result<()> {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "field_declaration" | "constant_declaration" => {
                    decl.members.push(SyntaxMember::Field(self.field(member)?));
                }
                "method_declaration" => {
                    decl.members.push(SyntaxMember::Method(self.method(member)));
                }
                "enum_body_declarations" => self.body(member, decl, depth)?,
                kind => {
                    if let Some(kind) = type_kind(kind) {
                        let nested = self.type_decl(member, kind, depth + 1)?;
                        decl.members.push(SyntaxMember::Type(nested));
                    }
                }
            }
        }
        Ok(())
    }

    /// Annotations and modifier keywords from a declaration's `modifiers` child.
    fn modifiers(&self, node: Node) -> (Vec<SyntaxAnnotation>, Vec<String>) {
        let mut annotations = Vec::new();
        let mut modifiers = Vec::new();

        let mut cursor = node.walk();
        let Some(mods) = node
            .children(&mut cursor)
            .find(|c| c.kind() == "modifiers")
        else {
            return (annotations, modifiers);
        };

        let mut cursor = mods.walk();
        for child in mods.children(&mut cursor) {
            if is_annotation(child) {
                if let Some(name) = child.child_by_field_name("name") {
                    annotations.push(SyntaxAnnotation::new(self.compact(name)));
                }
            } else if !child.is_named() {
                modifiers.push(child.kind().to_string());
            }
        }

        (annotations, modifiers)
    }

    fn field(&self, node: Node) -> Result<SyntaxField> {
        let (annotations, modifiers) = self.modifiers(node);
        let ty = node
            .child_by_field_name("type")
            .map(|t| self.type_ref(t, 1))
            .transpose()?;

        let mut cursor = node.walk();
        let names = node
            .children_by_field_name("declarator", &mut cursor)
            .filter_map(|d| d.child_by_field_name("name"))
            .map(|n| self.text(n).to_string())
            .collect();

        Ok(SyntaxField {
            annotations,
            modifiers,
            ty,
            names,
        })
    }

    fn method(&self, node: Node) -> SyntaxMethod {
        let (annotations, modifiers) = self.modifiers(node);
        SyntaxMethod {
            name: node
                .child_by_field_name("name")
                .map(|n| self.text(n).to_string())
                .unwrap_or_default(),
            annotations,
            modifiers,
        }
    }

    /// Lower a type node. `depth` counts enclosing type references, so
    /// deeply nested type arguments fail the file instead of the stack.
    fn type_ref(&self, node: Node, depth: usize) -> Result<TypeRef> {
        if depth > self.max_depth {
            return Err(self.too_deep(node, "type argument"));
        }

        let ty = match node.kind() {
            "type_identifier" | "identifier" => TypeRef::Named(self.text(node).to_string()),
            "integral_type" | "floating_point_type" | "boolean_type" | "void_type" => {
                TypeRef::Primitive(self.text(node).to_string())
            }
            "scoped_type_identifier" => {
                let mut segments = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if is_annotation(child) {
                        continue;
                    }
                    match self.type_ref(child, depth + 1)? {
                        TypeRef::Scoped(inner) => segments.extend(inner),
                        segment => segments.push(segment),
                    }
                }
                TypeRef::Scoped(segments)
            }
            "generic_type" => {
                let mut base = None;
                let mut args = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "type_arguments" {
                        args = self.type_arguments(child, depth + 1)?;
                    } else if base.is_none() && !is_annotation(child) {
                        base = Some(self.type_ref(child, depth + 1)?);
                    }
                }
                let base = base.unwrap_or_else(|| TypeRef::Named(self.compact(node)));
                TypeRef::generic(base, args)
            }
            "array_type" => {
                let element = match node.child_by_field_name("element") {
                    Some(e) => self.type_ref(e, depth + 1)?,
                    None => TypeRef::Named(String::new()),
                };
                let dimensions = node
                    .child_by_field_name("dimensions")
                    .map(|d| {
                        let mut cursor = d.walk();
                        let count = d.children(&mut cursor).filter(|c| c.kind() == "[").count();
                        count
                    })
                    .unwrap_or(1);
                TypeRef::Array {
                    element: Box::new(element),
                    dimensions,
                }
            }
            "wildcard" => {
                let mut direction = None;
                let mut bound = None;
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    match child.kind() {
                        "extends" => direction = Some(WildcardBound::Extends),
                        "super" => direction = Some(WildcardBound::Super),
                        "?" => {}
                        _ if child.is_named() && !is_annotation(child) => {
                            bound = Some(self.type_ref(child, depth + 1)?);
                        }
                        _ => {}
                    }
                }
                TypeRef::Wildcard {
                    bound: direction.zip(bound).map(|(d, b)| (d, Box::new(b))),
                }
            }
            "annotated_type" => {
                let mut cursor = node.walk();
                let inner = node
                    .named_children(&mut cursor)
                    .find(|c| !is_annotation(*c));
                match inner {
                    Some(c) => self.type_ref(c, depth + 1)?,
                    None => TypeRef::Named(self.compact(node)),
                }
            }
            _ => TypeRef::Named(self.compact(node)),
        };
        Ok(ty)
    }

    fn type_arguments(&self, node: Node, depth: usize) -> Result<Vec<TypeRef>> {
        let mut cursor = node.walk();
        let args = node
            .named_children(&mut cursor)
            .filter(|c| !is_annotation(*c))
            .map(|c| self.type_ref(c, depth))
            .collect();
        args
    }
}
