//! Canonical string rendering of type references.

use super::syntax::{TypeRef, WildcardBound};

/// Render an optional type reference.
///
/// `None` stays `None` so an absent type is distinguishable from an empty
/// rendering.
pub fn render_type(ty: Option<&TypeRef>) -> Option<String> {
    ty.map(render)
}

/// Render a type reference without whitespace, e.g. `Map<String,List<Id>>`.
pub fn render(ty: &TypeRef) -> String {
    let mut out = String::new();
    write_type(ty, &mut out);
    out
}

fn write_type(ty: &TypeRef, out: &mut String) {
    match ty {
        TypeRef::Named(name) | TypeRef::Primitive(name) => out.push_str(name),
        TypeRef::Scoped(segments) => {
            for (i, segment) in segments.iter().enumerate() {
                if i > 0 {
                    out.push('.');
                }
                write_type(segment, out);
            }
        }
        TypeRef::Generic { base, args } => {
            write_type(base, out);
            if !args.is_empty() {
                out.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_type(arg, out);
                }
                out.push('>');
            }
        }
        TypeRef::Array {
            element,
            dimensions,
        } => {
            write_type(element, out);
            for _ in 0..*dimensions {
                out.push_str("[]");
            }
        }
        TypeRef::Wildcard { bound } => {
            out.push('?');
            if let Some((direction, bound)) = bound {
                out.push_str(match direction {
                    WildcardBound::Extends => " extends ",
                    WildcardBound::Super => " super ",
                });
                write_type(bound, out);
            }
        }
    }
}
