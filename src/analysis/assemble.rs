//! Record assembly from the syntax layer.

use super::classify::classify;
use super::records::{FieldInfo, MethodInfo, TypeDeclaration};
use super::render::render_type;
use super::syntax::{SyntaxAnnotation, SyntaxType, SyntaxUnit};

/// Build one record per top-level declaration, in source order.
pub fn assemble_unit(unit: &SyntaxUnit) -> Vec<TypeDeclaration> {
    unit.types.iter().map(assemble_type).collect()
}

/// Build the record for one declaration and, recursively, its nested types.
pub fn assemble_type(decl: &SyntaxType) -> TypeDeclaration {
    let annotations = annotation_names(&decl.annotations);
    let fields = extract_fields(decl);
    let methods = extract_methods(decl);
    let roles = classify(&annotations, &fields, &methods);

    TypeDeclaration {
        name: decl.name.clone(),
        kind: decl.kind,
        annotations,
        modifiers: unique(&decl.modifiers),
        fields,
        methods,
        roles,
        nested_types: decl.nested().map(assemble_type).collect(),
    }
}

fn extract_fields(decl: &SyntaxType) -> Vec<FieldInfo> {
    let mut fields = Vec::new();
    for field in decl.fields() {
        let field_type = render_type(field.ty.as_ref());
        let annotations = annotation_names(&field.annotations);
        let modifiers = unique(&field.modifiers);
        for name in &field.names {
            fields.push(FieldInfo {
                name: name.clone(),
                field_type: field_type.clone(),
                annotations: annotations.clone(),
                modifiers: modifiers.clone(),
            });
        }
    }
    fields
}

fn extract_methods(decl: &SyntaxType) -> Vec<MethodInfo> {
    decl.methods()
        .map(|method| MethodInfo {
            name: method.name.clone(),
            annotations: annotation_names(&method.annotations),
            modifiers: unique(&method.modifiers),
        })
        .collect()
}

/// Lowercased, duplicate-free annotation names in source order.
fn annotation_names(annotations: &[SyntaxAnnotation]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(annotations.len());
    for anno in annotations {
        if anno.name.is_empty() {
            continue;
        }
        let name = anno.name.to_lowercase();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

fn unique(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify::Role;
    use crate::analysis::records::TypeKind;
    use crate::analysis::syntax::{SyntaxField, SyntaxMember, SyntaxMethod, TypeRef};

    fn field(names: &[&str], ty: Option<TypeRef>, annotations: &[&str]) -> SyntaxMember {
        SyntaxMember::Field(SyntaxField {
            annotations: annotations.iter().map(|a| SyntaxAnnotation::new(*a)).collect(),
            modifiers: vec!["private".to_string()],
            ty,
            names: names.iter().map(|n| n.to_string()).collect(),
        })
    }

    #[test]
    fn test_multi_declarator_expands() {
        let mut decl = SyntaxType::new(TypeKind::Class, "Point");
        decl.members.push(field(&["x", "y"], Some(TypeRef::Primitive("int".into())), &["Column"]));

        let record = assemble_type(&decl);
        assert_eq!(record.fields.len(), 2);
        assert_eq!(record.fields[0].name, "x");
        assert_eq!(record.fields[1].name, "y");
        assert_eq!(record.fields[0].field_type, record.fields[1].field_type);
        assert_eq!(record.fields[0].annotations, vec!["column".to_string()]);
        assert_eq!(record.fields[0].annotations, record.fields[1].annotations);
        assert_eq!(record.fields[0].modifiers, record.fields[1].modifiers);
    }

    #[test]
    fn test_annotations_lowercased_and_unique() {
        let mut decl = SyntaxType::new(TypeKind::Class, "Svc");
        decl.annotations = vec![
            SyntaxAnnotation::new("Service"),
            SyntaxAnnotation::new("SERVICE"),
            SyntaxAnnotation::new("Transactional"),
        ];
        let record = assemble_type(&decl);
        assert_eq!(record.annotations, vec!["service", "transactional"]);
        assert_eq!(record.roles, vec![Role::Service]);
    }

    #[test]
    fn test_nested_roles_are_independent() {
        let mut inner = SyntaxType::new(TypeKind::Enum, "Status");
        inner.annotations.push(SyntaxAnnotation::new("Entity"));

        let mut outer = SyntaxType::new(TypeKind::Class, "Order");
        outer.members.push(SyntaxMember::Method(SyntaxMethod {
            name: "onCreated".to_string(),
            annotations: vec![SyntaxAnnotation::new("Observes")],
            modifiers: vec![],
        }));
        outer.members.push(SyntaxMember::Type(inner));

        let record = assemble_type(&outer);
        assert_eq!(record.roles, vec![Role::CdiObserver]);
        assert_eq!(record.nested_types.len(), 1);
        assert_eq!(record.nested_types[0].kind, TypeKind::Enum);
        assert_eq!(record.nested_types[0].roles, vec![Role::Entity]);
        assert!(record.nested_types[0].nested_types.is_empty());
    }

    #[test]
    fn test_absent_type_kept_as_none() {
        let mut decl = SyntaxType::new(TypeKind::Class, "Holder");
        decl.members.push(field(&["value"], None, &[]));
        let record = assemble_type(&decl);
        assert_eq!(record.fields[0].field_type, None);
        assert_eq!(record.roles, vec![Role::Unknown]);
    }
}
