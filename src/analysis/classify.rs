//! Architectural role classification.
//!
//! Roles are inferred from declaration annotations, field annotations,
//! field types and method annotations. The rule order is fixed and the
//! first signal to introduce a role decides where it sits in the output:
//!
//! 1. declaration annotations found in [`ANNOTATION_ROLES`]
//! 2. field annotations found in [`ANNOTATION_ROLES`]
//! 3. fields whose rendered type starts with `Event` -> [`Role::CdiEvent`]
//! 4. methods annotated `observes` -> [`Role::CdiObserver`]
//! 5. declaration annotated `managedbean` -> [`Role::JsfManagedBean`]
//! 6. declaration annotated `facesvalidator` -> [`Role::JsfValidator`]
//!
//! A declaration without any signal is [`Role::Unknown`].

use std::fmt;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use super::records::{FieldInfo, MethodInfo};

/// Architectural role of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Entity")]
    Entity,
    #[serde(rename = "Repository")]
    Repository,
    #[serde(rename = "Service")]
    Service,
    #[serde(rename = "EJB")]
    Ejb,
    #[serde(rename = "CDI Injection")]
    CdiInjection,
    #[serde(rename = "CDI Event")]
    CdiEvent,
    #[serde(rename = "JSF Managed Bean")]
    JsfManagedBean,
    #[serde(rename = "JSF Validator")]
    JsfValidator,
    #[serde(rename = "CDI Observer")]
    CdiObserver,
    #[serde(rename = "Logging")]
    Logging,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Entity => "Entity",
            Role::Repository => "Repository",
            Role::Service => "Service",
            Role::Ejb => "EJB",
            Role::CdiInjection => "CDI Injection",
            Role::CdiEvent => "CDI Event",
            Role::JsfManagedBean => "JSF Managed Bean",
            Role::JsfValidator => "JSF Validator",
            Role::CdiObserver => "CDI Observer",
            Role::Logging => "Logging",
            Role::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lowercase annotation name to role.
pub static ANNOTATION_ROLES: phf::Map<&'static str, Role> = phf_map! {
    "entity" => Role::Entity,
    "repository" => Role::Repository,
    "dao" => Role::Repository,
    "service" => Role::Service,
    "stateless" => Role::Ejb,
    "singleton" => Role::Ejb,
    "inject" => Role::CdiInjection,
    "event" => Role::CdiEvent,
    "managedbean" => Role::JsfManagedBean,
    "facesvalidator" => Role::JsfValidator,
    "observes" => Role::CdiObserver,
    "slf4j" => Role::Logging,
    "log" => Role::Logging,
};

/// Prefix of a rendered field type that marks a CDI event source.
///
/// Matched literally against the rendered type, so fully qualified names
/// such as `javax.enterprise.event.Event<Foo>` do not match.
pub const EVENT_TYPE_PREFIX: &str = "Event";

/// Look up the role for an annotation name, ignoring case.
pub fn role_for_annotation(name: &str) -> Option<Role> {
    ANNOTATION_ROLES.get(name.to_lowercase().as_str()).copied()
}

/// Ordered, duplicate-free role accumulator.
#[derive(Debug, Default)]
struct Roles(Vec<Role>);

impl Roles {
    fn push(&mut self, role: Role) {
        if !self.0.contains(&role) {
            self.0.push(role);
        }
    }

    fn into_vec(self) -> Vec<Role> {
        if self.0.is_empty() {
            vec![Role::Unknown]
        } else {
            self.0
        }
    }
}

fn has_annotation(annotations: &[String], name: &str) -> bool {
    annotations.iter().any(|a| a.eq_ignore_ascii_case(name))
}

/// Classify one declaration from its own annotations and extracted members.
///
/// Never returns an empty list.
pub fn classify(annotations: &[String], fields: &[FieldInfo], methods: &[MethodInfo]) -> Vec<Role> {
    let mut roles = Roles::default();

    for anno in annotations {
        if let Some(role) = role_for_annotation(anno) {
            roles.push(role);
        }
    }

    for field in fields {
        for anno in &field.annotations {
            if let Some(role) = role_for_annotation(anno) {
                roles.push(role);
            }
        }
    }

    for field in fields {
        let is_event = field
            .field_type
            .as_deref()
            .is_some_and(|t| t.starts_with(EVENT_TYPE_PREFIX));
        if is_event {
            roles.push(Role::CdiEvent);
        }
    }

    for method in methods {
        if has_annotation(&method.annotations, "observes") {
            roles.push(Role::CdiObserver);
        }
    }

    if has_annotation(annotations, "managedbean") {
        roles.push(Role::JsfManagedBean);
    }
    if has_annotation(annotations, "facesvalidator") {
        roles.push(Role::JsfValidator);
    }

    roles.into_vec()
}
