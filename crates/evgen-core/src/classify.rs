//! Method classification: getters and setters imply fields.
//!
//! Rules are tried in declaration order and the first one that matches wins,
//! even when it then fails to produce a usable field name.

use crate::model::Method;
use crate::type_ref::TypeRef;
use crate::types::FieldName;

/// The kinds of accessor a method can be recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Getter,
    Setter,
}

impl MethodKind {
    /// Classification order.
    pub const ALL: [Self; 2] = [Self::Getter, Self::Setter];

    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Getter => "get",
            Self::Setter => "set",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Getter => "getter",
            Self::Setter => "setter",
        }
    }

    /// Whether `method` has the shape of this accessor kind.
    ///
    /// Any zero-argument method counts as a getter, whatever its name.
    pub fn matches(self, method: &Method) -> bool {
        let name = method.name.as_str();
        let prefixed = name.len() > self.prefix().len() && name.starts_with(self.prefix());
        match self {
            Self::Getter => prefixed || method.parameters.is_empty(),
            Self::Setter => prefixed && method.parameters.len() == 1,
        }
    }

    /// Derives the field name: strip the prefix if present, lower-case the first character.
    ///
    /// The first character always maps to exactly one character, so `getİd`
    /// yields `id` rather than `i\u{307}d`.
    pub fn field_name(self, method: &Method) -> Option<FieldName> {
        let name = method.name.as_str();
        let stem = name.strip_prefix(self.prefix()).unwrap_or(name);
        let mut chars = stem.chars();
        let first = chars.next()?;
        let lowered = first.to_lowercase().next().unwrap_or(first);
        let derived: String = std::iter::once(lowered).chain(chars).collect();
        FieldName::new(derived).ok()
    }

    /// Extracts the field type implied by `method`.
    pub fn field_type(self, method: &Method) -> Option<TypeRef> {
        match self {
            Self::Getter => Some(unwrap_optional(&method.return_type).clone()),
            Self::Setter => method.parameters.first().map(|p| p.ty.clone()),
        }
    }
}

/// A field implied by an accessor method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedField {
    pub kind: MethodKind,
    pub name: FieldName,
    pub ty: TypeRef,
}

/// Classifies a method, returning `None` when it implies no field.
pub fn classify(method: &Method) -> Option<ClassifiedField> {
    let kind = MethodKind::ALL.into_iter().find(|kind| kind.matches(method))?;
    let name = kind.field_name(method)?;
    let ty = kind.field_type(method)?;
    Some(ClassifiedField { kind, name, ty })
}

/// `Optional<T>` becomes `T`; anything else is returned unchanged.
fn unwrap_optional(ty: &TypeRef) -> &TypeRef {
    match ty.type_arguments() {
        [inner] if ty.simple_name() == "Optional" => inner,
        _ => ty,
    }
}
