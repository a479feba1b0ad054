//! Ordered field mappings.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

use crate::type_ref::TypeRef;
use crate::types::FieldName;

/// An ordered mapping from field name to field type.
///
/// Iteration follows first insertion. Overwriting an existing field changes
/// its type but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping(IndexMap<FieldName, TypeRef>);

/// Outcome of [`FieldMapping::insert_inferred`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferredInsert<'a> {
    /// The field was new and has been added.
    Added,
    /// The field already existed with the same type.
    Confirmed,
    /// The field already existed with a different type, which was kept.
    Conflict { existing: &'a TypeRef },
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TypeRef> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Inserts or overwrites a field, returning the previous type.
    pub fn insert(&mut self, name: FieldName, ty: TypeRef) -> Option<TypeRef> {
        self.0.insert(name, ty)
    }

    /// Inserts an inferred field without ever overwriting an existing one.
    pub fn insert_inferred(&mut self, name: FieldName, ty: TypeRef) -> InferredInsert<'_> {
        match self.0.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(ty);
                InferredInsert::Added
            }
            Entry::Occupied(slot) => {
                let existing = slot.into_mut();
                if *existing == ty {
                    InferredInsert::Confirmed
                } else {
                    InferredInsert::Conflict { existing }
                }
            }
        }
    }

    /// Copies every field of `other` into this mapping, overwriting on collision.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &TypeRef)> {
        self.0.iter()
    }
}

impl FromIterator<(FieldName, TypeRef)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (FieldName, TypeRef)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldMapping {
    type Item = (&'a FieldName, &'a TypeRef);
    type IntoIter = indexmap::map::Iter<'a, FieldName, TypeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> FieldName {
        FieldName::new(s).unwrap()
    }

    #[test]
    fn test_overwrite_keeps_first_position() {
        let mut fields = FieldMapping::new();
        fields.insert(name("a"), TypeRef::new("Int"));
        fields.insert(name("b"), TypeRef::new("String"));
        let previous = fields.insert(name("a"), TypeRef::new("Long"));

        assert_eq!(previous, Some(TypeRef::new("Int")));
        let order: Vec<_> = fields.iter().map(|(n, t)| format!("{n}:{t}")).collect();
        assert_eq!(order, vec!["a:Long", "b:String"]);
    }

    #[test]
    fn test_inferred_insert_reports_conflict_and_keeps_first() {
        let mut fields = FieldMapping::new();
        assert_eq!(
            fields.insert_inferred(name("foo"), TypeRef::new("Int")),
            InferredInsert::Added
        );
        assert_eq!(
            fields.insert_inferred(name("foo"), TypeRef::new("Int")),
            InferredInsert::Confirmed
        );
        assert_eq!(
            fields.insert_inferred(name("foo"), TypeRef::new("Long")),
            InferredInsert::Conflict {
                existing: &TypeRef::new("Int")
            }
        );
        assert_eq!(fields.get("foo"), Some(&TypeRef::new("Int")));
    }

    #[test]
    fn test_merge_overwrites_in_place_and_appends_new() {
        let mut fields: FieldMapping = [
            (name("x"), TypeRef::new("Int")),
            (name("y"), TypeRef::new("Int")),
        ]
        .into_iter()
        .collect();
        let overrides: FieldMapping = [
            (name("y"), TypeRef::new("String")),
            (name("z"), TypeRef::new("Long")),
        ]
        .into_iter()
        .collect();

        fields.merge(overrides);

        let order: Vec<_> = fields.iter().map(|(n, t)| format!("{n}:{t}")).collect();
        assert_eq!(order, vec!["x:Int", "y:String", "z:Long"]);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let fields: FieldMapping = [
            (name("zeta"), TypeRef::new("Int")),
            (name("alpha"), TypeRef::generic("List", vec![TypeRef::new("String")])),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"zeta":"Int","alpha":"List<String>"}"#);
    }
}
