//! Explicit `name:type` field lists that bypass inference.

use crate::fields::FieldMapping;
use crate::model::Annotation;
use crate::type_ref::TypeResolver;
use crate::types::{FieldName, ValidationError};

/// Annotation element holding the explicit field list.
pub const VALUE_ELEMENT: &str = "value";

/// Parses `name:type` entries into a field mapping.
///
/// Later entries with a name already seen overwrite the earlier type without
/// complaint. Any entry that is not exactly one name and one type separated
/// by a single `:` fails the whole list.
pub fn parse_explicit_fields<'a, I>(
    entries: I,
    resolver: &dyn TypeResolver,
) -> Result<FieldMapping, ValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fields = FieldMapping::new();
    for entry in entries {
        let Some((name, type_name)) = entry.split_once(':') else {
            return Err(malformed(entry));
        };
        if type_name.contains(':') {
            return Err(malformed(entry));
        }

        let name = FieldName::new(name.trim())?;
        let ty = resolver
            .resolve(type_name)
            .map_err(|source| ValidationError::UnresolvedType {
                entry: entry.to_string(),
                source,
            })?;
        fields.insert(name, ty);
    }
    Ok(fields)
}

/// Parses the explicit field list carried by an override annotation.
pub fn parse_override(
    annotation: &Annotation,
    resolver: &dyn TypeResolver,
) -> Result<FieldMapping, ValidationError> {
    let value = annotation.element(VALUE_ELEMENT).ok_or_else(|| {
        ValidationError::MissingOverrideValue {
            annotation: annotation.type_name.clone(),
        }
    })?;
    let entries = value
        .as_list()
        .ok_or_else(|| ValidationError::NonStringOverrideValue {
            annotation: annotation.type_name.clone(),
        })?;
    parse_explicit_fields(entries, resolver)
}

fn malformed(entry: &str) -> ValidationError {
    ValidationError::MalformedExplicitField {
        entry: entry.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnnotationValue;
    use crate::type_ref::{ParsingResolver, TypeRef};

    fn render(fields: &FieldMapping) -> Vec<String> {
        fields.iter().map(|(n, t)| format!("{n}:{t}")).collect()
    }

    #[test]
    fn test_duplicate_names_take_last_type() {
        let fields =
            parse_explicit_fields(["a:Int", "b:String", "a:Long"], &ParsingResolver).unwrap();
        assert_eq!(render(&fields), vec!["a:Long", "b:String"]);
    }

    #[test]
    fn test_resolves_generic_types() {
        let fields =
            parse_explicit_fields(["items: java.util.List<Item>"], &ParsingResolver).unwrap();
        assert_eq!(
            fields.get("items"),
            Some(&TypeRef::generic("java.util.List", vec![TypeRef::new("Item")]))
        );
    }

    #[test]
    fn test_entry_without_colon_is_rejected() {
        let err = parse_explicit_fields(["fooInt"], &ParsingResolver).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedExplicitField {
                entry: "fooInt".to_string()
            }
        );
    }

    #[test]
    fn test_entry_with_two_colons_is_rejected() {
        let err = parse_explicit_fields(["ok:Int", "foo:Int:Long"], &ParsingResolver).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedExplicitField { .. }));
    }

    #[test]
    fn test_empty_name_or_type_is_rejected() {
        assert!(matches!(
            parse_explicit_fields([":Int"], &ParsingResolver),
            Err(ValidationError::Empty { .. })
        ));
        assert!(matches!(
            parse_explicit_fields(["foo:"], &ParsingResolver),
            Err(ValidationError::UnresolvedType { .. })
        ));
    }

    #[test]
    fn test_empty_list_yields_empty_mapping() {
        let entries: [&str; 0] = [];
        assert!(parse_explicit_fields(entries, &ParsingResolver).unwrap().is_empty());
    }

    #[test]
    fn test_override_annotation_reads_value_element() {
        let annotation = Annotation::new("org.example.Fields").with_element(
            VALUE_ELEMENT,
            AnnotationValue::List(vec!["foo:Long".to_string()]),
        );
        let fields = parse_override(&annotation, &ParsingResolver).unwrap();
        assert_eq!(render(&fields), vec!["foo:Long"]);
    }

    #[test]
    fn test_override_annotation_without_value_is_rejected() {
        let annotation = Annotation::new("org.example.Fields");
        let err = parse_override(&annotation, &ParsingResolver).unwrap_err();
        assert_eq!(err.to_string(), "override annotation org.example.Fields has no `value` element");
    }

    #[test]
    fn test_override_annotation_with_non_string_value_is_rejected() {
        let annotation = Annotation::new("org.example.Fields")
            .with_element(VALUE_ELEMENT, AnnotationValue::Other(serde_json::json!([1, 2])));
        let err = parse_override(&annotation, &ParsingResolver).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonStringOverrideValue {
                annotation: "org.example.Fields".to_string()
            }
        );
    }
}
