//! Structural model of event interfaces, as supplied by a front end.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::type_ref::TypeRef;
use crate::types::InterfaceName;

/// The value of one annotation element.
///
/// Only strings and string lists are ever read; anything else a front end
/// reports (booleans, numbers, nested annotations) is carried along untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Single(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

impl AnnotationValue {
    /// Returns the value as a list of strings, treating a single string as a
    /// one-element list. `None` for any other kind of value.
    pub fn as_list(&self) -> Option<Vec<&str>> {
        match self {
            Self::Single(value) => Some(vec![value.as_str()]),
            Self::List(values) => Some(values.iter().map(String::as_str).collect()),
            Self::Other(_) => None,
        }
    }
}

/// An annotation attached to an interface or a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Fully-qualified name of the annotation type.
    pub type_name: String,
    /// Named element values.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub elements: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            elements: BTreeMap::new(),
        }
    }

    /// Adds an element value, returning the annotation for chaining.
    #[must_use]
    pub fn with_element(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.elements.insert(name.into(), value);
        self
    }

    pub fn element(&self, name: &str) -> Option<&AnnotationValue> {
        self.elements.get(name)
    }
}

/// One declared parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// A method declared on an event interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Simple name of the method.
    pub name: String,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Declared return type; `void` when absent.
    #[serde(default)]
    pub return_type: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Method {
    /// Creates a parameterless method returning `return_type`.
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type,
            annotations: Vec::new(),
        }
    }

    /// Appends a parameter, returning the method for chaining.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            ty,
        });
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Human-readable signature used in diagnostics, e.g. `setCause(Cause)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(|p| p.ty.to_string()).collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// An interface under analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub qualified_name: InterfaceName,
    /// Source file the interface was declared in, when the front end knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    /// Methods in declaration order.
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Interface {
    pub fn new(qualified_name: InterfaceName) -> Self {
        Self {
            qualified_name,
            source_file: None,
            annotations: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = Some(path.into());
        self
    }
}

/// Everything a front end hands over for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceModel {
    #[serde(default)]
    pub interfaces: Vec<Interface>,
}
