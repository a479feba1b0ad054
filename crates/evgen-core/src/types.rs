//! Core type definitions with validation.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::type_ref::TypeParseError;

/// Validation errors for core types and explicit field lists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// An explicit field entry did not split into exactly a name and a type.
    #[error("malformed explicit field entry `{entry}`: expected a name and type separated by ':'")]
    MalformedExplicitField { entry: String },

    /// An override annotation carried no `value` element.
    #[error("override annotation {annotation} has no `value` element")]
    MissingOverrideValue { annotation: String },

    /// An override annotation's `value` element was not a string or string list.
    #[error("override annotation {annotation} has a non-string `value` element")]
    NonStringOverrideValue { annotation: String },

    /// The type half of an explicit field entry could not be resolved.
    #[error("cannot resolve type in explicit field entry `{entry}`")]
    UnresolvedType {
        entry: String,
        #[source]
        source: TypeParseError,
    },
}

/// Generates a validated string identifier newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated field name.
    ///
    /// Field names are non-empty and unique within one [`FieldMapping`](crate::FieldMapping).
    FieldName, "field name"
);

define_string_id!(
    /// The fully-qualified name of an event interface.
    ///
    /// Ordering is plain lexicographic, which is the order events appear in a catalog.
    InterfaceName, "interface name"
);
