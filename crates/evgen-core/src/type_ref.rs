//! References to host types and the textual type resolver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing a textual type reference.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeParseError {
    /// A type (or one of its arguments) had no name.
    #[error("missing type name in `{input}`")]
    EmptyName { input: String },

    /// A `<` was never closed by a matching `>`.
    #[error("unbalanced type arguments in `{input}`")]
    Unbalanced { input: String },

    /// Input continued after a complete type.
    #[error("unexpected `{rest}` after type in `{input}`")]
    TrailingInput { input: String, rest: String },
}

/// A reference to a type in the host type system.
///
/// Equality is structural: two references are equal when their qualified
/// names and all type arguments are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    qualified_name: String,
    type_arguments: Vec<TypeRef>,
}

impl TypeRef {
    /// Creates a reference to a non-generic type.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            type_arguments: Vec::new(),
        }
    }

    /// Creates a reference to a parameterized type.
    pub fn generic(qualified_name: impl Into<String>, type_arguments: Vec<Self>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            type_arguments,
        }
    }

    /// The `void` pseudo-type.
    pub fn void() -> Self {
        Self::new("void")
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// The last `.`-separated segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }

    pub fn type_arguments(&self) -> &[Self] {
        &self.type_arguments
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        Self::void()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)?;
        if let Some((first, rest)) = self.type_arguments.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl FromStr for TypeRef {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = TypeParser { input: s, pos: 0 };
        let parsed = parser.parse_type()?;
        let rest = s[parser.pos..].trim();
        if !rest.is_empty() {
            return Err(TypeParseError::TrailingInput {
                input: s.to_string(),
                rest: rest.to_string(),
            });
        }
        Ok(parsed)
    }
}

impl Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Recursive-descent parser for `pkg.Name<Arg, Other<Nested>>`.
struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
}

impl TypeParser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn parse_type(&mut self) -> Result<TypeRef, TypeParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '<' | '>' | ',') {
                break;
            }
            self.pos += c.len_utf8();
        }
        let name = self.input[start..self.pos].trim();
        if name.is_empty() {
            return Err(TypeParseError::EmptyName {
                input: self.input.to_string(),
            });
        }

        let mut type_arguments = Vec::new();
        if self.peek() == Some('<') {
            self.pos += 1;
            loop {
                type_arguments.push(self.parse_type()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => {
                        return Err(TypeParseError::Unbalanced {
                            input: self.input.to_string(),
                        });
                    }
                }
            }
        }

        Ok(TypeRef::generic(name, type_arguments))
    }
}

/// Resolves textual type names into [`TypeRef`]s.
///
/// Used only when reading explicit field lists; inferred fields take their
/// types straight from the structural model.
pub trait TypeResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Result<TypeRef, TypeParseError>;
}

/// Resolver that parses the textual form without consulting a symbol table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParsingResolver;

impl TypeResolver for ParsingResolver {
    fn resolve(&self, name: &str) -> Result<TypeRef, TypeParseError> {
        name.parse()
    }
}
