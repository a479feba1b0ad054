//! Warnings raised during inference and the sinks that receive them.

use std::fmt;

use parking_lot::Mutex;

use crate::type_ref::TypeRef;
use crate::types::{FieldName, InterfaceName};

/// A recoverable problem found while inferring an interface's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A method implies no field.
    UnknownMethod {
        interface: InterfaceName,
        signature: String,
    },
    /// Two methods imply different types for the same field; the first was kept.
    ConflictingTypes {
        interface: InterfaceName,
        field: FieldName,
        existing: TypeRef,
        conflicting: TypeRef,
    },
}

impl Diagnostic {
    pub const fn interface(&self) -> &InterfaceName {
        match self {
            Self::UnknownMethod { interface, .. } | Self::ConflictingTypes { interface, .. } => {
                interface
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMethod {
                interface,
                signature,
            } => write!(f, "Unknown method type {signature} in {interface}"),
            Self::ConflictingTypes {
                interface,
                field,
                existing,
                conflicting,
            } => write!(
                f,
                "Conflicting types {existing} and {conflicting} for field name {field} in {interface}"
            ),
        }
    }
}

/// Receives warnings. Implementations must tolerate concurrent callers.
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, diagnostic: Diagnostic);
}

/// Emits every diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnknownMethod {
                interface,
                signature,
            } => tracing::warn!(%interface, %signature, "{diagnostic}"),
            Diagnostic::ConflictingTypes {
                interface, field, ..
            } => tracing::warn!(%interface, %field, "{diagnostic}"),
        }
    }
}

/// Keeps every diagnostic in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }

    /// Returns a copy of everything collected so far.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().push(diagnostic);
    }
}

/// Forwards to two sinks, e.g. logging while also collecting.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for Tee<A, B> {
    fn warn(&self, diagnostic: Diagnostic) {
        self.0.warn(diagnostic.clone());
        self.1.warn(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn warn(&self, diagnostic: Diagnostic) {
        (**self).warn(diagnostic);
    }
}
