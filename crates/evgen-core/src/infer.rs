//! Field inference for a single event interface.
//!
//! Fields come from three places, in decreasing authority:
//! 1. An override annotation on the interface itself replaces inference entirely
//! 2. An override annotation on a method merges its fields, overwriting silently
//! 3. Getter and setter shapes, where the first type seen for a name wins and
//!    later disagreements are reported as conflicts

use crate::classify::{ClassifiedField, classify};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::explicit::parse_override;
use crate::fields::{FieldMapping, InferredInsert};
use crate::model::{Annotation, Interface, Method};
use crate::type_ref::TypeResolver;
use crate::types::ValidationError;

/// What inference decided at one step of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'v> {
    /// The interface's own explicit list, which is the whole mapping.
    Explicit {
        annotation: &'v Annotation,
        fields: &'v FieldMapping,
    },
    /// A method left unexamined because the interface is explicit.
    Skipped { method: &'v Method },
    /// A method whose explicit list was merged in.
    Override {
        method: &'v Method,
        fields: &'v FieldMapping,
    },
    /// A method whose accessor shape implied a field.
    Inferred {
        method: &'v Method,
        field: &'v ClassifiedField,
        outcome: &'v InferredInsert<'v>,
    },
    /// A method that implied no field.
    Unknown { method: &'v Method },
}

/// Infers field mappings for event interfaces.
///
/// Holds only shared references, so one engine can serve many threads.
#[derive(Clone, Copy)]
pub struct FieldInference<'a> {
    override_annotation: Option<&'a str>,
    resolver: &'a dyn TypeResolver,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> FieldInference<'a> {
    /// Creates an engine.
    ///
    /// An empty or absent `override_annotation` disables explicit field lists
    /// everywhere; every field is then inferred.
    pub fn new(
        override_annotation: Option<&'a str>,
        resolver: &'a dyn TypeResolver,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            override_annotation: override_annotation.filter(|name| !name.is_empty()),
            resolver,
            sink,
        }
    }

    /// Returns the override annotation among `annotations`, if scanning is enabled.
    pub fn override_on<'b>(&self, annotations: &'b [Annotation]) -> Option<&'b Annotation> {
        let wanted = self.override_annotation?;
        annotations.iter().find(|a| a.type_name == wanted)
    }

    /// Infers the field mapping of `interface`.
    ///
    /// Unknown methods and type conflicts go to the diagnostic sink; only a
    /// malformed explicit field list is an error.
    pub fn infer(&self, interface: &Interface) -> Result<FieldMapping, ValidationError> {
        self.infer_with(interface, |_| {})
    }

    /// Like [`infer`](Self::infer), reporting every decision to `observe` as it is made.
    ///
    /// An explicit interface yields one [`Verdict::Explicit`] followed by a
    /// [`Verdict::Skipped`] per method. Otherwise each method yields exactly one
    /// verdict, in declaration order, before the next method is looked at.
    pub fn infer_with<F>(
        &self,
        interface: &Interface,
        mut observe: F,
    ) -> Result<FieldMapping, ValidationError>
    where
        F: FnMut(Verdict<'_>),
    {
        if let Some(annotation) = self.override_on(&interface.annotations) {
            tracing::debug!(
                interface = %interface.qualified_name,
                "using interface-level explicit fields"
            );
            let fields = parse_override(annotation, self.resolver)?;
            observe(Verdict::Explicit {
                annotation,
                fields: &fields,
            });
            for method in &interface.methods {
                observe(Verdict::Skipped { method });
            }
            return Ok(fields);
        }

        let mut fields = FieldMapping::new();
        for method in &interface.methods {
            if let Some(annotation) = self.override_on(&method.annotations) {
                let explicit = parse_override(annotation, self.resolver)?;
                observe(Verdict::Override {
                    method,
                    fields: &explicit,
                });
                fields.merge(explicit);
                continue;
            }

            let Some(field) = classify(method) else {
                self.sink.warn(Diagnostic::UnknownMethod {
                    interface: interface.qualified_name.clone(),
                    signature: method.signature(),
                });
                observe(Verdict::Unknown { method });
                continue;
            };

            let outcome = fields.insert_inferred(field.name.clone(), field.ty.clone());
            if let InferredInsert::Conflict { existing } = outcome {
                self.sink.warn(Diagnostic::ConflictingTypes {
                    interface: interface.qualified_name.clone(),
                    field: field.name.clone(),
                    existing: existing.clone(),
                    conflicting: field.ty.clone(),
                });
            }
            observe(Verdict::Inferred {
                method,
                field: &field,
                outcome: &outcome,
            });
        }

        Ok(fields)
    }
}
