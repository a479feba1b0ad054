//! Field-model inference for event interfaces.
//!
//! This crate contains the fundamental types and logic for:
//! - Classification: recognising getters and setters and the fields they imply
//! - Explicit fields: `name:type` lists that bypass inference
//! - Inference: merging both into one ordered field mapping per interface
//! - Registry: collecting every interface of a run into a sorted catalog

pub mod analysis;
pub mod classify;
pub mod diagnostics;
pub mod explicit;
mod fields;
mod infer;
pub mod model;
mod registry;
mod type_ref;
mod types;

pub use analysis::{AnalysisConfig, AnalysisError, Analyzer, IncludeAll, InclusionPolicy, RunStats};
pub use classify::{ClassifiedField, MethodKind, classify};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Tee, TracingSink};
pub use explicit::{parse_explicit_fields, parse_override};
pub use fields::{FieldMapping, InferredInsert};
pub use infer::{FieldInference, Verdict};
pub use model::{Annotation, AnnotationValue, Interface, Method, Parameter, SourceModel};
pub use registry::{EventCatalog, EventDescriptor, EventRegistry, SharedRegistry};
pub use type_ref::{ParsingResolver, TypeParseError, TypeRef, TypeResolver};
pub use types::{FieldName, InterfaceName, ValidationError};
