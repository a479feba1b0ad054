//! Analysis runs: filter interfaces, infer their fields, record the results.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use thiserror::Error;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::infer::FieldInference;
use crate::model::{Interface, SourceModel};
use crate::registry::{EventCatalog, EventRegistry, SharedRegistry};
use crate::type_ref::{ParsingResolver, TypeResolver};
use crate::types::{InterfaceName, ValidationError};

/// Errors that abort an analysis run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// An explicit field list on the interface could not be parsed.
    #[error("invalid explicit fields on {interface}")]
    ExplicitFields {
        interface: InterfaceName,
        #[source]
        source: ValidationError,
    },
}

/// Settings for an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Qualified name of the annotation carrying explicit field lists.
    pub override_annotation: Option<String>,
    /// Infer interfaces on the rayon thread pool.
    pub parallel: bool,
}

impl AnalysisConfig {
    /// Sets the override annotation; an empty name disables overrides.
    #[must_use]
    pub fn with_override_annotation(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.override_annotation = (!name.is_empty()).then_some(name);
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Decides which interfaces are analysed at all.
pub trait InclusionPolicy: Send + Sync {
    fn includes(&self, interface: &Interface) -> bool;
}

/// Analyses every interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAll;

impl InclusionPolicy for IncludeAll {
    fn includes(&self, _interface: &Interface) -> bool {
        true
    }
}

impl<F> InclusionPolicy for F
where
    F: Fn(&Interface) -> bool + Send + Sync,
{
    fn includes(&self, interface: &Interface) -> bool {
        self(interface)
    }
}

/// Counts of what a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub seen: usize,
    pub analysed: usize,
    pub skipped: usize,
    pub warnings: usize,
}

/// Drives field inference over a source model.
pub struct Analyzer<'a> {
    config: AnalysisConfig,
    inclusion: &'a dyn InclusionPolicy,
    sink: &'a dyn DiagnosticSink,
    resolver: &'a dyn TypeResolver,
}

impl<'a> Analyzer<'a> {
    pub fn new(
        config: AnalysisConfig,
        inclusion: &'a dyn InclusionPolicy,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            config,
            inclusion,
            sink,
            resolver: &ParsingResolver,
        }
    }

    /// Replaces the resolver used for explicit field types.
    #[must_use]
    pub fn with_resolver(mut self, resolver: &'a dyn TypeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Runs a complete analysis and returns the finished catalog.
    pub fn run(&self, model: &SourceModel) -> Result<EventCatalog, AnalysisError> {
        let mut registry = EventRegistry::new();
        self.analyze_into(&model.interfaces, &mut registry)?;
        Ok(registry.into_catalog())
    }

    /// Analyses `interfaces` and records each result into `registry`.
    ///
    /// Interfaces already present in `registry` are replaced. The first
    /// invalid explicit field list stops the run.
    pub fn analyze_into(
        &self,
        interfaces: &[Interface],
        registry: &mut EventRegistry,
    ) -> Result<RunStats, AnalysisError> {
        let candidates: Vec<&Interface> = interfaces
            .iter()
            .filter(|interface| {
                let included = self.inclusion.includes(interface);
                if !included {
                    tracing::debug!(
                        interface = %interface.qualified_name,
                        "skipping excluded interface"
                    );
                }
                included
            })
            .collect();

        let counter = CountingSink {
            inner: self.sink,
            count: AtomicUsize::new(0),
        };
        let engine = FieldInference::new(
            self.config.override_annotation.as_deref(),
            self.resolver,
            &counter,
        );
        let infer = |interface: &Interface| {
            engine
                .infer(interface)
                .map_err(|source| AnalysisError::ExplicitFields {
                    interface: interface.qualified_name.clone(),
                    source,
                })
        };

        if self.config.parallel {
            let shared = SharedRegistry::from(std::mem::take(registry));
            let result = candidates.par_iter().copied().try_for_each(|interface| {
                let fields = infer(interface)?;
                shared.record(interface.qualified_name.clone(), fields);
                Ok::<_, AnalysisError>(())
            });
            *registry = shared.into_inner();
            result?;
        } else {
            for interface in candidates.iter().copied() {
                let fields = infer(interface)?;
                registry.record(interface.qualified_name.clone(), fields);
            }
        }

        let stats = RunStats {
            seen: interfaces.len(),
            analysed: candidates.len(),
            skipped: interfaces.len() - candidates.len(),
            warnings: counter.count.load(Ordering::Relaxed),
        };
        tracing::info!(
            seen = stats.seen,
            analysed = stats.analysed,
            skipped = stats.skipped,
            warnings = stats.warnings,
            "analysis complete"
        );
        Ok(stats)
    }
}

struct CountingSink<'a> {
    inner: &'a dyn DiagnosticSink,
    count: AtomicUsize,
}

impl DiagnosticSink for CountingSink<'_> {
    fn warn(&self, diagnostic: Diagnostic) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.inner.warn(diagnostic);
    }
}
