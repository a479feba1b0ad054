//! Explain command: show how each method of one interface was classified.
//!
//! Prints the verdicts inference reports while it runs, so surprising fields
//! (or missing ones) can be traced to their source.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use evgen_core::{
    FieldInference, FieldMapping, InferredInsert, Interface, ParsingResolver, TracingSink, Verdict,
};

use super::util::load_model;
use crate::Config;
use crate::cli::OverrideArgs;

pub fn run<W: Write>(
    writer: &mut W,
    model_path: &Path,
    interface_name: &str,
    overrides: &OverrideArgs,
    config: &Config,
) -> Result<()> {
    let override_annotation = overrides
        .override_annotation
        .as_deref()
        .unwrap_or(&config.override_annotation);
    let model = load_model(model_path)?;
    let interface = model
        .interfaces
        .iter()
        .find(|interface| interface.qualified_name.as_str() == interface_name)
        .with_context(|| format!("interface not found: {interface_name}"))?;

    let engine = FieldInference::new(Some(override_annotation), &ParsingResolver, &TracingSink);
    let (lines, _) = explain_interface(&engine, interface)?;

    writeln!(writer, "{}", interface.qualified_name)?;
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Runs inference on `interface`, rendering one line per verdict.
fn explain_interface(
    engine: &FieldInference<'_>,
    interface: &Interface,
) -> Result<(Vec<String>, FieldMapping)> {
    let mut lines = Vec::new();
    let fields = engine
        .infer_with(interface, |verdict| lines.push(describe(verdict)))
        .with_context(|| format!("invalid explicit fields on {}", interface.qualified_name))?;
    Ok((lines, fields))
}

fn describe(verdict: Verdict<'_>) -> String {
    match verdict {
        Verdict::Explicit { annotation, fields } => format!(
            "  {:<8} {} -> {}",
            "explicit",
            annotation.type_name,
            render_fields(fields)
        ),
        Verdict::Skipped { method } => format!("  {:<8} {}", "skipped", method.signature()),
        Verdict::Override { method, fields } => format!(
            "  {:<8} {} -> {}",
            "override",
            method.signature(),
            render_fields(fields)
        ),
        Verdict::Inferred {
            method,
            field,
            outcome,
        } => {
            let note = match outcome {
                InferredInsert::Conflict { existing } => {
                    format!(" (conflicts with {existing}, ignored)")
                }
                InferredInsert::Added | InferredInsert::Confirmed => String::new(),
            };
            format!(
                "  {:<8} {} -> {}: {}{note}",
                field.kind.as_str(),
                method.signature(),
                field.name,
                field.ty
            )
        }
        Verdict::Unknown { method } => format!("  {:<8} {}", "unknown", method.signature()),
    }
}

fn render_fields(fields: &FieldMapping) -> String {
    if fields.is_empty() {
        return "(none)".to_string();
    }
    fields
        .iter()
        .map(|(name, ty)| format!("{name}: {ty}"))
        .collect::<Vec<_>>()
        .join(", ")
}
