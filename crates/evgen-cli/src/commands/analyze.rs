//! Analyze command: infer every included interface and print the catalog.

use std::io::Write;

use anyhow::{Context, Result, bail};
use evgen_core::{Analyzer, CollectingSink, EventCatalog, Tee, TracingSink};

use super::util::load_model;
use crate::cli::AnalyzeArgs;
use crate::policy::RegexPolicy;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, args: &AnalyzeArgs, config: &Config) -> Result<()> {
    let config = effective_config(args, config);
    tracing::debug!(?config, "effective analysis configuration");

    let policy = RegexPolicy::new(&config.include, &config.exclude)?;
    let model = load_model(&args.model)?;

    let collector = CollectingSink::new();
    let sink = Tee(TracingSink, &collector);
    let analyzer = Analyzer::new(config.analysis_config(), &policy, &sink);
    let catalog = analyzer.run(&model).context("analysis failed")?;

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &catalog)?;
        writeln!(writer)?;
    } else {
        write_text(writer, &catalog, collector.len())?;
    }

    if args.deny_warnings && !collector.is_empty() {
        bail!(
            "{} warning(s) raised while --deny-warnings is set",
            collector.len()
        );
    }
    Ok(())
}

/// Layers command-line flags over the loaded configuration.
fn effective_config(args: &AnalyzeArgs, config: &Config) -> Config {
    let mut config = config.clone();
    if let Some(name) = &args.overrides.override_annotation {
        config.override_annotation.clone_from(name);
    }
    config.include.extend(args.include.iter().cloned());
    config.exclude.extend(args.exclude.iter().cloned());
    config.parallel |= args.parallel;
    config
}

fn write_text<W: Write>(writer: &mut W, catalog: &EventCatalog, warnings: usize) -> Result<()> {
    for event in catalog {
        writeln!(writer, "{}", event.name)?;
        if event.fields.is_empty() {
            writeln!(writer, "  (no fields)")?;
        }
        for (name, ty) in &event.fields {
            writeln!(writer, "  {name}: {ty}")?;
        }
    }
    writeln!(writer)?;
    writeln!(writer, "{} events, {warnings} warnings", catalog.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use insta::assert_snapshot;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn config() -> Config {
        Config {
            override_annotation: "org.example.ImplementedFields".to_string(),
            ..Config::default()
        }
    }

    fn run_to_string(args: &AnalyzeArgs, config: &Config) -> Result<String> {
        let mut output = Vec::new();
        run(&mut output, args, config)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_analyze_prints_sorted_catalog() {
        let args = AnalyzeArgs {
            model: fixture("events.json"),
            ..AnalyzeArgs::default()
        };

        let output = run_to_string(&args, &config()).unwrap();
        assert_snapshot!(output);
    }

    #[test]
    fn test_analyze_excludes_matching_sources() {
        let args = AnalyzeArgs {
            model: fixture("events.json"),
            exclude: vec!["/internal/".to_string()],
            ..AnalyzeArgs::default()
        };

        let output = run_to_string(&args, &config()).unwrap();
        assert!(!output.contains("TickEvent"));
        assert!(output.ends_with("4 events, 2 warnings\n"));
    }

    #[test]
    fn test_analyze_without_override_annotation_infers_everything() {
        let args = AnalyzeArgs {
            model: fixture("events.json"),
            ..AnalyzeArgs::default()
        };

        let output = run_to_string(&args, &Config::default()).unwrap();
        assert!(output.contains("org.example.event.ExplicitEvent\n  target: java.lang.Object\n"));
        assert!(output.contains("org.example.event.MixedEvent\n  bar: int\n"));
    }

    #[test]
    fn test_analyze_flag_overrides_configured_annotation() {
        let args = AnalyzeArgs {
            model: fixture("events.json"),
            overrides: crate::cli::OverrideArgs {
                override_annotation: Some(String::new()),
            },
            ..AnalyzeArgs::default()
        };

        let output = run_to_string(&args, &config()).unwrap();
        assert!(output.contains("  target: java.lang.Object\n"));
    }

    #[test]
    fn test_analyze_json_preserves_field_order() {
        let args = AnalyzeArgs {
            model: fixture("events.json"),
            json: true,
            parallel: true,
            ..AnalyzeArgs::default()
        };

        let output = run_to_string(&args, &config()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let events = value.as_array().unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events[3]["name"], "org.example.event.PlayerChatEvent");
        let fields: Vec<_> = events[3]["fields"]
            .as_object()
            .unwrap()
            .iter()
            .map(|(name, ty)| format!("{name}: {}", ty.as_str().unwrap()))
            .collect();
        assert_eq!(
            fields,
            vec![
                "player: org.example.Player",
                "message: org.example.Text",
                "isCancelled: boolean"
            ]
        );
    }

    #[test]
    fn test_analyze_deny_warnings_fails_after_printing() {
        let args = AnalyzeArgs {
            model: fixture("events.json"),
            deny_warnings: true,
            ..AnalyzeArgs::default()
        };
        let mut output = Vec::new();

        let err = run(&mut output, &args, &config()).unwrap_err();

        assert!(err.to_string().contains("2 warning(s)"));
        assert!(!output.is_empty());
    }

    #[test]
    fn test_analyze_rejects_malformed_explicit_fields() {
        let args = AnalyzeArgs {
            model: fixture("malformed.json"),
            ..AnalyzeArgs::default()
        };

        let err = run_to_string(&args, &config()).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("invalid explicit fields on org.example.event.BrokenEvent"));
        assert!(chain.contains("malformed explicit field entry `fooInt`"));
    }

    #[test]
    fn test_analyze_rejects_invalid_include_before_reading_model() {
        let args = AnalyzeArgs {
            model: fixture("does-not-exist.json"),
            include: vec!["[".to_string()],
            ..AnalyzeArgs::default()
        };

        let err = run_to_string(&args, &config()).unwrap_err();
        assert!(err.to_string().contains("invalid include pattern"));
    }
}
