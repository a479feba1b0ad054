//! Regex-based inclusion policy over interface source files.

use anyhow::{Context, Result};
use evgen_core::{InclusionPolicy, Interface};
use regex::RegexSet;

/// Includes interfaces whose source file matches an include pattern and no
/// exclude pattern.
///
/// Interfaces without a known source file are matched by qualified name.
#[derive(Debug, Clone)]
pub struct RegexPolicy {
    include: RegexSet,
    exclude: RegexSet,
}

impl RegexPolicy {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: RegexSet::new(include).context("invalid include pattern")?,
            exclude: RegexSet::new(exclude).context("invalid exclude pattern")?,
        })
    }
}

impl InclusionPolicy for RegexPolicy {
    fn includes(&self, interface: &Interface) -> bool {
        let subject = interface.source_file.as_ref().map_or_else(
            || interface.qualified_name.to_string(),
            |path| path.to_string_lossy().into_owned(),
        );
        let included = self.include.is_empty() || self.include.is_match(&subject);
        included && !self.exclude.is_match(&subject)
    }
}
