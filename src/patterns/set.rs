use super::{matchers_for, Matcher};
use crate::cleanup::CleanupOptions;
use crate::driver::{DriverOptions, DEFAULT_MAX_SWEEPS};
use crate::error::{CodemodError, Result};
use crate::types::{SuffixTag, TargetPattern};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Built-in pattern sets: (identifier, suffix tags, description)
const BUILTIN_SETS: &[(&str, &[SuffixTag], &str)] = &[
    (
        "th-zh",
        &[SuffixTag::Th, SuffixTag::Zh],
        "Thai and Chinese fields",
    ),
    ("th", &[SuffixTag::Th], "Thai fields"),
    ("zh", &[SuffixTag::Zh], "Chinese fields"),
];

/// On-disk pattern set definition
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternSetFile {
    name: Option<String>,
    suffixes: Vec<SuffixTag>,
    #[serde(default)]
    stems: Vec<String>,
    #[serde(default = "default_max_sweeps")]
    max_sweeps: usize,
    #[serde(default)]
    drop_empty_containers: bool,
}

fn default_max_sweeps() -> usize {
    DEFAULT_MAX_SWEEPS
}

/// A named target pattern with its matchers and driver settings
///
/// Built once per run and shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct PatternSet {
    name: String,
    target: TargetPattern,
    matchers: Vec<Matcher>,
    options: DriverOptions,
}

impl PatternSet {
    pub fn new(name: impl Into<String>, target: TargetPattern, options: DriverOptions) -> Result<Self> {
        let name = name.into();
        if options.max_sweeps == 0 {
            return Err(CodemodError::InvalidPatternSet {
                name,
                reason: "max_sweeps must be at least 1".to_string(),
            });
        }

        let matchers = matchers_for(&target)?;
        Ok(Self {
            name,
            target,
            matchers,
            options,
        })
    }

    /// Resolve a pattern set identifier: a built-in name, else a TOML file path
    pub fn resolve(id: &str) -> Result<Self> {
        if let Some(set) = Self::builtin(id) {
            return set;
        }

        let path = Path::new(id);
        if !path.is_file() {
            return Err(CodemodError::PatternSetNotFound(id.to_string()));
        }
        Self::load(path)
    }

    /// Look up a built-in set by name
    pub fn builtin(id: &str) -> Option<Result<Self>> {
        BUILTIN_SETS
            .iter()
            .find(|(name, _, _)| *name == id)
            .map(|(name, tags, _)| {
                let target = TargetPattern::new(Vec::new(), tags.to_vec())?;
                Self::new(*name, target, DriverOptions::default())
            })
    }

    /// Names and descriptions of the built-in sets
    pub fn builtin_names() -> impl Iterator<Item = (&'static str, &'static str)> {
        BUILTIN_SETS.iter().map(|(name, _, about)| (*name, *about))
    }

    /// Load a pattern set from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| match CodemodError::from_io(path, e) {
            CodemodError::NotFound(_) => CodemodError::PatternSetNotFound(path.display().to_string()),
            other => other,
        })?;

        let fallback_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom");
        Self::from_toml_str(fallback_name, &text)
    }

    /// Parse a pattern set definition; `fallback_name` is used when it has no `name`
    pub fn from_toml_str(fallback_name: &str, text: &str) -> Result<Self> {
        let file: PatternSetFile =
            toml::from_str(text).map_err(|e| CodemodError::InvalidPatternSet {
                name: fallback_name.to_string(),
                reason: e.message().to_string(),
            })?;

        let name = file.name.unwrap_or_else(|| fallback_name.to_string());
        let target = TargetPattern::new(file.stems, file.suffixes).map_err(|e| match e {
            CodemodError::InvalidPatternSet { reason, .. } => CodemodError::InvalidPatternSet {
                name: name.clone(),
                reason,
            },
            other => other,
        })?;
        let options = DriverOptions {
            max_sweeps: file.max_sweeps,
            cleanup: CleanupOptions {
                drop_empty_containers: file.drop_empty_containers,
            },
        };

        Self::new(name, target, options)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &TargetPattern {
        &self.target
    }

    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    pub fn options(&self) -> DriverOptions {
        self.options
    }

    #[cfg(test)]
    pub(crate) fn replace_matchers(&mut self, matchers: Vec<Matcher>) {
        self.matchers = matchers;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_builtin() {
        let set = PatternSet::resolve("th-zh").unwrap();

        assert_eq!(set.name(), "th-zh");
        assert_eq!(set.target().suffixes(), &[SuffixTag::Th, SuffixTag::Zh]);
        assert_eq!(set.options().max_sweeps, DEFAULT_MAX_SWEEPS);
        assert!(!set.matchers().is_empty());
    }

    #[test]
    fn test_resolve_unknown_is_not_found() {
        let err = PatternSet::resolve("no-such-set").unwrap_err();

        assert!(matches!(err, CodemodError::PatternSetNotFound(id) if id == "no-such-set"));
    }

    #[test]
    fn test_from_toml_with_defaults() {
        let set = PatternSet::from_toml_str("fallback", "suffixes = [\"zh\"]\n").unwrap();

        assert_eq!(set.name(), "fallback");
        assert_eq!(set.target().suffixes(), &[SuffixTag::Zh]);
        assert!(!set.options().cleanup.drop_empty_containers);
    }

    #[test]
    fn test_from_toml_full() {
        let text = r#"
name = "legacy"
suffixes = ["th", "ja"]
stems = ["title", "body"]
max_sweeps = 3
drop_empty_containers = true
"#;
        let set = PatternSet::from_toml_str("fallback", text).unwrap();

        assert_eq!(set.name(), "legacy");
        assert_eq!(set.options().max_sweeps, 3);
        assert!(set.options().cleanup.drop_empty_containers);
        assert!(set.target().is_target("title_ja"));
        assert!(!set.target().is_target("name_th"));
    }

    #[test]
    fn test_from_toml_rejects_unknown_suffix() {
        let err = PatternSet::from_toml_str("bad", "suffixes = [\"xx\"]\n").unwrap_err();

        assert!(matches!(err, CodemodError::InvalidPatternSet { .. }));
    }

    #[test]
    fn test_from_toml_rejects_zero_sweeps() {
        let err = PatternSet::from_toml_str("bad", "suffixes = [\"th\"]\nmax_sweeps = 0\n").unwrap_err();

        assert!(matches!(err, CodemodError::InvalidPatternSet { .. }));
    }

    #[test]
    fn test_resolve_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "suffixes = [\"th\"]").unwrap();

        let set = PatternSet::resolve(file.path().to_str().unwrap()).unwrap();

        assert_eq!(set.target().suffixes(), &[SuffixTag::Th]);
    }
}
