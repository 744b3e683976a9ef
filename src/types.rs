use crate::error::{CodemodError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Locale tag carried as an identifier suffix (`name_th`, `title_zh`)
///
/// The set is closed: a suffix that is not listed here is never treated as a
/// removal candidate, even if it looks like a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuffixTag {
    /// Lao
    Lo,
    /// Thai
    Th,
    /// Chinese
    Zh,
    /// English
    En,
    /// Japanese
    Ja,
    /// Korean
    Ko,
    /// Vietnamese
    Vi,
}

impl SuffixTag {
    pub const ALL: [SuffixTag; 7] = [
        SuffixTag::Lo,
        SuffixTag::Th,
        SuffixTag::Zh,
        SuffixTag::En,
        SuffixTag::Ja,
        SuffixTag::Ko,
        SuffixTag::Vi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SuffixTag::Lo => "lo",
            SuffixTag::Th => "th",
            SuffixTag::Zh => "zh",
            SuffixTag::En => "en",
            SuffixTag::Ja => "ja",
            SuffixTag::Ko => "ko",
            SuffixTag::Vi => "vi",
        }
    }

    /// Regex alternation over `tags`, e.g. `th|zh`
    pub fn alternation(tags: &[SuffixTag]) -> String {
        tags.iter().map(|t| t.as_str()).collect::<Vec<_>>().join("|")
    }
}

impl fmt::Display for SuffixTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuffixTag {
    type Err = CodemodError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().trim_start_matches('_').to_ascii_lowercase();
        SuffixTag::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| CodemodError::UnknownSuffix(s.to_string()))
    }
}

/// Textual context a matcher recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextKind {
    /// Typed field declaration (`name_th: string;`)
    Declaration,
    /// Object entry, shorthand entry or assignment (`name_th: '',`)
    InitializerAssignment,
    /// Entry inside a `const { ... } =` binding group
    DestructureBinding,
    /// Form markup keyed by a `name=`/`id=` attribute
    MarkupAttribute,
    /// Row of a configuration table or tag list
    TabularEntry,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextKind::Declaration => "declaration",
            ContextKind::InitializerAssignment => "initializer-assignment",
            ContextKind::DestructureBinding => "destructure-binding",
            ContextKind::MarkupAttribute => "markup-attribute",
            ContextKind::TabularEntry => "tabular-entry",
        };
        f.write_str(name)
    }
}

/// Which identifiers are removal candidates: `<stem>_<tag>`
///
/// An empty stem list accepts any identifier stem.
#[derive(Debug, Clone)]
pub struct TargetPattern {
    stems: Vec<String>,
    suffixes: Vec<SuffixTag>,
    source: String,
    occurrence: Regex,
    exact: Regex,
}

impl TargetPattern {
    pub fn new(stems: Vec<String>, suffixes: Vec<SuffixTag>) -> Result<Self> {
        if suffixes.is_empty() {
            return Err(CodemodError::InvalidPatternSet {
                name: "<target>".to_string(),
                reason: "at least one suffix tag is required".to_string(),
            });
        }

        let mut suffixes = suffixes;
        suffixes.sort();
        suffixes.dedup();

        let stem = if stems.is_empty() {
            "[A-Za-z_][A-Za-z0-9_]*".to_string()
        } else {
            let escaped: Vec<String> = stems.iter().map(|s| regex::escape(s)).collect();
            format!("(?:{})", escaped.join("|"))
        };
        let source = format!("{}_(?:{})", stem, SuffixTag::alternation(&suffixes));

        let occurrence = Regex::new(&format!(r"\b{}\b", source))?;
        let exact = Regex::new(&format!("^{}$", source))?;

        Ok(Self {
            stems,
            suffixes,
            source,
            occurrence,
            exact,
        })
    }

    pub fn stems(&self) -> &[String] {
        &self.stems
    }

    pub fn suffixes(&self) -> &[SuffixTag] {
        &self.suffixes
    }

    /// Regex source matching one target identifier, without boundaries
    pub fn identifier_source(&self) -> &str {
        &self.source
    }

    /// Regex alternation over this pattern's tags
    pub fn tag_alternation(&self) -> String {
        SuffixTag::alternation(&self.suffixes)
    }

    pub fn is_target(&self, name: &str) -> bool {
        self.exact.is_match(name)
    }

    pub fn is_target_tag(&self, tag: &str) -> bool {
        self.suffixes.iter().any(|t| t.as_str() == tag)
    }

    /// Number of target identifiers appearing anywhere in `content`
    pub fn count_occurrences(&self, content: &str) -> usize {
        self.occurrence.find_iter(content).count()
    }
}

/// Per-file state owned by one worker for the duration of a driver run
#[derive(Debug, Clone)]
pub struct FileUnit {
    pub path: PathBuf,
    pub original: String,
    pub current: String,
    pub sweeps: usize,
    pub changed: bool,
}

impl FileUnit {
    pub fn new(path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            path: path.into(),
            current: content.clone(),
            original: content,
            sweeps: 0,
            changed: false,
        }
    }

    /// Replace the working content, keeping `changed` in sync with `original`
    pub fn set_current(&mut self, content: String) {
        self.changed = content != self.original;
        self.current = content;
    }
}
