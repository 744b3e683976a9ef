//! Per-file outcomes and the aggregate run report.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Updated,
    Unchanged,
    Missing,
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Updated => "updated",
            Outcome::Unchanged => "unchanged",
            Outcome::Missing => "missing",
            Outcome::Error => "error",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The sweep ceiling was reached before the file reached a fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConvergenceWarning {
    pub sweeps: usize,
    /// Whether the partially cleaned content was kept
    pub kept: bool,
}

impl fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.kept {
            "partial cleanup kept"
        } else {
            "original kept"
        };
        write!(
            f,
            "needs review: no fixed point after {} sweeps, {}",
            self.sweeps, action
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ConvergenceWarning>,
    pub sweeps: usize,
    pub occurrences_before: usize,
    pub occurrences_after: usize,
}

impl FileReport {
    pub fn missing(path: PathBuf) -> Self {
        Self::bare(path, Outcome::Missing)
    }

    pub fn error(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::bare(path, Outcome::Error)
        }
    }

    fn bare(path: PathBuf, outcome: Outcome) -> Self {
        Self {
            path,
            outcome,
            error: None,
            warning: None,
            sweeps: 0,
            occurrences_before: 0,
            occurrences_after: 0,
        }
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path.display(), self.outcome)?;
        if let Some(error) = &self.error {
            write!(f, ": {}", error)?;
        }
        if let Some(warning) = &self.warning {
            write!(f, " ({})", warning)?;
        }
        match self.occurrences_after {
            0 => {}
            1 => write!(f, " (1 target reference left)")?,
            n => write!(f, " ({} target references left)", n)?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub missing: usize,
    pub errors: usize,
    pub flagged: usize,
    /// Target identifiers still present across all files, e.g. plain reads
    pub remaining: usize,
}

/// Ordered per-file outcomes plus aggregate counts
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pattern_set: String,
    dry_run: bool,
    files: Vec<FileReport>,
    summary: Summary,
}

impl RunReport {
    pub fn new(pattern_set: impl Into<String>, dry_run: bool) -> Self {
        Self {
            pattern_set: pattern_set.into(),
            dry_run,
            files: Vec::new(),
            summary: Summary::default(),
        }
    }

    pub fn push(&mut self, entry: FileReport) {
        let summary = &mut self.summary;
        summary.total += 1;
        match entry.outcome {
            Outcome::Updated => summary.updated += 1,
            Outcome::Unchanged => summary.unchanged += 1,
            Outcome::Missing => summary.missing += 1,
            Outcome::Error => summary.errors += 1,
        }
        if entry.warning.is_some() {
            summary.flagged += 1;
        }
        summary.remaining += entry.occurrences_after;
        self.files.push(entry);
    }

    pub fn pattern_set(&self) -> &str {
        &self.pattern_set
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// `"<updated>/<total> files updated"`
    pub fn summary_line(&self) -> String {
        format!("{}/{} files updated", self.summary.updated, self.summary.total)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.files {
            writeln!(f, "{}", entry)?;
        }
        write!(f, "{}", self.summary_line())?;
        if self.summary.remaining > 0 {
            write!(
                f,
                "\n{} target references left for manual review",
                self.summary.remaining
            )?;
        }
        Ok(())
    }
}
