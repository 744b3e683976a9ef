//! Runs the driver over a list of files and assembles the [`RunReport`].

use crate::driver::drive;
use crate::error::CodemodError;
use crate::patterns::PatternSet;
use crate::report::{ConvergenceWarning, FileReport, Outcome, RunReport};
use crate::store::FileStore;
use crate::types::FileUnit;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Worker threads; `None` uses one per available core, `Some(1)` runs inline
    pub jobs: Option<usize>,
    /// Drive every file but never write back
    pub dry_run: bool,
}

/// Process `files` in order and report one outcome per file
///
/// Per-file failures never stop the batch: a missing path is `missing`, any
/// other read or write failure is `error`. Entries appear in input order
/// whatever the worker count.
pub fn run(
    files: &[PathBuf],
    set: &PatternSet,
    store: &dyn FileStore,
    options: &RunOptions,
) -> RunReport {
    let process = |path: &PathBuf| process_file(path, set, store, options.dry_run);

    let entries: Vec<FileReport> = match build_pool(options.jobs) {
        Some(pool) => pool.install(|| files.par_iter().map(process).collect()),
        None => files.iter().map(process).collect(),
    };

    let mut report = RunReport::new(set.name(), options.dry_run);
    for entry in entries {
        report.push(entry);
    }

    let summary = report.summary();
    info!(
        pattern_set = set.name(),
        total = summary.total,
        updated = summary.updated,
        unchanged = summary.unchanged,
        missing = summary.missing,
        errors = summary.errors,
        flagged = summary.flagged,
        "batch complete"
    );
    report
}

fn build_pool(jobs: Option<usize>) -> Option<rayon::ThreadPool> {
    if jobs == Some(1) {
        return None;
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!(error = %e, "could not start worker pool; processing files inline");
            None
        }
    }
}

/// Read, drive and write back one file
pub fn process_file(path: &Path, set: &PatternSet, store: &dyn FileStore, dry_run: bool) -> FileReport {
    let _span = info_span!("file", path = %path.display()).entered();

    let content = match store.read(path) {
        Ok(content) => content,
        Err(CodemodError::NotFound(_)) => {
            debug!("not found");
            return FileReport::missing(path.to_path_buf());
        }
        Err(e) => {
            warn!(error = %e, "read failed");
            return FileReport::error(path.to_path_buf(), e.to_string());
        }
    };

    let mut unit = FileUnit::new(path, content);
    let outcome = drive(&mut unit, set);
    let warning = outcome.needs_review().then_some(ConvergenceWarning {
        sweeps: outcome.sweeps,
        kept: unit.changed,
    });

    let mut entry = FileReport {
        path: unit.path.clone(),
        outcome: Outcome::Unchanged,
        error: None,
        warning,
        sweeps: outcome.sweeps,
        occurrences_before: outcome.occurrences_before,
        occurrences_after: outcome.occurrences_after,
    };

    if outcome.occurrences_after > 0 {
        info!(
            remaining = outcome.occurrences_after,
            "target references left for manual review"
        );
    }

    if !unit.changed {
        debug!(sweeps = outcome.sweeps, "unchanged");
        return entry;
    }

    if !dry_run {
        if let Err(e) = store.write(&unit.path, &unit.current) {
            warn!(error = %e, "write failed");
            entry.outcome = Outcome::Error;
            entry.error = Some(e.to_string());
            return entry;
        }
    }

    debug!(
        sweeps = outcome.sweeps,
        removed = outcome.occurrences_before.saturating_sub(outcome.occurrences_after),
        "updated"
    );
    entry.outcome = Outcome::Updated;
    entry
}
