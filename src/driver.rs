//! Sweeps a [`FileUnit`] with every matcher until nothing changes.

use crate::cleanup::{cleanup, CleanupOptions};
use crate::patterns::PatternSet;
use crate::rewriter;
use crate::types::FileUnit;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, trace, warn};

pub const DEFAULT_MAX_SWEEPS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DriverOptions {
    /// Hard ceiling on full sweeps per file
    pub max_sweeps: usize,
    pub cleanup: CleanupOptions,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            max_sweeps: DEFAULT_MAX_SWEEPS,
            cleanup: CleanupOptions::default(),
        }
    }
}

/// `Pending -> Sweeping -> Converged | CeilingReached`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriverState {
    Pending,
    Sweeping,
    /// A full sweep changed nothing
    Converged,
    /// The sweep ceiling was hit while content was still changing
    CeilingReached,
}

/// Result of driving one file unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveOutcome {
    pub state: DriverState,
    pub sweeps: usize,
    pub occurrences_before: usize,
    pub occurrences_after: usize,
}

impl DriveOutcome {
    pub fn needs_review(&self) -> bool {
        self.state == DriverState::CeilingReached
    }
}

/// Drive `unit` to a fixed point under `set`
///
/// On [`DriverState::CeilingReached`] the swept content is kept only if it
/// has strictly fewer target occurrences than the original; otherwise the
/// unit is reset to its original content.
pub fn drive(unit: &mut FileUnit, set: &PatternSet) -> DriveOutcome {
    let options = set.options();
    let mut state = DriverState::Pending;
    trace!(path = %unit.path.display(), ?state, "driving file");

    while state != DriverState::Converged && state != DriverState::CeilingReached {
        if unit.sweeps >= options.max_sweeps {
            state = DriverState::CeilingReached;
            break;
        }
        state = DriverState::Sweeping;
        unit.sweeps += 1;

        match sweep(&unit.current, set) {
            Some(next) => {
                debug!(path = %unit.path.display(), sweep = unit.sweeps, "sweep changed content");
                unit.set_current(next);
            }
            None => state = DriverState::Converged,
        }
    }

    let target = set.target();
    let occurrences_before = target.count_occurrences(&unit.original);
    let mut occurrences_after = target.count_occurrences(&unit.current);

    if state == DriverState::CeilingReached {
        if occurrences_after < occurrences_before {
            warn!(
                path = %unit.path.display(),
                sweeps = unit.sweeps,
                occurrences_before,
                occurrences_after,
                "sweep ceiling reached; keeping partial cleanup"
            );
        } else {
            warn!(
                path = %unit.path.display(),
                sweeps = unit.sweeps,
                "sweep ceiling reached without improvement; leaving file untouched"
            );
            unit.set_current(unit.original.clone());
            occurrences_after = occurrences_before;
        }
    }

    DriveOutcome {
        state,
        sweeps: unit.sweeps,
        occurrences_before,
        occurrences_after,
    }
}

/// One pass of every matcher, cleaning up after each one that changed something
///
/// Returns `None` when the sweep left `content` as it was.
pub fn sweep(content: &str, set: &PatternSet) -> Option<String> {
    let cleanup_options = set.options().cleanup;
    let mut current: Cow<'_, str> = Cow::Borrowed(content);

    for matcher in set.matchers() {
        let cleaned = {
            let (next, changed) = rewriter::apply(matcher, &current);
            if !changed {
                continue;
            }
            trace!(matcher = matcher.name(), kind = %matcher.kind(), "matcher applied");
            cleanup(&next, cleanup_options)
        };
        current = Cow::Owned(cleaned);
    }

    match current {
        Cow::Owned(next) if next != content => Some(next),
        _ => None,
    }
}

/// Drive in-memory `content` to a fixed point, returning the result
pub fn strip(content: &str, set: &PatternSet) -> (String, DriveOutcome) {
    let mut unit = FileUnit::new("<memory>", content.to_string());
    let outcome = drive(&mut unit, set);
    (unit.current, outcome)
}
