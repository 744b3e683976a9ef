//! # langstrip
//!
//! A codemod engine that removes locale-suffixed fields (`name_th`,
//! `title_zh`, ...) from TypeScript/TSX sources without parsing them.
//!
//! Removal rules are matched textually, applied in a fixed order, and swept
//! repeatedly until the file stops changing, so running the engine on an
//! already-cleaned file is a no-op.
//!
//! ## Example
//!
//! ```
//! use langstrip::{strip, PatternSet};
//!
//! let set = PatternSet::resolve("th-zh").unwrap();
//! let (output, _) = strip("const { name_lo, name_th, name_en } = data;\n", &set);
//!
//! assert_eq!(output, "const { name_lo, name_en } = data;\n");
//! ```
//!
//! Batches go through [`runner::run`] with a [`store::FileStore`]:
//!
//! ```no_run
//! use langstrip::{run, DiskStore, PatternSet, RunOptions};
//! use std::path::PathBuf;
//!
//! let set = PatternSet::resolve("th-zh").unwrap();
//! let files = vec![PathBuf::from("src/app/admin/settings/page.tsx")];
//! let report = run(&files, &set, &DiskStore::new(), &RunOptions::default());
//! println!("{}", report);
//! ```

pub mod cleanup;
pub mod discover;
pub mod driver;
pub mod error;
pub mod logging;
pub mod patterns;
pub mod report;
pub mod rewriter;
pub mod runner;
mod scan;
pub mod store;
pub mod types;

// Re-export commonly used items
pub use discover::discover;
pub use driver::{drive, strip, DriveOutcome, DriverOptions, DriverState};
pub use error::{CodemodError, Result};
pub use patterns::{matchers_for, Matcher, PatternSet};
pub use report::{Outcome, RunReport};
pub use runner::{run, RunOptions};
pub use store::{DiskStore, FileStore, MemoryStore};
pub use types::{ContextKind, FileUnit, SuffixTag, TargetPattern};
