//! Collects source files under directories for a batch run.

use crate::error::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions picked up when none are given
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Walk `dirs` and collect every file with one of `extensions`
///
/// Features:
/// - Always recursive traversal
/// - Always skips `node_modules/` directories
/// - Respects git ignore patterns and skips hidden entries
/// - Returns deterministically sorted paths
///
/// With a `root`, each directory is resolved against it and the returned
/// paths are relative to it, ready for a rooted [`DiskStore`].
///
/// # Arguments
/// * `dirs` - Directories to walk
/// * `extensions` - File extensions to keep, without the dot
/// * `root` - Optional base directory
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - Sorted, deduplicated file paths
/// * `Err(CodemodError::Walk)` - A directory could not be read
///
/// [`DiskStore`]: crate::store::DiskStore
pub fn discover(
    dirs: &[PathBuf],
    extensions: &[String],
    root: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for dir in dirs {
        let base = match root {
            Some(root) => root.join(dir),
            None => dir.clone(),
        };

        let mut builder = WalkBuilder::new(&base);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_exclude(true)
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                !(is_dir && entry.file_name() == "node_modules")
            });

        for result in builder.build() {
            let entry = result?;
            let path = entry.path();
            if !entry.file_type().is_some_and(|ft| ft.is_file()) || !has_extension(path, extensions)
            {
                continue;
            }

            let path = match root {
                Some(root) => path.strip_prefix(root).unwrap_or(path),
                None => path,
            };
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    debug!(dirs = dirs.len(), files = files.len(), "discovered source files");
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn default_extensions() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/app/admin")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("src/app/page.tsx"), "").unwrap();
        fs::write(root.join("src/app/admin/form.tsx"), "").unwrap();
        fs::write(root.join("src/types.ts"), "").unwrap();
        fs::write(root.join("src/util.js"), "").unwrap();
        fs::write(root.join("node_modules/pkg/index.ts"), "").unwrap();
        dir
    }

    #[test]
    fn test_finds_sources_recursively_in_order() {
        let dir = project();

        let files = discover(&[PathBuf::from("src")], &default_extensions(), Some(dir.path())).unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("src/app/admin/form.tsx"),
                PathBuf::from("src/app/page.tsx"),
                PathBuf::from("src/types.ts"),
            ]
        );
    }

    #[test]
    fn test_skips_node_modules() {
        let dir = project();

        let files = discover(&[dir.path().to_path_buf()], &default_extensions(), None).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| !f.to_string_lossy().contains("node_modules")));
    }

    #[test]
    fn test_extension_filter() {
        let dir = project();

        let files = discover(&[PathBuf::from("src")], &["js".to_string()], Some(dir.path())).unwrap();

        assert_eq!(files, vec![PathBuf::from("src/util.js")]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = discover(&[PathBuf::from("nope")], &default_extensions(), Some(dir.path()));

        assert!(result.is_err());
    }
}
