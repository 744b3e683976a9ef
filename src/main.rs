use anyhow::{bail, Context, Result};
use clap::Parser;
use langstrip::{discover, run, DiskStore, PatternSet, RunOptions};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "langstrip")]
#[command(version, about = "Remove locale-suffixed fields from TypeScript/TSX files")]
#[command(long_about = "Remove locale-suffixed fields from TypeScript/TSX files\n\n\
    Fields such as name_th or title_zh are removed from type declarations,\n\
    object literals, destructuring patterns, form markup and locale tables.\n\
    Each file is swept until it stops changing; re-running is a no-op.\n\n\
    Built-in pattern sets: th-zh, th, zh. Any other value is read as a\n\
    TOML pattern set file.\n\n\
    Examples:\n  \
    langstrip -p th-zh src/app/admin/settings/page.tsx\n  \
    langstrip -p th-zh --root ./web --files-from changed.txt --dry-run\n  \
    langstrip -p th -d src/app --ext ts,tsx --json")]
struct Cli {
    /// Files to process
    files: Vec<PathBuf>,

    /// Pattern set: a built-in name or a path to a TOML definition
    #[arg(short, long)]
    pattern_set: String,

    /// Read additional file paths from this file, one per line ("-" for stdin)
    #[arg(long)]
    files_from: Option<PathBuf>,

    /// Walk this directory for source files (repeatable)
    #[arg(short, long = "dir", value_name = "DIR")]
    dirs: Vec<PathBuf>,

    /// File extensions picked up by --dir
    #[arg(long = "ext", value_name = "EXT", value_delimiter = ',', default_value = "ts,tsx")]
    extensions: Vec<String>,

    /// Resolve relative file paths against this directory
    #[arg(long)]
    root: Option<PathBuf>,

    /// Number of worker threads (default: one per core)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output for debugging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    langstrip::logging::init(cli.verbose);

    let set = PatternSet::resolve(&cli.pattern_set).with_context(|| {
        let builtins: Vec<&str> = PatternSet::builtin_names().map(|(name, _)| name).collect();
        format!(
            "Failed to load pattern set {:?} (built-in sets: {})",
            cli.pattern_set,
            builtins.join(", ")
        )
    })?;

    let mut files = cli.files.clone();
    if let Some(list) = &cli.files_from {
        files.extend(read_file_list(list)?);
    }
    if !cli.dirs.is_empty() {
        let found = discover(&cli.dirs, &cli.extensions, cli.root.as_deref())
            .context("Failed to collect files from --dir")?;
        files.extend(found);
    }
    if files.is_empty() {
        bail!("No input files given (pass paths, --dir or --files-from)");
    }

    let store = match &cli.root {
        Some(root) => DiskStore::with_root(root),
        None => DiskStore::new(),
    };
    let options = RunOptions {
        jobs: cli.jobs,
        dry_run: cli.dry_run,
    };

    let report = run(&files, &set, &store, &options);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}

/// Read a newline-separated path list, skipping blank lines and `#` comments
fn read_file_list(source: &Path) -> Result<Vec<PathBuf>> {
    let text = if source == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read file list from stdin")?;
        text
    } else {
        fs::read_to_string(source)
            .with_context(|| format!("Failed to read file list: {}", source.display()))?
    };

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect())
}
