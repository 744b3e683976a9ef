//! Repairs artifacts left behind by removals.
//!
//! Rules, applied in order:
//!
//! 1. runs of three or more blank lines collapse to one empty line
//! 2. a comma in code followed only by whitespace and `}` or `]` is dropped
//! 3. optionally, `key: {}` / `key: []` entry lines are dropped
//!
//! The output of [`cleanup`] is a fixed point of rules 1 and 2.

use crate::scan::CodeChars;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanupOptions {
    /// Drop entry lines whose value is an empty `{}` or `[]`
    pub drop_empty_containers: bool,
}

/// Repair the artifacts one removal left behind
///
/// Runs rules 1 and 2, then rule 3 to a fixed point when enabled. Dropping an
/// empty entry can leave its neighbour's comma dangling, so 1 and 2 re-run
/// after every round of 3.
///
/// # Arguments
/// * `content` - File content right after a matcher changed it
/// * `options` - Which optional rules apply
///
/// # Returns
/// * The repaired content
pub fn cleanup(content: &str, options: CleanupOptions) -> String {
    let mut output = strip_dangling_commas(&collapse_blank_lines(content));

    if options.drop_empty_containers {
        loop {
            let dropped = drop_empty_containers(&output);
            if dropped == output {
                break;
            }
            output = strip_dangling_commas(&collapse_blank_lines(&dropped));
        }
    }

    output
}

/// Collapse every run of 3+ whitespace-only lines into a single empty line
pub fn collapse_blank_lines(content: &str) -> String {
    let mut output = String::with_capacity(content.len());
    let mut run: Vec<&str> = Vec::new();

    for line in content.split_inclusive('\n') {
        if line.trim().is_empty() {
            run.push(line);
            continue;
        }
        flush_blank_run(&mut output, &run);
        run.clear();
        output.push_str(line);
    }
    flush_blank_run(&mut output, &run);

    output
}

fn flush_blank_run(output: &mut String, run: &[&str]) {
    match run {
        [] => {}
        lines if lines.len() < 3 => lines.iter().for_each(|l| output.push_str(l)),
        [first, ..] => {
            let ending = if first.ends_with("\r\n") { "\r\n" } else { "\n" };
            output.push_str(ending);
        }
    }
}

/// Drop commas that are followed only by whitespace and a closing `}` or `]`
///
/// Only commas in code count; string literals, template literals and
/// comments are copied through as they are.
///
/// # Arguments
/// * `content` - File content after a removal
///
/// # Returns
/// * The content with every dangling comma removed
///
/// # Examples
/// ```
/// use langstrip::cleanup::strip_dangling_commas;
///
/// let fixed = strip_dangling_commas("const a = [1, 2, ];\nconst s = \"x, ]\";\n");
/// assert_eq!(fixed, "const a = [1, 2 ];\nconst s = \"x, ]\";\n");
/// ```
pub fn strip_dangling_commas(content: &str) -> String {
    let mut output = String::with_capacity(content.len());

    for (i, c, is_code) in CodeChars::new(content) {
        if is_code && c == ',' && content[i + 1..].trim_start().starts_with(['}', ']']) {
            continue;
        }
        output.push(c);
    }

    output
}

/// Drop lines that only hold an entry with an empty container value
pub fn drop_empty_containers(content: &str) -> String {
    content
        .split_inclusive('\n')
        .filter(|line| !is_empty_container_entry(line))
        .collect()
}

fn is_empty_container_entry(line: &str) -> bool {
    let entry = line.trim();
    let entry = entry.strip_suffix(',').unwrap_or(entry);
    let Some((key, value)) = entry.split_once(':') else {
        return false;
    };

    let key = key.trim();
    let key = key.strip_suffix('?').unwrap_or(key);
    let is_identifier = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    let value: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    is_identifier && (value == "{}" || value == "[]")
}
