use super::{Matcher, Rule};
use crate::error::Result;
use crate::types::{ContextKind, TargetPattern};
use regex::{Captures, Regex};

/// Rewrites `const|let|var { ... } =` binding groups without target entries.
///
/// The whole group is re-parsed: entries are split on commas, an entry is
/// dropped when its key or its alias is a target identifier, and the rest
/// are joined back with single separators.
///
/// - `const { name_lo, name_th, name_en } = data;` becomes
///   `const { name_lo, name_en } = data;`
/// - multi-line groups keep one entry per line, the original indentation and
///   the original trailing-comma style
///
/// Groups containing nested patterns (`{ a: { b } }`) do not match.
///
/// # Arguments
/// * `target` - The identifiers dropped from binding groups
///
/// # Returns
/// * `Ok(Matcher)` - A `Rewrite` matcher over destructuring declarations
pub fn matcher(target: &TargetPattern) -> Result<Matcher> {
    let pattern = r"(?P<head>\b(?:const|let|var)\s*\{)(?P<list>[^{}]*)(?P<tail>\}\s*=)";

    Ok(Matcher::new(
        "destructure",
        ContextKind::DestructureBinding,
        Regex::new(pattern)?,
        Rule::Rewrite(rewrite_group),
        target,
    ))
}

fn rewrite_group(caps: &Captures<'_>, target: &TargetPattern) -> Option<String> {
    let head = &caps["head"];
    let list = &caps["list"];
    let tail = &caps["tail"];

    let entries: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect();
    let kept: Vec<&str> = entries
        .iter()
        .copied()
        .filter(|e| !binds_target(e, target))
        .collect();

    if kept.len() == entries.len() {
        return None;
    }

    if kept.is_empty() {
        return Some(format!("{}{}", head, tail));
    }

    let multi_line = list.trim_start_matches([' ', '\t']).starts_with('\n');
    if !multi_line {
        return Some(format!("{} {} {}", head, kept.join(", "), tail));
    }

    let indent = list
        .lines()
        .find(|l| !l.trim().is_empty())
        .map(|l| &l[..l.len() - l.trim_start().len()])
        .unwrap_or("  ");
    let closing = list.rsplit('\n').next().unwrap_or("");
    let trailing_comma = if list.trim_end().ends_with(',') { "," } else { "" };

    let body: Vec<String> = kept.iter().map(|e| format!("{}{}", indent, e)).collect();
    Some(format!(
        "{}\n{}{}\n{}{}",
        head,
        body.join(",\n"),
        trailing_comma,
        closing,
        tail
    ))
}

/// Whether a binding entry (`a`, `a: b`, `a = x`, `a: b = x`, `...rest`) binds a target
fn binds_target(entry: &str, target: &TargetPattern) -> bool {
    let without_default = entry.split('=').next().unwrap_or(entry);
    let (key, alias) = without_default
        .split_once(':')
        .unwrap_or((without_default, ""));
    let key = key.trim().trim_start_matches("...");

    target.is_target(key) || target.is_target(alias.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::apply;
    use crate::types::SuffixTag;

    fn th_matcher() -> Matcher {
        let target = TargetPattern::new(vec![], vec![SuffixTag::Th]).unwrap();
        matcher(&target).unwrap()
    }

    fn th_zh_matcher() -> Matcher {
        let target = TargetPattern::new(vec![], vec![SuffixTag::Th, SuffixTag::Zh]).unwrap();
        matcher(&target).unwrap()
    }

    #[test]
    fn test_single_line_group() {
        let content = "const { name_lo, name_th, name_en } = data;\n";

        let (output, changed) = apply(&th_matcher(), content);

        assert!(changed);
        assert_eq!(output, "const { name_lo, name_en } = data;\n");
    }

    #[test]
    fn test_last_entry_removed_leaves_no_separator() {
        let content = "let {name_en,name_th} = body";

        let (output, _) = apply(&th_matcher(), content);

        assert_eq!(output, "let { name_en } = body");
    }

    #[test]
    fn test_aliases_and_defaults() {
        let content = "const { title_zh: zh, title_th = '', title_en: en, ...rest } = await req.json();";

        let (output, _) = apply(&th_zh_matcher(), content);

        assert_eq!(output, "const { title_en: en, ...rest } = await req.json();");
    }

    #[test]
    fn test_multi_line_group() {
        let content = "  const {\n    name_lo,\n    name_th,\n    name_zh,\n    name_en,\n  } = await request.json();\n";

        let (output, changed) = apply(&th_zh_matcher(), content);

        assert!(changed);
        assert_eq!(
            output,
            "  const {\n    name_lo,\n    name_en,\n  } = await request.json();\n"
        );
    }

    #[test]
    fn test_every_entry_removed() {
        let content = "const { name_th } = data;";

        let (output, _) = apply(&th_matcher(), content);

        assert_eq!(output, "const {} = data;");
    }

    #[test]
    fn test_group_without_targets_is_untouched() {
        let content = "const {name_lo,   name_en} = data;\n";

        let (output, changed) = apply(&th_matcher(), content);

        assert!(!changed);
        assert_eq!(output, content);
    }

    #[test]
    fn test_nested_patterns_do_not_match() {
        let content = "const { meta: { name_th }, id } = row;";

        let (_, changed) = apply(&th_matcher(), content);

        assert!(!changed);
    }
}
