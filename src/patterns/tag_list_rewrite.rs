use super::comparison::tag_comparison_guard;
use super::{Matcher, Rule};
use crate::error::Result;
use crate::types::{ContextKind, SuffixTag, TargetPattern};
use regex::{Captures, Regex};

/// Drops target tags from single-line arrays made only of tag literals
///
/// `['lo', 'th', 'zh', 'en']` becomes `['lo', 'en']`. Arrays holding anything
/// other than enumerated tag literals never match, and lines comparing against
/// a tag (`locale === 'th' || ['zh', 'en'].includes(x)`) are left alone.
///
/// # Arguments
/// * `target` - The tags being removed
///
/// # Returns
/// * `Ok(Matcher)` - A `Rewrite` matcher over tag arrays
///
/// # Examples
/// ```
/// use langstrip::patterns::tag_list_rewrite::array_matcher;
/// use langstrip::rewriter::apply;
/// use langstrip::{SuffixTag, TargetPattern};
///
/// let target = TargetPattern::new(vec![], vec![SuffixTag::Th]).unwrap();
/// let (output, _) = apply(&array_matcher(&target).unwrap(), "const l = ['lo', 'th'];");
///
/// assert_eq!(output, "const l = ['lo'];");
/// ```
pub fn array_matcher(target: &TargetPattern) -> Result<Matcher> {
    let lit = tag_literal();
    let pattern = format!(r"\[[ \t]*{lit}(?:[ \t]*,[ \t]*{lit})+[ \t]*,?[ \t]*\]", lit = lit);

    Ok(Matcher::new(
        "tag-array",
        ContextKind::TabularEntry,
        Regex::new(&pattern)?,
        Rule::Rewrite(rewrite_array),
        target,
    )
    .with_guard(tag_comparison_guard()?))
}

/// Drops target tags from string-literal unions such as `'lo' | 'th' | 'en'`
///
/// # Arguments
/// * `target` - The tags being removed
///
/// # Returns
/// * `Ok(Matcher)` - A `Rewrite` matcher over literal unions
pub fn union_matcher(target: &TargetPattern) -> Result<Matcher> {
    let lit = tag_literal();
    let pattern = format!(r"{lit}(?:[ \t]*\|[ \t]*{lit})+", lit = lit);

    Ok(Matcher::new(
        "tag-union",
        ContextKind::TabularEntry,
        Regex::new(&pattern)?,
        Rule::Rewrite(rewrite_union),
        target,
    )
    .with_guard(tag_comparison_guard()?))
}

fn tag_literal() -> String {
    format!(r#"['"](?:{})['"]"#, SuffixTag::alternation(&SuffixTag::ALL))
}

fn rewrite_array(caps: &Captures<'_>, target: &TargetPattern) -> Option<String> {
    let text = &caps[0];
    let inner = &text[1..text.len() - 1];

    let entries: Vec<&str> = inner
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect();
    let kept = keep_entries(&entries, target)?;

    let padded = inner.starts_with([' ', '\t']);
    Some(if padded {
        format!("[ {} ]", kept.join(", "))
    } else {
        format!("[{}]", kept.join(", "))
    })
}

fn rewrite_union(caps: &Captures<'_>, target: &TargetPattern) -> Option<String> {
    let entries: Vec<&str> = caps[0].split('|').map(str::trim).collect();
    let kept = keep_entries(&entries, target)?;
    Some(kept.join(" | "))
}

/// Entries whose tag is not a target, or `None` when nothing or everything would go
fn keep_entries<'a>(entries: &[&'a str], target: &TargetPattern) -> Option<Vec<&'a str>> {
    let kept: Vec<&str> = entries
        .iter()
        .copied()
        .filter(|e| !target.is_target_tag(unquote(e)))
        .collect();

    if kept.is_empty() || kept.len() == entries.len() {
        None
    } else {
        Some(kept)
    }
}

fn unquote(literal: &str) -> &str {
    literal.trim_matches(['\'', '"'])
}
