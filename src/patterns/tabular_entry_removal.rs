use super::comparison::tag_comparison_guard;
use super::{Matcher, Rule};
use crate::error::Result;
use crate::types::{ContextKind, TargetPattern};
use regex::Regex;

/// Removes rows of a locale table whose key is a target tag
///
/// A row is a single-line object literal without nested braces, keyed by
/// `code`, `locale` or `lang`, standing where an array element stands: after
/// `[`, `,` or only indentation, and followed by `,`, `]`, another row or the
/// end of the line. Object arguments such as
/// `router.push({ locale: 'th' })` are not rows. The row's trailing comma
/// goes with it; lines branching on a tag are never touched.
///
/// # Arguments
/// * `target` - The identifiers and tags being removed
///
/// # Returns
/// * `Ok(Matcher)` - A `DropSpans` matcher for table rows
///
/// # Examples
/// ```
/// use langstrip::patterns::tabular_entry_removal::matcher;
/// use langstrip::rewriter::apply;
/// use langstrip::{SuffixTag, TargetPattern};
///
/// let target = TargetPattern::new(vec![], vec![SuffixTag::Th]).unwrap();
/// let rows = "[\n  { code: 'lo', label: 'Lao' },\n  { code: 'th', label: 'Thai' },\n]\n";
///
/// let (output, _) = apply(&matcher(&target).unwrap(), rows);
/// assert_eq!(output, "[\n  { code: 'lo', label: 'Lao' },\n]\n");
/// ```
pub fn matcher(target: &TargetPattern) -> Result<Matcher> {
    let pattern = format!(
        r#"(?m)(?:^|[\[,])[ \t]*(?P<span>\{{[^{{}}\n]*\b(?:code|locale|lang)\s*:\s*['"](?:{tags})['"][^{{}}\n]*\}}[ \t]*,?[ \t]*)(?:\]|\{{|//|\r?$)"#,
        tags = target.tag_alternation(),
    );

    Ok(Matcher::new(
        "tabular-entry",
        ContextKind::TabularEntry,
        Regex::new(&pattern)?,
        Rule::DropSpans,
        target,
    )
    .with_guard(tag_comparison_guard()?))
}
