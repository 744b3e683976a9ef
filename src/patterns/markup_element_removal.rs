use super::{Matcher, Rule, FORM_CONTROL, TAG_ATTRS};
use crate::error::Result;
use crate::types::{ContextKind, TargetPattern};
use regex::Regex;

/// Removes a single form control keyed by a target identifier.
///
/// Matches self-closing controls (`<Input name="name_th" ... />`) and controls
/// with a text-only body closed by their own tag
/// (`<Textarea name="body_zh">...</Textarea>`). Controls with nested markup
/// are left alone.
///
/// # Arguments
/// * `target` - The identifiers whose controls are removed
///
/// # Returns
/// * `Ok(Matcher)` - A `DropSpans` matcher for single form controls
///
/// # Examples
/// ```
/// use langstrip::patterns::markup_element_removal::matcher;
/// use langstrip::rewriter::apply;
/// use langstrip::{SuffixTag, TargetPattern};
///
/// let target = TargetPattern::new(vec![], vec![SuffixTag::Zh]).unwrap();
/// let markup = "<form>\n  <Input name=\"title_zh\" />\n</form>\n";
///
/// let (output, _) = apply(&matcher(&target).unwrap(), markup);
/// assert_eq!(output, "<form>\n</form>\n");
/// ```
pub fn matcher(target: &TargetPattern) -> Result<Matcher> {
    let pattern = format!(
        r#"<{ctl}\b{attrs}\b(?:name|id)=["']{ident}["']{attrs}(?:/>|>[^<]*</{ctl}>)"#,
        ctl = FORM_CONTROL,
        attrs = TAG_ATTRS,
        ident = target.identifier_source(),
    );

    Ok(Matcher::new(
        "markup-element",
        ContextKind::MarkupAttribute,
        Regex::new(&pattern)?,
        Rule::DropSpans,
        target,
    ))
}
