use super::{Matcher, Rule, FORM_CONTROL, TAG_ATTRS};
use crate::error::Result;
use crate::types::{ContextKind, TargetPattern};
use regex::Regex;

/// Removes a form field block for a target identifier.
///
/// A block is a `<div>` that holds exactly a `<label>` followed by one form
/// control whose `name` or `id` attribute is a target identifier:
///
/// ```text
/// <div className="field">
///   <label>Thai name</label>
///   <input name="name_th" value={form.name_th} />
/// </div>
/// ```
///
/// Every part of the pattern is bounded by an explicit closing delimiter
/// (`>`, `</label>`, `/>` or the control's closing tag, then `</div>`), so a
/// block that does not have this exact shape is left for the narrower
/// element matcher instead of being partially consumed.
///
/// # Arguments
/// * `target` - The identifiers whose field blocks are removed
///
/// # Returns
/// * `Ok(Matcher)` - A `DropSpans` matcher for labelled field blocks
/// * `Err(CodemodError::Regex)` - The target pattern did not compile
pub fn matcher(target: &TargetPattern) -> Result<Matcher> {
    let control = format!(
        r#"<{ctl}\b{attrs}\b(?:name|id)=["']{ident}["']{attrs}(?:/>|>[^<]*</{ctl}>)"#,
        ctl = FORM_CONTROL,
        attrs = TAG_ATTRS,
        ident = target.identifier_source(),
    );
    let pattern = format!(
        r"<div\b[^<>]*>\s*<label\b[^<>]*>[^<]*</label>\s*{}\s*</div>",
        control
    );

    Ok(Matcher::new(
        "markup-block",
        ContextKind::MarkupAttribute,
        Regex::new(&pattern)?,
        Rule::DropSpans,
        target,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::apply;
    use crate::types::SuffixTag;

    fn th_matcher() -> Matcher {
        let target = TargetPattern::new(vec![], vec![SuffixTag::Th, SuffixTag::Zh]).unwrap();
        matcher(&target).unwrap()
    }

    #[test]
    fn test_removes_labelled_field_block() {
        let content = r#"<div className="grid">
  <div>
    <label className="label">Lao</label>
    <input name="name_lo" value={form.name_lo} />
  </div>
  <div>
    <label className="label">Thai</label>
    <input name="name_th" value={form.name_th} onChange={(e) => set(e.target.value)} />
  </div>
</div>
"#;

        let (output, changed) = apply(&th_matcher(), content);

        assert!(changed);
        assert_eq!(
            output,
            r#"<div className="grid">
  <div>
    <label className="label">Lao</label>
    <input name="name_lo" value={form.name_lo} />
  </div>
</div>
"#
        );
    }

    #[test]
    fn test_removes_textarea_with_closing_tag() {
        let content = "<div>\n  <label>中文</label>\n  <textarea id=\"description_zh\" rows={4}></textarea>\n</div>\n<p>after</p>\n";

        let (output, changed) = apply(&th_matcher(), content);

        assert!(changed);
        assert_eq!(output, "<p>after</p>\n");
    }

    #[test]
    fn test_does_not_swallow_following_blocks() {
        let content = "<div>\n  <label>Thai</label>\n  <input name=\"name_th\" />\n</div>\n<div>\n  <label>English</label>\n  <input name=\"name_en\" />\n</div>\n";

        let (output, _) = apply(&th_matcher(), content);

        assert_eq!(
            output,
            "<div>\n  <label>English</label>\n  <input name=\"name_en\" />\n</div>\n"
        );
    }

    #[test]
    fn test_ignores_non_target_fields() {
        let content = "<div>\n  <label>Title</label>\n  <input name=\"title_en\" />\n</div>\n";

        let (output, changed) = apply(&th_matcher(), content);

        assert!(!changed);
        assert_eq!(output, content);
    }

    #[test]
    fn test_ignores_block_with_extra_children() {
        let content = "<div>\n  <label>Thai</label>\n  <input name=\"name_th\" />\n  <p>hint</p>\n</div>\n";

        let (_, changed) = apply(&th_matcher(), content);

        assert!(!changed);
    }
}
