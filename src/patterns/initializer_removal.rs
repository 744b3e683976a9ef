use super::comparison::tag_comparison_guard;
use super::{Matcher, Rule};
use crate::error::Result;
use crate::types::{ContextKind, TargetPattern};
use regex::Regex;

/// Removes lines that give a target identifier a value.
///
/// Three single-line shapes are recognized:
///
/// - object entries: `name_th: initialData?.name_th || '',`
/// - shorthand entries: `name_th,`
/// - assignments: `form.name_th = value;`, `let title_zh = '';`
///
/// Lines that open or close a bracket without closing or opening it on the
/// same line are kept, as are lines comparing against a locale tag literal.
///
/// A line is also kept when its expression carries on to the next line, as in
/// `name_th: data.name_th ||` followed by the fallback.
///
/// # Arguments
/// * `target` - The identifiers whose initializers are removed
///
/// # Returns
/// * `Ok(Matcher)` - A guarded `DropLines` matcher
pub fn matcher(target: &TargetPattern) -> Result<Matcher> {
    let pattern = format!(
        r"^\s*(?:{id}\s*:\s*\S.*|{id}\s*,?|(?:(?:const|let|var)\s+)?(?:[A-Za-z_$][\w$]*(?:\?\.|!\.|\.))*{id}\s*=\s*[^=>\s].*)$",
        id = target.identifier_source(),
    );

    Ok(Matcher::new(
        "initializer",
        ContextKind::InitializerAssignment,
        Regex::new(&pattern)?,
        Rule::DropLines,
        target,
    )
    .with_guard(tag_comparison_guard()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::apply;
    use crate::types::SuffixTag;

    fn th_zh_matcher() -> Matcher {
        let target = TargetPattern::new(vec![], vec![SuffixTag::Th, SuffixTag::Zh]).unwrap();
        matcher(&target).unwrap()
    }

    #[test]
    fn test_removes_default_values() {
        let content = "defaultValues: {\n    name_lo: '',\n    name_th: '',\n    name_zh: '',\n    name_en: '',\n}\n";

        let (output, changed) = apply(&th_zh_matcher(), content);

        assert!(changed);
        assert_eq!(output, "defaultValues: {\n    name_lo: '',\n    name_en: '',\n}\n");
    }

    #[test]
    fn test_removes_computed_entries() {
        let content = "  name_th: initialData?.name_th || '',\n  benefits_zh: stringToArray(data.benefits_zh),\n  id: data.id,\n";

        let (output, _) = apply(&th_zh_matcher(), content);

        assert_eq!(output, "  id: data.id,\n");
    }

    #[test]
    fn test_removes_shorthand_entries() {
        let content = "data: {\n  name_lo,\n  name_th,\n  name_en\n}\n";

        let (output, _) = apply(&th_zh_matcher(), content);

        assert_eq!(output, "data: {\n  name_lo,\n  name_en\n}\n");
    }

    #[test]
    fn test_removes_assignments() {
        let content = "formData.name_th = value;\nlet title_zh = '';\nif (a.name_th == b) {}\n";

        let (output, _) = apply(&th_zh_matcher(), content);

        assert_eq!(output, "if (a.name_th == b) {}\n");
    }

    #[test]
    fn test_preserves_lines_branching_on_tag() {
        let content = "  name_th: locale === 'th' ? value : fallback,\n";

        let (output, changed) = apply(&th_zh_matcher(), content);

        assert!(!changed);
        assert_eq!(output, content);
    }

    #[test]
    fn test_preserves_accesses_and_other_keys() {
        let content = "  title: product.name_th ?? product.name_en,\n  <p>{product.name_th}</p>\n";

        let (_, changed) = apply(&th_zh_matcher(), content);

        assert!(!changed);
    }
}
