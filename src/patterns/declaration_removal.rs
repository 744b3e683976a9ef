use super::comparison::tag_comparison_guard;
use super::{Matcher, Rule};
use crate::error::Result;
use crate::types::{ContextKind, TargetPattern};
use regex::Regex;

/// Removes typed field declarations of target identifiers.
///
/// Covers interface/type members and schema builders, one per line:
///
/// ```text
/// name_th: string;
/// name_th?: string | null;
/// readonly title_zh: Json,
/// description_th: z.string().optional(),
/// ```
///
/// Lines comparing against a locale tag are kept.
///
/// # Arguments
/// * `target` - The identifiers whose declarations are removed
///
/// # Returns
/// * `Ok(Matcher)` - A guarded `DropLines` matcher
///
/// # Examples
/// ```
/// use langstrip::patterns::declaration_removal::matcher;
/// use langstrip::rewriter::apply;
/// use langstrip::{SuffixTag, TargetPattern};
///
/// let target = TargetPattern::new(vec![], vec![SuffixTag::Th]).unwrap();
/// let decl = "interface P {\n  name_lo: string;\n  name_th?: string;\n}\n";
///
/// let (output, _) = apply(&matcher(&target).unwrap(), decl);
/// assert_eq!(output, "interface P {\n  name_lo: string;\n}\n");
/// ```
pub fn matcher(target: &TargetPattern) -> Result<Matcher> {
    let pattern = format!(
        r"^\s*(?:readonly\s+)?{ident}\??\s*:\s*(?:(?:string|number|boolean|any|unknown|null|undefined|Date|Json)\b|Record<|Array<|z\.|Prisma\.).*$",
        ident = target.identifier_source(),
    );

    Ok(Matcher::new(
        "declaration",
        ContextKind::Declaration,
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
    fn test_removes_interface_members() {
        let content = "interface Product {\n  name_lo: string;\n  name_th: string;\n  name_zh?: string | null;\n  name_en: string;\n}\n";

        let (output, changed) = apply(&th_zh_matcher(), content);

        assert!(changed);
        assert_eq!(
            output,
            "interface Product {\n  name_lo: string;\n  name_en: string;\n}\n"
        );
    }

    #[test]
    fn test_removes_schema_builder_entries() {
        let content = "const schema = z.object({\n  name_lo: z.string().min(1),\n  name_th: z.string().optional(),\n  metaTitle_zh: z.string(),\n});\n";

        let (output, _) = apply(&th_zh_matcher(), content);

        assert_eq!(
            output,
            "const schema = z.object({\n  name_lo: z.string().min(1),\n});\n"
        );
    }

    #[test]
    fn test_leaves_value_entries_to_initializer_rule() {
        let content = "  name_th: '',\n";

        let (_, changed) = apply(&th_zh_matcher(), content);

        assert!(!changed);
    }

    #[test]
    fn test_leaves_multi_line_type_members() {
        let content = "type T = {\n  seo_th: Record<string, {\n    title: string;\n  }>;\n};\n";

        let (_, changed) = apply(&th_zh_matcher(), content);

        assert!(!changed);
    }
}
