use crate::error::Result;
use crate::types::SuffixTag;
use regex::Regex;

/// Matches a line that branches on a locale tag literal
///
/// `locale === 'th'`, `'zh' !== lang` and `case 'th':` are reads of the tag,
/// not declarations of a tagged field, so line-removal rules must keep them.
/// Every enumerated tag counts, not only the ones being removed.
pub fn tag_comparison_guard() -> Result<Regex> {
    let tags = SuffixTag::alternation(&SuffixTag::ALL);
    let literal = format!(r#"['"`](?:{})['"`]"#, tags);
    let pattern = format!(
        r"(?:===?|!==?)\s*{lit}|{lit}\s*(?:===?|!==?)|\bcase\s+{lit}\s*:",
        lit = literal
    );
    Ok(Regex::new(&pattern)?)
}
