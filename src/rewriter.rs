//! Applies one [`Matcher`] to file content at line or block granularity.

use crate::patterns::{Matcher, Rule, RewriteFn};
use crate::scan::{code_part, CodeChars, Region};
use regex::Captures;
use std::borrow::Cow;

/// Apply `matcher` to `content`
///
/// Returns the new content and whether anything changed. When nothing
/// changed the original slice is handed back borrowed.
pub fn apply<'a>(matcher: &Matcher, content: &'a str) -> (Cow<'a, str>, bool) {
    let rewritten = match matcher.rule() {
        Rule::DropLines => drop_lines(matcher, content),
        Rule::DropSpans => drop_spans(matcher, content),
        Rule::Rewrite(rewrite) => rewrite_matches(matcher, rewrite, content),
    };

    match rewritten {
        Some(new_content) if new_content != content => (Cow::Owned(new_content), true),
        _ => (Cow::Borrowed(content), false),
    }
}

fn drop_lines(matcher: &Matcher, content: &str) -> Option<String> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut output = String::with_capacity(content.len());
    let mut dropped = false;

    for (i, line) in lines.iter().enumerate() {
        let body = line.trim_end_matches(['\n', '\r']);
        if matcher.regex().is_match(body)
            && !matcher.is_guarded(body)
            && is_balanced(body)
            && !continues(body, &lines[i + 1..])
        {
            dropped = true;
            continue;
        }
        output.push_str(line);
    }

    dropped.then_some(output)
}

fn drop_spans(matcher: &Matcher, content: &str) -> Option<String> {
    let mut output = String::with_capacity(content.len());
    let mut cursor = 0;
    let mut matched = false;

    for caps in matcher.regex().captures_iter(content) {
        let Some(span) = caps.name("span").or_else(|| caps.get(0)) else {
            continue;
        };
        if matcher.is_guarded(enclosing_lines(content, span.start(), span.end())) {
            continue;
        }

        let (start, end) = expand_to_lines(content, span.start(), span.end());
        let start = start.max(cursor);
        output.push_str(&content[cursor..start]);
        cursor = end.max(start);
        matched = true;
    }

    if !matched {
        return None;
    }
    output.push_str(&content[cursor..]);
    Some(output)
}

fn rewrite_matches(matcher: &Matcher, rewrite: RewriteFn, content: &str) -> Option<String> {
    let target = matcher.target();
    let replaced = matcher.regex().replace_all(content, |caps: &Captures<'_>| {
        let guarded = caps
            .get(0)
            .is_some_and(|m| matcher.is_guarded(enclosing_lines(content, m.start(), m.end())));
        let rewritten = if guarded { None } else { rewrite(caps, target) };
        rewritten.unwrap_or_else(|| caps[0].to_string())
    });

    match replaced {
        Cow::Owned(new_content) => Some(new_content),
        Cow::Borrowed(_) => None,
    }
}

/// The full lines `start..end` touches, without the final line ending
fn enclosing_lines(content: &str, start: usize, end: usize) -> &str {
    let line_start = content[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = content[end..].find('\n').map_or(content.len(), |i| end + i);
    &content[line_start..line_end]
}

/// Widen `start..end` to whole lines when only whitespace surrounds it
fn expand_to_lines(content: &str, start: usize, end: usize) -> (usize, usize) {
    let line_start = content[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = content[end..]
        .find('\n')
        .map_or(content.len(), |i| end + i + 1);

    let before = &content[line_start..start];
    let after = &content[end..line_end];
    if before.trim().is_empty() && after.trim().is_empty() {
        (line_start, line_end)
    } else {
        (start, end)
    }
}

/// Whether brackets on this line open and close in balance
///
/// Quoted text and comments are skipped. An unterminated quote or block
/// comment counts as unbalanced: the line continues a construct started
/// elsewhere.
pub(crate) fn is_balanced(line: &str) -> bool {
    let mut depth: i32 = 0;
    let mut scanner = CodeChars::new(line);

    for (_, c, is_code) in scanner.by_ref() {
        if !is_code {
            continue;
        }
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }

    depth == 0 && matches!(scanner.region(), Region::Code | Region::LineComment)
}

/// Operators that leave an expression open when they end a line
const TRAILING_OPERATORS: &[&str] = &[
    "=>", "||", "&&", "??", "?", ":", "=", "(", "+", "-", "*", "/", "%", "|", "&",
];

/// Operators that continue the previous line's expression when they start a line
const LEADING_OPERATORS: &[&str] = &["||", "&&", "??", "?", ":", "."];

/// Whether the expression on `line` carries on past it
///
/// True when the line ends in an operator or the next non-blank line starts
/// with one. Removing such a line would orphan the rest of the expression.
fn continues(line: &str, following: &[&str]) -> bool {
    let code = code_part(line);
    let ends_open = !code.ends_with("++")
        && !code.ends_with("--")
        && !code.ends_with("*/")
        && TRAILING_OPERATORS.iter().any(|op| code.ends_with(op));
    if ends_open {
        return true;
    }

    following
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .is_some_and(|next| {
            !next.starts_with("...") && LEADING_OPERATORS.iter().any(|op| next.starts_with(op))
        })
}
