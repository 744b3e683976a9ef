/// Removal rules for locale-suffixed fields
///
/// Each submodule builds one [`Matcher`] for a [`TargetPattern`]. They are
/// listed here in the order [`matchers_for`] returns them, broadest first:
///
/// - `markup_block_removal`: `<div>` wrapping a label and a keyed form control
/// - `markup_element_removal`: a single keyed form control
/// - `tabular_entry_removal`: `{ code: 'th', ... }` rows of a locale table
/// - `tag_list_rewrite`: `['lo', 'th']` arrays and `'lo' | 'th'` unions
/// - `destructure_rewrite`: entries of a `const { ... } =` binding group
/// - `declaration_removal`: typed field declarations
/// - `initializer_removal`: object entries, shorthand entries and assignments
pub mod comparison;
pub mod declaration_removal;
pub mod destructure_rewrite;
pub mod initializer_removal;
pub mod markup_block_removal;
pub mod markup_element_removal;
pub mod set;
pub mod tabular_entry_removal;
pub mod tag_list_rewrite;

// Re-export commonly used items
pub use set::PatternSet;

use crate::error::Result;
use crate::types::{ContextKind, TargetPattern};
use regex::{Captures, Regex};

/// Builds the replacement for one match, or `None` to leave it as is
pub type RewriteFn = fn(&Captures<'_>, &TargetPattern) -> Option<String>;

/// How a matcher turns a match into an edit
#[derive(Clone, Copy)]
pub enum Rule {
    /// Remove every whole line the pattern matches
    DropLines,
    /// Remove every matched span; spans alone on their lines take the lines with them
    ///
    /// When the pattern has a group named `span`, only that group is removed and
    /// the rest of the match serves as context.
    DropSpans,
    /// Replace every match with the output of the rewrite function
    Rewrite(RewriteFn),
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::DropLines => f.write_str("DropLines"),
            Rule::DropSpans => f.write_str("DropSpans"),
            Rule::Rewrite(_) => f.write_str("Rewrite"),
        }
    }
}

/// A named, immutable (context, pattern, rule) triple
#[derive(Debug, Clone)]
pub struct Matcher {
    name: &'static str,
    kind: ContextKind,
    regex: Regex,
    rule: Rule,
    target: TargetPattern,
    guard: Option<Regex>,
}

impl Matcher {
    pub fn new(
        name: &'static str,
        kind: ContextKind,
        regex: Regex,
        rule: Rule,
        target: &TargetPattern,
    ) -> Self {
        Self {
            name,
            kind,
            regex,
            rule,
            target: target.clone(),
            guard: None,
        }
    }

    /// Lines matching `guard` are left untouched whatever the rule
    pub fn with_guard(mut self, guard: Regex) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn target(&self) -> &TargetPattern {
        &self.target
    }

    pub fn is_guarded(&self, line: &str) -> bool {
        self.guard.as_ref().is_some_and(|g| g.is_match(line))
    }
}

/// Every matcher needed to remove `target`, in application order
pub fn matchers_for(target: &TargetPattern) -> Result<Vec<Matcher>> {
    Ok(vec![
        markup_block_removal::matcher(target)?,
        markup_element_removal::matcher(target)?,
        tabular_entry_removal::matcher(target)?,
        tag_list_rewrite::array_matcher(target)?,
        tag_list_rewrite::union_matcher(target)?,
        destructure_rewrite::matcher(target)?,
        declaration_removal::matcher(target)?,
        initializer_removal::matcher(target)?,
    ])
}

/// Form controls whose `name`/`id` attribute marks them as a field editor
pub(crate) const FORM_CONTROL: &str = "(?:input|textarea|select|Input|Textarea|Select)";

/// Attributes inside one tag; `=>` is allowed so arrow-function props don't end the tag
pub(crate) const TAG_ATTRS: &str = "(?:=>|[^<>])*?";
