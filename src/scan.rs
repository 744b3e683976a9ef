//! Character scanner that tells code apart from literals and comments.
//!
//! Used wherever a pass must only look at code: bracket balance, dangling
//! comma repair, trailing-operator checks. Single and double quoted strings
//! end at a newline even when unterminated, so a stray apostrophe in markup
//! text cannot hide the rest of the file. Template literals are treated as
//! opaque, `${...}` included.

use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Region {
    Code,
    Quote(char),
    Template,
    LineComment,
    /// Byte offset of the opening `/`
    BlockComment(usize),
    /// The `/` closing a block comment is next
    BlockCommentEnd,
}

/// Yields `(byte_offset, char, is_code)` for every char of the input
pub(crate) struct CodeChars<'a> {
    chars: Peekable<CharIndices<'a>>,
    region: Region,
    escaped: bool,
}

impl<'a> CodeChars<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices().peekable(),
            region: Region::Code,
            escaped: false,
        }
    }

    /// Region the scanner is in after the last yielded char
    pub(crate) fn region(&self) -> Region {
        self.region
    }

    fn peek_is(&mut self, expected: char) -> bool {
        self.chars.peek().is_some_and(|&(_, c)| c == expected)
    }
}

impl Iterator for CodeChars<'_> {
    type Item = (usize, char, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let (i, c) = self.chars.next()?;

        let is_code = match self.region {
            Region::Code => match c {
                '\'' | '"' => {
                    self.region = Region::Quote(c);
                    false
                }
                '`' => {
                    self.region = Region::Template;
                    false
                }
                '/' if self.peek_is('/') => {
                    self.region = Region::LineComment;
                    false
                }
                '/' if self.peek_is('*') => {
                    self.region = Region::BlockComment(i);
                    false
                }
                _ => true,
            },
            Region::Quote(q) => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == q {
                    self.region = Region::Code;
                } else if c == '\n' {
                    self.region = Region::Code;
                    return Some((i, c, true));
                }
                false
            }
            Region::Template => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == '`' {
                    self.region = Region::Code;
                }
                false
            }
            Region::LineComment => {
                if c == '\n' {
                    self.region = Region::Code;
                    true
                } else {
                    false
                }
            }
            Region::BlockComment(open) => {
                // `/*/` does not close: the `*` belongs to the opener
                if c == '*' && i > open + 1 && self.peek_is('/') {
                    self.region = Region::BlockCommentEnd;
                }
                false
            }
            Region::BlockCommentEnd => {
                self.region = Region::Code;
                false
            }
        };

        Some((i, c, is_code))
    }
}

/// `line` with any trailing `//` comment and whitespace removed
pub(crate) fn code_part(line: &str) -> &str {
    let mut scanner = CodeChars::new(line);
    let mut end = line.len();
    while let Some((i, _, _)) = scanner.next() {
        if scanner.region() == Region::LineComment {
            end = i;
            break;
        }
    }
    line[..end].trim_end()
}
