//! Comment extraction.
//!
//! The lexer records every comment it skips; after the parse those raw
//! ranges are turned into [`Comment`]s with the delimiters stripped. Only
//! the `//`, `/*`, and `*/` markers are removed; interior whitespace and
//! decoration stay untouched, so `// Line 1` yields `" Line 1"`.

use crate::lexer::RawComment;
use liffey_ast::Span;

/// A comment with its cleaned text and original location.
///
/// `span` covers the comment including its delimiters; `text` is a slice of
/// the source between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment<'a> {
    pub text: &'a str,
    pub span: Span,
    pub is_block: bool,
}

impl Comment<'_> {
    pub fn is_line(&self) -> bool {
        !self.is_block
    }
}

pub(crate) fn clean(source: &str, raw: RawComment) -> Comment<'_> {
    let full = raw.span.text(source);
    let text = if raw.is_block {
        // An unterminated block comment has no closing marker to strip.
        let inner = full.strip_prefix("/*").unwrap_or(full);
        inner.strip_suffix("*/").unwrap_or(inner)
    } else {
        full.strip_prefix("//").unwrap_or(full)
    };
    Comment {
        text,
        span: raw.span,
        is_block: raw.is_block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_line_comment() {
        let source = "// Line 1\nlet x;";
        let raw = RawComment {
            span: Span::new(0, 9),
            is_block: false,
            terminated: true,
        };
        let comment = clean(source, raw);
        assert_eq!(comment.text, " Line 1");
        assert!(comment.is_line());
    }

    #[test]
    fn test_clean_block_comment() {
        let source = "/* Block\n   comment */";
        let raw = RawComment {
            span: Span::new(0, source.len() as u32),
            is_block: true,
            terminated: true,
        };
        let comment = clean(source, raw);
        assert_eq!(comment.text, " Block\n   comment ");
        assert!(comment.is_block);
    }

    #[test]
    fn test_clean_unterminated_block() {
        let source = "/* never closed";
        let raw = RawComment {
            span: Span::new(0, source.len() as u32),
            is_block: true,
            terminated: false,
        };
        assert_eq!(clean(source, raw).text, " never closed");
    }

    #[test]
    fn test_clean_empty_comments() {
        assert_eq!(
            clean("//", RawComment { span: Span::new(0, 2), is_block: false, terminated: true })
                .text,
            ""
        );
        assert_eq!(
            clean("/**/", RawComment { span: Span::new(0, 4), is_block: true, terminated: true })
                .text,
            ""
        );
    }
}
