//! Lexer (tokenizer) for JavaScript/TypeScript/JSX.
//!
//! The lexer converts source text into a stream of tokens. It's called
//! on-demand by the parser, not upfront, which enables context-sensitive
//! tokenization (e.g., regex vs division, JSX text vs operators).
//!
//! Comments are not tokens. While skipping trivia the lexer records each
//! comment's span on a side channel; the high-water mark keeps a comment
//! from being recorded twice when speculative lookahead rescans the same
//! bytes.

use crate::token::{keyword_from_str, Token, TokenKind};
use liffey_ast::Span;

/// A comment's raw location, before text cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawComment {
    pub span: Span,
    pub is_block: bool,
    /// False only for a block comment that ran to end of input.
    pub terminated: bool,
}

/// The lexer state.
#[derive(Clone)]
pub struct Lexer<'a> {
    /// Source code as bytes (for fast indexing).
    source: &'a [u8],
    /// Current byte position.
    pos: usize,
    /// Start position of the current token.
    token_start: usize,
    /// Whether the previous token allows a regex to follow.
    /// This disambiguates `/regex/` vs `a / b`.
    allow_regex: bool,
    /// Comments seen so far, in source order.
    comments: Vec<RawComment>,
    /// Byte offset up to which comments are already recorded.
    comment_hwm: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
            token_start: 0,
            allow_regex: true, // At start of file, regex is allowed
            comments: Vec::new(),
            comment_hwm: 0,
        }
    }

    /// Get the current byte position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move the cursor back to `pos` for a context-sensitive rescan.
    pub fn rewind(&mut self, pos: u32) {
        self.pos = pos as usize;
    }

    /// Force the next `/` to lex as an operator, never a regex. JSX tag
    /// parsing uses this so `</` and `/>` are not eaten as regex heads.
    pub fn set_no_regex(&mut self) {
        self.allow_regex = false;
    }

    /// Take the recorded comments, leaving the channel empty.
    pub fn take_comments(&mut self) -> Vec<RawComment> {
        std::mem::take(&mut self.comments)
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.token_start = self.pos;

        if self.is_eof() {
            return self.make_token(TokenKind::Eof);
        }

        let ch = self.current();
        let kind = match ch {
            // Identifiers and keywords
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => self.scan_identifier(),

            // Numbers
            b'0'..=b'9' => self.scan_number(),

            // Strings
            b'"' | b'\'' => self.scan_string(ch),

            // Template literals
            b'`' => self.scan_template_head(),

            // Punctuation and operators
            b'(' => { self.advance(); TokenKind::LParen }
            b')' => { self.advance(); TokenKind::RParen }
            b'{' => { self.advance(); TokenKind::LBrace }
            b'}' => { self.advance(); TokenKind::RBrace }
            b'[' => { self.advance(); TokenKind::LBracket }
            b']' => { self.advance(); TokenKind::RBracket }
            b';' => { self.advance(); TokenKind::Semicolon }
            b',' => { self.advance(); TokenKind::Comma }
            b':' => { self.advance(); TokenKind::Colon }
            b'@' => { self.advance(); TokenKind::At }
            b'#' => { self.advance(); TokenKind::Hash }
            b'~' => { self.advance(); TokenKind::Tilde }

            b'.' => self.scan_dot(),
            b'?' => self.scan_question(),
            b'+' => self.scan_plus(),
            b'-' => self.scan_minus(),
            b'*' => self.scan_star(),
            b'/' => self.scan_slash(),
            b'%' => self.scan_percent(),
            b'=' => self.scan_equals(),
            b'!' => self.scan_bang(),
            b'<' => self.scan_less_than(),
            b'>' => self.scan_greater_than(),
            b'&' => self.scan_ampersand(),
            b'|' => self.scan_pipe(),
            b'^' => self.scan_caret(),

            // Multibyte UTF-8 or invalid character: consume the whole
            // scalar so the next scan starts on a char boundary.
            _ => {
                self.advance();
                while !self.is_eof() && self.current() & 0b1100_0000 == 0b1000_0000 {
                    self.advance();
                }
                TokenKind::Invalid
            }
        };

        // A `/` reads as a regex only when the previous token cannot end an
        // expression operand.
        self.allow_regex = !matches!(
            kind,
            TokenKind::Identifier
                | TokenKind::String(_)
                | TokenKind::Number(_)
                | TokenKind::BigInt(_)
                | TokenKind::Regex { .. }
                | TokenKind::TemplateNoSub(_)
                | TokenKind::TemplateTail(_)
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::Null
                | TokenKind::True
                | TokenKind::False
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        );

        self.make_token(kind)
    }

    /// Peek at the next token without consuming it.
    pub fn peek(&mut self) -> Token {
        let saved_pos = self.pos;
        let saved_start = self.token_start;
        let saved_regex = self.allow_regex;

        let token = self.next_token();

        self.pos = saved_pos;
        self.token_start = saved_start;
        self.allow_regex = saved_regex;

        token
    }

    /// Scan raw JSX text from the current position up to the next `<`, `{`,
    /// or end of input. The returned span may be empty.
    pub fn scan_jsx_text(&mut self) -> Span {
        let start = self.pos;
        while !self.is_eof() && self.current() != b'<' && self.current() != b'{' {
            self.advance();
        }
        Span::new(start as u32, self.pos as u32)
    }

    // === Helper methods ===

    fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current(&self) -> u8 {
        self.source.get(self.pos).copied().unwrap_or(0)
    }

    fn peek_char(&self) -> u8 {
        self.source.get(self.pos + 1).copied().unwrap_or(0)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.token_start as u32, self.pos as u32))
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        // SAFETY: scanning only stops on ASCII structure bytes, so start
        // and end always sit on UTF-8 boundaries.
        unsafe { std::str::from_utf8_unchecked(&self.source[start..end]) }
    }

    // === Whitespace and comments ===

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.current() {
                // Whitespace
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.advance();
                }
                // Comments
                b'/' if self.peek_char() == b'/' => {
                    let start = self.pos;
                    self.skip_line_comment();
                    self.record_comment(start, false, true);
                }
                b'/' if self.peek_char() == b'*' => {
                    let start = self.pos;
                    let terminated = self.skip_block_comment();
                    self.record_comment(start, true, terminated);
                }
                _ => break,
            }
        }
    }

    fn record_comment(&mut self, start: usize, is_block: bool, terminated: bool) {
        // Lookahead rescans the same trivia; only the first pass records.
        if start >= self.comment_hwm {
            self.comments.push(RawComment {
                span: Span::new(start as u32, self.pos as u32),
                is_block,
                terminated,
            });
            self.comment_hwm = self.pos;
        }
    }

    fn skip_line_comment(&mut self) {
        self.advance_n(2); // Skip //
        while !self.is_eof() && self.current() != b'\n' {
            self.advance();
        }
    }

    /// Returns false when the comment ran to end of input without `*/`.
    fn skip_block_comment(&mut self) -> bool {
        self.advance_n(2); // Skip /*
        while !self.is_eof() {
            if self.current() == b'*' && self.peek_char() == b'/' {
                self.advance_n(2);
                return true;
            }
            self.advance();
        }
        false
    }

    // === Token scanning ===

    fn scan_identifier(&mut self) -> TokenKind {
        while !self.is_eof() {
            match self.current() {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'$' => {
                    self.advance();
                }
                _ => break,
            }
        }

        let ident = self.slice(self.token_start, self.pos);

        // Check if it's a keyword
        keyword_from_str(ident).unwrap_or(TokenKind::Identifier)
    }

    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos;

        // Handle different number formats
        if self.current() == b'0' {
            match self.peek_char() {
                b'x' | b'X' => return self.scan_radix_number(16),
                b'b' | b'B' => return self.scan_radix_number(2),
                b'o' | b'O' => return self.scan_radix_number(8),
                _ => {}
            }
        }

        // Decimal integer part
        while self.current().is_ascii_digit() || self.current() == b'_' {
            self.advance();
        }

        // Decimal part
        if self.current() == b'.' && self.peek_char().is_ascii_digit() {
            self.advance(); // Skip .
            while self.current().is_ascii_digit() || self.current() == b'_' {
                self.advance();
            }
        }

        // Exponent part
        if self.current() == b'e' || self.current() == b'E' {
            self.advance();
            if self.current() == b'+' || self.current() == b'-' {
                self.advance();
            }
            while self.current().is_ascii_digit() {
                self.advance();
            }
        }

        // BigInt suffix
        if self.current() == b'n' {
            self.advance();
            return TokenKind::BigInt(self.slice(start, self.pos - 1).to_string());
        }

        let num_str = self.slice(start, self.pos);
        if num_str.contains('_') {
            let cleaned: String = num_str.chars().filter(|&c| c != '_').collect();
            TokenKind::Number(cleaned.parse().unwrap_or(f64::NAN))
        } else {
            TokenKind::Number(num_str.parse().unwrap_or(f64::NAN))
        }
    }

    fn scan_radix_number(&mut self, radix: u32) -> TokenKind {
        let start = self.pos;
        self.advance_n(2); // Skip 0x / 0b / 0o

        while (self.current() as char).is_digit(radix) || self.current() == b'_' {
            self.advance();
        }

        if self.current() == b'n' {
            self.advance();
            return TokenKind::BigInt(self.slice(start, self.pos - 1).to_string());
        }

        let digits = self.slice(start + 2, self.pos);
        let value = if digits.contains('_') {
            let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
            u64::from_str_radix(&cleaned, radix).unwrap_or(0) as f64
        } else {
            u64::from_str_radix(digits, radix).unwrap_or(0) as f64
        };
        TokenKind::Number(value)
    }

    fn scan_string(&mut self, quote: u8) -> TokenKind {
        self.advance(); // Skip opening quote

        // Copy whole segments between escapes so multibyte characters
        // survive intact.
        let mut value = String::new();
        let mut seg_start = self.pos;
        while !self.is_eof() && self.current() != quote && self.current() != b'\n' {
            if self.current() == b'\\' {
                value.push_str(self.slice(seg_start, self.pos));
                self.advance();
                if !self.is_eof() {
                    self.scan_escape_sequence(&mut value);
                }
                seg_start = self.pos;
            } else {
                self.advance();
            }
        }

        if self.current() == quote {
            value.push_str(self.slice(seg_start, self.pos));
            self.advance(); // Skip closing quote
            TokenKind::String(value)
        } else {
            // Unterminated string
            TokenKind::Invalid
        }
    }

    fn scan_escape_sequence(&mut self, value: &mut String) {
        let ch = self.current();
        self.advance();

        let escaped = match ch {
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'v' => '\u{b}',
            b'\\' => '\\',
            b'\'' => '\'',
            b'"' => '"',
            b'`' => '`',
            b'0' => '\0',
            // Escaped line continuation contributes nothing
            b'\n' => return,
            b'x' => self.scan_hex_escape(2),
            b'u' => {
                if self.current() == b'{' {
                    self.scan_unicode_escape_braces()
                } else {
                    self.scan_hex_escape(4)
                }
            }
            _ => ch as char,
        };
        value.push(escaped);
    }

    fn scan_hex_escape(&mut self, len: usize) -> char {
        let mut value = 0u32;
        for _ in 0..len {
            if let Some(digit) = (self.current() as char).to_digit(16) {
                value = value * 16 + digit;
                self.advance();
            } else {
                break;
            }
        }
        char::from_u32(value).unwrap_or('\u{FFFD}')
    }

    fn scan_unicode_escape_braces(&mut self) -> char {
        self.advance(); // Skip {
        let mut value = 0u32;
        while self.current() != b'}' && !self.is_eof() {
            if let Some(digit) = (self.current() as char).to_digit(16) {
                value = value * 16 + digit;
                self.advance();
            } else {
                break;
            }
        }
        if self.current() == b'}' {
            self.advance();
        }
        char::from_u32(value).unwrap_or('\u{FFFD}')
    }

    fn scan_template_head(&mut self) -> TokenKind {
        self.advance(); // Skip `
        match self.scan_template_part() {
            Some((value, true)) => TokenKind::TemplateNoSub(value),
            Some((value, false)) => TokenKind::TemplateHead(value),
            None => TokenKind::Invalid, // Unterminated template
        }
    }

    /// Scan template middle or tail (called after `}` in template).
    pub fn scan_template_continuation(&mut self) -> Token {
        self.token_start = self.pos;
        match self.scan_template_part() {
            Some((value, true)) => self.make_token(TokenKind::TemplateTail(value)),
            Some((value, false)) => self.make_token(TokenKind::TemplateMiddle(value)),
            None => self.make_token(TokenKind::Invalid),
        }
    }

    /// Scan cooked template text up to a backtick (`true`) or a `${`
    /// substitution head (`false`). `None` means the template ran off the
    /// end of the input.
    fn scan_template_part(&mut self) -> Option<(String, bool)> {
        let mut value = String::new();
        let mut seg_start = self.pos;
        while !self.is_eof() {
            match self.current() {
                b'`' => {
                    value.push_str(self.slice(seg_start, self.pos));
                    self.advance();
                    return Some((value, true));
                }
                b'$' if self.peek_char() == b'{' => {
                    value.push_str(self.slice(seg_start, self.pos));
                    self.advance_n(2);
                    return Some((value, false));
                }
                b'\\' => {
                    value.push_str(self.slice(seg_start, self.pos));
                    self.advance();
                    if !self.is_eof() {
                        self.scan_escape_sequence(&mut value);
                    }
                    seg_start = self.pos;
                }
                _ => {
                    self.advance();
                }
            }
        }
        None
    }

    fn scan_regex(&mut self) -> TokenKind {
        self.advance(); // Skip opening /
        let pattern_start = self.pos;

        // Scan pattern
        let mut in_class = false;
        while !self.is_eof() {
            match self.current() {
                b'/' if !in_class => break,
                b'[' => {
                    in_class = true;
                    self.advance();
                }
                b']' => {
                    in_class = false;
                    self.advance();
                }
                b'\\' => {
                    self.advance();
                    if !self.is_eof() {
                        self.advance();
                    }
                }
                b'\n' | b'\r' => break, // Invalid - newline in regex
                _ => self.advance(),
            }
        }

        let pattern = self.slice(pattern_start, self.pos).to_string();

        if self.current() != b'/' {
            return TokenKind::Invalid;
        }
        self.advance(); // Skip closing /

        // Scan flags
        let flags_start = self.pos;
        while matches!(
            self.current(),
            b'g' | b'i' | b'm' | b's' | b'u' | b'y' | b'd' | b'v'
        ) {
            self.advance();
        }
        let flags = self.slice(flags_start, self.pos).to_string();

        TokenKind::Regex { pattern, flags }
    }

    // === Multi-character operators ===

    fn scan_dot(&mut self) -> TokenKind {
        self.advance();
        if self.current() == b'.' && self.peek_char() == b'.' {
            self.advance_n(2);
            TokenKind::Spread
        } else if self.current().is_ascii_digit() {
            // Number starting with .
            self.pos -= 1; // Back up to rescan
            self.scan_number()
        } else {
            TokenKind::Dot
        }
    }

    fn scan_question(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'?' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::QuestionQuestionEq
                } else {
                    TokenKind::QuestionQuestion
                }
            }
            b'.' if !self.peek_char().is_ascii_digit() => {
                self.advance();
                TokenKind::QuestionDot
            }
            _ => TokenKind::Question,
        }
    }

    fn scan_plus(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'+' => { self.advance(); TokenKind::PlusPlus }
            b'=' => { self.advance(); TokenKind::PlusEq }
            _ => TokenKind::Plus,
        }
    }

    fn scan_minus(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'-' => { self.advance(); TokenKind::MinusMinus }
            b'=' => { self.advance(); TokenKind::MinusEq }
            _ => TokenKind::Minus,
        }
    }

    fn scan_star(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'*' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::StarStarEq
                } else {
                    TokenKind::StarStar
                }
            }
            b'=' => { self.advance(); TokenKind::StarEq }
            _ => TokenKind::Star,
        }
    }

    fn scan_slash(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'=' if !self.allow_regex => { self.advance(); TokenKind::SlashEq }
            _ if self.allow_regex => {
                self.pos -= 1; // Back up
                self.scan_regex()
            }
            _ => TokenKind::Slash,
        }
    }

    fn scan_percent(&mut self) -> TokenKind {
        self.advance();
        if self.current() == b'=' {
            self.advance();
            TokenKind::PercentEq
        } else {
            TokenKind::Percent
        }
    }

    fn scan_equals(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'=' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::EqEqEq
                } else {
                    TokenKind::EqEq
                }
            }
            b'>' => { self.advance(); TokenKind::Arrow }
            _ => TokenKind::Eq,
        }
    }

    fn scan_bang(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'=' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::BangEqEq
                } else {
                    TokenKind::BangEq
                }
            }
            _ => TokenKind::Bang,
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'<' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::LtLtEq
                } else {
                    TokenKind::LtLt
                }
            }
            b'=' => { self.advance(); TokenKind::LtEq }
            _ => TokenKind::Lt,
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'>' => {
                self.advance();
                match self.current() {
                    b'>' => {
                        self.advance();
                        if self.current() == b'=' {
                            self.advance();
                            TokenKind::GtGtGtEq
                        } else {
                            TokenKind::GtGtGt
                        }
                    }
                    b'=' => { self.advance(); TokenKind::GtGtEq }
                    _ => TokenKind::GtGt,
                }
            }
            b'=' => { self.advance(); TokenKind::GtEq }
            _ => TokenKind::Gt,
        }
    }

    fn scan_ampersand(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'&' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::AmpAmpEq
                } else {
                    TokenKind::AmpAmp
                }
            }
            b'=' => { self.advance(); TokenKind::AmpEq }
            _ => TokenKind::Amp,
        }
    }

    fn scan_pipe(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'|' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::PipePipeEq
                } else {
                    TokenKind::PipePipe
                }
            }
            b'=' => { self.advance(); TokenKind::PipeEq }
            _ => TokenKind::Pipe,
        }
    }

    fn scan_caret(&mut self) -> TokenKind {
        self.advance();
        if self.current() == b'=' {
            self.advance();
            TokenKind::CaretEq
        } else {
            TokenKind::Caret
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if matches!(token.kind, TokenKind::Eof) {
                break;
            }
            tokens.push(token.kind);
        }
        tokens
    }

    #[test]
    fn test_identifiers_and_keywords() {
        assert_eq!(
            tokenize("foo const _baz $qux let"),
            vec![
                TokenKind::Identifier,
                TokenKind::Const,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Let,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokenize("42 3.14 0xff 0b101 0o77 1_000"),
            vec![
                TokenKind::Number(42.0),
                TokenKind::Number(3.14),
                TokenKind::Number(255.0),
                TokenKind::Number(5.0),
                TokenKind::Number(63.0),
                TokenKind::Number(1000.0),
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            tokenize(r#""hello" 'wor\nld'"#),
            vec![
                TokenKind::String("hello".into()),
                TokenKind::String("wor\nld".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_invalid() {
        assert_eq!(tokenize("\"oops"), vec![TokenKind::Invalid]);
    }

    #[test]
    fn test_regex_vs_division() {
        assert_eq!(
            tokenize("a / b"),
            vec![TokenKind::Identifier, TokenKind::Slash, TokenKind::Identifier]
        );
        assert_eq!(
            tokenize("x = /ab+c/gi"),
            vec![
                TokenKind::Identifier,
                TokenKind::Eq,
                TokenKind::Regex {
                    pattern: "ab+c".into(),
                    flags: "gi".into()
                },
            ]
        );
    }

    #[test]
    fn test_comment_channel() {
        let source = "a // one\nb /* two */ c";
        let mut lexer = Lexer::new(source);
        while !matches!(lexer.next_token().kind, TokenKind::Eof) {}
        let comments = lexer.take_comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(&source[comments[0].span.start as usize..comments[0].span.end as usize], "// one");
        assert!(!comments[0].is_block);
        assert_eq!(&source[comments[1].span.start as usize..comments[1].span.end as usize], "/* two */");
        assert!(comments[1].is_block);
    }

    #[test]
    fn test_peek_does_not_duplicate_comments() {
        let mut lexer = Lexer::new("a /* c */ b");
        lexer.next_token(); // a
        let _ = lexer.peek(); // scans past the comment speculatively
        lexer.next_token(); // b, rescans the same trivia
        assert_eq!(lexer.take_comments().len(), 1);
    }

    #[test]
    fn test_string_is_not_a_comment() {
        let mut lexer = Lexer::new(r#"const url = "https://example.com";"#);
        while !matches!(lexer.next_token().kind, TokenKind::Eof) {}
        assert!(lexer.take_comments().is_empty());
    }

    #[test]
    fn test_template_literal_no_sub() {
        assert_eq!(
            tokenize("`hello world`"),
            vec![TokenKind::TemplateNoSub("hello world".into())]
        );
    }

    #[test]
    fn test_jsx_text_scan() {
        let mut lexer = Lexer::new("hello {x}");
        let span = lexer.scan_jsx_text();
        assert_eq!(span, Span::new(0, 6));
    }
}
