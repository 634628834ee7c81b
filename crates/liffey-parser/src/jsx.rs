//! JSX parsing.
//!
//! Inside a tag the parser consumes ordinary tokens, always lexed with
//! regex literals disabled so `/>` and `</` split into punctuation.
//! Between tags it switches to raw scanning: [`Lexer::scan_jsx_text`]
//! returns the verbatim text up to the next `<` or `{`, which keeps
//! whitespace and newlines in the tree exactly as written.
//!
//! While raw-scanning, the lookahead token is stale. The convention is
//! that every helper here leaves the lexer positioned immediately after
//! the last byte it consumed and the caller reloads the lookahead before
//! returning to ordinary token parsing.

use crate::diagnostics::Diagnostic;
use crate::parser::{PResult, Parser};
use crate::token::{Token, TokenKind};
use liffey_ast::ast::{Expr, ExprKind};
use liffey_ast::{
    JsxAttrItem, JsxAttrValue, JsxAttribute, JsxChild, JsxClosingElement, JsxElement,
    JsxExprContainer, JsxFragment, JsxIdent, JsxName, JsxOpeningElement, JsxSpreadAttribute,
    JsxText,
};
use liffey_ast::Span;
use rustc_hash::FxHashSet;

enum JsxParsed<'a> {
    Element(&'a JsxElement<'a>),
    Fragment(&'a JsxFragment<'a>),
}

impl<'a> Parser<'a> {
    /// Entry point from expression position, at a `<` token.
    pub(crate) fn parse_jsx_root(&mut self) -> PResult<Expr<'a>> {
        let parsed = self.parse_jsx_element_or_fragment()?;
        // The final `>` was consumed manually; restore the lookahead.
        self.reload_current();
        Ok(match parsed {
            JsxParsed::Element(element) => Expr::new(ExprKind::JsxElement(element), element.span),
            JsxParsed::Fragment(fragment) => {
                Expr::new(ExprKind::JsxFragment(fragment), fragment.span)
            }
        })
    }

    /// Consume a token inside a tag. Regex scanning is disabled for the
    /// next token so `/` is always punctuation.
    fn advance_in_tag(&mut self) -> Token {
        self.lexer.set_no_regex();
        self.advance()
    }

    /// Mark the current lookahead as consumed without lexing past it.
    /// Used for the tokens that border raw JSX text.
    fn consume_raw(&mut self) {
        self.prev_end = self.current.span.end;
    }

    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.source.as_bytes().get(pos).copied()
    }

    fn parse_jsx_element_or_fragment(&mut self) -> PResult<JsxParsed<'a>> {
        let start = self.current.span.start;
        self.advance_in_tag(); // <

        // Fragment: `<>children</>`
        if matches!(self.current.kind, TokenKind::Gt) {
            self.consume_raw();
            let children = self.parse_jsx_children()?;

            self.reload_current(); // <
            self.advance_in_tag();
            if !matches!(self.current.kind, TokenKind::Slash) {
                return Err(Diagnostic::error(
                    "Expected closing fragment tag",
                    self.current.span,
                ));
            }
            self.advance();
            if !matches!(self.current.kind, TokenKind::Gt) {
                return Err(Diagnostic::error(
                    "Expected '>' to close fragment",
                    self.current.span,
                ));
            }
            self.consume_raw();

            let fragment = self.arena.alloc(JsxFragment {
                children,
                span: Span::new(start, self.prev_end),
            });
            return Ok(JsxParsed::Fragment(fragment));
        }

        let name = self.parse_jsx_name()?;
        let attributes = self.parse_jsx_attributes()?;

        // Self-closing: `<br />`
        if matches!(self.current.kind, TokenKind::Slash) {
            self.advance();
            if !matches!(self.current.kind, TokenKind::Gt) {
                return Err(Diagnostic::error(
                    "Expected '>' after '/'",
                    self.current.span,
                ));
            }
            self.consume_raw();
            let span = Span::new(start, self.prev_end);
            let element = self.arena.alloc(JsxElement {
                opening: JsxOpeningElement {
                    name,
                    attributes,
                    self_closing: true,
                    span,
                },
                children: &[],
                closing: None,
                span,
            });
            return Ok(JsxParsed::Element(element));
        }

        if !matches!(self.current.kind, TokenKind::Gt) {
            return Err(Diagnostic::error(
                "Expected '>' in JSX opening tag",
                self.current.span,
            ));
        }
        self.consume_raw();
        let opening = JsxOpeningElement {
            name,
            attributes,
            self_closing: false,
            span: Span::new(start, self.prev_end),
        };

        let children = self.parse_jsx_children()?;

        // Closing tag: `</name>`
        self.reload_current(); // <
        let close_start = self.current.span.start;
        self.advance_in_tag();
        if !matches!(self.current.kind, TokenKind::Slash) {
            return Err(Diagnostic::error(
                "Expected JSX closing tag",
                self.current.span,
            ));
        }
        self.advance_in_tag();
        let close_name = self.parse_jsx_name()?;
        if !matches!(self.current.kind, TokenKind::Gt) {
            return Err(Diagnostic::error(
                "Expected '>' in JSX closing tag",
                self.current.span,
            ));
        }
        self.consume_raw();
        let closing = JsxClosingElement {
            name: close_name,
            span: Span::new(close_start, self.prev_end),
        };

        let open_text = self.span_text(opening.name.span());
        let close_text = self.span_text(closing.name.span());
        if open_text != close_text {
            self.errors.push(Diagnostic::error(
                format!("Mismatched JSX closing tag: expected </{open_text}>, found </{close_text}>"),
                closing.span,
            ));
        }

        let element = self.arena.alloc(JsxElement {
            opening,
            children,
            closing: Some(closing),
            span: Span::new(start, self.prev_end),
        });
        Ok(JsxParsed::Element(element))
    }

    /// `div`, `Foo.Bar`, or a namespaced/dashed name.
    fn parse_jsx_name(&mut self) -> PResult<JsxName<'a>> {
        let first = self.parse_jsx_ident()?;
        let mut name = JsxName::Ident(first);
        while matches!(self.current.kind, TokenKind::Dot) {
            self.advance_in_tag();
            let property = self.parse_jsx_ident()?;
            let span = Span::new(name.span().start, property.span.end);
            name = JsxName::Member {
                object: self.arena.alloc(name),
                property,
                span,
            };
        }
        Ok(name)
    }

    /// A JSX identifier. Keywords are fine (`<for>` is a valid custom tag
    /// name), and adjacent `-`/`:` sequences fold into one identifier so
    /// `data-value` and `xmlns:xlink` stay whole.
    fn parse_jsx_ident(&mut self) -> PResult<JsxIdent<'a>> {
        if !self.is_jsx_name_token() {
            return Err(Diagnostic::error("Expected JSX name", self.current.span));
        }
        let start = self.current.span.start;
        self.advance_in_tag();

        while matches!(self.current.kind, TokenKind::Minus | TokenKind::Colon)
            && self.current.span.start == self.prev_end
        {
            self.advance_in_tag();
            if self.is_jsx_name_token() && self.current.span.start == self.prev_end {
                self.advance_in_tag();
            } else {
                return Err(Diagnostic::error(
                    "Expected JSX name continuation",
                    self.current.span,
                ));
            }
        }

        let span = Span::new(start, self.prev_end);
        Ok(JsxIdent {
            name: self.span_text(span),
            span,
        })
    }

    fn is_jsx_name_token(&self) -> bool {
        matches!(self.current.kind, TokenKind::Identifier) || self.current.kind.is_keyword()
    }

    fn parse_jsx_attributes(&mut self) -> PResult<&'a [JsxAttrItem<'a>]> {
        let mut attrs = self.arena.vec();
        let mut seen: FxHashSet<&str> = FxHashSet::default();

        loop {
            if matches!(self.current.kind, TokenKind::LBrace) {
                // Spread attribute: `{...props}`
                let spread_start = self.current.span.start;
                self.advance();
                self.expect(TokenKind::Spread)?;
                let argument = self.parse_assignment()?;
                if !matches!(self.current.kind, TokenKind::RBrace) {
                    return Err(Diagnostic::error(
                        "Expected '}' after spread attribute",
                        self.current.span,
                    ));
                }
                self.advance_in_tag();
                attrs.push(JsxAttrItem::Spread(JsxSpreadAttribute {
                    argument,
                    span: Span::new(spread_start, self.prev_end),
                }));
                continue;
            }

            if !self.is_jsx_name_token() {
                break;
            }

            let name = self.parse_jsx_ident()?;
            if !seen.insert(name.name) {
                self.errors.push(Diagnostic::warning(
                    format!("Duplicate JSX attribute `{}`", name.name),
                    name.span,
                ));
            }

            let value = if matches!(self.current.kind, TokenKind::Eq) {
                self.advance_in_tag();
                Some(self.parse_jsx_attr_value()?)
            } else {
                None
            };

            attrs.push(JsxAttrItem::Attribute(JsxAttribute {
                name,
                value,
                span: Span::new(name.span.start, self.prev_end),
            }));
        }

        Ok(attrs.into_bump_slice())
    }

    fn parse_jsx_attr_value(&mut self) -> PResult<JsxAttrValue<'a>> {
        match &self.current.kind {
            TokenKind::String(value) => {
                let value = self.arena.alloc_str(value);
                let span = self.current.span;
                self.advance_in_tag();
                Ok(JsxAttrValue::StringLit { value, span })
            }
            TokenKind::LBrace => {
                let start = self.current.span.start;
                self.advance();
                let expr = if matches!(self.current.kind, TokenKind::RBrace) {
                    None
                } else {
                    Some(self.parse_assignment()?)
                };
                if !matches!(self.current.kind, TokenKind::RBrace) {
                    return Err(Diagnostic::error(
                        "Expected '}' after attribute expression",
                        self.current.span,
                    ));
                }
                self.advance_in_tag();
                Ok(JsxAttrValue::Container(JsxExprContainer {
                    expr,
                    span: Span::new(start, self.prev_end),
                }))
            }
            TokenKind::Lt => {
                let parsed = self.parse_jsx_element_or_fragment()?;
                self.lexer.set_no_regex();
                self.reload_current();
                Ok(match parsed {
                    JsxParsed::Element(element) => JsxAttrValue::Element(element),
                    JsxParsed::Fragment(fragment) => JsxAttrValue::Fragment(fragment),
                })
            }
            _ => Err(Diagnostic::error(
                "Expected JSX attribute value",
                self.current.span,
            )),
        }
    }

    /// Children of an element or fragment. On entry the lexer sits right
    /// after the opening `>`; on exit it sits at the `<` of the closing
    /// tag, lookahead stale.
    fn parse_jsx_children(&mut self) -> PResult<&'a [JsxChild<'a>]> {
        let mut children = self.arena.vec();

        loop {
            let text_span = self.lexer.scan_jsx_text();
            if !text_span.is_empty() {
                children.push(JsxChild::Text(JsxText {
                    value: self.span_text(text_span),
                    span: text_span,
                }));
            }

            match self.byte_at(self.lexer.pos()) {
                None => {
                    return Err(Diagnostic::error(
                        "Unterminated JSX element",
                        Span::empty(self.lexer.pos() as u32),
                    ));
                }
                Some(b'{') => {
                    self.reload_current(); // {
                    let start = self.current.span.start;
                    self.advance();
                    let expr = if matches!(self.current.kind, TokenKind::RBrace) {
                        None
                    } else {
                        Some(self.parse_expression()?)
                    };
                    if !matches!(self.current.kind, TokenKind::RBrace) {
                        return Err(Diagnostic::error(
                            "Expected '}' in JSX expression container",
                            self.current.span,
                        ));
                    }
                    self.consume_raw();
                    children.push(JsxChild::Container(JsxExprContainer {
                        expr,
                        span: Span::new(start, self.prev_end),
                    }));
                }
                Some(_) => {
                    // `<`: either a child element or the closing tag.
                    if self.byte_at(self.lexer.pos() + 1) == Some(b'/') {
                        return Ok(children.into_bump_slice());
                    }
                    self.reload_current(); // <
                    let parsed = self.parse_jsx_element_or_fragment()?;
                    children.push(match parsed {
                        JsxParsed::Element(element) => JsxChild::Element(element),
                        JsxParsed::Fragment(fragment) => JsxChild::Fragment(fragment),
                    });
                }
            }
        }
    }
}
