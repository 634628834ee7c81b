//! TypeScript-specific parsing.
//!
//! `type`, `interface`, `enum`, and `readonly` are contextual: they are
//! ordinary identifier tokens, and the statement dispatcher only routes
//! here when the dialect is TypeScript and the following token makes a
//! declaration unambiguous. Plain JavaScript keeps using them as names.

use crate::diagnostics::Diagnostic;
use crate::parser::{PResult, Parser};
use crate::token::{Token, TokenKind};
use liffey_ast::ast::{Expr, Lit, StmtKind};
use liffey_ast::Span;
use liffey_ast::{
    TsEnum, TsEnumMember, TsInterface, TsInterfaceBody, TsSignature, TsSignatureKind, TsType,
    TsTypeAlias, TsTypeAnnotation, TsTypeKind, TsTypeParam, TsTypeParamDecl,
};

impl<'a> Parser<'a> {
    /// `type Name<T> = ...;` — the caller has verified the contextual
    /// `type` keyword.
    pub(crate) fn parse_ts_type_alias(&mut self) -> PResult<StmtKind<'a>> {
        self.advance(); // type
        let name = self.parse_ident()?;
        let type_params = if matches!(self.peek(), TokenKind::Lt) {
            Some(self.parse_type_params()?)
        } else {
            None
        };
        self.expect(TokenKind::Eq)?;
        let type_ann = self.parse_ts_type()?;
        self.eat(TokenKind::Semicolon);
        Ok(StmtKind::TsTypeAlias(self.arena.alloc(TsTypeAlias {
            name,
            type_params,
            type_ann,
        })))
    }

    /// `interface Name<T> extends A, B { ... }`
    pub(crate) fn parse_ts_interface(&mut self) -> PResult<StmtKind<'a>> {
        self.advance(); // interface
        let name = self.parse_ident()?;
        let type_params = if matches!(self.peek(), TokenKind::Lt) {
            Some(self.parse_type_params()?)
        } else {
            None
        };

        let mut extends = self.arena.vec();
        if self.eat(TokenKind::Extends) {
            loop {
                extends.push(self.parse_ts_type()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        let body_start = self.current.span.start;
        self.expect(TokenKind::LBrace)?;
        let mut members = self.arena.vec();
        while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
            members.push(self.parse_ts_signature()?);
            // Members may be separated by `;`, `,`, or nothing.
            while self.eat(TokenKind::Semicolon) || self.eat(TokenKind::Comma) {}
        }
        self.expect(TokenKind::RBrace)?;

        let body = TsInterfaceBody {
            members: members.into_bump_slice(),
            span: Span::new(body_start, self.prev_end),
        };
        Ok(StmtKind::TsInterface(self.arena.alloc(TsInterface {
            name,
            type_params,
            extends: extends.into_bump_slice(),
            body,
        })))
    }

    fn parse_ts_signature(&mut self) -> PResult<TsSignature<'a>> {
        let start = self.current.span.start;

        let readonly = self.is_contextual("readonly")
            && !matches!(
                self.lexer.peek().kind,
                TokenKind::Colon | TokenKind::Question | TokenKind::LParen | TokenKind::Comma
            );
        if readonly {
            self.advance();
        }

        let key = self.parse_signature_key()?;
        let optional = self.eat(TokenKind::Question);

        let kind = if matches!(self.peek(), TokenKind::LParen) {
            self.advance();
            let params = self.parse_params()?;
            self.expect(TokenKind::RParen)?;
            let return_type = if matches!(self.peek(), TokenKind::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };
            TsSignatureKind::Method {
                key,
                optional,
                params,
                return_type,
            }
        } else {
            let type_ann = if matches!(self.peek(), TokenKind::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };
            TsSignatureKind::Property {
                key,
                optional,
                readonly,
                type_ann,
            }
        };

        Ok(TsSignature {
            kind,
            span: Span::new(start, self.prev_end),
        })
    }

    fn parse_signature_key(&mut self) -> PResult<&'a str> {
        if let TokenKind::String(value) = self.peek() {
            let key = self.arena.alloc_str(value);
            self.advance();
            Ok(key)
        } else if matches!(self.peek(), TokenKind::Identifier) || self.peek().is_keyword() {
            let token = self.advance();
            Ok(self.span_text(token.span))
        } else {
            Err(Diagnostic::error(
                "Expected interface member name",
                self.current.span,
            ))
        }
    }

    /// `enum E { A, B = 1 }` — `const` has already been consumed when
    /// `is_const` is set.
    pub(crate) fn parse_ts_enum(&mut self, is_const: bool) -> PResult<StmtKind<'a>> {
        self.advance(); // enum
        let name = self.parse_ident()?;
        self.expect(TokenKind::LBrace)?;

        let mut members = self.arena.vec();
        while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
            let member_start = self.current.span.start;
            let member_name = self.parse_signature_key()?;
            let init = if self.eat(TokenKind::Eq) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            members.push(TsEnumMember {
                name: member_name,
                init,
                span: Span::new(member_start, self.prev_end),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;

        Ok(StmtKind::TsEnum(self.arena.alloc(TsEnum {
            name,
            is_const,
            members: members.into_bump_slice(),
        })))
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// `: Type`, producing an annotation that spans from the colon.
    pub(crate) fn parse_type_annotation(&mut self) -> PResult<&'a TsTypeAnnotation<'a>> {
        let colon = self.expect(TokenKind::Colon)?;
        let type_ann = self.parse_ts_type()?;
        Ok(self.arena.alloc(TsTypeAnnotation {
            type_ann,
            span: Span::new(colon.span.start, self.prev_end),
        }))
    }

    /// A type expression: union of intersections of postfix types.
    pub(crate) fn parse_ts_type(&mut self) -> PResult<TsType<'a>> {
        let start = self.current.span.start;
        // A leading `|` is allowed: `type T = | A | B`.
        self.eat(TokenKind::Pipe);

        let first = self.parse_intersection_type()?;
        if !matches!(self.peek(), TokenKind::Pipe) {
            return Ok(first);
        }

        let mut parts = self.arena.vec();
        parts.push(first);
        while self.eat(TokenKind::Pipe) {
            parts.push(self.parse_intersection_type()?);
        }
        Ok(TsType::new(
            TsTypeKind::Union(parts.into_bump_slice()),
            Span::new(start, self.prev_end),
        ))
    }

    fn parse_intersection_type(&mut self) -> PResult<TsType<'a>> {
        let start = self.current.span.start;
        let first = self.parse_postfix_type()?;
        if !matches!(self.peek(), TokenKind::Amp) {
            return Ok(first);
        }

        let mut parts = self.arena.vec();
        parts.push(first);
        while self.eat(TokenKind::Amp) {
            parts.push(self.parse_postfix_type()?);
        }
        Ok(TsType::new(
            TsTypeKind::Intersection(parts.into_bump_slice()),
            Span::new(start, self.prev_end),
        ))
    }

    fn parse_postfix_type(&mut self) -> PResult<TsType<'a>> {
        let start = self.current.span.start;
        let mut ty = self.parse_primary_type()?;
        while matches!(self.peek(), TokenKind::LBracket) {
            self.advance();
            self.expect(TokenKind::RBracket)?;
            ty = TsType::new(
                TsTypeKind::Array(self.arena.alloc(ty)),
                Span::new(start, self.prev_end),
            );
        }
        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> PResult<TsType<'a>> {
        let span = self.current.span;

        match self.peek().clone() {
            TokenKind::String(value) => {
                self.advance();
                Ok(TsType::new(
                    TsTypeKind::Lit(Lit::String(self.arena.alloc_str(&value))),
                    span,
                ))
            }
            TokenKind::Number(n) => {
                self.advance();
                Ok(TsType::new(TsTypeKind::Lit(Lit::Number(n)), span))
            }
            TokenKind::BigInt(digits) => {
                self.advance();
                Ok(TsType::new(
                    TsTypeKind::Lit(Lit::BigInt(self.arena.alloc_str(&digits))),
                    span,
                ))
            }
            TokenKind::True => {
                self.advance();
                Ok(TsType::new(TsTypeKind::Lit(Lit::Bool(true)), span))
            }
            TokenKind::False => {
                self.advance();
                Ok(TsType::new(TsTypeKind::Lit(Lit::Bool(false)), span))
            }
            TokenKind::Null => {
                self.advance();
                Ok(TsType::new(TsTypeKind::Lit(Lit::Null), span))
            }
            TokenKind::LParen => {
                if self.paren_type_is_function() {
                    self.parse_fn_type()
                } else {
                    self.advance();
                    let inner = self.parse_ts_type()?;
                    self.expect(TokenKind::RParen)?;
                    Ok(inner)
                }
            }
            // Keyword-named types become plain references.
            TokenKind::Void | TokenKind::This => {
                let token = self.advance();
                Ok(TsType::new(
                    TsTypeKind::Ref {
                        name: self.span_text(token.span),
                        type_args: &[],
                    },
                    span,
                ))
            }
            kind if matches!(kind, TokenKind::Identifier) || kind.is_soft_keyword() => {
                self.parse_type_reference()
            }
            _ => Err(Diagnostic::error(
                format!("Expected type, got {:?}", self.peek()),
                self.current.span,
            )),
        }
    }

    /// `Foo`, `ns.Foo`, `Map<K, V>`. Qualified names keep their dots.
    fn parse_type_reference(&mut self) -> PResult<TsType<'a>> {
        let start = self.current.span.start;
        self.parse_ident()?;
        while self.eat(TokenKind::Dot) {
            self.parse_ident()?;
        }
        let name = self.span_text(Span::new(start, self.prev_end));

        let type_args = if matches!(self.peek(), TokenKind::Lt) {
            self.advance();
            let mut args = self.arena.vec();
            loop {
                args.push(self.parse_ts_type()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect_gt()?;
            args.into_bump_slice()
        } else {
            &[]
        };

        Ok(TsType::new(
            TsTypeKind::Ref { name, type_args },
            Span::new(start, self.prev_end),
        ))
    }

    /// Decide `(a: T) => U` versus a parenthesized type by scanning a
    /// cloned lexer to the matching `)`.
    fn paren_type_is_function(&mut self) -> bool {
        let mut probe = self.lexer.clone();
        let mut depth = 1u32;
        loop {
            match probe.next_token().kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
        }
        matches!(probe.next_token().kind, TokenKind::Arrow)
    }

    fn parse_fn_type(&mut self) -> PResult<TsType<'a>> {
        let start = self.current.span.start;
        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Arrow)?;
        let return_type = self.parse_ts_type()?;
        Ok(TsType::new(
            TsTypeKind::Fn {
                params,
                return_type: self.arena.alloc(return_type),
            },
            Span::new(start, self.prev_end),
        ))
    }

    /// Declaration-site type parameters: `<T, U extends V = W>`.
    pub(crate) fn parse_type_params(&mut self) -> PResult<&'a TsTypeParamDecl<'a>> {
        let start = self.current.span.start;
        self.expect(TokenKind::Lt)?;

        let mut params = self.arena.vec();
        loop {
            let param_start = self.current.span.start;
            let name = self.parse_ident()?;
            let constraint = if self.eat(TokenKind::Extends) {
                Some(self.parse_ts_type()?)
            } else {
                None
            };
            let default = if self.eat(TokenKind::Eq) {
                Some(self.parse_ts_type()?)
            } else {
                None
            };
            params.push(TsTypeParam {
                name,
                constraint,
                default,
                span: Span::new(param_start, self.prev_end),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_gt()?;

        Ok(self.arena.alloc(TsTypeParamDecl {
            params: params.into_bump_slice(),
            span: Span::new(start, self.prev_end),
        }))
    }

    /// Speculatively parse `<T, U>` at a call site; `None` restores the
    /// parser when the tokens were comparisons instead.
    pub(crate) fn try_parse_generic_call_args(&mut self) -> PResult<Option<&'a [Expr<'a>]>> {
        let saved_lexer = self.lexer.clone();
        let saved_current = self.current.clone();
        let saved_prev = self.prev_end;

        let ok = (|| -> PResult<()> {
            self.expect(TokenKind::Lt)?;
            loop {
                self.parse_ts_type()?;
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect_gt()
        })()
        .is_ok();

        if ok && matches!(self.peek(), TokenKind::LParen) {
            // The type arguments themselves are not materialized; the call
            // node carries only its value arguments.
            return Ok(Some(self.parse_call_args()?));
        }

        self.lexer = saved_lexer;
        self.current = saved_current;
        self.prev_end = saved_prev;
        Ok(None)
    }

    /// Consume one `>`, splitting `>>` and `>>>` so nested generics close
    /// one level at a time.
    pub(crate) fn expect_gt(&mut self) -> PResult<()> {
        let span = self.current.span;
        match self.peek() {
            TokenKind::Gt => {
                self.advance();
                Ok(())
            }
            TokenKind::GtGt => {
                self.prev_end = span.start + 1;
                self.current = Token::new(TokenKind::Gt, Span::new(span.start + 1, span.end));
                Ok(())
            }
            TokenKind::GtGtGt => {
                self.prev_end = span.start + 1;
                self.current = Token::new(TokenKind::GtGt, Span::new(span.start + 1, span.end));
                Ok(())
            }
            _ => Err(Diagnostic::error(
                format!("Expected '>', got {:?}", self.peek()),
                span,
            )),
        }
    }
}
