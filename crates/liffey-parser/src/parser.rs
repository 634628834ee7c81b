//! Recursive-descent JavaScript parser with statement-level error recovery.
//!
//! All nodes are allocated in the caller's [`Allocator`]; identifier and
//! text payloads are zero-copy slices of the source. TypeScript and JSX
//! productions live in the `ts` and `jsx` modules as extension `impl`s on
//! [`Parser`].
//!
//! A syntax error abandons the current statement, records a [`Diagnostic`],
//! and resynchronizes at the next statement boundary, so one bad statement
//! never hides the rest of the file.

use crate::comments::{self, Comment};
use crate::diagnostics::Diagnostic;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use crate::{ParseResult, SourceType};
use liffey_ast::ast::*;
use liffey_ast::{Allocator, Span};

/// Recursion limit for nested statements and expressions. Inputs deeper
/// than this abort the parse with `panicked` set instead of overflowing
/// the stack.
pub(crate) const MAX_PARSE_DEPTH: u32 = 256;

pub(crate) type PResult<T> = Result<T, Diagnostic>;

/// The parser state.
pub struct Parser<'a> {
    pub(crate) arena: &'a Allocator,
    pub(crate) lexer: Lexer<'a>,
    pub(crate) current: Token,
    /// End offset of the most recently consumed token. Node spans end here,
    /// not at the lookahead token.
    pub(crate) prev_end: u32,
    pub(crate) source: &'a str,
    pub(crate) source_type: SourceType,
    pub(crate) errors: Vec<Diagnostic>,
    pub(crate) depth: u32,
    pub(crate) panicked: bool,
}

impl<'a> Parser<'a> {
    /// Create a new parser over `source`, allocating into `arena`.
    pub fn new(arena: &'a Allocator, source: &'a str, source_type: SourceType) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            arena,
            lexer,
            current,
            prev_end: 0,
            source,
            source_type,
            errors: Vec::new(),
            depth: 0,
            panicked: false,
        }
    }

    /// Parse the whole program, recovering at statement boundaries.
    pub fn parse(mut self) -> ParseResult<'a> {
        let mut stmts = self.arena.vec();

        while !self.is_eof() {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(diag) => {
                    self.errors.push(diag);
                    if self.panicked {
                        break;
                    }
                    self.synchronize(true);
                }
            }
        }

        let body = stmts.into_bump_slice();
        let program = Program::new(body, Span::new(0, self.source.len() as u32));

        let mut comments: Vec<Comment<'a>> = Vec::new();
        for raw in self.lexer.take_comments() {
            if !raw.terminated {
                self.errors
                    .push(Diagnostic::error("Unterminated block comment", raw.span));
            }
            comments.push(comments::clean(self.source, raw));
        }

        tracing::debug!(
            statements = program.body.len(),
            errors = self.errors.len(),
            comments = comments.len(),
            panicked = self.panicked,
            "parse finished"
        );

        ParseResult {
            program,
            errors: self.errors,
            comments,
            panicked: self.panicked,
        }
    }

    // =========================================================================
    // Token Handling
    // =========================================================================

    pub(crate) fn peek(&self) -> &TokenKind {
        &self.current.kind
    }

    pub(crate) fn is_eof(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    pub(crate) fn is_identifier(&self) -> bool {
        matches!(self.peek(), TokenKind::Identifier) || self.peek().is_soft_keyword()
    }

    pub(crate) fn advance(&mut self) -> Token {
        self.prev_end = self.current.span.end;
        std::mem::replace(&mut self.current, self.lexer.next_token())
    }

    /// Re-prime the lookahead after a raw lexer scan left it stale.
    pub(crate) fn reload_current(&mut self) {
        self.current = self.lexer.next_token();
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if std::mem::discriminant(self.peek()) == std::mem::discriminant(&kind) {
            Ok(self.advance())
        } else {
            Err(Diagnostic::error(
                format!("Expected {:?}, got {:?}", kind, self.peek()),
                self.current.span,
            ))
        }
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if std::mem::discriminant(self.peek()) == std::mem::discriminant(&kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn span_text(&self, span: Span) -> &'a str {
        &self.source[span.start as usize..span.end as usize]
    }

    /// Current token's source text.
    pub(crate) fn current_text(&self) -> &'a str {
        self.span_text(self.current.span)
    }

    /// True when the current token is the identifier `word`.
    pub(crate) fn is_contextual(&self, word: &str) -> bool {
        matches!(self.peek(), TokenKind::Identifier) && self.current_text() == word
    }

    pub(crate) fn is_ts(&self) -> bool {
        self.source_type.is_typescript()
    }

    pub(crate) fn is_jsx(&self) -> bool {
        self.source_type.has_jsx()
    }

    fn unexpected(&self) -> Diagnostic {
        Diagnostic::error(
            format!("Unexpected token {:?}", self.peek()),
            self.current.span,
        )
    }

    /// Diagnose module-only syntax in a classic script; the declaration is
    /// still parsed so the rest of the file recovers.
    fn check_module_only(&mut self, what: &str) {
        if self.source_type == SourceType::Script {
            self.errors.push(Diagnostic::error(
                format!("`{what}` declarations are not allowed in classic scripts"),
                self.current.span,
            ));
        }
    }

    /// Skip ahead to the next likely statement boundary.
    fn synchronize(&mut self, top_level: bool) {
        let before = self.current.span.start;
        loop {
            match &self.current.kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                TokenKind::RBrace => break,
                TokenKind::Class
                | TokenKind::Function
                | TokenKind::Var
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::If
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::Switch
                | TokenKind::Return
                | TokenKind::Try
                | TokenKind::Throw
                | TokenKind::Import
                | TokenKind::Export => {
                    if self.current.span.start > before {
                        break;
                    }
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
        // A stray closer at top level would stall recovery forever.
        if top_level && self.current.span.start == before && !self.is_eof() {
            self.advance();
        }
        tracing::trace!(
            from = before,
            to = self.current.span.start,
            "resynchronized after parse error"
        );
    }

    fn check_depth(&mut self) -> PResult<()> {
        if self.depth >= MAX_PARSE_DEPTH {
            self.panicked = true;
            return Err(Diagnostic::error(
                "Maximum parse depth exceeded",
                self.current.span,
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Statement Parsing
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> PResult<Stmt<'a>> {
        self.check_depth()?;
        self.depth += 1;
        let result = self.parse_statement_inner();
        self.depth -= 1;
        result
    }

    fn parse_statement_inner(&mut self) -> PResult<Stmt<'a>> {
        let start = self.current.span.start;

        let kind = match &self.current.kind {
            TokenKind::Let | TokenKind::Var => self.parse_var_decl()?,
            TokenKind::Const => {
                if self.is_ts() && self.peek_is_contextual("enum") {
                    self.advance(); // const
                    self.parse_ts_enum(true)?
                } else {
                    self.parse_var_decl()?
                }
            }
            TokenKind::Function => self.parse_function_decl()?,
            TokenKind::Async if matches!(self.lexer.peek().kind, TokenKind::Function) => {
                self.parse_function_decl()?
            }
            TokenKind::Class => self.parse_class_decl()?,
            TokenKind::Return => self.parse_return()?,
            TokenKind::If => self.parse_if()?,
            TokenKind::Switch => self.parse_switch()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::Do => self.parse_do_while()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::Break => {
                self.advance();
                let label = self.eat_label();
                self.eat(TokenKind::Semicolon);
                StmtKind::Break { label }
            }
            TokenKind::Continue => {
                self.advance();
                let label = self.eat_label();
                self.eat(TokenKind::Semicolon);
                StmtKind::Continue { label }
            }
            TokenKind::Throw => {
                self.advance();
                let arg = self.parse_expression()?;
                self.eat(TokenKind::Semicolon);
                StmtKind::Throw { arg }
            }
            TokenKind::Try => self.parse_try()?,
            TokenKind::LBrace => self.parse_block()?,
            TokenKind::With => {
                // Only classic scripts allow `with`; still parse the body so
                // the rest of the file recovers.
                if self.source_type != SourceType::Script {
                    self.errors.push(Diagnostic::error(
                        "`with` statements are not allowed outside classic scripts",
                        self.current.span,
                    ));
                }
                self.advance();
                self.expect(TokenKind::LParen)?;
                let object = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                let body = self.arena.alloc(self.parse_statement()?);
                StmtKind::With { object, body }
            }
            TokenKind::Import
                if !matches!(
                    self.lexer.peek().kind,
                    TokenKind::LParen | TokenKind::Dot
                ) =>
            {
                self.check_module_only("import");
                self.parse_import()?
            }
            TokenKind::Export => {
                self.check_module_only("export");
                self.parse_export()?
            }
            TokenKind::Debugger => {
                self.advance();
                self.eat(TokenKind::Semicolon);
                StmtKind::Debugger
            }
            TokenKind::Semicolon => {
                self.advance();
                StmtKind::Empty
            }
            TokenKind::Identifier => self.parse_identifier_statement()?,
            _ => {
                let expr = self.parse_expression()?;
                self.eat(TokenKind::Semicolon);
                StmtKind::Expr(expr)
            }
        };

        Ok(Stmt::new(kind, Span::new(start, self.prev_end)))
    }

    /// Statements that start with an identifier: labels, TypeScript
    /// contextual declarations, or a plain expression statement.
    fn parse_identifier_statement(&mut self) -> PResult<StmtKind<'a>> {
        let next = self.lexer.peek();

        if matches!(next.kind, TokenKind::Colon) {
            let label = self.parse_ident()?;
            self.advance(); // :
            let body = self.arena.alloc(self.parse_statement()?);
            return Ok(StmtKind::Labeled { label, body });
        }

        if self.is_ts() && matches!(next.kind, TokenKind::Identifier) {
            match self.current_text() {
                "type" => return self.parse_ts_type_alias(),
                "interface" => return self.parse_ts_interface(),
                "enum" => return self.parse_ts_enum(false),
                _ => {}
            }
        }

        let expr = self.parse_expression()?;
        self.eat(TokenKind::Semicolon);
        Ok(StmtKind::Expr(expr))
    }

    fn peek_is_contextual(&mut self, word: &str) -> bool {
        let next = self.lexer.peek();
        matches!(next.kind, TokenKind::Identifier) && self.span_text(next.span) == word
    }

    fn eat_label(&mut self) -> Option<&'a str> {
        if self.is_identifier() {
            let token = self.advance();
            Some(self.span_text(token.span))
        } else {
            None
        }
    }

    fn parse_var_decl(&mut self) -> PResult<StmtKind<'a>> {
        let var_kind = match &self.current.kind {
            TokenKind::Let => VarKind::Let,
            TokenKind::Const => VarKind::Const,
            TokenKind::Var => VarKind::Var,
            _ => return Err(Diagnostic::error("Expected var/let/const", self.current.span)),
        };
        self.advance();

        let mut decls = self.arena.vec();
        loop {
            decls.push(self.parse_var_declarator()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.eat(TokenKind::Semicolon);
        let decls_slice = decls.into_bump_slice();
        Ok(StmtKind::Var {
            kind: var_kind,
            decls: decls_slice,
        })
    }

    fn parse_var_declarator(&mut self) -> PResult<VarDeclarator<'a>> {
        let start = self.current.span.start;
        let binding = self.parse_binding()?;
        let type_ann = if self.is_ts() && matches!(self.peek(), TokenKind::Colon) {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };
        let init = if self.eat(TokenKind::Eq) {
            Some(self.parse_assignment()?)
        } else {
            None
        };
        Ok(VarDeclarator {
            binding,
            type_ann,
            init,
            span: Span::new(start, self.prev_end),
        })
    }

    pub(crate) fn parse_binding(&mut self) -> PResult<Binding<'a>> {
        let start = self.current.span.start;

        match &self.current.kind {
            _ if self.is_identifier() => {
                let name = self.parse_ident()?;
                Ok(Binding::new(
                    BindingKind::Ident { name },
                    Span::new(start, self.prev_end),
                ))
            }
            TokenKind::LBracket => self.parse_array_binding(),
            TokenKind::LBrace => self.parse_object_binding(),
            _ => Err(Diagnostic::error(
                format!("Expected identifier, '[', or '{{', got {:?}", self.peek()),
                self.current.span,
            )),
        }
    }

    fn parse_array_binding(&mut self) -> PResult<Binding<'a>> {
        let start = self.current.span.start;
        self.expect(TokenKind::LBracket)?;

        let mut elements = self.arena.vec();
        while !matches!(self.peek(), TokenKind::RBracket | TokenKind::Eof) {
            if self.eat(TokenKind::Comma) {
                // Elision
                elements.push(None);
            } else {
                let rest = self.eat(TokenKind::Spread);
                let binding = self.parse_binding()?;
                let default = if self.eat(TokenKind::Eq) {
                    Some(self.parse_assignment()?)
                } else {
                    None
                };
                elements.push(Some(ArrayPatternElement {
                    binding,
                    default,
                    rest,
                }));

                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RBracket)?;
        let elements_slice = elements.into_bump_slice();
        Ok(Binding::new(
            BindingKind::Array {
                elements: elements_slice,
            },
            Span::new(start, self.prev_end),
        ))
    }

    fn parse_object_binding(&mut self) -> PResult<Binding<'a>> {
        let start = self.current.span.start;
        self.expect(TokenKind::LBrace)?;

        let mut properties = self.arena.vec();
        while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
            if self.eat(TokenKind::Spread) {
                // Rest element: `...rest`
                let binding = self.parse_binding()?;
                properties.push(ObjectPatternProperty {
                    key: match binding.kind {
                        BindingKind::Ident { name } => name,
                        _ => "",
                    },
                    value: binding,
                    default: None,
                    shorthand: true,
                    rest: true,
                });
            } else {
                let key = self.parse_ident()?;

                if self.eat(TokenKind::Colon) {
                    // `key: value`
                    let value = self.parse_binding()?;
                    let default = if self.eat(TokenKind::Eq) {
                        Some(self.parse_assignment()?)
                    } else {
                        None
                    };
                    properties.push(ObjectPatternProperty {
                        key,
                        value,
                        default,
                        shorthand: false,
                        rest: false,
                    });
                } else {
                    // Shorthand: `key` or `key = default`
                    let value_span = Span::new(self.prev_end - key.len() as u32, self.prev_end);
                    let default = if self.eat(TokenKind::Eq) {
                        Some(self.parse_assignment()?)
                    } else {
                        None
                    };
                    properties.push(ObjectPatternProperty {
                        key,
                        value: Binding::new(BindingKind::Ident { name: key }, value_span),
                        default,
                        shorthand: true,
                        rest: false,
                    });
                }
            }

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RBrace)?;
        let props_slice = properties.into_bump_slice();
        Ok(Binding::new(
            BindingKind::Object {
                properties: props_slice,
            },
            Span::new(start, self.prev_end),
        ))
    }

    pub(crate) fn parse_ident(&mut self) -> PResult<&'a str> {
        if self.is_identifier() {
            let token = self.advance();
            Ok(self.span_text(token.span))
        } else {
            Err(Diagnostic::error("Expected identifier", self.current.span))
        }
    }

    fn parse_function_decl(&mut self) -> PResult<StmtKind<'a>> {
        let func = self.parse_function()?;
        Ok(StmtKind::Function(self.arena.alloc(func)))
    }

    pub(crate) fn parse_function(&mut self) -> PResult<Function<'a>> {
        let start = self.current.span.start;

        let is_async = self.eat(TokenKind::Async);
        self.expect(TokenKind::Function)?;
        let is_generator = self.eat(TokenKind::Star);

        let name = if self.is_identifier() {
            Some(self.parse_ident()?)
        } else {
            None
        };

        let type_params = if self.is_ts() && matches!(self.peek(), TokenKind::Lt) {
            Some(self.parse_type_params()?)
        } else {
            None
        };

        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;

        let return_type = if self.is_ts() && matches!(self.peek(), TokenKind::Colon) {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };

        // Overload signatures in TypeScript have no body.
        let body = if matches!(self.peek(), TokenKind::LBrace) {
            Some(&*self.arena.alloc(self.parse_block_stmt()?))
        } else if self.is_ts() {
            self.eat(TokenKind::Semicolon);
            None
        } else {
            return Err(self.unexpected());
        };

        Ok(Function {
            name,
            type_params,
            params,
            return_type,
            body,
            is_async,
            is_generator,
            span: Span::new(start, self.prev_end),
        })
    }

    pub(crate) fn parse_params(&mut self) -> PResult<&'a [Param<'a>]> {
        let mut params = self.arena.vec();

        while !matches!(self.peek(), TokenKind::RParen | TokenKind::Eof) {
            let start = self.current.span.start;
            let rest = self.eat(TokenKind::Spread);
            let binding = self.parse_binding()?;
            let optional = self.is_ts() && self.eat(TokenKind::Question);
            let type_ann = if self.is_ts() && matches!(self.peek(), TokenKind::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };
            let default = if self.eat(TokenKind::Eq) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            params.push(Param {
                binding,
                type_ann,
                default,
                rest,
                optional,
                span: Span::new(start, self.prev_end),
            });

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        Ok(params.into_bump_slice())
    }

    /// Parse `{ ... }` as a block statement, recovering inside the braces.
    pub(crate) fn parse_block_stmt(&mut self) -> PResult<Stmt<'a>> {
        let start = self.current.span.start;
        self.expect(TokenKind::LBrace)?;
        let body = self.parse_block_body()?;
        self.expect(TokenKind::RBrace)?;
        Ok(Stmt::new(
            StmtKind::Block(body),
            Span::new(start, self.prev_end),
        ))
    }

    fn parse_block(&mut self) -> PResult<StmtKind<'a>> {
        self.expect(TokenKind::LBrace)?;
        let body = self.parse_block_body()?;
        self.expect(TokenKind::RBrace)?;
        Ok(StmtKind::Block(body))
    }

    fn parse_block_body(&mut self) -> PResult<&'a [Stmt<'a>]> {
        let mut stmts = self.arena.vec();
        while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(diag) => {
                    if self.panicked {
                        return Err(diag);
                    }
                    self.errors.push(diag);
                    self.synchronize(false);
                    if matches!(self.peek(), TokenKind::RBrace) {
                        break;
                    }
                }
            }
        }
        Ok(stmts.into_bump_slice())
    }

    fn parse_class_decl(&mut self) -> PResult<StmtKind<'a>> {
        let class = self.parse_class()?;
        Ok(StmtKind::Class(self.arena.alloc(class)))
    }

    pub(crate) fn parse_class(&mut self) -> PResult<Class<'a>> {
        let start = self.current.span.start;
        self.expect(TokenKind::Class)?;

        let name = if self.is_identifier() {
            Some(self.parse_ident()?)
        } else {
            None
        };

        let type_params = if self.is_ts() && matches!(self.peek(), TokenKind::Lt) {
            Some(self.parse_type_params()?)
        } else {
            None
        };

        let super_class = if self.eat(TokenKind::Extends) {
            let expr = self.parse_lhs_expression()?;
            Some(&*self.arena.alloc(expr))
        } else {
            None
        };

        let body_start = self.current.span.start;
        self.expect(TokenKind::LBrace)?;
        let mut members = self.arena.vec();
        while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            members.push(self.parse_class_member()?);
        }
        self.expect(TokenKind::RBrace)?;

        let members_slice = members.into_bump_slice();
        let body = self.arena.alloc(ClassBody {
            members: members_slice,
            span: Span::new(body_start, self.prev_end),
        });

        Ok(Class {
            name,
            type_params,
            super_class,
            body,
            span: Span::new(start, self.prev_end),
        })
    }

    fn parse_class_member(&mut self) -> PResult<ClassMember<'a>> {
        let start = self.current.span.start;

        let is_static =
            matches!(self.peek(), TokenKind::Static) && !matches!(self.lexer.peek().kind, TokenKind::LParen | TokenKind::Eq);
        if is_static {
            self.advance();
        }

        // Static initializer block
        if is_static && matches!(self.peek(), TokenKind::LBrace) {
            self.advance();
            let body = self.parse_block_body()?;
            self.expect(TokenKind::RBrace)?;
            return Ok(ClassMember {
                kind: ClassMemberKind::StaticBlock(body),
                span: Span::new(start, self.prev_end),
            });
        }

        let is_async = matches!(self.peek(), TokenKind::Async)
            && !matches!(
                self.lexer.peek().kind,
                TokenKind::LParen | TokenKind::Eq | TokenKind::Semicolon
            );
        if is_async {
            self.advance();
        }
        let is_generator = self.eat(TokenKind::Star);

        let accessor = match &self.current.kind {
            TokenKind::Get if !matches!(self.lexer.peek().kind, TokenKind::LParen | TokenKind::Eq) => {
                self.advance();
                Some(MethodKind::Get)
            }
            TokenKind::Set if !matches!(self.lexer.peek().kind, TokenKind::LParen | TokenKind::Eq) => {
                self.advance();
                Some(MethodKind::Set)
            }
            _ => None,
        };

        let (key, computed) = self.parse_member_key()?;

        if matches!(self.peek(), TokenKind::LParen | TokenKind::Lt) {
            let type_params = if self.is_ts() && matches!(self.peek(), TokenKind::Lt) {
                Some(self.parse_type_params()?)
            } else {
                None
            };
            self.expect(TokenKind::LParen)?;
            let params = self.parse_params()?;
            self.expect(TokenKind::RParen)?;
            let return_type = if self.is_ts() && matches!(self.peek(), TokenKind::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };
            let body = if matches!(self.peek(), TokenKind::LBrace) {
                Some(&*self.arena.alloc(self.parse_block_stmt()?))
            } else {
                self.eat(TokenKind::Semicolon);
                None
            };

            let func = Function {
                name: None,
                type_params,
                params,
                return_type,
                body,
                is_async,
                is_generator,
                span: Span::new(start, self.prev_end),
            };

            let method_kind = match accessor {
                Some(kind) => kind,
                None if !computed && matches!(&key.kind, ExprKind::Ident("constructor")) => {
                    MethodKind::Constructor
                }
                None => MethodKind::Method,
            };

            Ok(ClassMember {
                kind: ClassMemberKind::Method {
                    key,
                    value: self.arena.alloc(func),
                    kind: method_kind,
                    computed,
                    is_static,
                },
                span: Span::new(start, self.prev_end),
            })
        } else {
            // Property
            let type_ann = if self.is_ts() && matches!(self.peek(), TokenKind::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };
            let value = if self.eat(TokenKind::Eq) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            self.eat(TokenKind::Semicolon);

            Ok(ClassMember {
                kind: ClassMemberKind::Property {
                    key,
                    type_ann,
                    value,
                    computed,
                    is_static,
                },
                span: Span::new(start, self.prev_end),
            })
        }
    }

    /// Parse a class member or object property key. Returns the key and
    /// whether it was a computed `[expr]` key.
    fn parse_member_key(&mut self) -> PResult<(Expr<'a>, bool)> {
        let span = self.current.span;
        match &self.current.kind {
            TokenKind::LBracket => {
                self.advance();
                let key = self.parse_assignment()?;
                self.expect(TokenKind::RBracket)?;
                Ok((key, true))
            }
            TokenKind::String(value) => {
                let value = self.arena.alloc_str(value);
                self.advance();
                Ok((Expr::new(ExprKind::Literal(Lit::String(value)), span), false))
            }
            TokenKind::Number(n) => {
                let n = *n;
                self.advance();
                Ok((Expr::new(ExprKind::Literal(Lit::Number(n)), span), false))
            }
            TokenKind::Hash => {
                // Private name: keep the `#` in the identifier text.
                self.advance();
                let token = self.advance();
                let name = self.span_text(Span::new(span.start, token.span.end));
                Ok((
                    Expr::new(ExprKind::Ident(name), Span::new(span.start, token.span.end)),
                    false,
                ))
            }
            kind if matches!(kind, TokenKind::Identifier) || kind.is_keyword() => {
                let token = self.advance();
                let name = self.span_text(token.span);
                Ok((Expr::new(ExprKind::Ident(name), token.span), false))
            }
            _ => Err(Diagnostic::error("Expected property key", self.current.span)),
        }
    }

    fn parse_return(&mut self) -> PResult<StmtKind<'a>> {
        self.expect(TokenKind::Return)?;
        let arg = if !matches!(
            self.peek(),
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.eat(TokenKind::Semicolon);
        Ok(StmtKind::Return { arg })
    }

    fn parse_if(&mut self) -> PResult<StmtKind<'a>> {
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;

        let consequent = self.arena.alloc(self.parse_statement()?);

        let alternate = if self.eat(TokenKind::Else) {
            Some(&*self.arena.alloc(self.parse_statement()?))
        } else {
            None
        };

        Ok(StmtKind::If {
            test,
            consequent,
            alternate,
        })
    }

    fn parse_switch(&mut self) -> PResult<StmtKind<'a>> {
        self.expect(TokenKind::Switch)?;
        self.expect(TokenKind::LParen)?;
        let discriminant = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;

        let mut cases = self.arena.vec();
        while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
            let case_start = self.current.span.start;
            let test = if self.eat(TokenKind::Case) {
                Some(self.parse_expression()?)
            } else {
                self.expect(TokenKind::Default)?;
                None
            };
            self.expect(TokenKind::Colon)?;

            let mut body = self.arena.vec();
            while !matches!(
                self.peek(),
                TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
            ) {
                body.push(self.parse_statement()?);
            }
            let consequent = body.into_bump_slice();
            cases.push(SwitchCase {
                test,
                consequent,
                span: Span::new(case_start, self.prev_end),
            });
        }
        self.expect(TokenKind::RBrace)?;

        let cases_slice = cases.into_bump_slice();
        Ok(StmtKind::Switch {
            discriminant,
            cases: cases_slice,
        })
    }

    fn parse_while(&mut self) -> PResult<StmtKind<'a>> {
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.arena.alloc(self.parse_statement()?);
        Ok(StmtKind::While { test, body })
    }

    fn parse_do_while(&mut self) -> PResult<StmtKind<'a>> {
        self.expect(TokenKind::Do)?;
        let body = self.arena.alloc(self.parse_statement()?);
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        self.eat(TokenKind::Semicolon);
        Ok(StmtKind::DoWhile { body, test })
    }

    fn parse_for(&mut self) -> PResult<StmtKind<'a>> {
        self.expect(TokenKind::For)?;
        let is_await = self.eat(TokenKind::Await);
        self.expect(TokenKind::LParen)?;

        // Empty init
        if self.eat(TokenKind::Semicolon) {
            return self.parse_for_tail(None);
        }

        if matches!(
            self.peek(),
            TokenKind::Var | TokenKind::Let | TokenKind::Const
        ) {
            let decl_start = self.current.span.start;
            let var_kind = match &self.current.kind {
                TokenKind::Var => VarKind::Var,
                TokenKind::Let => VarKind::Let,
                _ => VarKind::Const,
            };
            self.advance();
            let binding = self.parse_binding()?;
            let type_ann = if self.is_ts() && matches!(self.peek(), TokenKind::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };

            if matches!(self.peek(), TokenKind::In) || self.is_contextual("of") {
                let is_of = self.is_contextual("of");
                self.advance();
                let decl = self.alloc_for_head_decl(decl_start, var_kind, binding, type_ann);
                let left = ForHead::Var(decl);
                let right = self.parse_assignment()?;
                self.expect(TokenKind::RParen)?;
                let body = self.arena.alloc(self.parse_statement()?);
                return Ok(if is_of {
                    StmtKind::ForOf {
                        left,
                        right,
                        body,
                        is_await,
                    }
                } else {
                    StmtKind::ForIn { left, right, body }
                });
            }

            // Regular for: finish the declarator list.
            let mut decls = self.arena.vec();
            let init = if self.eat(TokenKind::Eq) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            decls.push(VarDeclarator {
                binding,
                type_ann,
                init,
                span: Span::new(decl_start, self.prev_end),
            });
            while self.eat(TokenKind::Comma) {
                decls.push(self.parse_var_declarator()?);
            }
            let decls_slice = decls.into_bump_slice();
            let init_stmt = self.arena.alloc(Stmt::new(
                StmtKind::Var {
                    kind: var_kind,
                    decls: decls_slice,
                },
                Span::new(decl_start, self.prev_end),
            ));
            self.expect(TokenKind::Semicolon)?;
            return self.parse_for_tail(Some(ForInit::Var(init_stmt)));
        }

        // Bare pattern head: `for (x of xs)`, `for ([a, b] in m)`.
        if matches!(
            self.peek(),
            TokenKind::Identifier | TokenKind::LBracket | TokenKind::LBrace
        ) {
            let saved_lexer = self.lexer.clone();
            let saved_current = self.current.clone();
            let saved_prev = self.prev_end;
            if let Ok(binding) = self.parse_binding() {
                if matches!(self.peek(), TokenKind::In) || self.is_contextual("of") {
                    let is_of = self.is_contextual("of");
                    self.advance();
                    let left = ForHead::Pattern(binding);
                    let right = self.parse_assignment()?;
                    self.expect(TokenKind::RParen)?;
                    let body = self.arena.alloc(self.parse_statement()?);
                    return Ok(if is_of {
                        StmtKind::ForOf {
                            left,
                            right,
                            body,
                            is_await,
                        }
                    } else {
                        StmtKind::ForIn { left, right, body }
                    });
                }
            }
            self.lexer = saved_lexer;
            self.current = saved_current;
            self.prev_end = saved_prev;
        }

        let init = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        self.parse_for_tail(Some(ForInit::Expr(init)))
    }

    fn alloc_for_head_decl(
        &mut self,
        start: u32,
        kind: VarKind,
        binding: Binding<'a>,
        type_ann: Option<&'a liffey_ast::TsTypeAnnotation<'a>>,
    ) -> &'a Stmt<'a> {
        let span = Span::new(start, self.prev_end);
        let decls = self
            .arena
            .bump()
            .alloc_slice_copy(&[VarDeclarator {
                binding,
                type_ann,
                init: None,
                span: Span::new(binding.span.start, self.prev_end),
            }]);
        self.arena
            .alloc(Stmt::new(StmtKind::Var { kind, decls }, span))
    }

    fn parse_for_tail(&mut self, init: Option<ForInit<'a>>) -> PResult<StmtKind<'a>> {
        let test = if matches!(self.peek(), TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon)?;
        let update = if matches!(self.peek(), TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RParen)?;
        let body = self.arena.alloc(self.parse_statement()?);
        Ok(StmtKind::For {
            init,
            test,
            update,
            body,
        })
    }

    fn parse_try(&mut self) -> PResult<StmtKind<'a>> {
        self.expect(TokenKind::Try)?;
        let block = self.arena.alloc(self.parse_block_stmt()?);

        let handler = if matches!(self.peek(), TokenKind::Catch) {
            let catch_start = self.current.span.start;
            self.advance();
            let param = if self.eat(TokenKind::LParen) {
                let binding = self.parse_binding()?;
                self.expect(TokenKind::RParen)?;
                Some(binding)
            } else {
                None
            };
            let body = self.arena.alloc(self.parse_block_stmt()?);
            Some(&*self.arena.alloc(CatchClause {
                param,
                body,
                span: Span::new(catch_start, self.prev_end),
            }))
        } else {
            None
        };

        let finalizer = if self.eat(TokenKind::Finally) {
            let block = self.parse_block_stmt()?;
            Some(&*self.arena.alloc(block))
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(Diagnostic::error(
                "Missing catch or finally after try",
                self.current.span,
            ));
        }

        Ok(StmtKind::Try {
            block,
            handler,
            finalizer,
        })
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn parse_import(&mut self) -> PResult<StmtKind<'a>> {
        let start = self.current.span.start;
        self.expect(TokenKind::Import)?;

        let mut specifiers = self.arena.vec();

        if let TokenKind::String(_) = self.peek() {
            // Side-effect import: `import "mod";`
            let source = self.parse_module_source()?;
            self.eat(TokenKind::Semicolon);
            let specs = specifiers.into_bump_slice();
            return Ok(StmtKind::Import(self.arena.alloc(ImportDecl {
                specifiers: specs,
                source,
                span: Span::new(start, self.prev_end),
            })));
        }

        if self.is_identifier() {
            let span = self.current.span;
            let local = self.parse_ident()?;
            specifiers.push(ImportSpecifier::Default { local, span });
            if self.eat(TokenKind::Comma) {
                self.parse_import_specifier_group(&mut specifiers)?;
            }
        } else {
            self.parse_import_specifier_group(&mut specifiers)?;
        }

        self.expect(TokenKind::From)?;
        let source = self.parse_module_source()?;
        self.eat(TokenKind::Semicolon);

        let specs = specifiers.into_bump_slice();
        Ok(StmtKind::Import(self.arena.alloc(ImportDecl {
            specifiers: specs,
            source,
            span: Span::new(start, self.prev_end),
        })))
    }

    fn parse_import_specifier_group(
        &mut self,
        specifiers: &mut bumpalo::collections::Vec<'a, ImportSpecifier<'a>>,
    ) -> PResult<()> {
        if self.eat(TokenKind::Star) {
            let star_start = self.prev_end - 1;
            self.expect(TokenKind::As)?;
            let local = self.parse_ident()?;
            specifiers.push(ImportSpecifier::Namespace {
                local,
                span: Span::new(star_start, self.prev_end),
            });
            return Ok(());
        }

        self.expect(TokenKind::LBrace)?;
        while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
            let spec_start = self.current.span.start;
            let imported = self.parse_module_export_name()?;
            let local = if self.eat(TokenKind::As) {
                self.parse_ident()?
            } else {
                imported
            };
            specifiers.push(ImportSpecifier::Named {
                imported,
                local,
                span: Span::new(spec_start, self.prev_end),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(())
    }

    /// An exported/imported name: an identifier or a string literal.
    fn parse_module_export_name(&mut self) -> PResult<&'a str> {
        if let TokenKind::String(value) = self.peek() {
            let name = self.arena.alloc_str(value);
            self.advance();
            Ok(name)
        } else {
            self.parse_ident()
        }
    }

    fn parse_module_source(&mut self) -> PResult<&'a str> {
        if let TokenKind::String(value) = self.peek() {
            let source = self.arena.alloc_str(value);
            self.advance();
            Ok(source)
        } else {
            Err(Diagnostic::error(
                "Expected module specifier string",
                self.current.span,
            ))
        }
    }

    fn parse_export(&mut self) -> PResult<StmtKind<'a>> {
        self.expect(TokenKind::Export)?;

        // `export * from "mod"` / `export * as ns from "mod"`
        if self.eat(TokenKind::Star) {
            let exported = if self.eat(TokenKind::As) {
                Some(self.parse_module_export_name()?)
            } else {
                None
            };
            self.expect(TokenKind::From)?;
            let source = self.parse_module_source()?;
            self.eat(TokenKind::Semicolon);
            return Ok(StmtKind::Export(
                self.arena.alloc(ExportDecl::All { exported, source }),
            ));
        }

        // `export default ...`
        if self.eat(TokenKind::Default) {
            let payload = match &self.current.kind {
                TokenKind::Function | TokenKind::Class => {
                    ExportDefault::Decl(self.arena.alloc(self.parse_statement()?))
                }
                TokenKind::Async if matches!(self.lexer.peek().kind, TokenKind::Function) => {
                    ExportDefault::Decl(self.arena.alloc(self.parse_statement()?))
                }
                _ => {
                    let expr = self.parse_assignment()?;
                    self.eat(TokenKind::Semicolon);
                    ExportDefault::Expr(expr)
                }
            };
            return Ok(StmtKind::Export(
                self.arena.alloc(ExportDecl::Default(payload)),
            ));
        }

        // `export { a, b as c } [from "mod"]`
        if matches!(self.peek(), TokenKind::LBrace) {
            self.advance();
            let mut specifiers = self.arena.vec();
            while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
                let spec_start = self.current.span.start;
                let local = self.parse_module_export_name()?;
                let exported = if self.eat(TokenKind::As) {
                    self.parse_module_export_name()?
                } else {
                    local
                };
                specifiers.push(ExportSpecifier {
                    local,
                    exported,
                    span: Span::new(spec_start, self.prev_end),
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RBrace)?;
            let source = if self.eat(TokenKind::From) {
                Some(self.parse_module_source()?)
            } else {
                None
            };
            self.eat(TokenKind::Semicolon);
            let specs = specifiers.into_bump_slice();
            return Ok(StmtKind::Export(self.arena.alloc(ExportDecl::Named {
                decl: None,
                specifiers: specs,
                source,
            })));
        }

        // `export <declaration>`
        let decl = self.arena.alloc(self.parse_statement()?);
        Ok(StmtKind::Export(self.arena.alloc(ExportDecl::Named {
            decl: Some(decl),
            specifiers: &[],
            source: None,
        })))
    }

    // =========================================================================
    // Expression Parsing
    // =========================================================================

    pub(crate) fn parse_expression(&mut self) -> PResult<Expr<'a>> {
        let start = self.current.span.start;
        let first = self.parse_assignment()?;

        if !matches!(self.peek(), TokenKind::Comma) {
            return Ok(first);
        }

        let mut exprs = self.arena.vec();
        exprs.push(first);
        while self.eat(TokenKind::Comma) {
            exprs.push(self.parse_assignment()?);
        }
        let slice = exprs.into_bump_slice();
        Ok(Expr::new(
            ExprKind::Sequence(slice),
            Span::new(start, self.prev_end),
        ))
    }

    pub(crate) fn parse_assignment(&mut self) -> PResult<Expr<'a>> {
        self.check_depth()?;
        self.depth += 1;
        let result = self.parse_assignment_inner();
        self.depth -= 1;
        result
    }

    fn parse_assignment_inner(&mut self) -> PResult<Expr<'a>> {
        if self.is_arrow_function_start() {
            return self.parse_arrow_function();
        }

        let start = self.current.span.start;
        let left = self.parse_conditional()?;

        if self.peek().is_assignment() {
            let op = self.assignment_op();
            self.advance();
            let right = self.parse_assignment()?;
            return Ok(Expr::new(
                ExprKind::Assign {
                    op,
                    left: self.arena.alloc(left),
                    right: self.arena.alloc(right),
                },
                Span::new(start, self.prev_end),
            ));
        }

        Ok(left)
    }

    fn assignment_op(&self) -> AssignOp {
        match &self.current.kind {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::AddAssign,
            TokenKind::MinusEq => AssignOp::SubAssign,
            TokenKind::StarEq => AssignOp::MulAssign,
            TokenKind::SlashEq => AssignOp::DivAssign,
            TokenKind::PercentEq => AssignOp::ModAssign,
            TokenKind::StarStarEq => AssignOp::PowAssign,
            TokenKind::LtLtEq => AssignOp::ShlAssign,
            TokenKind::GtGtEq => AssignOp::ShrAssign,
            TokenKind::GtGtGtEq => AssignOp::UShrAssign,
            TokenKind::AmpEq => AssignOp::BitAndAssign,
            TokenKind::PipeEq => AssignOp::BitOrAssign,
            TokenKind::CaretEq => AssignOp::BitXorAssign,
            TokenKind::AmpAmpEq => AssignOp::AndAssign,
            TokenKind::PipePipeEq => AssignOp::OrAssign,
            _ => AssignOp::NullishAssign,
        }
    }

    fn parse_conditional(&mut self) -> PResult<Expr<'a>> {
        let start = self.current.span.start;
        let test = self.parse_binary(0)?;

        if !self.eat(TokenKind::Question) {
            return Ok(test);
        }

        let consequent = self.parse_assignment()?;
        self.expect(TokenKind::Colon)?;
        let alternate = self.parse_assignment()?;
        Ok(Expr::new(
            ExprKind::Conditional {
                test: self.arena.alloc(test),
                consequent: self.arena.alloc(consequent),
                alternate: self.arena.alloc(alternate),
            },
            Span::new(start, self.prev_end),
        ))
    }

    fn parse_binary(&mut self, min_prec: u8) -> PResult<Expr<'a>> {
        let start = self.current.span.start;
        let mut left = self.parse_unary()?;

        loop {
            // TypeScript `expr as Type`
            if self.is_ts() && matches!(self.peek(), TokenKind::As) {
                self.advance();
                let ty = self.parse_ts_type()?;
                left = Expr::new(
                    ExprKind::TsAs {
                        expr: self.arena.alloc(left),
                        type_ann: self.arena.alloc(ty),
                    },
                    Span::new(start, self.prev_end),
                );
                continue;
            }

            let Some(prec) = self.peek().binary_precedence() else {
                break;
            };
            if prec < min_prec {
                break;
            }

            let op_token = self.advance().kind;
            let next_min = if op_token.is_right_associative() {
                prec
            } else {
                prec + 1
            };
            let right = self.parse_binary(next_min)?;

            let kind = match logical_op(&op_token) {
                Some(op) => ExprKind::Logical {
                    op,
                    left: self.arena.alloc(left),
                    right: self.arena.alloc(right),
                },
                None => ExprKind::Binary {
                    op: binary_op(&op_token),
                    left: self.arena.alloc(left),
                    right: self.arena.alloc(right),
                },
            };
            left = Expr::new(kind, Span::new(start, self.prev_end));
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<Expr<'a>> {
        self.check_depth()?;
        self.depth += 1;
        let result = self.parse_unary_inner();
        self.depth -= 1;
        result
    }

    fn parse_unary_inner(&mut self) -> PResult<Expr<'a>> {
        let start = self.current.span.start;

        let unary = match &self.current.kind {
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Typeof => Some(UnaryOp::Typeof),
            TokenKind::Void => Some(UnaryOp::Void),
            TokenKind::Delete => Some(UnaryOp::Delete),
            _ => None,
        };
        if let Some(op) = unary {
            self.advance();
            let arg = self.parse_unary()?;
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    arg: self.arena.alloc(arg),
                },
                Span::new(start, self.prev_end),
            ));
        }

        match &self.current.kind {
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op = if matches!(self.peek(), TokenKind::PlusPlus) {
                    UpdateOp::Increment
                } else {
                    UpdateOp::Decrement
                };
                self.advance();
                let arg = self.parse_unary()?;
                Ok(Expr::new(
                    ExprKind::Update {
                        op,
                        prefix: true,
                        arg: self.arena.alloc(arg),
                    },
                    Span::new(start, self.prev_end),
                ))
            }
            TokenKind::Await => {
                self.advance();
                let arg = self.parse_unary()?;
                Ok(Expr::new(
                    ExprKind::Await(self.arena.alloc(arg)),
                    Span::new(start, self.prev_end),
                ))
            }
            TokenKind::Yield => {
                self.advance();
                let delegate = self.eat(TokenKind::Star);
                let arg = if self.peek().can_start_expr() {
                    let expr = self.parse_assignment()?;
                    Some(&*self.arena.alloc(expr))
                } else {
                    None
                };
                Ok(Expr::new(
                    ExprKind::Yield { arg, delegate },
                    Span::new(start, self.prev_end),
                ))
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> PResult<Expr<'a>> {
        let start = self.current.span.start;
        let expr = self.parse_lhs_expression()?;

        if matches!(self.peek(), TokenKind::PlusPlus | TokenKind::MinusMinus) {
            let op = if matches!(self.peek(), TokenKind::PlusPlus) {
                UpdateOp::Increment
            } else {
                UpdateOp::Decrement
            };
            self.advance();
            return Ok(Expr::new(
                ExprKind::Update {
                    op,
                    prefix: false,
                    arg: self.arena.alloc(expr),
                },
                Span::new(start, self.prev_end),
            ));
        }

        Ok(expr)
    }

    /// Member access, calls, tagged templates.
    pub(crate) fn parse_lhs_expression(&mut self) -> PResult<Expr<'a>> {
        let start = self.current.span.start;
        let mut expr = if matches!(self.peek(), TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };

        loop {
            match &self.current.kind {
                TokenKind::Dot => {
                    self.advance();
                    let prop_span = self.current.span;
                    let name = self.parse_member_name()?;
                    expr = Expr::new(
                        ExprKind::Member {
                            object: self.arena.alloc(expr),
                            property: self
                                .arena
                                .alloc(Expr::new(ExprKind::Ident(name), prop_span)),
                            computed: false,
                            optional: false,
                        },
                        Span::new(start, self.prev_end),
                    );
                }
                TokenKind::QuestionDot => {
                    self.advance();
                    match &self.current.kind {
                        TokenKind::LParen => {
                            let args = self.parse_call_args()?;
                            expr = Expr::new(
                                ExprKind::Call {
                                    callee: self.arena.alloc(expr),
                                    args,
                                    optional: true,
                                },
                                Span::new(start, self.prev_end),
                            );
                        }
                        TokenKind::LBracket => {
                            self.advance();
                            let property = self.parse_expression()?;
                            self.expect(TokenKind::RBracket)?;
                            expr = Expr::new(
                                ExprKind::Member {
                                    object: self.arena.alloc(expr),
                                    property: self.arena.alloc(property),
                                    computed: true,
                                    optional: true,
                                },
                                Span::new(start, self.prev_end),
                            );
                        }
                        _ => {
                            let prop_span = self.current.span;
                            let name = self.parse_member_name()?;
                            expr = Expr::new(
                                ExprKind::Member {
                                    object: self.arena.alloc(expr),
                                    property: self
                                        .arena
                                        .alloc(Expr::new(ExprKind::Ident(name), prop_span)),
                                    computed: false,
                                    optional: true,
                                },
                                Span::new(start, self.prev_end),
                            );
                        }
                    }
                }
                TokenKind::LBracket => {
                    self.advance();
                    let property = self.parse_expression()?;
                    self.expect(TokenKind::RBracket)?;
                    expr = Expr::new(
                        ExprKind::Member {
                            object: self.arena.alloc(expr),
                            property: self.arena.alloc(property),
                            computed: true,
                            optional: false,
                        },
                        Span::new(start, self.prev_end),
                    );
                }
                TokenKind::LParen => {
                    let args = self.parse_call_args()?;
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: self.arena.alloc(expr),
                            args,
                            optional: false,
                        },
                        Span::new(start, self.prev_end),
                    );
                }
                TokenKind::Lt if self.is_ts() => {
                    // Possible generic call: `f<T>(x)`.
                    match self.try_parse_generic_call_args()? {
                        Some(args) => {
                            expr = Expr::new(
                                ExprKind::Call {
                                    callee: self.arena.alloc(expr),
                                    args,
                                    optional: false,
                                },
                                Span::new(start, self.prev_end),
                            );
                        }
                        None => break,
                    }
                }
                TokenKind::TemplateNoSub(_) | TokenKind::TemplateHead(_) => {
                    let quasi = self.parse_template()?;
                    expr = Expr::new(
                        ExprKind::TaggedTemplate {
                            tag: self.arena.alloc(expr),
                            quasi: self.arena.alloc(quasi),
                        },
                        Span::new(start, self.prev_end),
                    );
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Member names after `.` may be any keyword (`obj.default`).
    fn parse_member_name(&mut self) -> PResult<&'a str> {
        if matches!(self.peek(), TokenKind::Identifier) || self.peek().is_keyword() {
            let token = self.advance();
            Ok(self.span_text(token.span))
        } else if matches!(self.peek(), TokenKind::Hash) {
            let start = self.current.span.start;
            self.advance();
            let token = self.advance();
            Ok(self.span_text(Span::new(start, token.span.end)))
        } else {
            Err(Diagnostic::error("Expected member name", self.current.span))
        }
    }

    fn parse_new(&mut self) -> PResult<Expr<'a>> {
        let start = self.current.span.start;
        self.expect(TokenKind::New)?;

        // `new.target`
        if self.eat(TokenKind::Dot) {
            let prop_span = self.current.span;
            let name = self.parse_member_name()?;
            let target = Expr::new(ExprKind::Ident(name), prop_span);
            return Ok(Expr::new(
                ExprKind::Member {
                    object: self
                        .arena
                        .alloc(Expr::new(ExprKind::Ident("new"), Span::new(start, start + 3))),
                    property: self.arena.alloc(target),
                    computed: false,
                    optional: false,
                },
                Span::new(start, self.prev_end),
            ));
        }

        // Member chain without calls binds to `new` first.
        let mut callee = if matches!(self.peek(), TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            match &self.current.kind {
                TokenKind::Dot => {
                    self.advance();
                    let prop_span = self.current.span;
                    let name = self.parse_member_name()?;
                    callee = Expr::new(
                        ExprKind::Member {
                            object: self.arena.alloc(callee),
                            property: self
                                .arena
                                .alloc(Expr::new(ExprKind::Ident(name), prop_span)),
                            computed: false,
                            optional: false,
                        },
                        Span::new(callee.span.start, self.prev_end),
                    );
                }
                TokenKind::LBracket => {
                    self.advance();
                    let property = self.parse_expression()?;
                    self.expect(TokenKind::RBracket)?;
                    callee = Expr::new(
                        ExprKind::Member {
                            object: self.arena.alloc(callee),
                            property: self.arena.alloc(property),
                            computed: true,
                            optional: false,
                        },
                        Span::new(callee.span.start, self.prev_end),
                    );
                }
                _ => break,
            }
        }

        let args = if matches!(self.peek(), TokenKind::LParen) {
            self.parse_call_args()?
        } else {
            &[]
        };

        Ok(Expr::new(
            ExprKind::New {
                callee: self.arena.alloc(callee),
                args,
            },
            Span::new(start, self.prev_end),
        ))
    }

    pub(crate) fn parse_call_args(&mut self) -> PResult<&'a [Expr<'a>]> {
        self.expect(TokenKind::LParen)?;
        let mut args = self.arena.vec();
        while !matches!(self.peek(), TokenKind::RParen | TokenKind::Eof) {
            if matches!(self.peek(), TokenKind::Spread) {
                let start = self.current.span.start;
                self.advance();
                let arg = self.parse_assignment()?;
                args.push(Expr::new(
                    ExprKind::Spread(self.arena.alloc(arg)),
                    Span::new(start, self.prev_end),
                ));
            } else {
                args.push(self.parse_assignment()?);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(args.into_bump_slice())
    }

    fn parse_primary(&mut self) -> PResult<Expr<'a>> {
        let span = self.current.span;

        match self.peek().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::new(ExprKind::Literal(Lit::Number(n)), span))
            }
            TokenKind::String(value) => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Literal(Lit::String(self.arena.alloc_str(&value))),
                    span,
                ))
            }
            TokenKind::BigInt(digits) => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Literal(Lit::BigInt(self.arena.alloc_str(&digits))),
                    span,
                ))
            }
            TokenKind::Regex { pattern, flags } => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Literal(Lit::Regex {
                        pattern: self.arena.alloc_str(&pattern),
                        flags: self.arena.alloc_str(&flags),
                    }),
                    span,
                ))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::new(ExprKind::Literal(Lit::Bool(true)), span))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::new(ExprKind::Literal(Lit::Bool(false)), span))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::new(ExprKind::Literal(Lit::Null), span))
            }
            TokenKind::This => {
                self.advance();
                Ok(Expr::new(ExprKind::This, span))
            }
            TokenKind::Super => {
                self.advance();
                Ok(Expr::new(ExprKind::Super, span))
            }
            TokenKind::TemplateNoSub(_) | TokenKind::TemplateHead(_) => self.parse_template(),
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Function => {
                let func = self.parse_function()?;
                let func_span = func.span;
                Ok(Expr::new(
                    ExprKind::Function(self.arena.alloc(func)),
                    func_span,
                ))
            }
            TokenKind::Async if matches!(self.lexer.peek().kind, TokenKind::Function) => {
                let func = self.parse_function()?;
                let func_span = func.span;
                Ok(Expr::new(
                    ExprKind::Function(self.arena.alloc(func)),
                    func_span,
                ))
            }
            TokenKind::Class => {
                let class = self.parse_class()?;
                let class_span = class.span;
                Ok(Expr::new(
                    ExprKind::Class(self.arena.alloc(class)),
                    class_span,
                ))
            }
            TokenKind::Lt if self.is_jsx() => self.parse_jsx_root(),
            TokenKind::Import => {
                // Dynamic `import(...)`; the call chain is built by the
                // caller's member/call loop.
                self.advance();
                Ok(Expr::new(ExprKind::Ident("import"), span))
            }
            TokenKind::Spread => {
                // Only valid inside array/object/call contexts; those
                // handle it directly. Anywhere else it is an error.
                Err(self.unexpected())
            }
            kind if matches!(kind, TokenKind::Identifier) || kind.is_soft_keyword() => {
                let token = self.advance();
                Ok(Expr::new(
                    ExprKind::Ident(self.span_text(token.span)),
                    token.span,
                ))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_array_literal(&mut self) -> PResult<Expr<'a>> {
        let start = self.current.span.start;
        self.expect(TokenKind::LBracket)?;

        let mut elements = self.arena.vec();
        while !matches!(self.peek(), TokenKind::RBracket | TokenKind::Eof) {
            if self.eat(TokenKind::Comma) {
                // Elision
                elements.push(None);
                continue;
            }
            if matches!(self.peek(), TokenKind::Spread) {
                let spread_start = self.current.span.start;
                self.advance();
                let arg = self.parse_assignment()?;
                elements.push(Some(Expr::new(
                    ExprKind::Spread(self.arena.alloc(arg)),
                    Span::new(spread_start, self.prev_end),
                )));
            } else {
                elements.push(Some(self.parse_assignment()?));
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBracket)?;

        let slice = elements.into_bump_slice();
        Ok(Expr::new(
            ExprKind::Array(slice),
            Span::new(start, self.prev_end),
        ))
    }

    fn parse_object_literal(&mut self) -> PResult<Expr<'a>> {
        let start = self.current.span.start;
        self.expect(TokenKind::LBrace)?;

        let mut properties = self.arena.vec();
        while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
            properties.push(self.parse_object_property()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;

        let slice = properties.into_bump_slice();
        Ok(Expr::new(
            ExprKind::Object(slice),
            Span::new(start, self.prev_end),
        ))
    }

    fn parse_object_property(&mut self) -> PResult<Property<'a>> {
        let start = self.current.span.start;

        // Spread entry: `{ ...rest }`. Modeled as a shorthand slot holding
        // the spread expression.
        if matches!(self.peek(), TokenKind::Spread) {
            self.advance();
            let arg = self.parse_assignment()?;
            let spread = Expr::new(
                ExprKind::Spread(self.arena.alloc(arg)),
                Span::new(start, self.prev_end),
            );
            return Ok(Property {
                key: spread,
                value: spread,
                kind: PropertyKind::Init,
                shorthand: true,
                computed: false,
                span: Span::new(start, self.prev_end),
            });
        }

        let is_async = matches!(self.peek(), TokenKind::Async)
            && !matches!(
                self.lexer.peek().kind,
                TokenKind::Colon | TokenKind::Comma | TokenKind::RBrace | TokenKind::LParen
            );
        if is_async {
            self.advance();
        }
        let is_generator = self.eat(TokenKind::Star);

        let accessor = match &self.current.kind {
            TokenKind::Get
                if !matches!(
                    self.lexer.peek().kind,
                    TokenKind::Colon | TokenKind::Comma | TokenKind::RBrace | TokenKind::LParen
                ) =>
            {
                self.advance();
                Some(PropertyKind::Get)
            }
            TokenKind::Set
                if !matches!(
                    self.lexer.peek().kind,
                    TokenKind::Colon | TokenKind::Comma | TokenKind::RBrace | TokenKind::LParen
                ) =>
            {
                self.advance();
                Some(PropertyKind::Set)
            }
            _ => None,
        };

        let (key, computed) = self.parse_member_key()?;

        // Method forms
        if matches!(self.peek(), TokenKind::LParen) || accessor.is_some() || is_async || is_generator
        {
            let fn_start = self.current.span.start;
            self.expect(TokenKind::LParen)?;
            let params = self.parse_params()?;
            self.expect(TokenKind::RParen)?;
            let return_type = if self.is_ts() && matches!(self.peek(), TokenKind::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };
            let body = self.arena.alloc(self.parse_block_stmt()?);
            let func = Function {
                name: None,
                type_params: None,
                params,
                return_type,
                body: Some(body),
                is_async,
                is_generator,
                span: Span::new(fn_start, self.prev_end),
            };
            let value = Expr::new(
                ExprKind::Function(self.arena.alloc(func)),
                Span::new(fn_start, self.prev_end),
            );
            return Ok(Property {
                key,
                value,
                kind: accessor.unwrap_or(PropertyKind::Method),
                shorthand: false,
                computed,
                span: Span::new(start, self.prev_end),
            });
        }

        if self.eat(TokenKind::Colon) {
            let value = self.parse_assignment()?;
            return Ok(Property {
                key,
                value,
                kind: PropertyKind::Init,
                shorthand: false,
                computed,
                span: Span::new(start, self.prev_end),
            });
        }

        // Shorthand: `{ a }` — the key identifier is also the value.
        Ok(Property {
            key,
            value: key,
            kind: PropertyKind::Init,
            shorthand: true,
            computed: false,
            span: Span::new(start, self.prev_end),
        })
    }

    fn parse_template(&mut self) -> PResult<Expr<'a>> {
        let start = self.current.span.start;
        let mut quasis = self.arena.vec();
        let mut exprs = self.arena.vec();

        match self.peek().clone() {
            TokenKind::TemplateNoSub(value) => {
                self.advance();
                quasis.push(&*self.arena.alloc_str(&value));
            }
            TokenKind::TemplateHead(value) => {
                self.advance();
                quasis.push(&*self.arena.alloc_str(&value));
                loop {
                    exprs.push(self.parse_expression()?);
                    if !matches!(self.peek(), TokenKind::RBrace) {
                        return Err(Diagnostic::error(
                            "Expected '}' in template literal",
                            self.current.span,
                        ));
                    }
                    // The continuation must be scanned raw; a normal
                    // advance would tokenize the template text.
                    let token = self.lexer.scan_template_continuation();
                    self.prev_end = token.span.end;
                    match token.kind {
                        TokenKind::TemplateMiddle(value) => {
                            quasis.push(&*self.arena.alloc_str(&value));
                            self.reload_current();
                        }
                        TokenKind::TemplateTail(value) => {
                            quasis.push(&*self.arena.alloc_str(&value));
                            self.reload_current();
                            break;
                        }
                        _ => {
                            return Err(Diagnostic::error(
                                "Unterminated template literal",
                                token.span,
                            ))
                        }
                    }
                }
            }
            _ => return Err(self.unexpected()),
        }

        let quasis_slice = quasis.into_bump_slice();
        let exprs_slice = exprs.into_bump_slice();
        Ok(Expr::new(
            ExprKind::Template {
                quasis: quasis_slice,
                exprs: exprs_slice,
            },
            Span::new(start, self.prev_end),
        ))
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    /// Decide whether the tokens ahead are an arrow function head. Uses a
    /// cloned lexer so nothing is consumed.
    fn is_arrow_function_start(&mut self) -> bool {
        match &self.current.kind {
            TokenKind::Identifier | TokenKind::Async => {}
            TokenKind::LParen => return self.paren_starts_arrow(),
            _ => return false,
        }

        if matches!(self.peek(), TokenKind::Identifier) {
            return matches!(self.lexer.peek().kind, TokenKind::Arrow);
        }

        // `async x => ...` or `async (...) => ...`
        let mut probe = self.lexer.clone();
        let next = probe.next_token();
        match next.kind {
            TokenKind::Identifier => matches!(probe.next_token().kind, TokenKind::Arrow),
            TokenKind::LParen => {
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
                self.after_parens_is_arrow(&mut probe)
            }
            _ => false,
        }
    }

    fn paren_starts_arrow(&mut self) -> bool {
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
        self.after_parens_is_arrow(&mut probe)
    }

    fn after_parens_is_arrow(&self, probe: &mut Lexer<'a>) -> bool {
        match probe.next_token().kind {
            TokenKind::Arrow => true,
            // `(a: T): R => ...` — scan the return type for the arrow.
            TokenKind::Colon if self.is_ts() => loop {
                match probe.next_token().kind {
                    TokenKind::Arrow => return true,
                    TokenKind::Eof
                    | TokenKind::Semicolon
                    | TokenKind::RParen
                    | TokenKind::RBrace => return false,
                    _ => {}
                }
            },
            _ => false,
        }
    }

    fn parse_arrow_function(&mut self) -> PResult<Expr<'a>> {
        let start = self.current.span.start;
        let is_async = self.eat(TokenKind::Async);

        let params = if matches!(self.peek(), TokenKind::Identifier) {
            let param_start = self.current.span.start;
            let binding = self.parse_binding()?;
            let param = Param {
                binding,
                type_ann: None,
                default: None,
                rest: false,
                optional: false,
                span: Span::new(param_start, self.prev_end),
            };
            self.arena.bump().alloc_slice_copy(&[param]) as &[_]
        } else {
            self.expect(TokenKind::LParen)?;
            let params = self.parse_params()?;
            self.expect(TokenKind::RParen)?;
            params
        };

        let return_type = if self.is_ts() && matches!(self.peek(), TokenKind::Colon) {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };

        self.expect(TokenKind::Arrow)?;

        let body = if matches!(self.peek(), TokenKind::LBrace) {
            ArrowBody::Block(self.arena.alloc(self.parse_block_stmt()?))
        } else {
            let expr = self.parse_assignment()?;
            ArrowBody::Expr(self.arena.alloc(expr))
        };

        let arrow = ArrowFunction {
            params,
            return_type,
            body,
            is_async,
            span: Span::new(start, self.prev_end),
        };
        Ok(Expr::new(
            ExprKind::Arrow(self.arena.alloc(arrow)),
            Span::new(start, self.prev_end),
        ))
    }
}

fn logical_op(kind: &TokenKind) -> Option<LogicalOp> {
    match kind {
        TokenKind::AmpAmp => Some(LogicalOp::And),
        TokenKind::PipePipe => Some(LogicalOp::Or),
        TokenKind::QuestionQuestion => Some(LogicalOp::NullishCoalesce),
        _ => None,
    }
}

fn binary_op(kind: &TokenKind) -> BinaryOp {
    match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::StarStar => BinaryOp::Pow,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::BangEq => BinaryOp::NotEq,
        TokenKind::EqEqEq => BinaryOp::StrictEq,
        TokenKind::BangEqEq => BinaryOp::StrictNotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::LtLt => BinaryOp::Shl,
        TokenKind::GtGt => BinaryOp::Shr,
        TokenKind::GtGtGt => BinaryOp::UShr,
        TokenKind::In => BinaryOp::In,
        _ => BinaryOp::Instanceof,
    }
}
