//! liffey-parser: JavaScript, TypeScript, and JSX parser producing
//! arena-allocated syntax trees.
//!
//! The parser is recursive descent over an on-demand lexer. Everything it
//! builds lives in a caller-supplied [`Allocator`], so a whole tree is
//! freed (or recycled) in one step and nodes are plain `Copy` references.
//!
//! Errors never abort the parse. Each bad statement produces a
//! [`Diagnostic`] and the parser resynchronizes at the next statement
//! boundary, so tooling always gets a tree plus the list of problems:
//!
//! ```
//! use liffey_ast::Allocator;
//! use liffey_parser::{parse, SourceType};
//!
//! let allocator = Allocator::new();
//! let result = parse(&allocator, "const x = 1;", SourceType::Module);
//! assert!(result.is_valid());
//! assert_eq!(result.program.body.len(), 1);
//! ```

use std::str::FromStr;

use liffey_ast::ast::Program;
use liffey_ast::{Allocator, Span};

mod comments;
mod diagnostics;
mod jsx;
mod lexer;
mod parser;
mod token;
mod ts;

pub use comments::Comment;
pub use diagnostics::{Diagnostic, Severity};
pub use parser::Parser;
pub use token::{Token, TokenKind};

/// Which dialect the source is parsed as.
///
/// The dialect is a runtime value, not a compile-time feature: one binary
/// can parse `.js`, `.ts`, and `.tsx` files side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// ES module JavaScript.
    Module,
    /// Classic script JavaScript.
    Script,
    /// JavaScript with JSX.
    Jsx,
    /// TypeScript.
    Ts,
    /// TypeScript with JSX.
    Tsx,
}

impl SourceType {
    pub fn is_typescript(self) -> bool {
        matches!(self, SourceType::Ts | SourceType::Tsx)
    }

    pub fn has_jsx(self) -> bool {
        matches!(self, SourceType::Jsx | SourceType::Tsx)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Module => "module",
            SourceType::Script => "script",
            SourceType::Jsx => "jsx",
            SourceType::Ts => "ts",
            SourceType::Tsx => "tsx",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source type string was not recognized. Unlike syntax errors this is a
/// configuration mistake, so it fails fast instead of joining the
/// diagnostic list.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown source type `{0}` (expected module, script, jsx, ts, or tsx)")]
pub struct SourceTypeError(String);

impl FromStr for SourceType {
    type Err = SourceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "module" => Ok(SourceType::Module),
            "script" => Ok(SourceType::Script),
            "jsx" => Ok(SourceType::Jsx),
            "ts" | "typescript" => Ok(SourceType::Ts),
            "tsx" => Ok(SourceType::Tsx),
            _ => Err(SourceTypeError(s.to_string())),
        }
    }
}

/// Everything one parse produces.
#[derive(Debug)]
pub struct ParseResult<'a> {
    /// The tree root. Present even for badly broken input; recovery keeps
    /// whatever statements parsed.
    pub program: Program<'a>,
    /// Syntax errors and warnings, in source order.
    pub errors: Vec<Diagnostic>,
    /// Comments encountered while lexing, delimiters stripped.
    pub comments: Vec<Comment<'a>>,
    /// True when the parser gave up early (for example on pathologically
    /// deep nesting). The program then covers only a prefix of the input.
    pub panicked: bool,
}

impl ParseResult<'_> {
    /// True when the input parsed cleanly: no diagnostics of any severity
    /// and no panic.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && !self.panicked
    }
}

/// Parse `source` as `source_type`, allocating every node in `allocator`.
pub fn parse<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    source_type: SourceType,
) -> ParseResult<'a> {
    tracing::debug!(len = source.len(), %source_type, "parse start");

    // Spans are u32 offsets.
    if source.len() > u32::MAX as usize {
        return ParseResult {
            program: Program::new(&[], Span::empty(0)),
            errors: vec![Diagnostic::error(
                "Source is too large to index with 32-bit spans",
                Span::empty(0),
            )],
            comments: Vec::new(),
            panicked: true,
        };
    }

    Parser::new(allocator, source, source_type).parse()
}
