//! liffey-ast: Arena-allocated syntax tree for JavaScript/TypeScript/JSX
//!
//! # Design Principles
//!
//! 1. **One arena per parse**
//!    - Every node, string, and child slice lives in one [`Allocator`]
//!    - Dropping or resetting the arena frees the whole tree at once
//!    - Retaining a node across a reset is a compile error, not a crash
//!
//! 2. **Plain references, no indices**
//!    - Children are `&'a T` and `&'a [T]`; the tree is a DAG over the arena
//!    - All nodes are `Copy`, so holding one is free
//!
//! 3. **Uniform view for tooling**
//!    - [`Node`] wraps any node with the same capability set: `type_name`,
//!      `span`, `get_text`, `get_line_range`, `name`
//!    - [`walk`] yields `(Node, depth)` in depth-first pre-order
//!
//! # Example
//!
//! ```ignore
//! use liffey_ast::{walk, Node};
//!
//! for (node, depth) in walk(Node::Program(program)) {
//!     println!("{}{}", "  ".repeat(depth as usize), node.type_name());
//! }
//! ```

mod arena;
pub mod ast;
pub mod jsx;
mod node;
mod span;
pub mod typescript;
mod walk;

// Re-exports
pub use arena::Allocator;
pub use ast::*;
pub use jsx::*;
pub use node::Node;
pub use span::{LineIndex, Span};
pub use typescript::*;
pub use walk::{walk, Walk};
