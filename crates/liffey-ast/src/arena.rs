//! Arena allocator for AST nodes.
//!
//! Every node and child slice produced by one parse lives in a single bump
//! region. Dropping or resetting the region frees the whole tree at once,
//! and resetting lets batch workloads reuse the same memory across many
//! sequential parses.

use bumpalo::Bump;

/// Reusable bump-allocation region owning all nodes of a parse.
///
/// Exactly one parse may build into an `Allocator` at a time, and every
/// `ParseResult` borrows it for as long as its nodes are alive. `reset`
/// takes `&mut self`, so the borrow checker rejects any program that keeps
/// a node across a reset:
///
/// ```compile_fail
/// # use liffey_ast::Allocator;
/// let mut allocator = Allocator::new();
/// let stale = allocator.alloc(42u32);
/// allocator.reset();
/// let _ = *stale;
/// ```
pub struct Allocator {
    bump: Bump,
}

impl Allocator {
    /// Create a new allocator with default capacity.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create a new allocator with the specified capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Allocate a value in the arena.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Allocate a string in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Create a Vec that allocates in this arena.
    #[inline]
    pub fn vec<T>(&self) -> bumpalo::collections::Vec<'_, T> {
        bumpalo::collections::Vec::new_in(&self.bump)
    }

    /// Create a Vec with capacity that allocates in this arena.
    #[inline]
    pub fn vec_with_capacity<T>(&self, capacity: usize) -> bumpalo::collections::Vec<'_, T> {
        bumpalo::collections::Vec::with_capacity_in(capacity, &self.bump)
    }

    /// Get the underlying bump allocator.
    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Reset the arena, reclaiming all memory for the next parse.
    ///
    /// Invalidates every node previously produced through this allocator;
    /// the exclusive borrow makes retaining one a compile error.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Total bytes currently allocated.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_reset() {
        let mut allocator = Allocator::new();
        {
            let v = allocator.alloc(7u64);
            assert_eq!(*v, 7);
            let s = allocator.alloc_str("hello");
            assert_eq!(s, "hello");
        }
        let used = allocator.allocated_bytes();
        assert!(used > 0);
        allocator.reset();
        // The arena chunk is retained for reuse; fresh allocations succeed.
        let v = allocator.alloc(9u32);
        assert_eq!(*v, 9);
    }

    #[test]
    fn test_vec_into_slice() {
        let allocator = Allocator::new();
        let mut v = allocator.vec_with_capacity(3);
        v.extend([1, 2, 3]);
        let slice: &[i32] = v.into_bump_slice();
        assert_eq!(slice, &[1, 2, 3]);
    }
}
