//! Source location tracking.
//!
//! Every AST node carries a `Span` with its byte range in the source text.
//! `LineIndex` turns byte offsets into 1-indexed line numbers without
//! rescanning the source per query.

/// A half-open byte range `[start, end)` in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the start (inclusive).
    pub start: u32,
    /// Byte offset of the end (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create an empty span at a position.
    #[inline]
    pub const fn empty(pos: u32) -> Self {
        Self { start: pos, end: pos }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    #[inline]
    pub const fn merge(self, other: Span) -> Span {
        Span {
            start: if self.start < other.start { self.start } else { other.start },
            end: if self.end > other.end { self.end } else { other.end },
        }
    }

    /// Check if this span contains a byte offset.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Slice the source text covered by this span.
    ///
    /// Spans produced by the parser always lie on codepoint boundaries, so
    /// the slice is safe for multi-byte UTF-8 content.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        let start = (self.start as usize).min(source.len());
        let end = (self.end as usize).min(source.len());
        source.get(start..end).unwrap_or("")
    }
}

/// Precomputed table of line-start offsets for one source string.
///
/// Built once in O(n); every lookup is a binary search. This replaces the
/// per-node "count newlines from the top" scan, which is quadratic across
/// all nodes of a file.
#[derive(Debug)]
pub struct LineIndex {
    /// Byte offsets of the start of each line. `line_starts[0] == 0` always.
    line_starts: Vec<u32>,
    /// Total source length in bytes, for clamping out-of-range offsets.
    len: u32,
}

impl LineIndex {
    /// Build a line index from source text.
    ///
    /// The offset immediately after every `\n` starts a new line. A `\r`
    /// before the `\n` is trailing content of the prior line, so `\r\n` and
    /// bare `\n` each terminate exactly one line.
    pub fn new(source: &str) -> Self {
        let mut line_starts = Vec::with_capacity(16);
        line_starts.push(0);
        for nl in memchr::memchr_iter(b'\n', source.as_bytes()) {
            line_starts.push((nl + 1) as u32);
        }
        Self {
            line_starts,
            len: source.len() as u32,
        }
    }

    /// Convert a byte offset to a 1-indexed line number.
    ///
    /// Offsets past the end of the source clamp to the last line; offset 0
    /// is always line 1, even for empty sources.
    pub fn line_of(&self, offset: u32) -> u32 {
        let offset = offset.min(self.len);
        // Greatest recorded line start <= offset.
        self.line_starts.partition_point(|&start| start <= offset) as u32
    }

    /// Convert a span to an inclusive, 1-indexed `(start_line, end_line)`.
    ///
    /// For a non-empty span the end line is taken from the last included
    /// byte, so a node ending exactly at a line boundary is not attributed
    /// to the following line.
    pub fn line_range(&self, span: Span) -> (u32, u32) {
        let start_line = self.line_of(span.start);
        let end_line = if span.is_empty() {
            start_line
        } else {
            self.line_of(span.end - 1)
        };
        (start_line, end_line)
    }

    /// Total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let a = Span::new(5, 10);
        let b = Span::new(8, 15);
        assert_eq!(a.merge(b), Span::new(5, 15));
    }

    #[test]
    fn test_span_text_multibyte() {
        let source = "const s = \"héllo\";";
        // "héllo" with quotes: h=11, é is 2 bytes
        let span = Span::new(10, 18);
        assert_eq!(span.text(source), "\"héllo\"");
    }

    #[test]
    fn test_line_of_basic() {
        let index = LineIndex::new("line1\nline2\nline3");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(5), 1); // the '\n' itself
        assert_eq!(index.line_of(6), 2);
        assert_eq!(index.line_of(12), 3);
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn test_line_of_crlf() {
        let index = LineIndex::new("a\r\nb\r\nc");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(1), 1); // '\r' belongs to line 1
        assert_eq!(index.line_of(3), 2);
        assert_eq!(index.line_of(6), 3);
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn test_line_of_empty_source() {
        let index = LineIndex::new("");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_count(), 1);
    }

    #[test]
    fn test_line_of_eof_offset() {
        let source = "a\nb";
        let index = LineIndex::new(source);
        assert_eq!(index.line_of(source.len() as u32), 2);
        // Past-EOF clamps rather than panicking.
        assert_eq!(index.line_of(1000), 2);
    }

    #[test]
    fn test_line_range_at_boundary() {
        let index = LineIndex::new("const x = 1;\nconst y = 2;");
        // Span ends exactly at the newline: still line 1.
        assert_eq!(index.line_range(Span::new(0, 12)), (1, 1));
        assert_eq!(index.line_range(Span::new(13, 25)), (2, 2));
        // Whole source.
        assert_eq!(index.line_range(Span::new(0, 25)), (1, 2));
    }

    #[test]
    fn test_line_range_empty_span() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.line_range(Span::empty(4)), (2, 2));
        assert_eq!(index.line_range(Span::empty(0)), (1, 1));
    }
}
