// Span and issue creation methods

use tree_sitter::Node;

use super::extractor::BaseExtractor;
use super::types::{Position, SourceLocation, Span, SyntaxIssue};

impl<'a> BaseExtractor<'a> {
    /// Create a span covering the whole node
    pub fn create_span(&self, node: &Node) -> Span {
        self.create_span_between(node, node)
    }

    /// Create a span from the start of `first` to the end of `last`
    pub fn create_span_between(&self, first: &Node, last: &Node) -> Span {
        let start_pos = first.start_position();
        let end_pos = last.end_position();

        Span {
            range: [first.start_byte(), last.end_byte()],
            loc: SourceLocation {
                start: Position {
                    line: (start_pos.row + 1) as u32, // 1-based line numbers
                    column: start_pos.column as u32,  // 0-based column numbers
                },
                end: Position {
                    line: (end_pos.row + 1) as u32,
                    column: end_pos.column as u32,
                },
            },
        }
    }

    /// Create a span for an arbitrary byte range
    ///
    /// Used for synthetic tokens such as template chunks that do not map to a
    /// single node.
    pub fn create_span_for_range(&self, start: usize, end: usize) -> Span {
        Span {
            range: [start, end],
            loc: SourceLocation {
                start: self.position_at(start),
                end: self.position_at(end),
            },
        }
    }

    /// Line/column of a byte offset
    pub fn position_at(&self, offset: usize) -> Position {
        let prefix = self.slice(0, offset.min(self.content.len()));
        let line = prefix.matches('\n').count() as u32 + 1;
        let column = match prefix.rfind('\n') {
            Some(newline) => prefix.len() - newline - 1,
            None => prefix.len(),
        };
        Position {
            line,
            column: column as u32,
        }
    }

    /// Create a syntax issue anchored at the node start
    pub fn create_issue(&self, node: &Node, message: String) -> SyntaxIssue {
        let start_pos = node.start_position();
        SyntaxIssue {
            line: (start_pos.row + 1) as u32,
            column: start_pos.column as u32,
            index: node.start_byte(),
            message,
        }
    }
}
