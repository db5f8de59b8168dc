// Base Extractor Types
//
// Source positions, spans and syntax issues shared by the CSS and JavaScript walkers.

use serde::{Deserialize, Serialize};

/// A point in source text
///
/// Lines are 1-based, columns are 0-based byte offsets within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Start/end positions of a node or token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

/// Byte range plus line/column location
///
/// Serializes as `{"range": [start, end], "loc": {...}}`, the shape consumers of
/// ESTree trees and token lists expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub range: [usize; 2],
    pub loc: SourceLocation,
}

/// A syntax problem reported by a grammar provider or a goal check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxIssue {
    /// 1-based line of the offending token
    pub line: u32,
    /// 0-based column of the offending token
    pub column: u32,
    /// Byte offset of the offending token
    pub index: usize,
    pub message: String,
}

impl std::fmt::Display for SyntaxIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}
