//! Structlens Extractors Module
//!
//! Tree-sitter backed walkers for the two supported languages.
//!
//! # Architecture
//!
//! - `base` - shared parser wrapper, spans, syntax issues and the error type
//! - `css` - stylesheet model, selectors, declarations, media queries, minify/prettify
//! - `javascript` - ESTree lowering, visitor-based extractors, tokens and comments
//! - `manager` - AnalysisManager public API and parallel batch analysis

pub mod base;
pub mod css;
pub mod javascript;
pub mod manager;

// Re-export the public API
pub use base::{AnalyzerError, AnalyzerResult, SyntaxIssue};
pub use manager::{AnalysisManager, FileReport, SourceFile};
