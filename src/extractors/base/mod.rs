// Base Extractor Types and Helpers
//
// Shared by the CSS and JavaScript walkers:
// - types.rs: positions, spans, syntax issues
// - errors.rs: AnalyzerError (the only errors that cross the engine boundary)
// - extractor.rs: BaseExtractor (source text + tree-sitter parsing)
// - tree_methods.rs: tree navigation and error discovery
// - creation_methods.rs: span and issue construction

pub mod creation_methods;
pub mod errors;
pub mod extractor;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use errors::{AnalyzerError, AnalyzerResult};
pub use extractor::BaseExtractor;
pub use types::{Position, SourceLocation, Span, SyntaxIssue};
