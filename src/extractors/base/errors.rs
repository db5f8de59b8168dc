// Analyzer errors
//
// The only failures that cross the engine boundary. Soft failures (dropped CSS
// constructs, swallowed comment parses) never become errors.

use super::types::SyntaxIssue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// tree-sitter returned no tree (only happens when parsing is cancelled)
    #[error("Parser produced no tree for {0} source")]
    ParserUnavailable(&'static str),

    #[error("Failed to parse JavaScript: {0}")]
    Parse(SyntaxIssue),

    #[error("Failed to parse CSS: {0}")]
    CssSyntax(SyntaxIssue),

    #[error("Failed to serialize syntax tree: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
