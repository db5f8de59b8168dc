// BaseExtractor implementation
//
// Owns nothing: borrows the source text for the duration of one lowering pass
// and knows how to turn it into a tree-sitter tree.

use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

use super::errors::{AnalyzerError, AnalyzerResult};
use crate::language::{get_tree_sitter_language, SourceLanguage};

/// Shared plumbing for the CSS and JavaScript walkers
pub struct BaseExtractor<'a> {
    pub language: SourceLanguage,
    pub content: &'a str,
}

impl<'a> BaseExtractor<'a> {
    pub fn new(language: SourceLanguage, content: &'a str) -> Self {
        Self { language, content }
    }

    /// Parse the borrowed content with the grammar for `self.language`
    pub fn parse_tree(&self) -> AnalyzerResult<Tree> {
        let grammar = get_tree_sitter_language(self.language.as_str())
            .map_err(|e| AnalyzerError::UnsupportedLanguage(e.to_string()))?;

        let mut parser = Parser::new();
        parser.set_language(&grammar)?;

        let tree = parser
            .parse(self.content, None)
            .ok_or(AnalyzerError::ParserUnavailable(self.language.as_str()))?;

        debug!(
            "Parsed {} bytes of {} (errors: {})",
            self.content.len(),
            self.language,
            tree.root_node().has_error()
        );

        Ok(tree)
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        self.node_str(node).to_string()
    }

    /// Borrowed node text; empty if the node range falls outside the content
    pub fn node_str(&self, node: &Node) -> &'a str {
        self.slice(node.start_byte(), node.end_byte())
    }

    /// Borrowed text between two byte offsets; empty when the range is invalid
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let content = self.content;
        if start > end || end > content.len() {
            return "";
        }
        content.get(start..end).unwrap_or("")
    }
}
