//! Token and comment streams
//!
//! Tokens are read off the leaves of the tree-sitter tree. Strings, numbers
//! and regular expressions are single tokens even though the grammar gives
//! them inner structure; template literals split into the text chunks around
//! each substitution, with the substitution's own tokens in between.

use super::parser::{checked_tree, Grammar, ParseOptions};
use super::types::{Comment, CommentType, Token, TokenType};
use crate::extractors::base::{AnalyzerResult, BaseExtractor};
use crate::language::SourceLanguage;
use tracing::debug;
use tree_sitter::Node;

/// Reserved words reported as `Keyword`; contextual words such as `of`,
/// `async` or `static` are identifiers
const KEYWORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "finally", "for", "function", "if",
    "import", "in", "instanceof", "let", "new", "return", "super", "switch", "this", "throw",
    "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Comments never become tokens
const COMMENT_KINDS: &[&str] = &["comment", "html_comment", "hash_bang_line"];

pub(super) struct Tokenizer<'a> {
    base: &'a BaseExtractor<'a>,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    pub(super) fn new(base: &'a BaseExtractor<'a>) -> Self {
        Self {
            base,
            tokens: Vec::new(),
        }
    }

    pub(super) fn tokenize(mut self, root: Node) -> Vec<Token> {
        self.visit(root);
        self.tokens
    }

    fn visit(&mut self, node: Node) {
        if node.is_missing() || COMMENT_KINDS.contains(&node.kind()) {
            return;
        }
        match node.kind() {
            "string" => return self.push(&node, TokenType::String),
            "number" => return self.push(&node, TokenType::Numeric),
            "regex" => return self.push(&node, TokenType::RegularExpression),
            "template_string" => return self.visit_template(node),
            _ => {}
        }

        if node.child_count() == 0 {
            if node.start_byte() < node.end_byte() {
                let token_type = self.classify_leaf(&node);
                self.push(&node, token_type);
            }
            return;
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        for child in children {
            self.visit(child);
        }
    }

    /// `` `a${ `` and `` }b` `` are template tokens; what sits between is tokenized normally
    fn visit_template(&mut self, node: Node) {
        let mut chunk_start = node.start_byte();
        let mut cursor = node.walk();
        let substitutions: Vec<Node> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "template_substitution")
            .collect();

        for substitution in substitutions {
            let open_end = (substitution.start_byte() + 2).min(substitution.end_byte());
            self.push_range(chunk_start, open_end, TokenType::Template);

            let mut inner = substitution.walk();
            let expressions: Vec<Node> = substitution.named_children(&mut inner).collect();
            for expression in expressions {
                self.visit(expression);
            }
            chunk_start = substitution.end_byte().saturating_sub(1).max(open_end);
        }
        self.push_range(chunk_start, node.end_byte(), TokenType::Template);
    }

    fn classify_leaf(&self, node: &Node) -> TokenType {
        match node.kind() {
            "true" | "false" => return TokenType::Boolean,
            "null" => return TokenType::Null,
            "private_property_identifier" => return TokenType::PrivateIdentifier,
            "jsx_text" | "html_character_reference" => return TokenType::JSXText,
            _ => {}
        }

        let text = self.base.node_str(node);
        let starts_word = text
            .chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$' || c == '\\');
        if !starts_word {
            TokenType::Punctuator
        } else if KEYWORDS.contains(&text) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        }
    }

    fn push(&mut self, node: &Node, token_type: TokenType) {
        self.push_range(node.start_byte(), node.end_byte(), token_type);
    }

    fn push_range(&mut self, start: usize, end: usize, token_type: TokenType) {
        if start >= end {
            return;
        }
        self.tokens.push(Token {
            token_type,
            value: self.base.slice(start, end).to_string(),
            span: self.base.create_span_for_range(start, end),
        });
    }
}

/// Tokens of any source, module syntax and JSX included
pub(super) fn tokenize(code: &str) -> AnalyzerResult<Vec<Token>> {
    let base = BaseExtractor::new(SourceLanguage::JavaScript, code);
    let tree = base.parse_tree()?;
    Ok(Tokenizer::new(&base).tokenize(tree.root_node()))
}

/// Comments of a strictly valid script; any parse failure yields no comments
pub(super) fn extract_comments(code: &str) -> Vec<Comment> {
    let base = BaseExtractor::new(SourceLanguage::JavaScript, code);
    let tree = match checked_tree(&base, Grammar::Script, &ParseOptions::strict(Grammar::Script)) {
        Ok((tree, _)) => tree,
        Err(e) => {
            debug!("Comment extraction skipped: {}", e);
            return Vec::new();
        }
    };

    base.find_nodes_by_type(&tree.root_node(), "comment")
        .iter()
        .map(|node| comment(&base, node))
        .collect()
}

fn comment(base: &BaseExtractor, node: &Node) -> Comment {
    let text = base.node_str(node);
    let (comment_type, value) = match text.strip_prefix("//") {
        Some(line) => (CommentType::Line, line),
        None => (
            CommentType::Block,
            text.strip_prefix("/*")
                .and_then(|inner| inner.strip_suffix("*/"))
                .unwrap_or(text),
        ),
    };
    Comment {
        comment_type,
        value: value.to_string(),
        span: base.create_span(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_pairs(code: &str) -> Vec<(TokenType, String)> {
        tokenize(code)
            .unwrap()
            .into_iter()
            .map(|t| (t.token_type, t.value))
            .collect()
    }

    #[test]
    fn test_basic_token_types() {
        let tokens = token_pairs("const x = require('fs'); if (x === null) { y = true; }");
        let expected: Vec<(TokenType, &str)> = vec![
            (TokenType::Keyword, "const"),
            (TokenType::Identifier, "x"),
            (TokenType::Punctuator, "="),
            (TokenType::Identifier, "require"),
            (TokenType::Punctuator, "("),
            (TokenType::String, "'fs'"),
            (TokenType::Punctuator, ")"),
            (TokenType::Punctuator, ";"),
            (TokenType::Keyword, "if"),
            (TokenType::Punctuator, "("),
            (TokenType::Identifier, "x"),
            (TokenType::Punctuator, "==="),
            (TokenType::Null, "null"),
            (TokenType::Punctuator, ")"),
            (TokenType::Punctuator, "{"),
            (TokenType::Identifier, "y"),
            (TokenType::Punctuator, "="),
            (TokenType::Boolean, "true"),
            (TokenType::Punctuator, ";"),
            (TokenType::Punctuator, "}"),
        ];
        let expected: Vec<(TokenType, String)> = expected
            .into_iter()
            .map(|(t, v)| (t, v.to_string()))
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_atomic_literals_and_comments_skipped() {
        let tokens = token_pairs("// lead\nlet r = /a+b/gi; /* mid */ n = 0x1F;");
        assert!(tokens.contains(&(TokenType::RegularExpression, "/a+b/gi".to_string())));
        assert!(tokens.contains(&(TokenType::Numeric, "0x1F".to_string())));
        assert!(tokens.iter().all(|(_, v)| !v.contains("lead") && !v.contains("mid")));
        assert_eq!(tokens[0], (TokenType::Keyword, "let".to_string()));
    }

    #[test]
    fn test_template_chunks() {
        let tokens = token_pairs("`a${b}c`");
        assert_eq!(
            tokens,
            vec![
                (TokenType::Template, "`a${".to_string()),
                (TokenType::Identifier, "b".to_string()),
                (TokenType::Template, "}c`".to_string()),
            ]
        );
    }

    #[test]
    fn test_token_span() {
        let tokens = tokenize("a\n  bc").unwrap();
        assert_eq!(tokens[1].value, "bc");
        assert_eq!(tokens[1].span.range, [4, 6]);
        assert_eq!(tokens[1].span.loc.start.line, 2);
        assert_eq!(tokens[1].span.loc.start.column, 2);
    }

    #[test]
    fn test_extract_comments() {
        let comments = extract_comments("// first\nvar a = 1; /* second */");
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].comment_type, CommentType::Line);
        assert_eq!(comments[0].value, " first");
        assert_eq!(comments[1].comment_type, CommentType::Block);
        assert_eq!(comments[1].value, " second ");
        assert_eq!(comments[1].span.range, [20, 32]);
    }

    #[test]
    fn test_extract_comments_swallows_failures() {
        assert!(extract_comments("// c\nimport a from 'b';").is_empty());
        assert!(extract_comments("var = ; // broken").is_empty());
    }
}
