// CSS Extractor Rules - Lower rule sets and blocks into the rule model

use super::at_rules::AtRuleExtractor;
use super::helpers::DeclarationHelper;
use super::scanner::{split_block_items, BlockItem, UnbalancedBrace};
use super::types::{Block, CssRule, QualifiedRule};
use crate::extractors::base::BaseExtractor;
use crate::language::SourceLanguage;
use tracing::debug;
use tree_sitter::Node;

pub(super) struct RuleExtractor;

impl RuleExtractor {
    /// Lower every top-level construct of a `stylesheet` node
    ///
    /// Comments are skipped; malformed constructs and stray top-level
    /// declarations are dropped.
    pub(super) fn extract_stylesheet(base: &BaseExtractor, root: Node) -> Vec<CssRule> {
        let mut rules = Vec::new();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "declaration" => {
                    debug!(
                        "Dropping top-level declaration at line {}",
                        child.start_position().row + 1
                    );
                }
                _ => {
                    if let Some(rule) = Self::extract_rule(base, child) {
                        rules.push(rule);
                    }
                }
            }
        }

        rules
    }

    /// Lower one rule-like node; `None` for comments and malformed input
    pub(super) fn extract_rule(base: &BaseExtractor, node: Node) -> Option<CssRule> {
        match node.kind() {
            "rule_set" | "keyframe_block" => {
                Self::extract_qualified_rule(base, node).map(CssRule::Qualified)
            }
            "at_rule" => AtRuleExtractor::extract_at_rule(base, node).map(CssRule::At),
            kind if kind.ends_with("_statement") => {
                AtRuleExtractor::extract_at_rule(base, node).map(CssRule::At)
            }
            "comment" | "js_comment" => None,
            "ERROR" => {
                debug!(
                    "Dropping malformed CSS at line {}: {:?}",
                    node.start_position().row + 1,
                    base.node_str(&node)
                );
                None
            }
            other => {
                debug!("Skipping unexpected CSS node kind '{}'", other);
                None
            }
        }
    }

    /// Lower `selectors { ... }` (or a keyframe selector block)
    pub(super) fn extract_qualified_rule(base: &BaseExtractor, node: Node) -> Option<QualifiedRule> {
        let block_node = base.find_child_by_type(&node, "block");
        let selectors = base.find_child_by_type(&node, "selectors");
        let prelude_end = match (selectors, block_node) {
            (Some(selectors), _) => selectors.end_byte(),
            (None, Some(block_node)) => block_node.start_byte(),
            (None, None) => return None,
        };

        let prelude = base.slice(node.start_byte(), prelude_end).trim().to_string();
        if prelude.is_empty() {
            debug!(
                "Dropping rule without prelude at line {}",
                node.start_position().row + 1
            );
            return None;
        }

        // Recovery may have pushed part of the body outside the block node
        let block = if node.has_error() {
            let rest = base.slice(prelude_end, node.end_byte());
            let open = rest.find('{')?;
            Self::recover_block(base, &node, &rest[open..])
        } else {
            Self::extract_block(base, block_node?)
        };

        Some(QualifiedRule { prelude, block })
    }

    /// Lower the items of a `block` / `keyframe_block_list`
    pub(super) fn extract_block(base: &BaseExtractor, node: Node) -> Block {
        if node.has_error() {
            return Self::recover_block(base, &node, base.node_str(&node));
        }

        let mut block = Block::default();

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "declaration" => {
                    if let Some(declaration) = DeclarationHelper::parse_declaration(base, child) {
                        block.declarations.push(declaration);
                    }
                }
                _ => {
                    if let Some(rule) = Self::extract_rule(base, child) {
                        block.rules.push(rule);
                    }
                }
            }
        }

        block
    }

    /// Re-split `{ ... }` text the grammar had to recover inside
    fn recover_block(base: &BaseExtractor, node: &Node, text: &str) -> Block {
        debug!(
            "Recovering block at line {} from its text",
            node.start_position().row + 1
        );
        let inner = text.strip_prefix('{').unwrap_or(text);
        let inner = inner.strip_suffix('}').unwrap_or(inner);
        Self::block_from_text(inner)
    }

    /// Declarations and nested rules of raw block contents
    ///
    /// Nested rules are parsed again on their own; text after a stray `}` is
    /// dropped.
    pub(super) fn block_from_text(text: &str) -> Block {
        let items = match split_block_items(text) {
            Ok(items) => items,
            Err(UnbalancedBrace(offset)) => {
                debug!("Dropping block text after unbalanced '}}' at byte {}", offset);
                split_block_items(&text[..offset]).unwrap_or_default()
            }
        };

        let mut block = Block::default();
        for item in items {
            match item {
                BlockItem::Declaration(text) => {
                    match DeclarationHelper::parse_declaration_text(text) {
                        Some(declaration) => block.declarations.push(declaration),
                        None => debug!("Dropping malformed declaration {:?}", text.trim()),
                    }
                }
                BlockItem::Rule(text) => block.rules.extend(Self::parse_nested(text)),
            }
        }
        block
    }

    fn parse_nested(text: &str) -> Vec<CssRule> {
        let base = BaseExtractor::new(SourceLanguage::Css, text);
        match base.parse_tree() {
            Ok(tree) => Self::extract_stylesheet(&base, tree.root_node()),
            Err(e) => {
                debug!("Dropping nested rule that failed to parse: {}", e);
                Vec::new()
            }
        }
    }
}
