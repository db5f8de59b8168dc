// CSS Extractor At-Rules - Lower @media, @import, @keyframes, @font-face, etc.

use super::rules::RuleExtractor;
use super::types::AtRule;
use crate::extractors::base::BaseExtractor;
use tracing::debug;
use tree_sitter::Node;

/// Node kinds that hold the body of an at-rule
const AT_RULE_BODY_KINDS: [&str; 2] = ["block", "keyframe_block_list"];

pub(super) struct AtRuleExtractor;

impl AtRuleExtractor {
    /// Lower any at-rule flavoured node
    ///
    /// The prelude is everything between the at-keyword and the body (or the
    /// terminating `;`), trimmed.
    pub(super) fn extract_at_rule(base: &BaseExtractor, node: Node) -> Option<AtRule> {
        let keyword = node.child(0)?;
        let name = Self::extract_at_rule_name(base, &keyword)?;

        let body = Self::find_body(&node);
        let prelude_end = match body {
            Some(body) => body.start_byte(),
            None => Self::terminator_start(&node).unwrap_or_else(|| node.end_byte()),
        };
        let prelude = base
            .slice(keyword.end_byte(), prelude_end)
            .trim()
            .to_string();

        if body.is_none() && node.has_error() {
            debug!(
                "Dropping malformed @{} at line {}",
                name,
                node.start_position().row + 1
            );
            return None;
        }

        Some(AtRule {
            name,
            prelude,
            block: body.map(|body| RuleExtractor::extract_block(base, body)),
        })
    }

    /// Lowercased keyword without `@`; `None` when the node does not start with one
    pub(super) fn extract_at_rule_name(base: &BaseExtractor, keyword: &Node) -> Option<String> {
        let text = base.node_str(keyword).trim();
        let name = text.strip_prefix('@')?;
        let name = name
            .split(|c: char| c.is_whitespace() || c == '(' || c == '{' || c == ';')
            .next()
            .unwrap_or("");
        if name.is_empty() {
            None
        } else {
            Some(name.to_lowercase())
        }
    }

    fn find_body<'t>(node: &Node<'t>) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let body = node
            .children(&mut cursor)
            .find(|child| AT_RULE_BODY_KINDS.contains(&child.kind()));
        body
    }

    fn terminator_start(node: &Node) -> Option<usize> {
        let last = node.child(node.child_count().checked_sub(1)?)?;
        (last.kind() == ";").then(|| last.start_byte())
    }
}
