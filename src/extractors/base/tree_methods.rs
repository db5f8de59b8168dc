// Tree navigation methods for BaseExtractor

use super::extractor::BaseExtractor;
use super::types::SyntaxIssue;
use tree_sitter::Node;

impl<'a> BaseExtractor<'a> {
    /// Find nodes by type (pre-order)
    pub fn find_nodes_by_type<'t>(&self, node: &Node<'t>, node_type: &str) -> Vec<Node<'t>> {
        let mut nodes = Vec::new();
        self.find_nodes_by_type_recursive(node, node_type, &mut nodes);
        nodes
    }

    #[allow(clippy::only_used_in_recursion)] // &self used in recursive calls
    fn find_nodes_by_type_recursive<'t>(
        &self,
        node: &Node<'t>,
        node_type: &str,
        nodes: &mut Vec<Node<'t>>,
    ) {
        if node.kind() == node_type {
            nodes.push(*node);
        }

        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.find_nodes_by_type_recursive(&child, node_type, nodes);
            }
        }
    }

    /// Find first child by type
    pub fn find_child_by_type<'t>(&self, node: &Node<'t>, child_type: &str) -> Option<Node<'t>> {
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                if child.kind() == child_type {
                    return Some(child);
                }
            }
        }
        None
    }

    /// True when any direct child (named or anonymous) has the given kind
    pub fn has_child_of_type(&self, node: &Node, child_type: &str) -> bool {
        self.find_child_by_type(node, child_type).is_some()
    }

    /// Every `ERROR` / `MISSING` node, outermost first, as syntax issues
    pub fn collect_syntax_issues(&self, root: &Node) -> Vec<SyntaxIssue> {
        let mut issues = Vec::new();
        if root.has_error() {
            self.collect_syntax_issues_recursive(root, &mut issues);
        }
        issues
    }

    fn collect_syntax_issues_recursive(&self, node: &Node, issues: &mut Vec<SyntaxIssue>) {
        if node.is_missing() {
            issues.push(self.create_issue(node, format!("Missing {}", node.kind())));
            return;
        }
        if node.is_error() {
            issues.push(self.create_issue(node, self.describe_error(node)));
            return;
        }
        if !node.has_error() {
            return;
        }
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.collect_syntax_issues_recursive(&child, issues);
            }
        }
    }

    /// First offending token inside an ERROR node, esprima style
    fn describe_error(&self, node: &Node) -> String {
        let mut leaf = *node;
        while let Some(first) = leaf.child(0) {
            leaf = first;
        }
        let token = self.node_str(&leaf).trim();
        if token.is_empty() {
            if node.start_byte() >= self.content.trim_end().len() {
                "Unexpected end of input".to_string()
            } else {
                "Unexpected token".to_string()
            }
        } else {
            format!("Unexpected token {}", token)
        }
    }
}
