//! Pre-order traversal over lowered syntax trees
//!
//! Every extraction concern is a [`Visitor`]. [`walk`] drives one visitor
//! through the whole tree; [`walk_all`] drives several in a single pass, which
//! is how the fused summary avoids re-walking the tree per concern. Visitors
//! see nodes in the same order either way, so their output is identical.

use super::syntax::SyntaxNode;

pub trait Visitor {
    /// Called once per node, parents before children, children in field order
    fn visit(&mut self, node: &SyntaxNode);
}

pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, node: &SyntaxNode) {
    visitor.visit(node);
    for child in node.children() {
        walk(visitor, child);
    }
}

/// One traversal feeding every visitor in turn
pub fn walk_all(visitors: &mut [&mut dyn Visitor], node: &SyntaxNode) {
    for visitor in visitors.iter_mut() {
        visitor.visit(node);
    }
    for child in node.children() {
        walk_all(visitors, child);
    }
}
