//! Function collection
//!
//! Declarations, expressions (including object and class methods, which lower
//! to `FunctionExpression`) and arrows, in pre-order.

use super::syntax::{NodeKind, SyntaxNode};
use super::types::{FunctionInfo, FunctionKind};
use super::visitor::Visitor;

#[derive(Debug, Default)]
pub(super) struct FunctionCollector {
    pub(super) functions: Vec<FunctionInfo>,
}

impl Visitor for FunctionCollector {
    fn visit(&mut self, node: &SyntaxNode) {
        let kind = match node.kind {
            NodeKind::FunctionDeclaration => FunctionKind::Declaration,
            NodeKind::FunctionExpression => FunctionKind::Expression,
            NodeKind::ArrowFunctionExpression => FunctionKind::Arrow,
            _ => return,
        };
        self.functions.push(function_info(node, kind));
    }
}

fn function_info(node: &SyntaxNode, kind: FunctionKind) -> FunctionInfo {
    let is_arrow = kind == FunctionKind::Arrow;
    let name = if is_arrow {
        None
    } else {
        node.field("id")
            .and_then(SyntaxNode::identifier_name)
            .map(str::to_string)
    };

    let params = node
        .list("params")
        .iter()
        .filter_map(SyntaxNode::identifier_name)
        .map(str::to_string)
        .collect();

    FunctionInfo {
        kind,
        name,
        params,
        is_async: node.flag("async"),
        is_generator: !is_arrow && node.flag("generator"),
    }
}
