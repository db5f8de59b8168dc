//! Variable collection: one record per declarator

use super::syntax::{NodeKind, SyntaxNode};
use super::types::{DeclKind, VariableInfo};
use super::visitor::Visitor;

#[derive(Debug, Default)]
pub(super) struct VariableCollector {
    pub(super) variables: Vec<VariableInfo>,
}

impl Visitor for VariableCollector {
    fn visit(&mut self, node: &SyntaxNode) {
        if node.kind != NodeKind::VariableDeclaration {
            return;
        }
        let Some(decl_kind) = node.text("kind").and_then(DeclKind::from_keyword) else {
            return;
        };

        let declarators = node
            .list("declarations")
            .iter()
            .filter(|declarator| declarator.kind == NodeKind::VariableDeclarator);
        for declarator in declarators {
            self.variables.push(VariableInfo {
                decl_kind,
                name: declarator
                    .field("id")
                    .and_then(SyntaxNode::identifier_name)
                    .map(str::to_string),
            });
        }
    }
}
