//! Class collection

use super::syntax::{NodeKind, SyntaxNode};
use super::types::ClassInfo;
use super::visitor::Visitor;

#[derive(Debug, Default)]
pub(super) struct ClassCollector {
    pub(super) classes: Vec<ClassInfo>,
}

impl Visitor for ClassCollector {
    fn visit(&mut self, node: &SyntaxNode) {
        if !matches!(
            node.kind,
            NodeKind::ClassDeclaration | NodeKind::ClassExpression
        ) {
            return;
        }
        let name_of = |field: &str| {
            node.field(field)
                .and_then(SyntaxNode::identifier_name)
                .map(str::to_string)
        };
        self.classes.push(ClassInfo {
            name: name_of("id"),
            superclass_name: name_of("superClass"),
        });
    }
}
