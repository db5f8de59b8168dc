// Statement lowering

use super::super::syntax::{Field, NodeKind, SyntaxNode};
use tree_sitter::Node;

impl super::Lowerer<'_> {
    pub(super) fn lower_expression_statement(&self, node: Node) -> SyntaxNode {
        match self.first_named(&node) {
            Some(expression) => SyntaxNode::new(NodeKind::ExpressionStatement, self.span(&node))
                .with("expression", Field::node(self.lower(expression))),
            None => self.leaf(&node, NodeKind::EmptyStatement),
        }
    }

    pub(super) fn lower_block(&self, node: Node) -> SyntaxNode {
        let body = self.lower_list(self.named_children(&node));
        SyntaxNode::new(NodeKind::BlockStatement, self.span(&node)).with("body", Field::List(body))
    }

    pub(super) fn lower_if(&self, node: Node) -> SyntaxNode {
        let alternate = node
            .child_by_field_name("alternative")
            .and_then(|else_clause| self.first_named(&else_clause));

        SyntaxNode::new(NodeKind::IfStatement, self.span(&node))
            .with("test", self.lower_field(&node, "condition"))
            .with("consequent", self.lower_field(&node, "consequence"))
            .with("alternate", self.lower_opt(alternate))
    }

    pub(super) fn lower_switch(&self, node: Node) -> SyntaxNode {
        let cases = node
            .child_by_field_name("body")
            .map(|body| {
                self.named_children(&body)
                    .into_iter()
                    .filter(|case| matches!(case.kind(), "switch_case" | "switch_default"))
                    .map(|case| self.lower_switch_case(case))
                    .collect()
            })
            .unwrap_or_default();

        SyntaxNode::new(NodeKind::SwitchStatement, self.span(&node))
            .with("discriminant", self.lower_field(&node, "value"))
            .with("cases", Field::List(cases))
    }

    /// `default:` has a null test; the consequent is every statement after the colon
    fn lower_switch_case(&self, node: Node) -> SyntaxNode {
        let test = node.child_by_field_name("value");
        let consequent: Vec<Node> = self
            .named_children(&node)
            .into_iter()
            .filter(|child| Some(child.id()) != test.map(|t| t.id()))
            .collect();

        SyntaxNode::new(NodeKind::SwitchCase, self.span(&node))
            .with("test", self.lower_opt(test))
            .with("consequent", Field::List(self.lower_list(consequent)))
    }

    pub(super) fn lower_for(&self, node: Node) -> SyntaxNode {
        let init = node
            .child_by_field_name("initializer")
            .and_then(|init| self.for_clause(init));
        let test = node
            .child_by_field_name("condition")
            .and_then(|test| self.for_clause(test));

        SyntaxNode::new(NodeKind::ForStatement, self.span(&node))
            .with("init", self.lower_opt(init))
            .with("test", self.lower_opt(test))
            .with("update", self.lower_field(&node, "increment"))
            .with("body", self.lower_field(&node, "body"))
    }

    /// A `for (...;...;...)` clause: `;` is empty, statements are unwrapped
    fn for_clause<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        match node.kind() {
            "empty_statement" | ";" => None,
            "expression_statement" => self.first_named(&node),
            _ => Some(node),
        }
    }

    pub(super) fn lower_for_in(&self, node: Node) -> SyntaxNode {
        let is_of = node
            .child_by_field_name("operator")
            .map(|op| self.base.node_str(&op) == "of")
            .unwrap_or_else(|| self.has_token(&node, "of"));

        let left = match (node.child_by_field_name("kind"), node.child_by_field_name("left")) {
            (Some(kind), Some(left)) => Field::node(self.lower_for_binding(&node, kind, left)),
            (None, left) => self.lower_opt(left),
            (Some(_), None) => Field::Null,
        };

        let kind = if is_of {
            NodeKind::ForOfStatement
        } else {
            NodeKind::ForInStatement
        };
        let mut lowered = SyntaxNode::new(kind, self.span(&node))
            .with("left", left)
            .with("right", self.lower_field(&node, "right"))
            .with("body", self.lower_field(&node, "body"));
        if is_of {
            lowered = lowered.with("await", Field::Bool(self.has_token(&node, "await")));
        }
        lowered
    }

    /// `for (const x of ...)` declares its binding in the header
    fn lower_for_binding(&self, node: &Node, kind: Node, left: Node) -> SyntaxNode {
        let init = node.child_by_field_name("value");
        let last = init.unwrap_or(left);

        let declarator = SyntaxNode::new(
            NodeKind::VariableDeclarator,
            self.base.create_span_between(&left, &last),
        )
        .with("id", Field::node(self.lower(left)))
        .with("init", self.lower_opt(init));

        SyntaxNode::new(
            NodeKind::VariableDeclaration,
            self.base.create_span_between(&kind, &last),
        )
        .with("declarations", Field::List(vec![declarator]))
        .with("kind", Field::str(self.base.node_str(&kind)))
    }

    pub(super) fn lower_while(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::WhileStatement, self.span(&node))
            .with("test", self.lower_field(&node, "condition"))
            .with("body", self.lower_field(&node, "body"))
    }

    pub(super) fn lower_do_while(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::DoWhileStatement, self.span(&node))
            .with("body", self.lower_field(&node, "body"))
            .with("test", self.lower_field(&node, "condition"))
    }

    pub(super) fn lower_try(&self, node: Node) -> SyntaxNode {
        let handler = node.child_by_field_name("handler").map(|catch| {
            SyntaxNode::new(NodeKind::CatchClause, self.span(&catch))
                .with("param", self.lower_field(&catch, "parameter"))
                .with("body", self.lower_field(&catch, "body"))
        });
        let finalizer = node
            .child_by_field_name("finalizer")
            .and_then(|finally| finally.child_by_field_name("body"));

        SyntaxNode::new(NodeKind::TryStatement, self.span(&node))
            .with("block", self.lower_field(&node, "body"))
            .with("handler", Field::opt(handler))
            .with("finalizer", self.lower_opt(finalizer))
    }

    pub(super) fn lower_with(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::WithStatement, self.span(&node))
            .with("object", self.lower_field(&node, "object"))
            .with("body", self.lower_field(&node, "body"))
    }

    /// `break` / `continue` with an optional label
    pub(super) fn lower_jump(&self, node: Node, kind: NodeKind) -> SyntaxNode {
        let label = node
            .child_by_field_name("label")
            .or_else(|| self.base.find_child_by_type(&node, "statement_identifier"));
        SyntaxNode::new(kind, self.span(&node)).with("label", self.lower_opt(label))
    }

    /// `return` / `throw`
    pub(super) fn lower_argument_statement(&self, node: Node, kind: NodeKind) -> SyntaxNode {
        SyntaxNode::new(kind, self.span(&node)).with("argument", self.lower_opt(self.first_named(&node)))
    }

    pub(super) fn lower_labeled(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::LabeledStatement, self.span(&node))
            .with("label", self.lower_field(&node, "label"))
            .with("body", self.lower_field(&node, "body"))
    }
}
