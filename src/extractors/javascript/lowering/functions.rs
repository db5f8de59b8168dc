// Function, class and variable declaration lowering

use super::super::syntax::{Field, NodeKind, SyntaxNode};
use tree_sitter::Node;

impl super::Lowerer<'_> {
    /// `function` declarations and expressions, generator forms included
    pub(super) fn lower_function(&self, node: Node, kind: NodeKind) -> SyntaxNode {
        let generator = node.kind().starts_with("generator") || self.has_token(&node, "*");

        SyntaxNode::new(kind, self.span(&node))
            .with("id", self.lower_field(&node, "name"))
            .with("params", Field::List(self.lower_params(&node)))
            .with("body", self.lower_field(&node, "body"))
            .with("generator", Field::Bool(generator))
            .with("expression", Field::Bool(false))
            .with("async", Field::Bool(self.has_token(&node, "async")))
    }

    /// Arrows have no id and are never generators
    pub(super) fn lower_arrow(&self, node: Node) -> SyntaxNode {
        let params = match node.child_by_field_name("parameter") {
            Some(single) => vec![self.lower(single)],
            None => self.lower_params(&node),
        };
        let body = node.child_by_field_name("body");
        let expression = body
            .map(|body| body.kind() != "statement_block")
            .unwrap_or(false);

        SyntaxNode::new(NodeKind::ArrowFunctionExpression, self.span(&node))
            .with("id", Field::Null)
            .with("params", Field::List(params))
            .with("body", self.lower_opt(body))
            .with("generator", Field::Bool(false))
            .with("expression", Field::Bool(expression))
            .with("async", Field::Bool(self.has_token(&node, "async")))
    }

    /// Parameters of any function-like node, in order
    pub(super) fn lower_params(&self, node: &Node) -> Vec<SyntaxNode> {
        match node.child_by_field_name("parameters") {
            Some(params) => self.lower_list(self.named_children(&params)),
            None => Vec::new(),
        }
    }

    pub(super) fn lower_class(&self, node: Node, kind: NodeKind) -> SyntaxNode {
        let super_class = self
            .base
            .find_child_by_type(&node, "class_heritage")
            .and_then(|heritage| self.first_named(&heritage));

        let body = node.child_by_field_name("body").map(|body| {
            let members = self.lower_list(self.named_children(&body));
            SyntaxNode::new(NodeKind::ClassBody, self.span(&body))
                .with("body", Field::List(members))
        });

        SyntaxNode::new(kind, self.span(&node))
            .with("id", self.lower_field(&node, "name"))
            .with("superClass", self.lower_opt(super_class))
            .with("body", Field::opt(body))
    }

    /// Class method; the callable part becomes a `FunctionExpression` value
    pub(super) fn lower_method_definition(&self, node: Node) -> SyntaxNode {
        let (key, computed) = self.lower_property_key(node.child_by_field_name("name"));
        let is_static = self.has_token(&node, "static") || self.has_token(&node, "static get");

        let kind = if self.has_token(&node, "get") || self.has_token(&node, "static get") {
            "get"
        } else if self.has_token(&node, "set") {
            "set"
        } else if !is_static && self.key_name(&key) == Some("constructor") {
            "constructor"
        } else {
            "method"
        };

        SyntaxNode::new(NodeKind::MethodDefinition, self.span(&node))
            .with("key", key)
            .with("computed", Field::Bool(computed))
            .with("value", Field::node(self.lower_method_function(node)))
            .with("kind", Field::str(kind))
            .with("static", Field::Bool(is_static))
    }

    /// The anonymous function behind a method: parameters through body
    pub(super) fn lower_method_function(&self, node: Node) -> SyntaxNode {
        let params = node.child_by_field_name("parameters");
        let body = node.child_by_field_name("body");
        let span = match (params, body) {
            (Some(params), Some(body)) => self.base.create_span_between(&params, &body),
            _ => self.span(&node),
        };

        SyntaxNode::new(NodeKind::FunctionExpression, span)
            .with("id", Field::Null)
            .with("params", Field::List(self.lower_params(&node)))
            .with("body", self.lower_opt(body))
            .with("generator", Field::Bool(self.has_token(&node, "*")))
            .with("expression", Field::Bool(false))
            .with("async", Field::Bool(self.has_token(&node, "async")))
    }

    pub(super) fn lower_field_definition(&self, node: Node) -> SyntaxNode {
        let (key, computed) = self.lower_property_key(node.child_by_field_name("property"));

        SyntaxNode::new(NodeKind::PropertyDefinition, self.span(&node))
            .with("key", key)
            .with("computed", Field::Bool(computed))
            .with("value", self.lower_field(&node, "value"))
            .with("static", Field::Bool(self.has_token(&node, "static")))
    }

    pub(super) fn lower_static_block(&self, node: Node) -> SyntaxNode {
        let body = node
            .child_by_field_name("body")
            .map(|block| self.lower_list(self.named_children(&block)))
            .unwrap_or_default();
        SyntaxNode::new(NodeKind::StaticBlock, self.span(&node)).with("body", Field::List(body))
    }

    /// `var` / `let` / `const` with one declarator per binding
    pub(super) fn lower_variable_declaration(&self, node: Node) -> SyntaxNode {
        let kind = match node.child_by_field_name("kind") {
            Some(kind) => self.base.node_str(&kind),
            None => "var",
        };
        let declarators: Vec<Node> = self
            .named_children(&node)
            .into_iter()
            .filter(|child| child.kind() == "variable_declarator" || child.is_error())
            .collect();

        SyntaxNode::new(NodeKind::VariableDeclaration, self.span(&node))
            .with("declarations", Field::List(self.lower_list(declarators)))
            .with("kind", Field::str(kind))
    }

    pub(super) fn lower_declarator(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::VariableDeclarator, self.span(&node))
            .with("id", self.lower_field(&node, "name"))
            .with("init", self.lower_field(&node, "value"))
    }

    /// Property key plus its `computed` flag
    pub(super) fn lower_property_key(&self, key: Option<Node>) -> (Field, bool) {
        match key {
            Some(key) if key.kind() == "computed_property_name" => {
                (self.lower_opt(self.first_named(&key)), true)
            }
            Some(key) => (Field::node(self.lower(key)), false),
            None => (Field::Null, false),
        }
    }

    fn key_name<'f>(&self, key: &'f Field) -> Option<&'f str> {
        match key {
            Field::Node(node) => node
                .identifier_name()
                .or_else(|| match node.get("value") {
                    Some(Field::Str(value)) => Some(value.as_str()),
                    _ => None,
                }),
            _ => None,
        }
    }
}
