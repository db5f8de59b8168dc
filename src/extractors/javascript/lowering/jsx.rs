// JSX lowering

use super::super::syntax::{Field, NodeKind, SyntaxNode};
use tree_sitter::Node;

impl super::Lowerer<'_> {
    /// `<a>...</a>` or, when the opening tag has no name, `<>...</>`
    pub(super) fn lower_jsx_element(&self, node: Node) -> SyntaxNode {
        let open = node.child_by_field_name("open_tag");
        let close = node.child_by_field_name("close_tag");
        let children: Vec<Node> = self
            .named_children(&node)
            .into_iter()
            .filter(|child| Some(child.id()) != open.map(|o| o.id()))
            .filter(|child| Some(child.id()) != close.map(|c| c.id()))
            .collect();
        let children = Field::List(self.lower_list(children));

        let is_fragment = open
            .map(|open| open.child_by_field_name("name").is_none())
            .unwrap_or(false);

        if is_fragment {
            let opening = open.map(|o| self.leaf(&o, NodeKind::JSXOpeningFragment));
            let closing = close.map(|c| self.leaf(&c, NodeKind::JSXClosingFragment));
            return SyntaxNode::new(NodeKind::JSXFragment, self.span(&node))
                .with("openingFragment", Field::opt(opening))
                .with("children", children)
                .with("closingFragment", Field::opt(closing));
        }

        let opening = open.map(|open| self.jsx_opening(open, false));
        let closing = close.map(|close| {
            SyntaxNode::new(NodeKind::JSXClosingElement, self.span(&close))
                .with("name", self.jsx_name(close.child_by_field_name("name")))
        });

        SyntaxNode::new(NodeKind::JSXElement, self.span(&node))
            .with("openingElement", Field::opt(opening))
            .with("children", children)
            .with("closingElement", Field::opt(closing))
    }

    pub(super) fn lower_jsx_self_closing(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::JSXElement, self.span(&node))
            .with("openingElement", Field::node(self.jsx_opening(node, true)))
            .with("children", Field::List(Vec::new()))
            .with("closingElement", Field::Null)
    }

    fn jsx_opening(&self, node: Node, self_closing: bool) -> SyntaxNode {
        let name = node.child_by_field_name("name");
        let mut cursor = node.walk();
        let attributes: Vec<SyntaxNode> = node
            .children_by_field_name("attribute", &mut cursor)
            .map(|attr| self.lower_jsx_attribute_item(attr))
            .collect();

        SyntaxNode::new(NodeKind::JSXOpeningElement, self.span(&node))
            .with("name", self.jsx_name(name))
            .with("attributes", Field::List(attributes))
            .with("selfClosing", Field::Bool(self_closing))
    }

    /// `{...spread}` in attribute position is a spread attribute, not a container
    fn lower_jsx_attribute_item(&self, node: Node) -> SyntaxNode {
        if node.kind() == "jsx_expression" {
            if let Some(spread) = self
                .first_named(&node)
                .filter(|inner| inner.kind() == "spread_element")
            {
                return SyntaxNode::new(NodeKind::JSXSpreadAttribute, self.span(&node))
                    .with("argument", self.lower_opt(self.first_named(&spread)));
            }
        }
        self.lower(node)
    }

    /// Element names: identifiers, `a.b.c` members and `ns:name`
    fn jsx_name(&self, node: Option<Node>) -> Field {
        let Some(node) = node else {
            return Field::Null;
        };
        Field::node(self.jsx_name_node(node))
    }

    fn jsx_name_node(&self, node: Node) -> SyntaxNode {
        match node.kind() {
            "member_expression" | "nested_identifier" => {
                let parts = self.named_children(&node);
                let object = node
                    .child_by_field_name("object")
                    .or_else(|| parts.first().copied());
                let property = node
                    .child_by_field_name("property")
                    .or_else(|| parts.last().copied());
                SyntaxNode::new(NodeKind::JSXMemberExpression, self.span(&node))
                    .with("object", Field::opt(object.map(|o| self.jsx_name_node(o))))
                    .with("property", Field::opt(property.map(|p| self.jsx_name_node(p))))
            }
            "jsx_namespace_name" => self.lower_jsx_namespace_name(node),
            _ => SyntaxNode::new(NodeKind::JSXIdentifier, self.span(&node))
                .with("name", Field::str(self.base.node_str(&node))),
        }
    }

    pub(super) fn lower_jsx_namespace_name(&self, node: Node) -> SyntaxNode {
        let parts = self.named_children(&node);
        let namespace = parts.first().map(|part| self.jsx_name_node(*part));
        let name = parts.get(1).map(|part| self.jsx_name_node(*part));
        SyntaxNode::new(NodeKind::JSXNamespacedName, self.span(&node))
            .with("namespace", Field::opt(namespace))
            .with("name", Field::opt(name))
    }

    pub(super) fn lower_jsx_attribute(&self, node: Node) -> SyntaxNode {
        let parts = self.named_children(&node);
        let name = parts.first().map(|part| self.jsx_name_node(*part));
        let value = parts.get(1).map(|part| self.lower(*part));
        SyntaxNode::new(NodeKind::JSXAttribute, self.span(&node))
            .with("name", Field::opt(name))
            .with("value", Field::opt(value))
    }

    pub(super) fn lower_jsx_expression(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::JSXExpressionContainer, self.span(&node))
            .with("expression", self.lower_opt(self.first_named(&node)))
    }

    pub(super) fn lower_jsx_text(&self, node: Node) -> SyntaxNode {
        let raw = self.base.node_str(&node);
        SyntaxNode::new(NodeKind::JSXText, self.span(&node))
            .with("value", Field::str(raw))
            .with("raw", Field::str(raw))
    }
}
