// Expression, literal and pattern lowering

use super::super::helpers::{cook_string, parse_numeric_literal};
use super::super::syntax::{Field, NodeKind, SyntaxNode};
use tree_sitter::Node;

/// Binary operators that ESTree models as `LogicalExpression`
const LOGICAL_OPERATORS: [&str; 3] = ["&&", "||", "??"];

impl super::Lowerer<'_> {
    /// Parentheses leave no trace in the lowered tree
    pub(super) fn lower_parenthesized(&self, node: Node) -> SyntaxNode {
        self.lower_first_named(node)
    }

    pub(super) fn lower_literal(&self, node: Node) -> SyntaxNode {
        let raw = self.base.node_str(&node);
        let value = match node.kind() {
            "number" => parse_numeric_literal(raw),
            "string" => Field::Str(cook_string(strip_quotes(raw))),
            "true" => Field::Bool(true),
            "false" => Field::Bool(false),
            _ => Field::Null,
        };

        SyntaxNode::new(NodeKind::Literal, self.span(&node))
            .with("value", value)
            .with("raw", Field::str(raw))
    }

    /// Quasis are the text chunks around each `${...}` substitution
    pub(super) fn lower_template(&self, node: Node) -> SyntaxNode {
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();

        let mut chunk_start = node.start_byte() + 1;
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() != "template_substitution" {
                continue;
            }
            quasis.push(self.template_element(chunk_start, child.start_byte(), false));
            if let Some(expression) = self.first_named(&child) {
                expressions.push(self.lower(expression));
            }
            chunk_start = child.end_byte();
        }
        let chunk_end = node.end_byte().saturating_sub(1).max(chunk_start);
        quasis.push(self.template_element(chunk_start, chunk_end, true));

        SyntaxNode::new(NodeKind::TemplateLiteral, self.span(&node))
            .with("quasis", Field::List(quasis))
            .with("expressions", Field::List(expressions))
    }

    fn template_element(&self, start: usize, end: usize, tail: bool) -> SyntaxNode {
        let raw = self.base.slice(start, end);
        SyntaxNode::new(NodeKind::TemplateElement, self.base.create_span_for_range(start, end))
            .with("raw", Field::str(raw))
            .with("cooked", Field::Str(cook_string(raw)))
            .with("tail", Field::Bool(tail))
    }

    pub(super) fn lower_object(&self, node: Node) -> SyntaxNode {
        let mut properties = Vec::new();
        for child in self.named_children(&node) {
            match child.kind() {
                "shorthand_property_identifier" => properties.push(self.shorthand_property(child)),
                "method_definition" => properties.push(self.object_method(child)),
                _ => properties.extend(self.lower_list(vec![child])),
            }
        }
        SyntaxNode::new(NodeKind::ObjectExpression, self.span(&node))
            .with("properties", Field::List(properties))
    }

    pub(super) fn lower_object_pattern(&self, node: Node) -> SyntaxNode {
        let mut properties = Vec::new();
        for child in self.named_children(&node) {
            match child.kind() {
                "shorthand_property_identifier_pattern" => {
                    properties.push(self.shorthand_property(child))
                }
                "object_assignment_pattern" => properties.push(self.shorthand_default(child)),
                _ => properties.extend(self.lower_list(vec![child])),
            }
        }
        SyntaxNode::new(NodeKind::ObjectPattern, self.span(&node))
            .with("properties", Field::List(properties))
    }

    pub(super) fn lower_array(&self, node: Node, kind: NodeKind) -> SyntaxNode {
        let elements = self.lower_list(self.named_children(&node));
        SyntaxNode::new(kind, self.span(&node)).with("elements", Field::List(elements))
    }

    /// `key: value` in object literals and object patterns
    pub(super) fn lower_pair(&self, node: Node) -> SyntaxNode {
        let (key, computed) = self.lower_property_key(node.child_by_field_name("key"));
        self.property(&node, key, computed, self.lower_field(&node, "value"), "init")
            .with("method", Field::Bool(false))
            .with("shorthand", Field::Bool(false))
    }

    /// `{ a }`: key and value are both the identifier
    fn shorthand_property(&self, node: Node) -> SyntaxNode {
        let ident = self.identifier(&node);
        self.property(&node, Field::node(ident.clone()), false, Field::node(ident), "init")
            .with("method", Field::Bool(false))
            .with("shorthand", Field::Bool(true))
    }

    /// `{ a = 1 }` inside a pattern
    fn shorthand_default(&self, node: Node) -> SyntaxNode {
        let left = node.child_by_field_name("left");
        let key = self.lower_opt(left);
        let value = self.lower_assignment_pattern(node);
        self.property(&node, key, false, Field::node(value), "init")
            .with("method", Field::Bool(false))
            .with("shorthand", Field::Bool(true))
    }

    /// Methods and accessors inside object literals
    fn object_method(&self, node: Node) -> SyntaxNode {
        let (key, computed) = self.lower_property_key(node.child_by_field_name("name"));
        let kind = if self.has_token(&node, "get") {
            "get"
        } else if self.has_token(&node, "set") {
            "set"
        } else {
            "init"
        };
        let value = Field::node(self.lower_method_function(node));
        self.property(&node, key, computed, value, kind)
            .with("method", Field::Bool(kind == "init"))
            .with("shorthand", Field::Bool(false))
    }

    fn property(
        &self,
        node: &Node,
        key: Field,
        computed: bool,
        value: Field,
        kind: &'static str,
    ) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Property, self.span(node))
            .with("key", key)
            .with("computed", Field::Bool(computed))
            .with("value", value)
            .with("kind", Field::str(kind))
    }

    pub(super) fn lower_assignment_pattern(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::AssignmentPattern, self.span(&node))
            .with("left", self.lower_field(&node, "left"))
            .with("right", self.lower_field(&node, "right"))
    }

    /// Calls, `import(...)` and tagged templates share one grammar node
    pub(super) fn lower_call(&self, node: Node) -> SyntaxNode {
        let callee = node.child_by_field_name("function");
        let arguments = node.child_by_field_name("arguments");

        if callee.map(|callee| callee.kind()) == Some("import") {
            let source = arguments.and_then(|args| self.first_named(&args));
            return SyntaxNode::new(NodeKind::ImportExpression, self.span(&node))
                .with("source", self.lower_opt(source));
        }

        if let Some(quasi) = arguments.filter(|args| args.kind() == "template_string") {
            return SyntaxNode::new(NodeKind::TaggedTemplateExpression, self.span(&node))
                .with("tag", self.lower_opt(callee))
                .with("quasi", Field::node(self.lower(quasi)));
        }

        let arguments = arguments
            .map(|args| self.lower_list(self.named_children(&args)))
            .unwrap_or_default();
        SyntaxNode::new(NodeKind::CallExpression, self.span(&node))
            .with("callee", self.lower_opt(callee))
            .with("arguments", Field::List(arguments))
            .with("optional", Field::Bool(self.has_optional_chain(&node)))
    }

    pub(super) fn lower_new(&self, node: Node) -> SyntaxNode {
        let arguments = node
            .child_by_field_name("arguments")
            .map(|args| self.lower_list(self.named_children(&args)))
            .unwrap_or_default();
        SyntaxNode::new(NodeKind::NewExpression, self.span(&node))
            .with("callee", self.lower_field(&node, "constructor"))
            .with("arguments", Field::List(arguments))
    }

    pub(super) fn lower_member(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::MemberExpression, self.span(&node))
            .with("computed", Field::Bool(false))
            .with("object", self.lower_field(&node, "object"))
            .with("property", self.lower_field(&node, "property"))
            .with("optional", Field::Bool(self.has_optional_chain(&node)))
    }

    pub(super) fn lower_subscript(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::MemberExpression, self.span(&node))
            .with("computed", Field::Bool(true))
            .with("object", self.lower_field(&node, "object"))
            .with("property", self.lower_field(&node, "index"))
            .with("optional", Field::Bool(self.has_optional_chain(&node)))
    }

    fn has_optional_chain(&self, node: &Node) -> bool {
        node.child_by_field_name("optional_chain").is_some()
            || self.base.has_child_of_type(node, "optional_chain")
    }

    /// `=` and compound assignments
    pub(super) fn lower_assignment(&self, node: Node) -> SyntaxNode {
        let operator = node
            .child_by_field_name("operator")
            .map(|op| self.base.node_str(&op))
            .unwrap_or("=");
        SyntaxNode::new(NodeKind::AssignmentExpression, self.span(&node))
            .with("operator", Field::str(operator))
            .with("left", self.lower_field(&node, "left"))
            .with("right", self.lower_field(&node, "right"))
    }

    pub(super) fn lower_unary(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::UnaryExpression, self.span(&node))
            .with("operator", Field::str(self.operator_text(&node)))
            .with("argument", self.lower_field(&node, "argument"))
            .with("prefix", Field::Bool(true))
    }

    pub(super) fn lower_update(&self, node: Node) -> SyntaxNode {
        let prefix = match (
            node.child_by_field_name("operator"),
            node.child_by_field_name("argument"),
        ) {
            (Some(op), Some(arg)) => op.start_byte() < arg.start_byte(),
            _ => false,
        };
        SyntaxNode::new(NodeKind::UpdateExpression, self.span(&node))
            .with("operator", Field::str(self.operator_text(&node)))
            .with("argument", self.lower_field(&node, "argument"))
            .with("prefix", Field::Bool(prefix))
    }

    pub(super) fn lower_binary(&self, node: Node) -> SyntaxNode {
        let operator = self.operator_text(&node);
        let kind = if LOGICAL_OPERATORS.contains(&operator) {
            NodeKind::LogicalExpression
        } else {
            NodeKind::BinaryExpression
        };
        SyntaxNode::new(kind, self.span(&node))
            .with("operator", Field::str(operator))
            .with("left", self.lower_field(&node, "left"))
            .with("right", self.lower_field(&node, "right"))
    }

    pub(super) fn lower_ternary(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::ConditionalExpression, self.span(&node))
            .with("test", self.lower_field(&node, "condition"))
            .with("consequent", self.lower_field(&node, "consequence"))
            .with("alternate", self.lower_field(&node, "alternative"))
    }

    /// Nested sequences are flattened into one expression list
    pub(super) fn lower_sequence(&self, node: Node) -> SyntaxNode {
        let mut expressions = Vec::new();
        self.collect_sequence(node, &mut expressions);
        SyntaxNode::new(NodeKind::SequenceExpression, self.span(&node))
            .with("expressions", Field::List(expressions))
    }

    fn collect_sequence(&self, node: Node, expressions: &mut Vec<SyntaxNode>) {
        for child in self.named_children(&node) {
            if child.kind() == "sequence_expression" {
                self.collect_sequence(child, expressions);
            } else {
                expressions.extend(self.lower_list(vec![child]));
            }
        }
    }

    pub(super) fn lower_yield(&self, node: Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::YieldExpression, self.span(&node))
            .with("argument", self.lower_opt(self.first_named(&node)))
            .with("delegate", Field::Bool(self.has_token(&node, "*")))
    }

    /// `new.target` / `import.meta`
    pub(super) fn lower_meta_property(&self, node: Node) -> SyntaxNode {
        let count = node.child_count();
        let meta = node.child(0);
        let property = count.checked_sub(1).and_then(|last| node.child(last));

        let ident = |part: Option<Node>| {
            Field::opt(part.map(|part| {
                SyntaxNode::new(NodeKind::Identifier, self.span(&part))
                    .with("name", Field::str(self.base.node_str(&part)))
            }))
        };

        SyntaxNode::new(NodeKind::MetaProperty, self.span(&node))
            .with("meta", ident(meta))
            .with("property", ident(property))
    }

    fn operator_text(&self, node: &Node) -> &str {
        node.child_by_field_name("operator")
            .map(|op| self.base.node_str(&op))
            .unwrap_or("")
    }
}

/// Drop the delimiting quote characters of a string literal
fn strip_quotes(raw: &str) -> &str {
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('"' | '\'')), Some(close)) if open == close => &raw[1..raw.len() - 1],
        _ => raw,
    }
}
