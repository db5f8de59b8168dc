//! CST → ESTree lowering
//!
//! Turns a tree-sitter-javascript tree into [`SyntaxNode`]s. Lowering never
//! fails: whether a tree with `ERROR` nodes is acceptable is decided by the
//! parser before lowering starts. Recovered `ERROR` regions are flattened into
//! the surrounding list when they sit in a list position, and become `Unknown`
//! nodes elsewhere.
//!
//! - statements.rs: statements and control flow
//! - functions.rs: functions, classes, variable declarations
//! - expressions.rs: expressions, literals, objects and patterns
//! - modules.rs: import / export declarations
//! - jsx.rs: JSX elements

mod expressions;
mod functions;
mod jsx;
mod modules;
mod statements;

use super::syntax::{Field, NodeKind, SyntaxNode};
use crate::extractors::base::{BaseExtractor, Span};
use tree_sitter::Node;

/// Grammar kinds that never appear in the lowered tree
const TRIVIA_KINDS: [&str; 3] = ["comment", "html_comment", "hash_bang_line"];

pub(crate) struct Lowerer<'a> {
    base: &'a BaseExtractor<'a>,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(base: &'a BaseExtractor<'a>) -> Self {
        Self { base }
    }

    /// Lower a `program` root
    pub(crate) fn lower_program(&self, root: Node, source_type: &'static str) -> SyntaxNode {
        let body = self.lower_list(self.named_children(&root));
        SyntaxNode::new(NodeKind::Program, self.span(&root))
            .with("body", Field::List(body))
            .with("sourceType", Field::str(source_type))
    }

    /// Main dispatch on the grammar kind
    pub(crate) fn lower(&self, node: Node) -> SyntaxNode {
        match node.kind() {
            // Statements
            "expression_statement" => self.lower_expression_statement(node),
            "statement_block" => self.lower_block(node),
            "empty_statement" => self.leaf(&node, NodeKind::EmptyStatement),
            "debugger_statement" => self.leaf(&node, NodeKind::DebuggerStatement),
            "if_statement" => self.lower_if(node),
            "switch_statement" => self.lower_switch(node),
            "for_statement" => self.lower_for(node),
            "for_in_statement" => self.lower_for_in(node),
            "while_statement" => self.lower_while(node),
            "do_statement" => self.lower_do_while(node),
            "try_statement" => self.lower_try(node),
            "with_statement" => self.lower_with(node),
            "break_statement" => self.lower_jump(node, NodeKind::BreakStatement),
            "continue_statement" => self.lower_jump(node, NodeKind::ContinueStatement),
            "return_statement" => self.lower_argument_statement(node, NodeKind::ReturnStatement),
            "throw_statement" => self.lower_argument_statement(node, NodeKind::ThrowStatement),
            "labeled_statement" => self.lower_labeled(node),

            // Declarations
            "function_declaration" | "generator_function_declaration" => {
                self.lower_function(node, NodeKind::FunctionDeclaration)
            }
            "function_expression" | "function" | "generator_function" => {
                self.lower_function(node, NodeKind::FunctionExpression)
            }
            "arrow_function" => self.lower_arrow(node),
            "class_declaration" => self.lower_class(node, NodeKind::ClassDeclaration),
            "class" => self.lower_class(node, NodeKind::ClassExpression),
            "lexical_declaration" | "variable_declaration" => self.lower_variable_declaration(node),
            "variable_declarator" => self.lower_declarator(node),
            "method_definition" => self.lower_method_definition(node),
            "field_definition" => self.lower_field_definition(node),
            "class_static_block" => self.lower_static_block(node),

            // Modules
            "import_statement" => self.lower_import(node),
            "export_statement" => self.lower_export(node),

            // Expressions
            "parenthesized_expression" => self.lower_parenthesized(node),
            "identifier"
            | "property_identifier"
            | "shorthand_property_identifier"
            | "shorthand_property_identifier_pattern"
            | "statement_identifier"
            | "undefined" => self.identifier(&node),
            "private_property_identifier" => self.private_identifier(&node),
            "this" => self.leaf(&node, NodeKind::ThisExpression),
            "super" => self.leaf(&node, NodeKind::Super),
            "number" | "string" | "true" | "false" | "null" | "regex" => self.lower_literal(node),
            "template_string" => self.lower_template(node),
            "object" => self.lower_object(node),
            "array" => self.lower_array(node, NodeKind::ArrayExpression),
            "pair" | "pair_pattern" => self.lower_pair(node),
            "object_pattern" => self.lower_object_pattern(node),
            "array_pattern" => self.lower_array(node, NodeKind::ArrayPattern),
            "assignment_pattern" | "object_assignment_pattern" => {
                self.lower_assignment_pattern(node)
            }
            "rest_pattern" => self.lower_wrapper(node, NodeKind::RestElement, "argument"),
            "spread_element" => self.lower_wrapper(node, NodeKind::SpreadElement, "argument"),
            "await_expression" => self.lower_wrapper(node, NodeKind::AwaitExpression, "argument"),
            "call_expression" => self.lower_call(node),
            "new_expression" => self.lower_new(node),
            "member_expression" => self.lower_member(node),
            "subscript_expression" => self.lower_subscript(node),
            "assignment_expression" | "augmented_assignment_expression" => {
                self.lower_assignment(node)
            }
            "unary_expression" => self.lower_unary(node),
            "update_expression" => self.lower_update(node),
            "binary_expression" => self.lower_binary(node),
            "ternary_expression" => self.lower_ternary(node),
            "sequence_expression" => self.lower_sequence(node),
            "yield_expression" => self.lower_yield(node),
            "meta_property" => self.lower_meta_property(node),
            "computed_property_name" => self.lower_first_named(node),

            // JSX
            "jsx_element" => self.lower_jsx_element(node),
            "jsx_self_closing_element" => self.lower_jsx_self_closing(node),
            "jsx_expression" => self.lower_jsx_expression(node),
            "jsx_text" | "html_character_reference" => self.lower_jsx_text(node),
            "jsx_attribute" => self.lower_jsx_attribute(node),
            "jsx_namespace_name" => self.lower_jsx_namespace_name(node),

            other => self.unknown(node, other),
        }
    }

    /// Lower a sequence of nodes, dropping trivia and splicing `ERROR` contents in place
    pub(crate) fn lower_list(&self, nodes: Vec<Node>) -> Vec<SyntaxNode> {
        let mut lowered = Vec::with_capacity(nodes.len());
        for node in nodes {
            if node.is_error() {
                lowered.extend(self.lower_list(self.named_children(&node)));
            } else if !node.is_missing() {
                lowered.push(self.lower(node));
            }
        }
        lowered
    }

    fn lower_opt(&self, node: Option<Node>) -> Field {
        Field::opt(node.map(|node| self.lower(node)))
    }

    fn lower_field(&self, node: &Node, name: &str) -> Field {
        self.lower_opt(node.child_by_field_name(name))
    }

    /// `Unknown` placeholder for grammar constructs with no ESTree shape
    fn unknown(&self, node: Node, kind: &'static str) -> SyntaxNode {
        let children = self.lower_list(self.named_children(&node));
        SyntaxNode::new(NodeKind::Unknown(kind), self.span(&node))
            .with("children", Field::List(children))
    }

    fn leaf(&self, node: &Node, kind: NodeKind) -> SyntaxNode {
        SyntaxNode::new(kind, self.span(node))
    }

    fn identifier(&self, node: &Node) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Identifier, self.span(node))
            .with("name", Field::str(self.base.node_str(node)))
    }

    fn private_identifier(&self, node: &Node) -> SyntaxNode {
        let name = self.base.node_str(node).trim_start_matches('#');
        SyntaxNode::new(NodeKind::PrivateIdentifier, self.span(node)).with("name", Field::str(name))
    }

    /// `{kind}` with a single node field taken from the first named child
    fn lower_wrapper(&self, node: Node, kind: NodeKind, field: &'static str) -> SyntaxNode {
        let inner = self.first_named(&node);
        SyntaxNode::new(kind, self.span(&node)).with(field, self.lower_opt(inner))
    }

    fn lower_first_named(&self, node: Node) -> SyntaxNode {
        match self.first_named(&node) {
            Some(inner) => self.lower(inner),
            None => self.unknown(node, node.kind()),
        }
    }

    fn span(&self, node: &Node) -> Span {
        self.base.create_span(node)
    }

    /// Named children without comments
    fn named_children<'t>(&self, node: &Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        let children = node
            .named_children(&mut cursor)
            .filter(|child| !TRIVIA_KINDS.contains(&child.kind()))
            .collect();
        children
    }

    fn first_named<'t>(&self, node: &Node<'t>) -> Option<Node<'t>> {
        self.named_children(node).into_iter().next()
    }

    /// True when an anonymous token such as `async`, `static` or `*` is a direct child
    fn has_token(&self, node: &Node, token: &str) -> bool {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|child| !child.is_named() && child.kind() == token);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::SourceLanguage;

    fn lower_source(code: &str) -> SyntaxNode {
        let base = BaseExtractor::new(SourceLanguage::JavaScript, code);
        let tree = base.parse_tree().unwrap();
        Lowerer::new(&base).lower_program(tree.root_node(), "script")
    }

    fn first_statement(code: &str) -> SyntaxNode {
        lower_source(code).list("body")[0].clone()
    }

    #[test]
    fn test_program_shape() {
        let program = lower_source("// header\nlet a = 1;\nfoo();");
        assert_eq!(program.kind, NodeKind::Program);
        assert_eq!(program.text("sourceType"), Some("script"));
        let kinds: Vec<NodeKind> = program.list("body").iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::VariableDeclaration, NodeKind::ExpressionStatement]
        );
    }

    #[test]
    fn test_function_declaration_fields() {
        let func = first_statement("async function* gen(a, b = 1, ...rest) { yield a; }");
        assert_eq!(func.kind, NodeKind::FunctionDeclaration);
        assert_eq!(func.field("id").and_then(SyntaxNode::identifier_name), Some("gen"));
        assert!(func.flag("async"));
        assert!(func.flag("generator"));

        let params: Vec<NodeKind> = func.list("params").iter().map(|p| p.kind).collect();
        assert_eq!(
            params,
            vec![
                NodeKind::Identifier,
                NodeKind::AssignmentPattern,
                NodeKind::RestElement
            ]
        );
    }

    #[test]
    fn test_arrow_function_fields() {
        let decl = first_statement("const f = async x => x * 2;");
        let init = decl.list("declarations")[0].field("init").unwrap();
        assert_eq!(init.kind, NodeKind::ArrowFunctionExpression);
        assert!(init.flag("async"));
        assert!(init.flag("expression"));
        assert!(!init.flag("generator"));
        assert_eq!(init.list("params")[0].identifier_name(), Some("x"));
        assert_eq!(init.field("body").unwrap().kind, NodeKind::BinaryExpression);
    }

    #[test]
    fn test_class_with_members() {
        let class = first_statement(
            "class Dog extends Animal { static count = 0; constructor(n) { super(n); } get name() { return this.n; } }",
        );
        assert_eq!(class.kind, NodeKind::ClassDeclaration);
        assert_eq!(
            class.field("superClass").and_then(SyntaxNode::identifier_name),
            Some("Animal")
        );

        let members = class.field("body").unwrap().list("body");
        assert_eq!(members[0].kind, NodeKind::PropertyDefinition);
        assert!(members[0].flag("static"));
        assert_eq!(members[1].kind, NodeKind::MethodDefinition);
        assert_eq!(members[1].text("kind"), Some("constructor"));
        assert_eq!(
            members[1].field("value").unwrap().kind,
            NodeKind::FunctionExpression
        );
        assert_eq!(members[2].text("kind"), Some("get"));
    }

    #[test]
    fn test_control_flow_statements() {
        let program = lower_source(
            "for (let i = 0; i < 3; i++) {} for (const k in o) {} for (x of xs) {} while (a) {} do {} while (b); if (c) {} else {} switch (d) { case 1: f(); break; default: g(); }",
        );
        let kinds: Vec<&str> = program
            .list("body")
            .iter()
            .map(|n| n.kind.as_str())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "ForStatement",
                "ForInStatement",
                "ForOfStatement",
                "WhileStatement",
                "DoWhileStatement",
                "IfStatement",
                "SwitchStatement"
            ]
        );

        let for_in = &program.list("body")[1];
        let left = for_in.field("left").unwrap();
        assert_eq!(left.kind, NodeKind::VariableDeclaration);
        assert_eq!(left.text("kind"), Some("const"));

        let switch = &program.list("body")[6];
        let cases = switch.list("cases");
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].list("consequent").len(), 2);
        assert!(matches!(cases[1].get("test"), Some(Field::Null)));
    }

    #[test]
    fn test_literals() {
        let program = lower_source("'a\\nb'; 0x10; 1_000; true; null; /re/g;");
        let values: Vec<&Field> = program
            .list("body")
            .iter()
            .map(|stmt| stmt.field("expression").unwrap().get("value").unwrap())
            .collect();
        assert_eq!(values[0], &Field::str("a\nb"));
        assert_eq!(values[1], &Field::Number(16.0));
        assert_eq!(values[2], &Field::Number(1000.0));
        assert_eq!(values[3], &Field::Bool(true));
        assert_eq!(values[4], &Field::Null);
        assert_eq!(values[5], &Field::Null);
    }

    #[test]
    fn test_member_and_call() {
        let stmt = first_statement("a.b[c](d, ...e);");
        let call = stmt.field("expression").unwrap();
        assert_eq!(call.kind, NodeKind::CallExpression);
        let callee = call.field("callee").unwrap();
        assert_eq!(callee.kind, NodeKind::MemberExpression);
        assert!(callee.flag("computed"));
        assert_eq!(call.list("arguments")[1].kind, NodeKind::SpreadElement);
    }

    #[test]
    fn test_logical_vs_binary() {
        let program = lower_source("a && b; a + b; a ?? b;");
        let kinds: Vec<NodeKind> = program
            .list("body")
            .iter()
            .map(|stmt| stmt.field("expression").unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::LogicalExpression,
                NodeKind::BinaryExpression,
                NodeKind::LogicalExpression
            ]
        );
    }

    #[test]
    fn test_template_literal() {
        let stmt = first_statement("`a${b}c${d}`;");
        let template = stmt.field("expression").unwrap();
        assert_eq!(template.kind, NodeKind::TemplateLiteral);
        let quasis = template.list("quasis");
        assert_eq!(quasis.len(), 3);
        assert_eq!(quasis[0].text("raw"), Some("a"));
        assert!(quasis[2].flag("tail"));
        assert_eq!(template.list("expressions").len(), 2);
    }

    #[test]
    fn test_destructuring_patterns() {
        let stmt = first_statement("const { a, b: [c], d = 1, ...e } = obj;");
        let pattern = stmt.list("declarations")[0].field("id").unwrap();
        assert_eq!(pattern.kind, NodeKind::ObjectPattern);
        let props = pattern.list("properties");
        assert_eq!(props.len(), 4);
        assert!(props[0].flag("shorthand"));
        assert_eq!(props[1].field("value").unwrap().kind, NodeKind::ArrayPattern);
        assert_eq!(
            props[2].field("value").unwrap().kind,
            NodeKind::AssignmentPattern
        );
        assert_eq!(props[3].kind, NodeKind::RestElement);
    }

    #[test]
    fn test_object_methods_are_function_expressions() {
        let stmt = first_statement("({ m() {}, get g() { return 1; }, k: 1, s });");
        let object = stmt.field("expression").unwrap();
        let props = object.list("properties");
        assert_eq!(props.len(), 4);
        assert!(props[0].flag("method"));
        assert_eq!(
            props[0].field("value").unwrap().kind,
            NodeKind::FunctionExpression
        );
        assert_eq!(props[1].text("kind"), Some("get"));
        assert!(props[3].flag("shorthand"));
    }

    #[test]
    fn test_comments_are_not_lowered() {
        let program = lower_source("/* a */ foo(/* b */ x); // c");
        let call = program.list("body")[0].field("expression").unwrap();
        assert_eq!(call.list("arguments").len(), 1);
    }
}
