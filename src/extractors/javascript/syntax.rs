//! ESTree-shaped syntax node model
//!
//! tree-sitter-javascript produces a concrete syntax tree; the lowering pass
//! turns it into these nodes so every extractor sees the node types and field
//! names interoperable JavaScript tooling expects (`FunctionDeclaration.id`,
//! `ImportDeclaration.specifiers`, ...). Nodes are immutable once built.

use crate::extractors::base::Span;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Node type discriminant
///
/// `Unknown` carries the grammar kind of constructs that have no ESTree
/// counterpart; their children are still lowered so traversals reach them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,

    // Statements
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    WithStatement,
    ReturnStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    ThrowStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,

    // Declarations
    FunctionDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    ClassDeclaration,
    ClassBody,
    MethodDefinition,
    PropertyDefinition,
    StaticBlock,

    // Modules
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportNamedDeclaration,
    ExportDefaultDeclaration,
    ExportAllDeclaration,
    ExportSpecifier,

    // Expressions
    Identifier,
    PrivateIdentifier,
    Literal,
    TemplateLiteral,
    TemplateElement,
    TaggedTemplateExpression,
    ThisExpression,
    Super,
    ArrayExpression,
    ObjectExpression,
    Property,
    FunctionExpression,
    ArrowFunctionExpression,
    ClassExpression,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    MemberExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    SequenceExpression,
    YieldExpression,
    AwaitExpression,
    ImportExpression,
    MetaProperty,
    SpreadElement,

    // Patterns
    ObjectPattern,
    ArrayPattern,
    RestElement,
    AssignmentPattern,

    // JSX
    JSXElement,
    JSXFragment,
    JSXOpeningElement,
    JSXClosingElement,
    JSXOpeningFragment,
    JSXClosingFragment,
    JSXText,
    JSXExpressionContainer,
    JSXSpreadAttribute,
    JSXAttribute,
    JSXIdentifier,
    JSXMemberExpression,
    JSXNamespacedName,

    Unknown(&'static str),
}

impl NodeKind {
    /// ESTree `type` string
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::BlockStatement => "BlockStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::DebuggerStatement => "DebuggerStatement",
            NodeKind::WithStatement => "WithStatement",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::LabeledStatement => "LabeledStatement",
            NodeKind::BreakStatement => "BreakStatement",
            NodeKind::ContinueStatement => "ContinueStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::SwitchStatement => "SwitchStatement",
            NodeKind::SwitchCase => "SwitchCase",
            NodeKind::ThrowStatement => "ThrowStatement",
            NodeKind::TryStatement => "TryStatement",
            NodeKind::CatchClause => "CatchClause",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::DoWhileStatement => "DoWhileStatement",
            NodeKind::ForStatement => "ForStatement",
            NodeKind::ForInStatement => "ForInStatement",
            NodeKind::ForOfStatement => "ForOfStatement",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::VariableDeclarator => "VariableDeclarator",
            NodeKind::ClassDeclaration => "ClassDeclaration",
            NodeKind::ClassBody => "ClassBody",
            NodeKind::MethodDefinition => "MethodDefinition",
            NodeKind::PropertyDefinition => "PropertyDefinition",
            NodeKind::StaticBlock => "StaticBlock",
            NodeKind::ImportDeclaration => "ImportDeclaration",
            NodeKind::ImportSpecifier => "ImportSpecifier",
            NodeKind::ImportDefaultSpecifier => "ImportDefaultSpecifier",
            NodeKind::ImportNamespaceSpecifier => "ImportNamespaceSpecifier",
            NodeKind::ExportNamedDeclaration => "ExportNamedDeclaration",
            NodeKind::ExportDefaultDeclaration => "ExportDefaultDeclaration",
            NodeKind::ExportAllDeclaration => "ExportAllDeclaration",
            NodeKind::ExportSpecifier => "ExportSpecifier",
            NodeKind::Identifier => "Identifier",
            NodeKind::PrivateIdentifier => "PrivateIdentifier",
            NodeKind::Literal => "Literal",
            NodeKind::TemplateLiteral => "TemplateLiteral",
            NodeKind::TemplateElement => "TemplateElement",
            NodeKind::TaggedTemplateExpression => "TaggedTemplateExpression",
            NodeKind::ThisExpression => "ThisExpression",
            NodeKind::Super => "Super",
            NodeKind::ArrayExpression => "ArrayExpression",
            NodeKind::ObjectExpression => "ObjectExpression",
            NodeKind::Property => "Property",
            NodeKind::FunctionExpression => "FunctionExpression",
            NodeKind::ArrowFunctionExpression => "ArrowFunctionExpression",
            NodeKind::ClassExpression => "ClassExpression",
            NodeKind::UnaryExpression => "UnaryExpression",
            NodeKind::UpdateExpression => "UpdateExpression",
            NodeKind::BinaryExpression => "BinaryExpression",
            NodeKind::LogicalExpression => "LogicalExpression",
            NodeKind::AssignmentExpression => "AssignmentExpression",
            NodeKind::MemberExpression => "MemberExpression",
            NodeKind::ConditionalExpression => "ConditionalExpression",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::NewExpression => "NewExpression",
            NodeKind::SequenceExpression => "SequenceExpression",
            NodeKind::YieldExpression => "YieldExpression",
            NodeKind::AwaitExpression => "AwaitExpression",
            NodeKind::ImportExpression => "ImportExpression",
            NodeKind::MetaProperty => "MetaProperty",
            NodeKind::SpreadElement => "SpreadElement",
            NodeKind::ObjectPattern => "ObjectPattern",
            NodeKind::ArrayPattern => "ArrayPattern",
            NodeKind::RestElement => "RestElement",
            NodeKind::AssignmentPattern => "AssignmentPattern",
            NodeKind::JSXElement => "JSXElement",
            NodeKind::JSXFragment => "JSXFragment",
            NodeKind::JSXOpeningElement => "JSXOpeningElement",
            NodeKind::JSXClosingElement => "JSXClosingElement",
            NodeKind::JSXOpeningFragment => "JSXOpeningFragment",
            NodeKind::JSXClosingFragment => "JSXClosingFragment",
            NodeKind::JSXText => "JSXText",
            NodeKind::JSXExpressionContainer => "JSXExpressionContainer",
            NodeKind::JSXSpreadAttribute => "JSXSpreadAttribute",
            NodeKind::JSXAttribute => "JSXAttribute",
            NodeKind::JSXIdentifier => "JSXIdentifier",
            NodeKind::JSXMemberExpression => "JSXMemberExpression",
            NodeKind::JSXNamespacedName => "JSXNamespacedName",
            NodeKind::Unknown(_) => "Unknown",
        }
    }

    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            NodeKind::ForStatement
                | NodeKind::ForInStatement
                | NodeKind::ForOfStatement
                | NodeKind::WhileStatement
                | NodeKind::DoWhileStatement
        )
    }

    pub fn is_conditional(&self) -> bool {
        matches!(
            self,
            NodeKind::IfStatement | NodeKind::ConditionalExpression | NodeKind::SwitchStatement
        )
    }

    /// Any node whose type name contains `Statement`
    pub fn is_statement(&self) -> bool {
        self.as_str().contains("Statement")
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared field value
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Node(Box<SyntaxNode>),
    List(Vec<SyntaxNode>),
    Null,
    Bool(bool),
    Str(String),
    Number(f64),
}

impl Field {
    pub fn node(node: SyntaxNode) -> Self {
        Field::Node(Box::new(node))
    }

    /// `Node` when present, `Null` otherwise
    pub fn opt(node: Option<SyntaxNode>) -> Self {
        match node {
            Some(node) => Field::node(node),
            None => Field::Null,
        }
    }

    pub fn str(value: impl Into<String>) -> Self {
        Field::Str(value.into())
    }
}

/// One ESTree node: type, declared fields in ESTree order, and its source span
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    pub fields: Vec<(&'static str, Field)>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            fields: Vec::new(),
        }
    }

    /// Builder-style field append
    pub fn with(mut self, name: &'static str, value: Field) -> Self {
        self.fields.push((name, value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(field_name, _)| *field_name == name)
            .map(|(_, value)| value)
    }

    /// Node-valued field
    pub fn field(&self, name: &str) -> Option<&SyntaxNode> {
        match self.get(name) {
            Some(Field::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// List-valued field; empty when absent
    pub fn list(&self, name: &str) -> &[SyntaxNode] {
        match self.get(name) {
            Some(Field::List(items)) => items,
            _ => &[],
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Field::Bool(true)))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Field::Str(value)) => Some(value),
            _ => None,
        }
    }

    /// `name` of an `Identifier` node
    pub fn identifier_name(&self) -> Option<&str> {
        if self.kind == NodeKind::Identifier {
            self.text("name")
        } else {
            None
        }
    }

    /// Child nodes in field order: node fields, then list elements in place
    pub fn children(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.fields.iter().flat_map(|(_, value)| match value {
            Field::Node(node) => std::slice::from_ref(node.as_ref()),
            Field::List(items) => items.as_slice(),
            _ => &[],
        })
    }
}

struct FieldValue<'a>(&'a Field);

impl Serialize for FieldValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Field::Node(node) => node.serialize(serializer),
            Field::List(items) => items.serialize(serializer),
            Field::Null => serializer.serialize_none(),
            Field::Bool(value) => serializer.serialize_bool(*value),
            Field::Str(value) => serializer.serialize_str(value),
            Field::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 9.0e15 {
                    serializer.serialize_i64(*value as i64)
                } else {
                    serializer.serialize_f64(*value)
                }
            }
        }
    }
}

impl SyntaxNode {
    /// Number of entries [`SyntaxNode::serialize_entries`] writes
    pub(crate) fn entry_count(&self) -> usize {
        let extra = usize::from(matches!(self.kind, NodeKind::Unknown(_)));
        self.fields.len() + 3 + extra
    }

    /// Write `type`, the declared fields, `range` and `loc` into an open map
    pub(crate) fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        map.serialize_entry("type", self.kind.as_str())?;
        if let NodeKind::Unknown(grammar_kind) = self.kind {
            map.serialize_entry("grammarKind", grammar_kind)?;
        }
        for (name, value) in &self.fields {
            map.serialize_entry(name, &FieldValue(value))?;
        }
        map.serialize_entry("range", &self.span.range)?;
        map.serialize_entry("loc", &self.span.loc)
    }
}

/// `{"type": ..., <fields>..., "range": [s, e], "loc": {...}}`
impl Serialize for SyntaxNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entry_count()))?;
        self.serialize_entries(&mut map)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{Position, SourceLocation};

    fn span(start: usize, end: usize) -> Span {
        Span {
            range: [start, end],
            loc: SourceLocation {
                start: Position {
                    line: 1,
                    column: start as u32,
                },
                end: Position {
                    line: 1,
                    column: end as u32,
                },
            },
        }
    }

    fn ident(name: &str, start: usize) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Identifier, span(start, start + name.len()))
            .with("name", Field::str(name))
    }

    #[test]
    fn test_children_follow_field_order() {
        let call = SyntaxNode::new(NodeKind::CallExpression, span(0, 7))
            .with("callee", Field::node(ident("f", 0)))
            .with("arguments", Field::List(vec![ident("a", 2), ident("b", 5)]))
            .with("optional", Field::Bool(false));

        let names: Vec<&str> = call
            .children()
            .filter_map(SyntaxNode::identifier_name)
            .collect();
        assert_eq!(names, vec!["f", "a", "b"]);
        assert!(!call.flag("optional"));
        assert_eq!(call.list("arguments").len(), 2);
        assert!(call.list("missing").is_empty());
    }

    #[test]
    fn test_serializes_estree_shape() {
        let literal = SyntaxNode::new(NodeKind::Literal, span(0, 2))
            .with("value", Field::Number(42.0))
            .with("raw", Field::str("42"));

        let json = serde_json::to_value(&literal).unwrap();
        assert_eq!(json["type"], "Literal");
        assert_eq!(json["value"], 42);
        assert_eq!(json["raw"], "42");
        assert_eq!(json["range"], serde_json::json!([0, 2]));
        assert_eq!(json["loc"]["start"]["line"], 1);
    }

    #[test]
    fn test_unknown_kind_keeps_grammar_kind() {
        let node = SyntaxNode::new(NodeKind::Unknown("decorator"), span(0, 4));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "Unknown");
        assert_eq!(json["grammarKind"], "decorator");
    }

    #[test]
    fn test_kind_classification() {
        assert!(NodeKind::ForOfStatement.is_loop());
        assert!(NodeKind::ConditionalExpression.is_conditional());
        assert!(!NodeKind::ExportNamedDeclaration.is_statement());
        assert!(NodeKind::ExpressionStatement.is_statement());
    }
}
