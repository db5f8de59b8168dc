// Import / export lowering

use super::super::syntax::{Field, NodeKind, SyntaxNode};
use tree_sitter::Node;

impl super::Lowerer<'_> {
    pub(super) fn lower_import(&self, node: Node) -> SyntaxNode {
        let mut specifiers = Vec::new();
        if let Some(clause) = self.base.find_child_by_type(&node, "import_clause") {
            for part in self.named_children(&clause) {
                match part.kind() {
                    "identifier" => specifiers.push(
                        SyntaxNode::new(NodeKind::ImportDefaultSpecifier, self.span(&part))
                            .with("local", Field::node(self.identifier(&part))),
                    ),
                    "namespace_import" => {
                        let local = self.first_named(&part);
                        specifiers.push(
                            SyntaxNode::new(NodeKind::ImportNamespaceSpecifier, self.span(&part))
                                .with("local", self.lower_opt(local)),
                        );
                    }
                    "named_imports" => {
                        for spec in self.named_children(&part) {
                            if spec.kind() == "import_specifier" {
                                specifiers.push(self.lower_import_specifier(spec));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        SyntaxNode::new(NodeKind::ImportDeclaration, self.span(&node))
            .with("specifiers", Field::List(specifiers))
            .with("source", self.lower_field(&node, "source"))
    }

    /// `{ a }` or `{ a as b }`; the local binding is the alias when present
    fn lower_import_specifier(&self, node: Node) -> SyntaxNode {
        let imported = node.child_by_field_name("name");
        let local = node.child_by_field_name("alias").or(imported);

        SyntaxNode::new(NodeKind::ImportSpecifier, self.span(&node))
            .with("local", self.lower_opt(local))
            .with("imported", self.lower_opt(imported))
    }

    pub(super) fn lower_export(&self, node: Node) -> SyntaxNode {
        let source = self.lower_field(&node, "source");

        if let Some(namespace) = self.base.find_child_by_type(&node, "namespace_export") {
            return SyntaxNode::new(NodeKind::ExportAllDeclaration, self.span(&node))
                .with("source", source)
                .with("exported", self.lower_opt(self.first_named(&namespace)));
        }
        if self.has_token(&node, "*") {
            return SyntaxNode::new(NodeKind::ExportAllDeclaration, self.span(&node))
                .with("source", source)
                .with("exported", Field::Null);
        }
        if let Some(clause) = self.base.find_child_by_type(&node, "export_clause") {
            let specifiers = self
                .named_children(&clause)
                .into_iter()
                .filter(|spec| spec.kind() == "export_specifier")
                .map(|spec| self.lower_export_specifier(spec))
                .collect();
            return SyntaxNode::new(NodeKind::ExportNamedDeclaration, self.span(&node))
                .with("declaration", Field::Null)
                .with("specifiers", Field::List(specifiers))
                .with("source", source);
        }

        let declaration = node
            .child_by_field_name("declaration")
            .or_else(|| node.child_by_field_name("value"));
        if self.has_token(&node, "default") {
            return SyntaxNode::new(NodeKind::ExportDefaultDeclaration, self.span(&node))
                .with("declaration", self.lower_opt(declaration));
        }

        SyntaxNode::new(NodeKind::ExportNamedDeclaration, self.span(&node))
            .with("declaration", self.lower_opt(declaration))
            .with("specifiers", Field::List(Vec::new()))
            .with("source", source)
    }

    fn lower_export_specifier(&self, node: Node) -> SyntaxNode {
        let local = node.child_by_field_name("name");
        let exported = node.child_by_field_name("alias").or(local);

        SyntaxNode::new(NodeKind::ExportSpecifier, self.span(&node))
            .with("local", self.lower_opt(local))
            .with("exported", self.lower_opt(exported))
    }
}
