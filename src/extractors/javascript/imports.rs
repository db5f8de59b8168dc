//! Import and export collection
//!
//! Only Module-grammar parses contain these declarations; a Script parse
//! yields empty lists. Dynamic `import()` calls are expressions and are not
//! collected here.

use super::syntax::{NodeKind, SyntaxNode};
use super::types::{ExportInfo, ImportInfo, ImportSpecifierInfo, SpecifierKind};
use super::visitor::Visitor;

#[derive(Debug, Default)]
pub(super) struct ImportCollector {
    pub(super) imports: Vec<ImportInfo>,
}

impl Visitor for ImportCollector {
    fn visit(&mut self, node: &SyntaxNode) {
        if node.kind != NodeKind::ImportDeclaration {
            return;
        }
        let specifiers = node
            .list("specifiers")
            .iter()
            .filter_map(specifier_info)
            .collect();

        self.imports.push(ImportInfo {
            source: source_value(node).unwrap_or_default(),
            specifiers,
        });
    }
}

fn specifier_info(specifier: &SyntaxNode) -> Option<ImportSpecifierInfo> {
    let kind = match specifier.kind {
        NodeKind::ImportDefaultSpecifier => SpecifierKind::Default,
        NodeKind::ImportSpecifier => SpecifierKind::Named,
        NodeKind::ImportNamespaceSpecifier => SpecifierKind::Namespace,
        _ => return None,
    };
    let imported_name = match kind {
        SpecifierKind::Named => specifier.field("imported").and_then(module_export_name),
        _ => None,
    };
    Some(ImportSpecifierInfo {
        kind,
        imported_name,
        local_name: specifier
            .field("local")
            .and_then(SyntaxNode::identifier_name)
            .map(str::to_string),
    })
}

/// `import { "string name" as x }` imports a string-named export
fn module_export_name(node: &SyntaxNode) -> Option<String> {
    node.identifier_name()
        .or_else(|| node.text("value"))
        .map(str::to_string)
}

fn source_value(node: &SyntaxNode) -> Option<String> {
    node.field("source")
        .and_then(|source| source.text("value"))
        .map(str::to_string)
}

#[derive(Debug, Default)]
pub(super) struct ExportCollector {
    pub(super) exports: Vec<ExportInfo>,
}

impl Visitor for ExportCollector {
    fn visit(&mut self, node: &SyntaxNode) {
        if !matches!(
            node.kind,
            NodeKind::ExportDefaultDeclaration
                | NodeKind::ExportNamedDeclaration
                | NodeKind::ExportAllDeclaration
        ) {
            return;
        }
        self.exports.push(ExportInfo {
            kind: node.kind.as_str().to_string(),
            source: source_value(node),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::javascript::parser::parse_module;
    use crate::extractors::javascript::visitor::walk;

    #[test]
    fn test_import_specifiers() {
        let result = parse_module(
            "import React, { useState, useEffect as effect } from 'react';\nimport * as path from \"path\";\nimport './polyfill';",
            false,
        )
        .unwrap();
        let mut collector = ImportCollector::default();
        walk(&mut collector, &result.program);
        let imports = collector.imports;

        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].source, "react");
        assert_eq!(
            imports[0].specifiers,
            vec![
                ImportSpecifierInfo {
                    kind: SpecifierKind::Default,
                    imported_name: None,
                    local_name: Some("React".into()),
                },
                ImportSpecifierInfo {
                    kind: SpecifierKind::Named,
                    imported_name: Some("useState".into()),
                    local_name: Some("useState".into()),
                },
                ImportSpecifierInfo {
                    kind: SpecifierKind::Named,
                    imported_name: Some("useEffect".into()),
                    local_name: Some("effect".into()),
                },
            ]
        );
        assert_eq!(imports[1].specifiers[0].kind, SpecifierKind::Namespace);
        assert_eq!(imports[1].specifiers[0].local_name.as_deref(), Some("path"));
        assert_eq!(imports[2].source, "./polyfill");
        assert!(imports[2].specifiers.is_empty());
    }

    #[test]
    fn test_export_kinds_and_sources() {
        let result = parse_module(
            "export default function () {}\nexport const a = 1;\nexport { b } from './b';\nexport * from './all';",
            false,
        )
        .unwrap();
        let mut collector = ExportCollector::default();
        walk(&mut collector, &result.program);

        let summary: Vec<(&str, Option<&str>)> = collector
            .exports
            .iter()
            .map(|e| (e.kind.as_str(), e.source.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("ExportDefaultDeclaration", None),
                ("ExportNamedDeclaration", None),
                ("ExportNamedDeclaration", Some("./b")),
                ("ExportAllDeclaration", Some("./all")),
            ]
        );
    }
}
