//! Identifier name collection
//!
//! Every `Identifier` node contributes its name; bindings and references are
//! not told apart and there is no scope analysis. Private names (`#x`) and
//! JSX tag names are separate node types and are not included.

use super::syntax::SyntaxNode;
use super::visitor::Visitor;
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub(super) struct IdentifierCollector {
    pub(super) names: BTreeSet<String>,
}

impl Visitor for IdentifierCollector {
    fn visit(&mut self, node: &SyntaxNode) {
        if let Some(name) = node.identifier_name() {
            if !self.names.contains(name) {
                self.names.insert(name.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::javascript::parser::{parse, ParseOptions};
    use crate::extractors::javascript::visitor::walk;

    #[test]
    fn test_names_are_deduplicated() {
        let result = parse(
            "const total = add(a, b) + add(a, c); obj.prop = total;",
            &ParseOptions::default(),
        )
        .unwrap();
        let mut collector = IdentifierCollector::default();
        walk(&mut collector, &result.program);

        let names: Vec<&str> = collector.names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "add", "b", "c", "obj", "prop", "total"]);
    }

    #[test]
    fn test_private_names_excluded() {
        let result = parse("class A { #secret = 1; get() { return this.#secret; } }", &ParseOptions::default()).unwrap();
        let mut collector = IdentifierCollector::default();
        walk(&mut collector, &result.program);
        assert!(!collector.names.contains("secret"));
        assert!(collector.names.contains("A"));
    }
}
