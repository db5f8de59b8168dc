//! Complexity metrics
//!
//! Counts come from one fused traversal: the function, variable and class
//! collectors run alongside the statement/loop/conditional counter.

use super::classes::ClassCollector;
use super::functions::FunctionCollector;
use super::parser::ParseResult;
use super::syntax::SyntaxNode;
use super::types::ComplexityMetrics;
use super::variables::VariableCollector;
use super::visitor::{walk_all, Visitor};

#[derive(Debug, Default)]
pub(super) struct StatementCounter {
    pub(super) statements: usize,
    pub(super) loops: usize,
    pub(super) conditionals: usize,
}

impl Visitor for StatementCounter {
    fn visit(&mut self, node: &SyntaxNode) {
        if node.kind.is_statement() {
            self.statements += 1;
        }
        if node.kind.is_loop() {
            self.loops += 1;
        }
        if node.kind.is_conditional() {
            self.conditionals += 1;
        }
    }
}

pub(super) fn analyze(result: &ParseResult) -> ComplexityMetrics {
    let mut functions = FunctionCollector::default();
    let mut variables = VariableCollector::default();
    let mut classes = ClassCollector::default();
    let mut counter = StatementCounter::default();
    walk_all(
        &mut [&mut functions, &mut variables, &mut classes, &mut counter],
        &result.program,
    );

    ComplexityMetrics {
        functions: functions.functions.len(),
        variables: variables.variables.len(),
        classes: classes.classes.len(),
        lines: line_count(result.source()),
        statements: counter.statements,
        loops: counter.loops,
        conditionals: counter.conditionals,
        max_depth: structural_depth(&result.program, 0),
    }
}

/// Newlines plus one; an empty source has no lines
pub(super) fn line_count(source: &str) -> usize {
    if source.is_empty() {
        return 0;
    }
    source.matches('\n').count() + 1
}

/// Object nesting depth of the serialized tree
///
/// Each node is one object level below its parent; lists add no level. Every
/// node serializes `loc.start` / `loc.end`, two levels further down, so a leaf
/// at depth `d` reaches `d + 2`.
pub(super) fn structural_depth(node: &SyntaxNode, depth: usize) -> usize {
    node.children()
        .map(|child| structural_depth(child, depth + 1))
        .fold(depth + 2, usize::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::javascript::parser::{parse, ParseOptions};

    fn metrics(code: &str) -> ComplexityMetrics {
        analyze(&parse(code, &ParseOptions::default()).unwrap())
    }

    fn depth_of_json(value: &serde_json::Value, depth: usize) -> usize {
        let nested = |child: &serde_json::Value| match child {
            serde_json::Value::Object(_) => Some(depth_of_json(child, depth + 1)),
            serde_json::Value::Array(items) => items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| depth_of_json(item, depth + 1))
                .max(),
            _ => None,
        };
        match value {
            serde_json::Value::Object(map) => map.values().filter_map(nested).fold(depth, usize::max),
            _ => depth,
        }
    }

    #[test]
    fn test_counts() {
        let code = "function f(a) {\n  for (let i = 0; i < a; i++) {\n    if (i % 2) { continue; }\n  }\n  while (a--) {}\n  return a > 0 ? a : -a;\n}\nclass C {}\nconst g = () => 1;";
        let m = metrics(code);

        assert_eq!(m.functions, 2);
        assert_eq!(m.variables, 2);
        assert_eq!(m.classes, 1);
        assert_eq!(m.lines, 9);
        assert_eq!(m.loops, 2);
        assert_eq!(m.conditionals, 2);
    }

    #[test]
    fn test_statement_count_uses_type_names() {
        // IfStatement, BlockStatement, ReturnStatement
        let m = metrics("if (x) { return; }");
        assert_eq!(m.statements, 3);

        let m = metrics("x;");
        assert_eq!(m.statements, 1);
    }

    #[test]
    fn test_switch_is_conditional() {
        let m = metrics("switch (x) { case 1: break; default: y(); }");
        assert_eq!(m.conditionals, 1);
        assert_eq!(m.loops, 0);
    }

    #[test]
    fn test_empty_source() {
        let m = metrics("");
        assert_eq!(m.lines, 0);
        assert_eq!(m.statements, 0);
        assert_eq!(m.max_depth, 2);
    }

    #[test]
    fn test_depth_matches_serialized_tree() {
        for code in ["a;", "f(g(h(1)));", "function x() { if (a) { return [b, {c: d}]; } }"] {
            let result = parse(code, &ParseOptions::default()).unwrap();
            let json = serde_json::to_value(&result.program).unwrap();
            assert_eq!(
                structural_depth(&result.program, 0),
                depth_of_json(&json, 0),
                "depth mismatch for {code}"
            );
        }
    }

    #[test]
    fn test_deeper_nesting_increases_depth() {
        let shallow = metrics("a;").max_depth;
        let deep = metrics("a(b(c(d(e))));").max_depth;
        assert!(deep > shallow);
    }
}
