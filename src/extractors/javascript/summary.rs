//! Every extraction concern from a single traversal

use super::classes::ClassCollector;
use super::complexity::{line_count, structural_depth, StatementCounter};
use super::functions::FunctionCollector;
use super::identifiers::IdentifierCollector;
use super::imports::{ExportCollector, ImportCollector};
use super::parser::ParseResult;
use super::types::{ClassInfo, ComplexityMetrics, ExportInfo, FunctionInfo, ImportInfo, VariableInfo};
use super::variables::VariableCollector;
use super::visitor::walk_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-concern results identical to running each extractor on its own
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsSummary {
    pub functions: Vec<FunctionInfo>,
    pub variables: Vec<VariableInfo>,
    pub classes: Vec<ClassInfo>,
    pub imports: Vec<ImportInfo>,
    pub exports: Vec<ExportInfo>,
    pub identifiers: BTreeSet<String>,
    pub complexity: ComplexityMetrics,
}

impl JsSummary {
    pub fn collect(result: &ParseResult) -> Self {
        let mut functions = FunctionCollector::default();
        let mut variables = VariableCollector::default();
        let mut classes = ClassCollector::default();
        let mut imports = ImportCollector::default();
        let mut exports = ExportCollector::default();
        let mut identifiers = IdentifierCollector::default();
        let mut counter = StatementCounter::default();

        walk_all(
            &mut [
                &mut functions,
                &mut variables,
                &mut classes,
                &mut imports,
                &mut exports,
                &mut identifiers,
                &mut counter,
            ],
            &result.program,
        );

        let complexity = ComplexityMetrics {
            functions: functions.functions.len(),
            variables: variables.variables.len(),
            classes: classes.classes.len(),
            lines: line_count(result.source()),
            statements: counter.statements,
            loops: counter.loops,
            conditionals: counter.conditionals,
            max_depth: structural_depth(&result.program, 0),
        };

        Self {
            functions: functions.functions,
            variables: variables.variables,
            classes: classes.classes,
            imports: imports.imports,
            exports: exports.exports,
            identifiers: identifiers.names,
            complexity,
        }
    }
}
