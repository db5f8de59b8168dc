//! JavaScript Analyzer - structural queries over ECMAScript sources
//!
//! Source text is parsed with tree-sitter-javascript, checked against the
//! requested grammar goal (Script or Module, JSX on or off) and lowered into
//! ESTree-shaped [`SyntaxNode`]s. Parsing yields an immutable [`ParseResult`];
//! every query takes one explicitly, so repeated queries never re-parse.
//!
//! - `parser.rs`: grammar goals, options, Script → Module fallback
//! - `lowering/`: CST → ESTree nodes
//! - `visitor.rs`: pre-order traversal shared by all extractors
//! - `functions.rs`, `variables.rs`, `classes.rs`, `imports.rs`,
//!   `identifiers.rs`: one collector per concern
//! - `complexity.rs`, `summary.rs`: fused traversals
//! - `tokens.rs`, `modules.rs`: token stream, comments and module heuristics
//!
//! The free functions at the bottom parse with [`ParseOptions::default`] and
//! run a single query, for callers that only need one answer per source.

mod classes;
mod complexity;
mod functions;
mod helpers;
mod identifiers;
mod imports;
mod lowering;
mod modules;
pub mod parser;
mod summary;
pub mod syntax;
mod tokens;
pub mod types;
mod variables;
pub mod visitor;

use crate::extractors::base::AnalyzerResult;
use classes::ClassCollector;
use functions::FunctionCollector;
use identifiers::IdentifierCollector;
use imports::{ExportCollector, ImportCollector};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeSet;
use variables::VariableCollector;
use visitor::walk;

pub use parser::{parse, parse_module, validate, Grammar, ParseOptions, ParseResult};
pub use summary::JsSummary;
pub use syntax::{Field, NodeKind, SyntaxNode};
pub use types::{
    ClassInfo, Comment, CommentType, ComplexityMetrics, DeclKind, DependencySet, ExportInfo,
    FunctionInfo, FunctionKind, ImportInfo, ImportSpecifierInfo, ModuleType, SpecifierKind, Token,
    TokenType, VariableInfo,
};
pub use visitor::{walk_all, Visitor};

impl ParseResult {
    pub fn functions(&self) -> Vec<FunctionInfo> {
        let mut collector = FunctionCollector::default();
        walk(&mut collector, &self.program);
        collector.functions
    }

    pub fn variables(&self) -> Vec<VariableInfo> {
        let mut collector = VariableCollector::default();
        walk(&mut collector, &self.program);
        collector.variables
    }

    pub fn classes(&self) -> Vec<ClassInfo> {
        let mut collector = ClassCollector::default();
        walk(&mut collector, &self.program);
        collector.classes
    }

    /// Empty unless the source was parsed with the Module grammar
    pub fn imports(&self) -> Vec<ImportInfo> {
        let mut collector = ImportCollector::default();
        walk(&mut collector, &self.program);
        collector.imports
    }

    pub fn exports(&self) -> Vec<ExportInfo> {
        let mut collector = ExportCollector::default();
        walk(&mut collector, &self.program);
        collector.exports
    }

    pub fn identifiers(&self) -> BTreeSet<String> {
        let mut collector = IdentifierCollector::default();
        walk(&mut collector, &self.program);
        collector.names
    }

    pub fn complexity(&self) -> ComplexityMetrics {
        complexity::analyze(self)
    }

    /// All of the above in one traversal
    pub fn summary(&self) -> JsSummary {
        JsSummary::collect(self)
    }

    /// Names of named functions, in order
    pub fn function_names(&self) -> Vec<String> {
        self.functions().into_iter().filter_map(|f| f.name).collect()
    }

    pub fn variable_names(&self) -> Vec<String> {
        self.variables().into_iter().filter_map(|v| v.name).collect()
    }

    pub fn class_names(&self) -> Vec<String> {
        self.classes().into_iter().filter_map(|c| c.name).collect()
    }

    /// Requires come from the token stream of the retained source
    pub fn dependencies(&self) -> AnalyzerResult<DependencySet> {
        let tokens = tokens::tokenize(self.source())?;
        Ok(modules::find_dependencies(self, &tokens))
    }

    /// The ESTree tree as indented JSON
    ///
    /// Errors recovered from in tolerant mode are added to the program object
    /// under `errors`.
    pub fn to_json(&self, indent: usize) -> AnalyzerResult<String> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        ProgramDocument { result: self }.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// The program node with tolerated errors appended
struct ProgramDocument<'a> {
    result: &'a ParseResult,
}

impl Serialize for ProgramDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let program = &self.result.program;
        let errors = &self.result.errors;
        let mut map =
            serializer.serialize_map(Some(program.entry_count() + usize::from(!errors.is_empty())))?;
        program.serialize_entries(&mut map)?;
        if !errors.is_empty() {
            map.serialize_entry("errors", errors)?;
        }
        map.end()
    }
}

pub fn tokenize(code: &str) -> AnalyzerResult<Vec<Token>> {
    tokens::tokenize(code)
}

pub fn extract_functions(code: &str) -> AnalyzerResult<Vec<FunctionInfo>> {
    Ok(parse(code, &ParseOptions::default())?.functions())
}

pub fn extract_variables(code: &str) -> AnalyzerResult<Vec<VariableInfo>> {
    Ok(parse(code, &ParseOptions::default())?.variables())
}

pub fn extract_classes(code: &str) -> AnalyzerResult<Vec<ClassInfo>> {
    Ok(parse(code, &ParseOptions::default())?.classes())
}

pub fn extract_imports(code: &str) -> AnalyzerResult<Vec<ImportInfo>> {
    Ok(parse(code, &ParseOptions::default())?.imports())
}

pub fn extract_exports(code: &str) -> AnalyzerResult<Vec<ExportInfo>> {
    Ok(parse(code, &ParseOptions::default())?.exports())
}

pub fn get_all_identifiers(code: &str) -> AnalyzerResult<BTreeSet<String>> {
    Ok(parse(code, &ParseOptions::default())?.identifiers())
}

pub fn analyze_complexity(code: &str) -> AnalyzerResult<ComplexityMetrics> {
    Ok(parse(code, &ParseOptions::default())?.complexity())
}

pub fn get_function_names(code: &str) -> AnalyzerResult<Vec<String>> {
    Ok(parse(code, &ParseOptions::default())?.function_names())
}

pub fn get_variable_names(code: &str) -> AnalyzerResult<Vec<String>> {
    Ok(parse(code, &ParseOptions::default())?.variable_names())
}

pub fn get_class_names(code: &str) -> AnalyzerResult<Vec<String>> {
    Ok(parse(code, &ParseOptions::default())?.class_names())
}

/// Strict Script parse; never fails
pub fn validate_syntax(code: &str) -> (bool, Option<String>) {
    validate(code, Grammar::Script)
}

/// Strict Module parse; never fails
pub fn validate_module_syntax(code: &str) -> (bool, Option<String>) {
    validate(code, Grammar::Module)
}

pub fn detect_module_type(code: &str) -> ModuleType {
    modules::detect_module_type(code)
}

/// Comments of a valid script; `[]` when the source does not parse strictly
pub fn extract_comments(code: &str) -> Vec<Comment> {
    tokens::extract_comments(code)
}

pub fn find_dependencies(code: &str) -> AnalyzerResult<DependencySet> {
    parse(code, &ParseOptions::default())?.dependencies()
}

pub fn to_json(code: &str, indent: usize) -> AnalyzerResult<String> {
    parse(code, &ParseOptions::default())?.to_json(indent)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JS: &str = r#"
import { helper } from './helper';
import * as utils from './utils';

export class Calculator extends Base {
    constructor() {
        super();
        this.result = 0;
    }

    add(a, b) {
        return a + b;
    }
}

export default function multiply(x, y) {
    for (let i = 0; i < y; i++) {
        if (i > 10) break;
    }
    return x * y;
}

const subtract = (a, b) => a - b;
"#;

    #[test]
    fn test_named_functions_and_params() {
        let functions = extract_functions("function foo(){} function bar(x,y){}").unwrap();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].name.as_deref(), Some("foo"));
        assert_eq!(functions[1].name.as_deref(), Some("bar"));
        assert_eq!(functions[1].params, vec!["x", "y"]);
    }

    #[test]
    fn test_arrow_function_entry() {
        let functions = extract_functions("const subtract = (a,b) => a-b;").unwrap();
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].kind, FunctionKind::Arrow);
        assert_eq!(functions[0].name, None);
    }

    #[test]
    fn test_validate_syntax() {
        assert_eq!(validate_syntax("const x = 42;"), (true, None));
        let (ok, message) = validate_syntax("const x = ;");
        assert!(!ok);
        assert!(message.is_some_and(|m| !m.is_empty()));
    }

    #[test]
    fn test_validate_module_syntax() {
        assert_eq!(validate_module_syntax("import a from 'b';"), (true, None));
        assert!(!validate_syntax("import a from 'b';").0);
    }

    #[test]
    fn test_module_type_detection() {
        assert_eq!(detect_module_type("import a from 'b';"), ModuleType::Es6);
        assert_eq!(detect_module_type("const a = require('b');"), ModuleType::CommonJs);
        assert_eq!(detect_module_type("const a = 1;"), ModuleType::None);
    }

    #[test]
    fn test_find_dependencies() {
        let deps = find_dependencies("import a from 'b'; const c = require('d');").unwrap();
        assert_eq!(deps.imports, vec!["b"]);
        assert_eq!(deps.requires, vec!["d"]);
    }

    #[test]
    fn test_sample_module() {
        let result = parse(SAMPLE_JS, &ParseOptions::default()).unwrap();
        assert!(result.is_module());

        assert_eq!(result.function_names(), vec!["multiply"]);
        assert_eq!(result.functions().len(), 4);
        assert_eq!(result.class_names(), vec!["Calculator"]);
        assert_eq!(
            result.classes()[0].superclass_name.as_deref(),
            Some("Base")
        );
        assert_eq!(result.variable_names(), vec!["i", "subtract"]);

        let sources: Vec<String> = result.imports().into_iter().map(|i| i.source).collect();
        assert_eq!(sources, vec!["./helper", "./utils"]);

        let exports: Vec<String> = result.exports().into_iter().map(|e| e.kind).collect();
        assert_eq!(
            exports,
            vec!["ExportNamedDeclaration", "ExportDefaultDeclaration"]
        );

        let identifiers = result.identifiers();
        for name in ["helper", "utils", "Calculator", "Base", "multiply", "subtract", "result"] {
            assert!(identifiers.contains(name), "missing identifier {name}");
        }
    }

    #[test]
    fn test_summary_matches_individual_extractors() {
        let result = parse(SAMPLE_JS, &ParseOptions::default()).unwrap();
        let summary = result.summary();

        assert_eq!(summary.functions, result.functions());
        assert_eq!(summary.variables, result.variables());
        assert_eq!(summary.classes, result.classes());
        assert_eq!(summary.imports, result.imports());
        assert_eq!(summary.exports, result.exports());
        assert_eq!(summary.identifiers, result.identifiers());
        assert_eq!(summary.complexity, result.complexity());
    }

    #[test]
    fn test_complexity_of_sample() {
        let metrics = analyze_complexity(SAMPLE_JS).unwrap();
        assert_eq!(metrics.functions, 4);
        assert_eq!(metrics.classes, 1);
        assert_eq!(metrics.variables, 2);
        assert_eq!(metrics.loops, 1);
        assert_eq!(metrics.conditionals, 1);
        assert_eq!(metrics.lines, SAMPLE_JS.matches('\n').count() + 1);
        assert!(metrics.max_depth > 5);
    }

    #[test]
    fn test_script_source_has_no_imports() {
        let result = parse("var a = 1;", &ParseOptions::default()).unwrap();
        assert!(result.imports().is_empty());
        assert!(result.exports().is_empty());
    }

    #[test]
    fn test_parse_failure_references_grammar_error() {
        let err = extract_functions("import a from 'b'; with (o) {}").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse JavaScript"));
    }

    #[test]
    fn test_to_json() {
        let json = to_json("x;", 2).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "Program");
        assert_eq!(value["sourceType"], "script");
        assert_eq!(value["body"][0]["type"], "ExpressionStatement");
        assert_eq!(value["body"][0]["expression"]["name"], "x");
        assert_eq!(value["range"], serde_json::json!([0, 2]));
        assert!(value.get("errors").is_none());
        assert!(json.starts_with("{\n  \"type\": \"Program\",\n  \"body\": ["));
    }

    #[test]
    fn test_to_json_lists_tolerated_errors() {
        let result = parse("let a = ;", &ParseOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result.to_json(4).unwrap()).unwrap();
        let errors = value["errors"].as_array().unwrap();
        assert!(!errors.is_empty());
        assert_eq!(errors[0]["line"], 1);
    }

    #[test]
    fn test_comments_and_tokens() {
        let comments = extract_comments("/** doc */ function f() {} // tail");
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].value, "* doc ");

        let tokens = tokenize("export default 1;").unwrap();
        assert_eq!(tokens[0].token_type, TokenType::Keyword);
        assert_eq!(tokens[2].token_type, TokenType::Numeric);
    }

    #[test]
    fn test_record_json_shapes() {
        let functions = extract_functions("function f(a, b) {}").unwrap();
        let functions = serde_json::to_value(functions).unwrap();
        assert_eq!(functions[0]["name"], "f");
        assert_eq!(functions[0]["params"], serde_json::json!(["a", "b"]));
        assert_eq!(functions[0]["isAsync"], false);

        let tokens = serde_json::to_value(tokenize("let x").unwrap()).unwrap();
        assert_eq!(tokens[1]["type"], "Identifier");
        assert_eq!(tokens[1]["value"], "x");
        assert_eq!(tokens[1]["range"], serde_json::json!([4, 5]));
    }
}
