//! JavaScript parsing: grammar goals, options and the immutable parse result
//!
//! tree-sitter-javascript accepts the union of Script, Module and JSX syntax.
//! The goal checks below narrow that down to what the requested grammar
//! allows, and strict parses reject any tree the grammar had to recover.

use super::lowering::Lowerer;
use super::syntax::SyntaxNode;
use crate::extractors::base::{AnalyzerError, AnalyzerResult, BaseExtractor, SyntaxIssue};
use crate::language::SourceLanguage;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tree_sitter::{Node, Tree};

/// ECMAScript top-level production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    Script,
    Module,
}

impl Grammar {
    /// ESTree `Program.sourceType`
    pub fn source_type(&self) -> &'static str {
        match self {
            Grammar::Script => "script",
            Grammar::Module => "module",
        }
    }
}

/// Options for [`parse`]
///
/// `grammar: None` tries Script first and falls back to Module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub jsx: bool,
    /// Record recoverable syntax errors instead of failing
    pub tolerant: bool,
    pub grammar: Option<Grammar>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            jsx: false,
            tolerant: true,
            grammar: None,
        }
    }
}

impl ParseOptions {
    /// Non-tolerant parse with the given grammar
    pub fn strict(grammar: Grammar) -> Self {
        Self {
            jsx: false,
            tolerant: false,
            grammar: Some(grammar),
        }
    }

    pub fn module(jsx: bool) -> Self {
        Self {
            jsx,
            grammar: Some(Grammar::Module),
            ..Self::default()
        }
    }
}

/// A successfully parsed program
///
/// Immutable; every extractor takes one of these explicitly.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub program: SyntaxNode,
    pub source: String,
    pub grammar: Grammar,
    /// Syntax errors recovered from in tolerant mode
    pub errors: Vec<SyntaxIssue>,
}

impl ParseResult {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_module(&self) -> bool {
        self.grammar == Grammar::Module
    }
}

/// Parse with the Script grammar, retrying as Module if that fails
///
/// When both fail the Script error is returned. Nothing from the failed
/// attempt leaks into the retry.
pub fn parse(code: &str, options: &ParseOptions) -> AnalyzerResult<ParseResult> {
    if let Some(grammar) = options.grammar {
        return parse_with_grammar(code, grammar, options);
    }

    match parse_with_grammar(code, Grammar::Script, options) {
        Ok(result) => Ok(result),
        Err(script_error) => {
            debug!("Script grammar rejected source ({}), retrying as module", script_error);
            parse_with_grammar(code, Grammar::Module, options).map_err(|module_error| {
                debug!("Module grammar rejected source too ({})", module_error);
                script_error
            })
        }
    }
}

/// Parse with the Module grammar only
pub fn parse_module(code: &str, jsx: bool) -> AnalyzerResult<ParseResult> {
    parse(code, &ParseOptions::module(jsx))
}

fn parse_with_grammar(
    code: &str,
    grammar: Grammar,
    options: &ParseOptions,
) -> AnalyzerResult<ParseResult> {
    let base = BaseExtractor::new(SourceLanguage::JavaScript, code);
    let (tree, errors) = checked_tree(&base, grammar, options)?;

    Ok(ParseResult {
        program: Lowerer::new(&base).lower_program(tree.root_node(), grammar.source_type()),
        source: code.to_string(),
        grammar,
        errors,
    })
}

/// Parse and apply the goal and strictness checks without lowering
///
/// Returns the tree with the syntax issues recovered from, which is always
/// empty for non-tolerant options.
pub(super) fn checked_tree(
    base: &BaseExtractor,
    grammar: Grammar,
    options: &ParseOptions,
) -> AnalyzerResult<(Tree, Vec<SyntaxIssue>)> {
    let tree = base.parse_tree()?;
    let root = tree.root_node();

    if let Some(issue) = GoalChecker::new(base, grammar, options.jsx).first_violation(root) {
        return Err(AnalyzerError::Parse(issue));
    }

    let mut errors = base.collect_syntax_issues(&root);
    if !errors.is_empty() {
        if !options.tolerant {
            return Err(AnalyzerError::Parse(errors.remove(0)));
        }
        debug!("Tolerant parse recovered from {} syntax errors", errors.len());
    }

    Ok((tree, errors))
}

/// Strict parse; `(false, message)` instead of an error
pub fn validate(code: &str, grammar: Grammar) -> (bool, Option<String>) {
    match parse(code, &ParseOptions::strict(grammar)) {
        Ok(_) => (true, None),
        Err(AnalyzerError::Parse(issue)) => (false, Some(issue.to_string())),
        Err(e) => (false, Some(e.to_string())),
    }
}

/// Constructs the tree-sitter grammar accepts but the requested goal does not
struct GoalChecker<'a> {
    base: &'a BaseExtractor<'a>,
    grammar: Grammar,
    jsx: bool,
}

impl<'a> GoalChecker<'a> {
    fn new(base: &'a BaseExtractor<'a>, grammar: Grammar, jsx: bool) -> Self {
        Self { base, grammar, jsx }
    }

    /// First violation in document order
    fn first_violation(&self, root: Node) -> Option<SyntaxIssue> {
        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            if let Some(message) = self.check(&node) {
                return Some(self.base.create_issue(&node, message));
            }
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return None;
                }
            }
        }
    }

    fn check(&self, node: &Node) -> Option<String> {
        let kind = node.kind();

        if !self.jsx && kind.starts_with("jsx_") {
            return Some("Unexpected token <".to_string());
        }

        match self.grammar {
            Grammar::Script => match kind {
                "import_statement" => Some("Unexpected token import".to_string()),
                "export_statement" => Some("Unexpected token export".to_string()),
                "meta_property" if self.base.node_str(node).starts_with("import") => {
                    Some("Cannot use 'import.meta' outside a module".to_string())
                }
                _ => None,
            },
            Grammar::Module => match kind {
                "with_statement" => {
                    Some("Strict mode code may not include a with statement".to_string())
                }
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_first_then_module() {
        let script = parse("var a = 1;", &ParseOptions::default()).unwrap();
        assert_eq!(script.grammar, Grammar::Script);
        assert_eq!(script.program.text("sourceType"), Some("script"));

        let module = parse("import a from 'b';", &ParseOptions::default()).unwrap();
        assert_eq!(module.grammar, Grammar::Module);
        assert_eq!(module.program.text("sourceType"), Some("module"));
    }

    #[test]
    fn test_with_statement_is_script_only() {
        let result = parse("with (o) { x; }", &ParseOptions::default()).unwrap();
        assert_eq!(result.grammar, Grammar::Script);

        let err = parse_module("with (o) { x; }", false).unwrap_err();
        assert!(err.to_string().contains("with statement"));
    }

    #[test]
    fn test_both_grammars_failing_reports_script_error() {
        let err = parse(
            "import a from 'b'; with (o) {}",
            &ParseOptions::default(),
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to parse JavaScript: Line 1:"));
        assert!(message.contains("import"));
    }

    #[test]
    fn test_jsx_requires_option() {
        let code = "const el = <div className=\"x\">hi</div>;";
        assert!(parse(code, &ParseOptions::default()).is_err());

        let options = ParseOptions {
            jsx: true,
            ..ParseOptions::default()
        };
        let result = parse(code, &options).unwrap();
        let init = result.program.list("body")[0].list("declarations")[0]
            .field("init")
            .unwrap();
        assert_eq!(init.kind.as_str(), "JSXElement");
    }

    #[test]
    fn test_tolerant_records_errors() {
        let result = parse("let a = ;\nlet b = 2;", &ParseOptions::default()).unwrap();
        assert!(!result.errors.is_empty());
        assert_eq!(result.errors[0].line, 1);

        let strict = ParseOptions {
            tolerant: false,
            ..ParseOptions::default()
        };
        assert!(parse("let a = ;", &strict).is_err());
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate("const x = 42;", Grammar::Script), (true, None));

        let (ok, message) = validate("const x = ;", Grammar::Script);
        assert!(!ok);
        assert!(!message.unwrap().is_empty());

        let (ok, _) = validate("export const x = 1;", Grammar::Script);
        assert!(!ok);
        let (ok, _) = validate("export const x = 1;", Grammar::Module);
        assert!(ok);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ParseOptions = serde_json::from_str(r#"{"jsx": true}"#).unwrap();
        assert!(options.jsx);
        assert!(options.tolerant);
        assert_eq!(options.grammar, None);

        let options: ParseOptions = serde_json::from_str(r#"{"grammar": "module"}"#).unwrap();
        assert_eq!(options.grammar, Some(Grammar::Module));
    }
}
