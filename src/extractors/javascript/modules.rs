//! Module system heuristics
//!
//! Module type detection is substring matching over raw text, so it answers
//! for code that does not parse. `require` calls are found by scanning tokens
//! rather than the tree, which also catches them in unparsed positions.

use super::imports::ImportCollector;
use super::parser::ParseResult;
use super::types::{DependencySet, ModuleType, Token, TokenType};
use super::visitor::walk;
use regex::Regex;
use std::sync::LazyLock;

/// `import ` followed anywhere later by ` from `
static ES6_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)import .* from ").unwrap());

/// Tokens after `require` searched for its string argument
const REQUIRE_LOOKAHEAD: usize = 4;

pub(super) fn detect_module_type(code: &str) -> ModuleType {
    if ES6_IMPORT_RE.is_match(code) || code.contains("export ") {
        ModuleType::Es6
    } else if code.contains("require(")
        || code.contains("module.exports")
        || code.contains("exports.")
    {
        ModuleType::CommonJs
    } else {
        ModuleType::None
    }
}

pub(super) fn find_dependencies(result: &ParseResult, tokens: &[Token]) -> DependencySet {
    let mut collector = ImportCollector::default();
    walk(&mut collector, &result.program);

    DependencySet {
        imports: collector
            .imports
            .into_iter()
            .map(|import| import.source)
            .collect(),
        requires: required_modules(tokens),
    }
}

/// String argument of every `require` identifier, unquoted; empty strings skipped
pub(super) fn required_modules(tokens: &[Token]) -> Vec<String> {
    let mut requires = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if token.token_type != TokenType::Identifier || token.value != "require" {
            continue;
        }
        let argument = tokens
            .iter()
            .skip(i + 1)
            .take(REQUIRE_LOOKAHEAD)
            .find(|candidate| candidate.token_type == TokenType::String);
        if let Some(argument) = argument {
            let value = argument.value.trim_matches(|c| c == '\'' || c == '"');
            if !value.is_empty() {
                requires.push(value.to_string());
            }
        }
    }
    requires
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::javascript::parser::{parse, ParseOptions};
    use crate::extractors::javascript::tokens::tokenize;

    fn dependencies(code: &str) -> DependencySet {
        let result = parse(code, &ParseOptions::default()).unwrap();
        find_dependencies(&result, &tokenize(code).unwrap())
    }

    #[test]
    fn test_detect_module_type() {
        assert_eq!(detect_module_type("import a from 'b';"), ModuleType::Es6);
        assert_eq!(detect_module_type("export const a = 1;"), ModuleType::Es6);
        assert_eq!(
            detect_module_type("const a = require('b');"),
            ModuleType::CommonJs
        );
        assert_eq!(detect_module_type("module.exports = {};"), ModuleType::CommonJs);
        assert_eq!(detect_module_type("exports.x = 1;"), ModuleType::CommonJs);
        assert_eq!(detect_module_type("const a = 1;"), ModuleType::None);
    }

    #[test]
    fn test_detection_is_textual() {
        // Inside a string literal still counts
        assert_eq!(
            detect_module_type("const s = \"import x from y\";"),
            ModuleType::Es6
        );
        // ` from ` must come after `import `
        assert_eq!(
            detect_module_type("var s = 'a from b'; import 'side';"),
            ModuleType::None
        );
        assert_eq!(detect_module_type("import a\n  from 'b';"), ModuleType::Es6);
        assert_eq!(
            detect_module_type("import('lazy'); require('z');"),
            ModuleType::CommonJs
        );
    }

    #[test]
    fn test_imports_and_requires_split() {
        let deps = dependencies("import a from 'b'; const c = require('d');");
        assert_eq!(deps.imports, vec!["b"]);
        assert_eq!(deps.requires, vec!["d"]);
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let deps = dependencies("require('x'); require(\"y\"); require('x'); require(`tpl`); require(name);");
        assert_eq!(deps.requires, vec!["x", "y", "x"]);
        assert!(deps.imports.is_empty());
    }

    #[test]
    fn test_require_lookahead_window() {
        // The string is six tokens after `require`
        let deps = dependencies("require(a, b, 'far');");
        assert!(deps.requires.is_empty());

        let deps = dependencies("require(a, 'near');");
        assert_eq!(deps.requires, vec!["near"]);
    }
}
