// CSS Analyzer - Structural queries over stylesheets
//
// Lowers a tree-sitter-css tree into the rule model (types.rs) and answers:
// - Selectors, declarations and `!important` flags per top-level rule
// - Color-bearing declaration values
// - @media conditions with their nested selectors
// - Compact and pretty re-serialization
//
// Malformed constructs are dropped during lowering; nothing here fails on bad CSS.

mod at_rules;
mod helpers;
mod media;
mod properties;
mod rules;
mod scanner;
mod serialize;
pub mod types;

use crate::extractors::base::{AnalyzerError, AnalyzerResult, BaseExtractor, SyntaxIssue};
use crate::language::SourceLanguage;
use helpers::DeclarationHelper;
use media::MediaExtractor;
use properties::PropertyExtractor;
use rules::RuleExtractor;
use scanner::{split_block_items, BlockItem, UnbalancedBrace};
use serialize::CssSerializer;
use std::collections::BTreeMap;
use tracing::debug;

pub use types::{
    AtRule, Block, CssRule, Declaration, DeclarationMap, MediaQuery, PrettifyOptions,
    QualifiedRule, Stylesheet,
};

pub struct CssAnalyzer<'a> {
    base: BaseExtractor<'a>,
}

impl<'a> CssAnalyzer<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            base: BaseExtractor::new(SourceLanguage::Css, content),
        }
    }

    /// Parse the content into top-level rules; comments skipped, malformed rules dropped
    pub fn parse_stylesheet(&self) -> AnalyzerResult<Stylesheet> {
        if self.base.content.trim().is_empty() {
            return Ok(Stylesheet::default());
        }
        let tree = self.base.parse_tree()?;
        let rules = RuleExtractor::extract_stylesheet(&self.base, tree.root_node());
        debug!("Lowered {} top-level CSS rules", rules.len());
        Ok(Stylesheet { rules })
    }

    /// `(true, None)` when the grammar reports no error or missing node
    pub fn validate(&self) -> AnalyzerResult<(bool, Option<String>)> {
        let tree = self.base.parse_tree()?;
        let issues = self.base.collect_syntax_issues(&tree.root_node());
        Ok(match issues.first() {
            Some(issue) => (false, Some(issue.to_string())),
            None => (true, None),
        })
    }
}

impl Stylesheet {
    /// Prelude of every top-level qualified rule
    pub fn selectors(&self) -> Vec<String> {
        self.qualified_rules()
            .map(|rule| rule.prelude.clone())
            .collect()
    }

    pub fn colors(&self) -> Vec<String> {
        PropertyExtractor::extract_colors(self)
    }

    /// `(selector, value)` for every declaration of `name` (case-insensitive)
    pub fn property(&self, name: &str) -> Vec<(String, String)> {
        PropertyExtractor::extract_property(self, name)
    }

    pub fn declarations_by_selector(&self) -> DeclarationMap {
        PropertyExtractor::declarations_by_selector(self)
    }

    pub fn media_queries(&self) -> Vec<MediaQuery> {
        MediaExtractor::extract_media_queries(self)
    }

    pub fn to_compact_css(&self) -> String {
        CssSerializer::to_compact(self)
    }

    pub fn to_pretty_css(&self, options: &PrettifyOptions) -> String {
        CssSerializer::to_pretty(self, options)
    }
}

pub fn parse_stylesheet(text: &str) -> AnalyzerResult<Stylesheet> {
    CssAnalyzer::new(text).parse_stylesheet()
}

pub fn extract_selectors(text: &str) -> AnalyzerResult<Vec<String>> {
    Ok(parse_stylesheet(text)?.selectors())
}

pub fn extract_colors(text: &str) -> AnalyzerResult<Vec<String>> {
    Ok(parse_stylesheet(text)?.colors())
}

pub fn extract_property(text: &str, name: &str) -> AnalyzerResult<Vec<(String, String)>> {
    Ok(parse_stylesheet(text)?.property(name))
}

pub fn get_all_declarations(text: &str) -> AnalyzerResult<DeclarationMap> {
    Ok(parse_stylesheet(text)?.declarations_by_selector())
}

pub fn parse_media_queries(text: &str) -> AnalyzerResult<Vec<MediaQuery>> {
    Ok(parse_stylesheet(text)?.media_queries())
}

/// Re-serialize the parsed rules without the whitespace the model does not keep
///
/// This is a round-trip, not a minifier: comments vanish because they are never
/// lowered, but values are written back verbatim.
pub fn minify_css(text: &str) -> AnalyzerResult<String> {
    Ok(parse_stylesheet(text)?.to_compact_css())
}

pub fn prettify_css(text: &str, options: &PrettifyOptions) -> AnalyzerResult<String> {
    Ok(parse_stylesheet(text)?.to_pretty_css(options))
}

/// Declarations of a bare `prop: value; ...` list, as found in style attributes
///
/// Empty items are skipped and malformed ones dropped. A `}` that closes
/// nothing is an error rather than the silent end of the list.
pub fn parse_declaration_list(text: &str) -> AnalyzerResult<Vec<Declaration>> {
    let items = split_block_items(text).map_err(|UnbalancedBrace(offset)| {
        let position = BaseExtractor::new(SourceLanguage::Css, text).position_at(offset);
        AnalyzerError::CssSyntax(SyntaxIssue {
            line: position.line,
            column: position.column,
            index: offset,
            message: "Unexpected token }".to_string(),
        })
    })?;

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            BlockItem::Declaration(decl) => DeclarationHelper::parse_declaration_text(decl),
            BlockItem::Rule(rule) => {
                debug!("Skipping rule inside declaration list: {:?}", rule.trim());
                None
            }
        })
        .collect())
}

/// `Some` only when the text holds exactly one declaration
pub fn parse_one_declaration(text: &str) -> AnalyzerResult<Option<Declaration>> {
    let mut declarations = parse_declaration_list(text)?;
    Ok(if declarations.len() == 1 {
        declarations.pop()
    } else {
        None
    })
}

/// `Some` only when the text holds exactly one rule
pub fn parse_rule(text: &str) -> AnalyzerResult<Option<CssRule>> {
    let mut stylesheet = parse_stylesheet(text)?;
    Ok(if stylesheet.len() == 1 {
        stylesheet.rules.pop()
    } else {
        None
    })
}

/// Property → value for an inline style; a repeated property keeps its last value
pub fn parse_inline_style(text: &str) -> AnalyzerResult<BTreeMap<String, String>> {
    Ok(parse_declaration_list(text)?
        .into_iter()
        .map(|decl| (decl.property, decl.value))
        .collect())
}

pub fn validate_color(value: &str) -> bool {
    match parse_declaration_list(&format!("color: {}", value)) {
        Ok(declarations) => !declarations.is_empty(),
        Err(e) => {
            debug!("Color validation failed to parse: {}", e);
            false
        }
    }
}

pub fn validate_css(text: &str) -> (bool, Option<String>) {
    match CssAnalyzer::new(text).validate() {
        Ok(result) => result,
        Err(e) => (false, Some(e.to_string())),
    }
}
