//! Language Support - Shared tree-sitter language configuration
//!
//! ALL grammar configuration for the two analyzed languages lives here so the
//! CSS and JavaScript walkers never construct grammars on their own.

use anyhow::Result;

/// Languages the extraction engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    Css,
    JavaScript,
}

impl SourceLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::Css => "css",
            SourceLanguage::JavaScript => "javascript",
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get tree-sitter language parser for a given language name
///
/// This is the SINGLE SOURCE OF TRUTH for grammar lookup. `jsx` is an alias of
/// `javascript`: the JavaScript grammar always accepts JSX and the walker decides
/// whether JSX is allowed.
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "css" => Ok(tree_sitter_css::LANGUAGE.into()),
        "javascript" | "jsx" => Ok(tree_sitter_javascript::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!(
            "Unsupported language: '{}'. Supported languages: css, javascript",
            language
        )),
    }
}

/// Detect language from file extension
///
/// Returns the language name that can be passed to `get_tree_sitter_language()`.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "css" => Some("css"),
        "js" | "mjs" | "cjs" => Some("javascript"),
        "jsx" => Some("jsx"),
        _ => None,
    }
}

/// Resolve a language name (as returned by `detect_language_from_extension`)
/// into the engine's language enum
pub fn source_language(language: &str) -> Option<SourceLanguage> {
    match language {
        "css" => Some(SourceLanguage::Css),
        "javascript" | "jsx" => Some(SourceLanguage::JavaScript),
        _ => None,
    }
}
