//! AnalysisManager - whole-file analysis and parallel batches
//!
//! Picks the walker from the file extension and runs every query that walker
//! offers, so callers get one report per file. Batches fan out over rayon;
//! a file that fails becomes an error entry in its report and never fails the
//! batch.

use crate::extractors::base::{AnalyzerError, AnalyzerResult, SyntaxIssue};
use crate::extractors::css::{self, DeclarationMap, MediaQuery};
use crate::extractors::javascript::{
    self, DependencySet, Grammar, JsSummary, ModuleType, ParseOptions,
};
use crate::language::{detect_language_from_extension, source_language, SourceLanguage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// One file to analyze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssReport {
    pub selectors: Vec<String>,
    pub colors: Vec<String>,
    pub declarations: DeclarationMap,
    pub media_queries: Vec<MediaQuery>,
    pub valid: bool,
    pub validation_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsReport {
    /// Grammar the source parsed with
    pub grammar: Grammar,
    pub module_type: ModuleType,
    pub summary: JsSummary,
    pub dependencies: DependencySet,
    /// Syntax errors the tolerant parse recovered from
    pub syntax_errors: Vec<SyntaxIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "language", rename_all = "lowercase")]
pub enum Analysis {
    Css(CssReport),
    JavaScript(JsReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    pub analysis: Option<Analysis>,
    pub error: Option<String>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Stateless entry point for file-level analysis
#[derive(Debug, Default)]
pub struct AnalysisManager {}

impl AnalysisManager {
    pub fn new() -> Self {
        Self {}
    }

    /// Extensions with a walker
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        vec!["css", "js", "mjs", "cjs", "jsx"]
    }

    /// Language name for a path, `jsx` kept distinct from `javascript`
    pub fn get_language_from_path(&self, file_path: &str) -> AnalyzerResult<&'static str> {
        let extension = Path::new(file_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        detect_language_from_extension(&extension)
            .ok_or_else(|| AnalyzerError::UnsupportedLanguage(format!("{} ({})", extension, file_path)))
    }

    pub fn analyze_file(&self, file_path: &str, content: &str) -> AnalyzerResult<Analysis> {
        let language = self.get_language_from_path(file_path)?;
        let analysis = match source_language(language) {
            Some(SourceLanguage::Css) => Analysis::Css(self.analyze_css(content)?),
            Some(SourceLanguage::JavaScript) => {
                Analysis::JavaScript(self.analyze_javascript(content, language == "jsx")?)
            }
            None => return Err(AnalyzerError::UnsupportedLanguage(language.to_string())),
        };
        debug!("Analyzed {} as {}", file_path, language);
        Ok(analysis)
    }

    fn analyze_css(&self, content: &str) -> AnalyzerResult<CssReport> {
        let stylesheet = css::parse_stylesheet(content)?;
        let (valid, validation_error) = css::validate_css(content);
        Ok(CssReport {
            selectors: stylesheet.selectors(),
            colors: stylesheet.colors(),
            declarations: stylesheet.declarations_by_selector(),
            media_queries: stylesheet.media_queries(),
            valid,
            validation_error,
        })
    }

    fn analyze_javascript(&self, content: &str, jsx: bool) -> AnalyzerResult<JsReport> {
        let options = ParseOptions {
            jsx,
            ..ParseOptions::default()
        };
        let result = javascript::parse(content, &options)?;
        Ok(JsReport {
            grammar: result.grammar,
            module_type: javascript::detect_module_type(content),
            summary: result.summary(),
            dependencies: result.dependencies()?,
            syntax_errors: result.errors.clone(),
        })
    }

    /// Analyze files in parallel; reports come back in input order
    pub fn analyze_batch(&self, files: &[SourceFile]) -> Vec<FileReport> {
        files
            .par_iter()
            .map(|file| match self.analyze_file(&file.path, &file.content) {
                Ok(analysis) => FileReport {
                    path: file.path.clone(),
                    analysis: Some(analysis),
                    error: None,
                },
                Err(e) => {
                    warn!("Failed to analyze {}: {}", file.path, e);
                    FileReport {
                        path: file.path.clone(),
                        analysis: None,
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect()
    }
}
