// API Functions - PyO3-exposed functions for Python
//
// Thin wrappers over the CSS and JavaScript walkers. Engine errors surface as
// ValueError; validators return `(ok, message)` and never raise.

use super::PyFileReport;
use crate::extractors::base::AnalyzerError;
use crate::extractors::css::{self, PrettifyOptions};
use crate::extractors::javascript::{self, ParseOptions};
use crate::extractors::manager::{AnalysisManager, SourceFile};
use crate::language::detect_language_from_extension;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

fn to_py_err(e: AnalyzerError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Detect language from a file path's extension
///
/// Returns:
///     str | None: "css", "javascript", "jsx" or None
#[pyfunction]
pub fn detect_language(file_path: &str) -> Option<String> {
    let extension = Path::new(file_path).extension()?.to_str()?;
    detect_language_from_extension(&extension.to_ascii_lowercase()).map(str::to_string)
}

#[pyfunction]
pub fn supported_extensions() -> Vec<&'static str> {
    AnalysisManager::new().supported_extensions()
}

// CSS

#[pyfunction]
pub fn extract_selectors(text: &str) -> PyResult<Vec<String>> {
    css::extract_selectors(text).map_err(to_py_err)
}

#[pyfunction]
pub fn extract_colors(text: &str) -> PyResult<Vec<String>> {
    css::extract_colors(text).map_err(to_py_err)
}

/// Returns:
///     list[tuple[str, str]]: (selector, value) pairs in document order
#[pyfunction]
pub fn extract_property(text: &str, name: &str) -> PyResult<Vec<(String, String)>> {
    css::extract_property(text, name).map_err(to_py_err)
}

/// Declarations grouped by selector, as JSON
#[pyfunction]
pub fn get_all_declarations(text: &str) -> PyResult<String> {
    to_json(&css::get_all_declarations(text).map_err(to_py_err)?)
}

/// The full rule tree (qualified rules, at-rules, nested blocks) as JSON
#[pyfunction]
pub fn parse_stylesheet(text: &str) -> PyResult<String> {
    to_json(&css::parse_stylesheet(text).map_err(to_py_err)?)
}

/// Returns:
///     list[tuple[str, list[str]]]: (condition, nested selectors) per @media block
#[pyfunction]
pub fn parse_media_queries(text: &str) -> PyResult<Vec<(String, Vec<String>)>> {
    Ok(css::parse_media_queries(text)
        .map_err(to_py_err)?
        .into_iter()
        .map(|query| (query.condition, query.rule_selectors))
        .collect())
}

#[pyfunction]
pub fn minify_css(text: &str) -> PyResult<String> {
    css::minify_css(text).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (text, indent = "  ".to_string()))]
pub fn prettify_css(text: &str, indent: String) -> PyResult<String> {
    css::prettify_css(text, &PrettifyOptions { indent }).map_err(to_py_err)
}

#[pyfunction]
pub fn parse_inline_style(text: &str) -> PyResult<BTreeMap<String, String>> {
    css::parse_inline_style(text).map_err(to_py_err)
}

#[pyfunction]
pub fn validate_color(value: &str) -> bool {
    css::validate_color(value)
}

#[pyfunction]
pub fn validate_css(text: &str) -> (bool, Option<String>) {
    css::validate_css(text)
}

// JavaScript

/// Parse and return the ESTree tree as JSON
///
/// Raises:
///     ValueError: when neither the Script nor the Module grammar accepts the code
#[pyfunction]
#[pyo3(signature = (code, jsx = false, tolerant = true, indent = 2))]
pub fn parse_javascript(code: &str, jsx: bool, tolerant: bool, indent: usize) -> PyResult<String> {
    let options = ParseOptions {
        jsx,
        tolerant,
        grammar: None,
    };
    javascript::parse(code, &options)
        .and_then(|result| result.to_json(indent))
        .map_err(to_py_err)
}

/// Functions, variables, classes, imports, exports, identifiers and
/// complexity from one parse, as JSON
#[pyfunction]
#[pyo3(signature = (code, jsx = false))]
pub fn summarize_javascript(code: &str, jsx: bool) -> PyResult<String> {
    let options = ParseOptions {
        jsx,
        ..ParseOptions::default()
    };
    to_json(&javascript::parse(code, &options).map_err(to_py_err)?.summary())
}

/// Tokens with type, value, range and loc, as JSON
#[pyfunction]
pub fn tokenize(code: &str) -> PyResult<String> {
    to_json(&javascript::tokenize(code).map_err(to_py_err)?)
}

/// Function records (kind, name, params, async and generator flags) as JSON
#[pyfunction]
pub fn extract_functions(code: &str) -> PyResult<String> {
    to_json(&javascript::extract_functions(code).map_err(to_py_err)?)
}

#[pyfunction]
pub fn extract_variables(code: &str) -> PyResult<String> {
    to_json(&javascript::extract_variables(code).map_err(to_py_err)?)
}

#[pyfunction]
pub fn extract_classes(code: &str) -> PyResult<String> {
    to_json(&javascript::extract_classes(code).map_err(to_py_err)?)
}

#[pyfunction]
pub fn extract_imports(code: &str) -> PyResult<String> {
    to_json(&javascript::extract_imports(code).map_err(to_py_err)?)
}

#[pyfunction]
pub fn extract_exports(code: &str) -> PyResult<String> {
    to_json(&javascript::extract_exports(code).map_err(to_py_err)?)
}

#[pyfunction]
pub fn get_function_names(code: &str) -> PyResult<Vec<String>> {
    javascript::get_function_names(code).map_err(to_py_err)
}

#[pyfunction]
pub fn get_variable_names(code: &str) -> PyResult<Vec<String>> {
    javascript::get_variable_names(code).map_err(to_py_err)
}

#[pyfunction]
pub fn get_class_names(code: &str) -> PyResult<Vec<String>> {
    javascript::get_class_names(code).map_err(to_py_err)
}

#[pyfunction]
pub fn get_all_identifiers(code: &str) -> PyResult<BTreeSet<String>> {
    javascript::get_all_identifiers(code).map_err(to_py_err)
}

/// Complexity metrics as a dict of counts
#[pyfunction]
pub fn analyze_complexity(code: &str) -> PyResult<BTreeMap<&'static str, usize>> {
    let metrics = javascript::analyze_complexity(code).map_err(to_py_err)?;
    Ok(BTreeMap::from([
        ("functions", metrics.functions),
        ("variables", metrics.variables),
        ("classes", metrics.classes),
        ("lines", metrics.lines),
        ("statements", metrics.statements),
        ("loops", metrics.loops),
        ("conditionals", metrics.conditionals),
        ("maxDepth", metrics.max_depth),
    ]))
}

#[pyfunction]
pub fn validate_syntax(code: &str) -> (bool, Option<String>) {
    javascript::validate_syntax(code)
}

#[pyfunction]
pub fn validate_module_syntax(code: &str) -> (bool, Option<String>) {
    javascript::validate_module_syntax(code)
}

/// Returns:
///     str: "es6", "commonjs" or "none"
#[pyfunction]
pub fn detect_module_type(code: &str) -> &'static str {
    javascript::detect_module_type(code).as_str()
}

/// Returns:
///     tuple[list[str], list[str]]: (imports, requires), duplicates kept
#[pyfunction]
pub fn find_dependencies(code: &str) -> PyResult<(Vec<String>, Vec<String>)> {
    let dependencies = javascript::find_dependencies(code).map_err(to_py_err)?;
    Ok((dependencies.imports, dependencies.requires))
}

/// Comments as JSON; `[]` when the code is not a valid script
#[pyfunction]
pub fn extract_comments(code: &str) -> PyResult<String> {
    to_json(&javascript::extract_comments(code))
}

/// Analyze many files in parallel
///
/// Releases the GIL while rayon works through the batch. A file that cannot be
/// analyzed gets an error report; the batch itself never raises.
///
/// Args:
///     files (list[tuple[str, str]]): (file_path, content) pairs
///
/// Returns:
///     list[FileReport]: reports in input order
#[pyfunction]
pub fn analyze_files_batch(py: Python<'_>, files: Vec<(String, String)>) -> Vec<PyFileReport> {
    let reports = py.detach(move || {
        let files: Vec<SourceFile> = files
            .into_iter()
            .map(|(path, content)| SourceFile::new(path, content))
            .collect();
        AnalysisManager::new().analyze_batch(&files)
    });

    reports.into_iter().map(PyFileReport::from_report).collect()
}
