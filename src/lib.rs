// Structlens Core - tree-sitter backed structural extraction for CSS and JavaScript
//
// The Rust library is usable on its own; the `python` feature adds a PyO3
// extension module over the same API.

pub mod extractors;
pub mod language;

// PyO3 bindings layer
#[cfg(feature = "python")]
pub mod bindings;

pub use extractors::base::{AnalyzerError, AnalyzerResult};
pub use extractors::manager::{AnalysisManager, FileReport, SourceFile};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Structlens Core Python module
#[cfg(feature = "python")]
#[pymodule]
fn structlens_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    m.add_function(wrap_pyfunction!(bindings::detect_language, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::supported_extensions, m)?)?;

    // CSS
    m.add_function(wrap_pyfunction!(bindings::extract_selectors, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_colors, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_property, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::get_all_declarations, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::parse_stylesheet, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::parse_media_queries, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::minify_css, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::prettify_css, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::parse_inline_style, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::validate_color, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::validate_css, m)?)?;

    // JavaScript
    m.add_function(wrap_pyfunction!(bindings::parse_javascript, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::summarize_javascript, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::tokenize, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_functions, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_variables, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_classes, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_imports, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_exports, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::get_function_names, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::get_variable_names, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::get_class_names, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::get_all_identifiers, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::analyze_complexity, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::validate_syntax, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::validate_module_syntax, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::detect_module_type, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::find_dependencies, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_comments, m)?)?;

    // Batch
    m.add_function(wrap_pyfunction!(bindings::analyze_files_batch, m)?)?;
    m.add_class::<bindings::PyFileReport>()?;

    Ok(())
}
