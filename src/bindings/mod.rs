// PyO3 Bindings Module
//
// Python bindings for the CSS and JavaScript walkers. Only built with the
// `python` feature.

mod api;
mod batch_result;

// Re-export for lib.rs
pub use api::{
    analyze_complexity, analyze_files_batch, detect_language, detect_module_type,
    extract_classes, extract_colors, extract_comments, extract_exports, extract_functions,
    extract_imports, extract_property, extract_selectors, extract_variables, find_dependencies,
    get_all_declarations, get_all_identifiers, get_class_names, get_function_names,
    get_variable_names, minify_css, parse_inline_style, parse_javascript, parse_media_queries,
    parse_stylesheet, prettify_css, summarize_javascript, supported_extensions, tokenize,
    validate_color, validate_css, validate_module_syntax, validate_syntax,
};
pub use batch_result::PyFileReport;
