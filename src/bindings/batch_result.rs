// PyFileReport - one file's analysis as seen from Python
//
// Reports cross the boundary as plain fields plus a JSON payload; Python side
// code decodes the payload with `json.loads` when it needs the full structure.

use crate::extractors::manager::{Analysis, FileReport};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Result of analyzing a single file in a batch
///
/// - path: file path as given
/// - language: "css", "javascript" or "unknown" when analysis failed
/// - error: message when the file could not be analyzed
#[pyclass(name = "FileReport")]
pub struct PyFileReport {
    #[pyo3(get)]
    pub path: String,

    #[pyo3(get)]
    pub language: String,

    #[pyo3(get)]
    pub error: Option<String>,

    report: FileReport,
}

impl PyFileReport {
    pub fn from_report(report: FileReport) -> Self {
        let language = match &report.analysis {
            Some(Analysis::Css(_)) => "css",
            Some(Analysis::JavaScript(_)) => "javascript",
            None => "unknown",
        };
        PyFileReport {
            path: report.path.clone(),
            language: language.to_string(),
            error: report.error.clone(),
            report,
        }
    }
}

#[pymethods]
impl PyFileReport {
    #[getter]
    fn is_success(&self) -> bool {
        self.report.is_ok()
    }

    /// Full report as JSON
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.report)
            .map_err(|e| PyValueError::new_err(format!("Report serialization failed: {}", e)))
    }

    fn __repr__(&self) -> String {
        match &self.error {
            Some(err) => format!("FileReport(path={:?}, error={:?})", self.path, err),
            None => format!("FileReport(path={:?}, lang={:?})", self.path, self.language),
        }
    }
}
