use serde::{Deserialize, Serialize};

use crate::splice::SpliceReport;

/// Generate a unique execution id for a run
pub fn generate_execution_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Machine-readable outcome of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpliceResponse {
    pub execution_id: String,
    pub success: bool,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<String>,
    pub start_line: usize,
    pub end_line: usize,
    #[serde(default)]
    pub original_line_count: usize,
    #[serde(default)]
    pub removed_count: usize,
    #[serde(default)]
    pub inserted_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_checksum: Option<String>,
    #[serde(default)]
    pub byte_shift: i64,
    /// Human-readable confirmation on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SpliceResponse {
    /// Build a success response from a completed splice
    pub fn success(execution_id: String, report: &SpliceReport, message: String) -> Self {
        Self {
            execution_id,
            success: true,
            path: report.path.display().to_string(),
            backup_path: Some(report.backup_path.display().to_string()),
            start_line: report.range.start_line,
            end_line: report.range.end_line,
            original_line_count: report.original_line_count,
            removed_count: report.removed_count,
            inserted_count: report.inserted_count,
            original_checksum: Some(report.original_checksum.clone()),
            new_checksum: Some(report.new_checksum.clone()),
            byte_shift: report.byte_shift,
            message: Some(message),
            error: None,
        }
    }

    /// Build a failure response
    pub fn failure(
        execution_id: String,
        path: String,
        start_line: usize,
        end_line: usize,
        error: String,
    ) -> Self {
        Self {
            execution_id,
            success: false,
            path,
            backup_path: None,
            start_line,
            end_line,
            original_line_count: 0,
            removed_count: 0,
            inserted_count: 0,
            original_checksum: None,
            new_checksum: None,
            byte_shift: 0,
            message: None,
            error: Some(error),
        }
    }
}
