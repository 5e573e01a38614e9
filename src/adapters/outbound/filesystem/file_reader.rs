use crate::model_building::domain::AnalysisResult;
use crate::ports::outbound::{AnalysisResultReader, ModelDocumentReader};
use crate::shared::error::ModelError;
use crate::shared::security::read_checked_file;
use crate::shared::Result;
use std::path::Path;

/// Text formats an input file can be written in, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputSyntax {
    Json,
    Yaml,
}

impl InputSyntax {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                InputSyntax::Yaml
            }
            _ => InputSyntax::Json,
        }
    }
}

/// FileSystemReader adapter for reading input documents from the file system
///
/// This adapter implements both AnalysisResultReader and ModelDocumentReader
/// ports. Every read goes through the symlink, file type and size checks.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisResultReader for FileSystemReader {
    fn read_analysis_result(&self, path: &Path) -> Result<AnalysisResult> {
        let content = read_checked_file(path, "analysis result").map_err(|e| {
            ModelError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;

        let parsed: std::result::Result<AnalysisResult, String> = match InputSyntax::of(path) {
            InputSyntax::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
            InputSyntax::Yaml => serde_yaml_ng::from_str(&content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|details| {
            ModelError::AnalysisResultParseError {
                path: path.to_path_buf(),
                details,
            }
            .into()
        })
    }
}

impl ModelDocumentReader for FileSystemReader {
    fn read_document(&self, path: &Path) -> Result<String> {
        read_checked_file(path, "model document").map_err(|e| {
            ModelError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
