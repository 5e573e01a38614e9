use crate::model_building::domain::EvaluatedModel;
use crate::ports::outbound::{ModelCodec, ModelDocumentReader, ProgressReporter};
use crate::shared::Result;
use anyhow::Context;
use std::path::Path;

/// DecodeModelUseCase - Loads a serialized model document back into memory
pub struct DecodeModelUseCase<R, PR> {
    reader: R,
    progress_reporter: PR,
}

impl<R, PR> DecodeModelUseCase<R, PR>
where
    R: ModelDocumentReader,
    PR: ProgressReporter,
{
    pub fn new(reader: R, progress_reporter: PR) -> Self {
        Self {
            reader,
            progress_reporter,
        }
    }

    /// Reads and decodes the document at `path` with `codec`
    ///
    /// # Errors
    /// Fails if the file cannot be read or the document is malformed
    pub fn execute(&self, path: &Path, codec: &dyn ModelCodec) -> Result<EvaluatedModel> {
        self.progress_reporter
            .report(&format!("📖 Loading model document from: {}", path.display()));

        let content = self.reader.read_document(path)?;
        let model = codec
            .decode(&content)
            .with_context(|| format!("Failed to decode model document: {}", path.display()))?;

        self.progress_reporter.report_completion(&format!(
            "✅ Decoded {} package(s), {} issue(s) and {} rule violation(s)",
            model.packages.len(),
            model.issues.len(),
            model.rule_violations.len()
        ));
        Ok(model)
    }
}
