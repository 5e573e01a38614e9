use crate::shared::Result;
use std::path::Path;

/// ModelDocumentReader port for loading a previously written model document
pub trait ModelDocumentReader {
    /// Reads the raw document text
    ///
    /// # Errors
    /// Returns an error if the file cannot be read safely
    fn read_document(&self, path: &Path) -> Result<String>;
}
