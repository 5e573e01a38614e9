use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the encoded model document is presented.
pub trait OutputPresenter {
    /// Presents the encoded model document to the output destination
    ///
    /// # Arguments
    /// * `content` - The document text to present
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    fn present(&self, content: &str) -> Result<()>;
}
