/// ProgressReporter port for user-facing progress during a model build
///
/// Progress output is meant for the person running the tool and is kept apart
/// from diagnostic logging.
pub trait ProgressReporter {
    /// Reports a phase or status message
    fn report(&self, message: &str);

    /// Reports how far an item-by-item phase has come
    ///
    /// # Arguments
    /// * `current` - Number of items processed so far
    /// * `total` - Total number of items in the phase
    /// * `message` - Optional label for the item just processed
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a condition that does not stop the build
    fn report_warning(&self, message: &str);

    /// Reports completion of the whole operation
    fn report_completion(&self, message: &str);
}
