use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

const BAR_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting build progress to stderr
///
/// Progress goes to stderr so it never mixes with a model document written to
/// stdout. A progress bar is created per item-by-item phase and cleared when
/// the phase is done or a new one starts.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn bar_for(&self, total: usize) -> ProgressBar {
        let mut current = self.progress_bar.borrow_mut();
        match current.as_ref() {
            Some(bar) if bar.length() == Some(total as u64) => bar.clone(),
            _ => {
                if let Some(previous) = current.take() {
                    previous.finish_and_clear();
                }
                let style = ProgressStyle::default_bar()
                    .template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-");
                let bar = ProgressBar::new(total as u64).with_style(style);
                *current = Some(bar.clone());
                bar
            }
        }
    }

    fn clear_bar(&self) {
        if let Some(bar) = self.progress_bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.clear_bar();
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let bar = self.bar_for(total);
        bar.set_position(current as u64);
        if let Some(msg) = message {
            bar.set_message(msg.to_string());
        }
        if current >= total {
            self.clear_bar();
        }
    }

    fn report_warning(&self, message: &str) {
        match self.progress_bar.borrow().as_ref() {
            Some(bar) => bar.println(format!("⚠️  {}", message)),
            None => eprintln!("⚠️  {}", message),
        }
    }

    fn report_completion(&self, message: &str) {
        self.clear_bar();
        eprintln!();
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_phases() {
        let reporter = StderrProgressReporter::new();
        reporter.report("📦 Registering packages");
        reporter.report_progress(1, 3, Some("NPM::a:1.0"));
        assert!(reporter.progress_bar.borrow().is_some());
        reporter.report_warning("skipped dependency");
        reporter.report_progress(3, 3, None);
        assert!(reporter.progress_bar.borrow().is_none());
        reporter.report_completion("done");
    }

    #[test]
    fn test_new_phase_replaces_bar() {
        let reporter = StderrProgressReporter::default();
        reporter.report_progress(1, 5, None);
        reporter.report_progress(1, 2, None);
        let length = reporter.progress_bar.borrow().as_ref().and_then(|bar| bar.length());
        assert_eq!(length, Some(2));
    }
}
