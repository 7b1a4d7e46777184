use crate::registry::Progress;
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;
use std::time::Instant;

const TEMPLATE: &str = "{prefix:>12} [{bar:25}] {pos}/{len} {msg}";
const SPINNER_TEMPLATE: &str = "{prefix:>12} {spinner} {msg}";

/// A progress bar that delays showing itself until a threshold is reached,
/// so short runs stay silent.
#[derive(Debug)]
pub struct ProgressReporter {
    bar: ProgressBar,
    visible_after: Instant,
    visible: Mutex<bool>,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    ///
    /// The progress bar only becomes visible if the run continues beyond the
    /// delay threshold.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .expect("could not create progress bar style"),
        );

        Self {
            bar,
            visible_after: Instant::now() + delay,
            visible: Mutex::new(false),
        }
    }

    fn reveal_if_due(&self) {
        let mut visible = self.visible.lock().expect("lock poisoned");
        if !*visible && Instant::now() >= self.visible_after {
            *visible = true;
            self.bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }
    }
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
        self.reveal_if_due();
    }

    fn begin_items(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template(TEMPLATE)
                .expect("could not create progress bar style")
                .progress_chars("=> "),
        );
    }

    fn item_done(&self) {
        self.bar.inc(1);
        self.reveal_if_due();
    }

    fn done(&self) {
        if *self.visible.lock().expect("lock poisoned") {
            self.bar.finish_and_clear();
        }
    }
}
