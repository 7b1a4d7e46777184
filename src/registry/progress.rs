/// A trait for reporting progress of long-running operations.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Discovering", "Fetching").
    fn set_phase(&self, phase: &str);

    /// Begin a determinate run of `total` items.
    fn begin_items(&self, total: u64);

    /// Mark one item as finished.
    fn item_done(&self);

    /// Finish and clear the progress indicator.
    fn done(&self);
}

/// A progress reporter that reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_phase(&self, _phase: &str) {}
    fn begin_items(&self, _total: u64) {}
    fn item_done(&self) {}
    fn done(&self) {}
}
