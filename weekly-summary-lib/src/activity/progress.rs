/// Receives progress updates while repositories are being processed.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Enumerating", "Collecting").
    fn set_phase(&self, phase: &str);

    /// Report that item `position` of `total` is now being worked on.
    fn set_position(&self, position: u64, total: u64, message: &str);

    /// Finish and clear the progress indicator.
    fn done(&self);
}

/// A progress sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_phase(&self, _phase: &str) {}

    fn set_position(&self, _position: u64, _total: u64, _message: &str) {}

    fn done(&self) {}
}
