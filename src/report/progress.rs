/// Receives fire-and-forget progress milestones during a report run.
pub trait ProgressSink {
    fn notify(&self, percent: u8, message: &str);
}

/// Logs each milestone through `tracing`.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn notify(&self, percent: u8, message: &str) {
        tracing::info!(percent, "{message}");
    }
}

impl<F> ProgressSink for F
where
    F: Fn(u8, &str),
{
    fn notify(&self, percent: u8, message: &str) {
        self(percent, message)
    }
}
