/// How a bounded command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exited on its own. The exit code is informational only.
    Exited { code: Option<i32> },
    /// Exceeded its timeout and was killed.
    TimedOut,
}
