use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

/// Runs deferred checks on behalf of the widget.
///
/// When a scheduled task is due the host calls back
/// [`AddressInput::deferred_check_due`](crate::widget::AddressInput::deferred_check_due)
/// with the returned id.
pub trait Scheduler {
    fn schedule(&self, delay: Duration) -> TaskId;
    fn cancel(&self, task: TaskId);
}
