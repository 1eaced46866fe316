//! Cancelable deferred tasks.
//!
//! A widget hands the scheduler a task value and keeps the returned
//! [`TaskHandle`]. When the task comes due the host passes the value back to
//! the widget that scheduled it, so no closures over widget state are needed.

use std::time::Duration;

use tracing::trace;

/// Default spacing of animation frames in a [`ManualScheduler`].
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Deferred execution provided by the host.
pub trait Scheduler<T> {
    /// Run `task` before the next repaint.
    fn request_animation_frame(&mut self, task: T) -> TaskHandle;

    /// Run `task` once `delay` has elapsed. A zero delay defers to the next turn.
    fn set_timeout(&mut self, delay: Duration, task: T) -> TaskHandle;

    /// Cancel a pending task. Returns `false` if it already ran or was canceled.
    fn cancel(&mut self, handle: TaskHandle) -> bool;
}

#[derive(Debug)]
struct Pending<T> {
    handle: TaskHandle,
    due: Duration,
    task: T,
}

/// Virtual-time scheduler.
///
/// Time only moves when the owner calls [`ManualScheduler::pop_due`] or
/// [`ManualScheduler::advance_to`]. Frames come due on the next multiple of the
/// frame interval; timeouts at `now + delay`. Tasks with the same due time run
/// in scheduling order.
#[derive(Debug)]
pub struct ManualScheduler<T> {
    now: Duration,
    frame_interval: Duration,
    next_handle: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for ManualScheduler<T> {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl<T> ManualScheduler<T> {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            frame_interval,
            next_handle: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|entry| entry.handle == handle)
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|entry| entry.due).min()
    }

    /// Remove and return the earliest task due at or before `deadline`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(TaskHandle, T)> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= deadline)
            .min_by_key(|(_, entry)| (entry.due, entry.handle))
            .map(|(index, _)| index)?;

        let entry = self.pending.remove(position);
        self.now = self.now.max(entry.due);
        Some((entry.handle, entry.task))
    }

    /// Move the clock forward without running anything.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    fn next_frame(&self) -> Duration {
        let interval = self.frame_interval.as_nanos();
        if interval == 0 {
            return self.now;
        }
        let nanos = (self.now.as_nanos() / interval + 1) * interval;
        let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
        // Remainder of a division by 1e9 always fits.
        Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
    }

    fn push(&mut self, due: Duration, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Pending { handle, due, task });
        handle
    }
}

impl<T> Scheduler<T> for ManualScheduler<T> {
    fn request_animation_frame(&mut self, task: T) -> TaskHandle {
        let due = self.next_frame();
        let handle = self.push(due, task);
        trace!(?handle, ?due, "animation frame requested");
        handle
    }

    fn set_timeout(&mut self, delay: Duration, task: T) -> TaskHandle {
        let due = self.now.saturating_add(delay);
        let handle = self.push(due, task);
        trace!(?handle, ?due, "timeout scheduled");
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.handle != handle);
        before != self.pending.len()
    }
}
