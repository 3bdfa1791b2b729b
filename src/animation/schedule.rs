use std::collections::BTreeMap;

/// Identifier for a pending frame request or timeout.
///
/// Handles are never reused within a schedule, so a cancelled handle can't alias a newer one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackHandle(u64);

/// What a pending handle is waiting for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Callback {
    /// Next display refresh.
    Frame,
    /// Wall-clock deadline.
    Timeout {
        /// Absolute due time in ms.
        due_ms: f64,
    },
}

/// Every frame request and timeout a canvas has outstanding.
///
/// Callbacks are only ever dispatched out of this collection; clearing it is how pause, seek,
/// cancel and unmount guarantee nothing stale runs against a replaced container.
#[derive(Debug, Default)]
pub struct CallbackSchedule {
    next_id: u64,
    pending: BTreeMap<CallbackHandle, Callback>,
}

impl CallbackSchedule {
    /// Empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, cb: Callback) -> CallbackHandle {
        self.next_id += 1;
        let h = CallbackHandle(self.next_id);
        self.pending.insert(h, cb);
        h
    }

    /// Ask for a callback on the next display refresh.
    pub fn request_frame(&mut self) -> CallbackHandle {
        self.insert(Callback::Frame)
    }

    /// Ask for a callback `delay_ms` after `now_ms`. Negative delays fire on the next pass.
    pub fn set_timeout(&mut self, now_ms: f64, delay_ms: f64) -> CallbackHandle {
        self.insert(Callback::Timeout {
            due_ms: now_ms + delay_ms.max(0.0),
        })
    }

    /// Cancel one handle. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: CallbackHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Cancel everything; returns how many callbacks were dropped.
    pub fn clear(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Number of outstanding callbacks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Return `true` when nothing is outstanding.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Return `true` while `handle` is still outstanding.
    pub fn is_pending(&self, handle: CallbackHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// Remove and return all frame requests, oldest first.
    pub fn take_frames(&mut self) -> Vec<CallbackHandle> {
        self.take_where(|cb| matches!(cb, Callback::Frame))
    }

    /// Remove and return all timeouts due at or before `now_ms`, oldest first.
    pub fn take_due_timeouts(&mut self, now_ms: f64) -> Vec<CallbackHandle> {
        self.take_where(|cb| matches!(cb, Callback::Timeout { due_ms } if *due_ms <= now_ms))
    }

    /// Earliest outstanding timeout deadline.
    pub fn next_due_ms(&self) -> Option<f64> {
        self.pending
            .values()
            .filter_map(|cb| match cb {
                Callback::Timeout { due_ms } => Some(*due_ms),
                Callback::Frame => None,
            })
            .min_by(f64::total_cmp)
    }

    /// Return `true` while a frame request is outstanding.
    pub fn has_frame_request(&self) -> bool {
        self.pending.values().any(|cb| matches!(cb, Callback::Frame))
    }

    fn take_where(&mut self, pred: impl Fn(&Callback) -> bool) -> Vec<CallbackHandle> {
        let taken: Vec<CallbackHandle> = self
            .pending
            .iter()
            .filter(|(_, cb)| pred(cb))
            .map(|(h, _)| *h)
            .collect();
        for h in &taken {
            self.pending.remove(h);
        }
        taken
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/schedule.rs"]
mod tests;
