//! Ordered delivery of values to the setter of one field

use parking_lot::Mutex;

/// What happened to a value handed to [`ApplySlot::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The value, and anything queued behind it, went through the setter
    Applied,
    /// Another call is running the setter and will apply the value next
    Queued,
    /// A newer generation was already applied or queued
    Stale,
}

#[derive(Debug, Default)]
struct SlotState {
    applied: u64,
    pending: Option<(u64, Option<String>)>,
    draining: bool,
}

/// Serializes the setter calls of one field without holding a lock while
/// they run.
///
/// Every value carries the generation of the store it was planned from.
/// Older generations are dropped. When a setter is already running, on this
/// thread or another one, the value is queued for that call instead of
/// waiting for it, so a callback may trigger updates of any parameter.
#[derive(Debug, Default)]
pub struct ApplySlot {
    state: Mutex<SlotState>,
}

impl ApplySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the last value passed to a setter, 0 when none was
    pub fn applied(&self) -> u64 {
        self.state.lock().applied
    }

    pub fn apply(
        &self,
        generation: u64,
        value: Option<String>,
        mut set: impl FnMut(Option<&str>),
    ) -> ApplyOutcome {
        {
            let mut state = self.state.lock();
            let newest = state
                .pending
                .as_ref()
                .map_or(state.applied, |(queued, _)| *queued);
            if generation <= newest {
                return ApplyOutcome::Stale;
            }
            state.pending = Some((generation, value));
            if state.draining {
                return ApplyOutcome::Queued;
            }
            state.draining = true;
        }

        let _draining = Draining(&self.state);
        loop {
            let next = {
                let mut state = self.state.lock();
                match state.pending.take() {
                    Some((generation, value)) => {
                        state.applied = generation;
                        value
                    }
                    None => {
                        state.draining = false;
                        return ApplyOutcome::Applied;
                    }
                }
            };
            set(next.as_deref());
        }
    }
}

/// Releases the slot when a setter unwinds
struct Draining<'a>(&'a Mutex<SlotState>);

impl Drop for Draining<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.lock().draining = false;
        }
    }
}
