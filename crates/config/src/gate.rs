//! One-shot startup latch for asynchronous updates

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// The configuration is still loading
    Pending,
    /// Loading succeeded; updates flow
    Open,
    /// Loading failed; updates are discarded
    Abandoned,
}

/// Holds back updates that race the initial load.
///
/// Moves out of `Pending` exactly once.
#[derive(Debug)]
pub struct StartupGate {
    state: Mutex<GateState>,
    changed: Condvar,
}

impl StartupGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState::Pending),
            changed: Condvar::new(),
        }
    }

    pub fn open(&self) {
        self.resolve(GateState::Open);
    }

    pub fn abandon(&self) {
        self.resolve(GateState::Abandoned);
    }

    pub fn state(&self) -> GateState {
        *self.state.lock()
    }

    /// Block until the gate leaves `Pending`; `true` when it opened
    pub fn wait(&self) -> bool {
        let mut state = self.state.lock();
        while *state == GateState::Pending {
            self.changed.wait(&mut state);
        }
        *state == GateState::Open
    }

    fn resolve(&self, next: GateState) {
        let mut state = self.state.lock();
        if *state == GateState::Pending {
            *state = next;
            self.changed.notify_all();
        }
    }
}

impl Default for StartupGate {
    fn default() -> Self {
        Self::new()
    }
}
