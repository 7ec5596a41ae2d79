//! Generic state machine behind every dynamic parameter

use parking_lot::{ReentrantMutex, RwLock};
use std::fmt;

/// Callback fired with the resolved value after each applied update
pub type UpdateFn<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Whether a cell holds an applied value or falls back to its default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Unset,
    Set,
}

/// A concurrently readable value with a default and an update callback.
///
/// Writers are serialized, so callbacks observe values in the order they
/// were applied. The value lock is released before the callback runs:
/// readers never wait for a callback, and a callback may read the cell.
pub struct Cell<T> {
    default: T,
    value: RwLock<Option<T>>,
    apply: ReentrantMutex<()>,
    on_update: Option<UpdateFn<T>>,
}

impl<T: Clone + Send + Sync + 'static> Cell<T> {
    #[must_use]
    pub fn new(default: T) -> Self {
        Self {
            default,
            value: RwLock::new(None),
            apply: ReentrantMutex::new(()),
            on_update: None,
        }
    }

    /// Attach the update callback
    #[must_use]
    pub fn on_update(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Current value, or the default in the `Unset` state
    pub fn get(&self) -> T {
        self.value
            .read()
            .clone()
            .unwrap_or_else(|| self.default.clone())
    }

    /// Read the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.value.read();
        f(guard.as_ref().unwrap_or(&self.default))
    }

    pub fn default_ref(&self) -> &T {
        &self.default
    }

    pub fn state(&self) -> CellState {
        if self.value.read().is_some() {
            CellState::Set
        } else {
            CellState::Unset
        }
    }

    /// Apply a parsed value; `None` reverts to the default.
    ///
    /// Fires the callback exactly once with the resolved value.
    pub fn store(&self, next: Option<T>) {
        let _apply = self.apply.lock();
        let resolved = next.clone().unwrap_or_else(|| self.default.clone());
        *self.value.write() = next;

        if let Some(on_update) = &self.on_update {
            on_update(&resolved);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("default", &self.default)
            .field("value", &*self.value.read())
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_fresh_cell_returns_default() {
        let cell = Cell::new(42u32);
        assert_eq!(cell.get(), 42);
        assert_eq!(cell.state(), CellState::Unset);
    }

    #[test]
    fn test_store_and_revert() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let cell = Cell::new(1u32).on_update(move |v| sink.lock().push(*v));

        cell.store(Some(5));
        assert_eq!(cell.get(), 5);
        assert_eq!(cell.state(), CellState::Set);

        cell.store(None);
        assert_eq!(cell.get(), 1);
        assert_eq!(cell.state(), CellState::Unset);

        assert_eq!(*seen.lock(), vec![5, 1]);
    }

    #[test]
    fn test_callback_can_read_the_cell() {
        let slot: Arc<Mutex<Option<Arc<Cell<String>>>>> = Arc::new(Mutex::new(None));
        let observed = Arc::new(Mutex::new(None));

        let slot_in_cb = Arc::clone(&slot);
        let observed_in_cb = Arc::clone(&observed);
        let cell = Arc::new(Cell::new(String::from("a")).on_update(move |_| {
            if let Some(cell) = slot_in_cb.lock().as_ref() {
                *observed_in_cb.lock() = Some(cell.get());
            }
        }));
        *slot.lock() = Some(Arc::clone(&cell));

        cell.store(Some("b".to_string()));
        assert_eq!(observed.lock().as_deref(), Some("b"));

        slot.lock().take();
    }
}
