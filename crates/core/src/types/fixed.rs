//! Write-once cell for static parameters

use super::basic::BasicType;
use crate::errors::ParamError;
use once_cell::sync::OnceCell;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A static parameter.
///
/// Reads like a plain field through `Deref`. The value is written at most
/// once, while the configuration is loaded; until then (or when no source
/// supplied a value) the default is returned. Clones share the same slot.
pub struct Fixed<T> {
    inner: Arc<FixedInner<T>>,
}

struct FixedInner<T> {
    default: T,
    slot: OnceCell<T>,
}

impl<T: BasicType> Fixed<T> {
    #[must_use]
    pub fn new(default: T) -> Self {
        Self {
            inner: Arc::new(FixedInner {
                default,
                slot: OnceCell::new(),
            }),
        }
    }

    /// Current value, or the default when nothing was written
    pub fn get(&self) -> &T {
        self.inner.slot.get().unwrap_or(&self.inner.default)
    }

    pub fn default_value(&self) -> &T {
        &self.inner.default
    }

    /// Whether a source supplied a value
    pub fn is_set(&self) -> bool {
        self.inner.slot.get().is_some()
    }

    /// Parse `raw` and store it
    ///
    /// # Errors
    ///
    /// Returns the parse error, or [`ParamError::AlreadySet`] on a second write.
    pub fn set_param(&self, raw: &str) -> Result<(), ParamError> {
        let value = T::parse_param(raw)?;
        self.inner
            .slot
            .set(value)
            .map_err(|_| ParamError::AlreadySet)
    }
}

impl<T> Clone for Fixed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: BasicType + Default> Default for Fixed<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: BasicType> Deref for Fixed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: BasicType + fmt::Debug> fmt::Debug for Fixed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fixed")
            .field("value", self.get())
            .field("set", &self.is_set())
            .finish()
    }
}

impl<T: BasicType + fmt::Display> fmt::Display for Fixed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.get().fmt(f)
    }
}
