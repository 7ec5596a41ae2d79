//! Per-source value slots

use crate::merge::{desired_value, merge};
use hotparam_core::ParamValues;

/// One [`ParamValues`] slot per registered source, indexed by priority
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    slots: Vec<ParamValues>,
    generation: u64,
}

impl ValueStore {
    pub fn new(sources: usize) -> Self {
        Self {
            slots: vec![ParamValues::new(); sources],
            generation: 0,
        }
    }

    /// Replace everything the source at `index` reported before
    ///
    /// # Panics
    ///
    /// When `index` does not belong to a registered source.
    pub fn store(&mut self, index: usize, values: ParamValues) {
        self.slots[index] = values;
        self.generation += 1;
    }

    /// Number of stores so far; identifies the values a refresh plans from
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn slot(&self, index: usize) -> Option<&ParamValues> {
        self.slots.get(index)
    }

    /// Merged view of every slot
    pub fn merged(&self) -> ParamValues {
        merge(&self.slots)
    }

    /// Value the highest priority source supplies for one parameter
    pub fn desired(&self, set_name: &str, param_name: &str) -> Option<&str> {
        desired_value(&self.slots, set_name, param_name)
    }

    /// Value supplied by a source with higher priority than `index`
    pub fn peek_before(&self, index: usize, set_name: &str, param_name: &str) -> Option<&str> {
        let end = index.min(self.slots.len());
        desired_value(&self.slots[..end], set_name, param_name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
