//! Memoization of decoded ground truth.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, PoisonError},
};

use burn::tensor::TensorData;

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<usize, TensorData>,
    order: VecDeque<usize>,
}

/// Device-independent image cache keyed by dataset index.
///
/// The first value stored for a key is kept; later inserts for the same key are
/// ignored. With a capacity, the oldest key is evicted first.
#[derive(Debug, Default)]
pub struct GroundTruthCache {
    capacity: Option<usize>,
    state: Mutex<CacheState>,
}

impl GroundTruthCache {
    /// Creates a cache holding at most `capacity` images, or unbounded if `None`.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            state: Mutex::default(),
        }
    }

    pub fn get(&self, index: usize) -> Option<TensorData> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries.get(&index).cloned()
    }

    /// Stores `data` under `index` unless a value is already present.
    pub fn insert(&self, index: usize, data: TensorData) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.entries.contains_key(&index) {
            return;
        }

        if let Some(capacity) = self.capacity {
            while state.entries.len() >= capacity {
                let Some(oldest) = state.order.pop_front() else {
                    break;
                };
                state.entries.remove(&oldest);
            }
        }

        state.entries.insert(index, data);
        state.order.push_back(index);
    }

    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
