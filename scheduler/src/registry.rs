//! Per-pair baseline store.
//!
//! One entry per configured pair, created eagerly with no sample. Every
//! successful, valid fetch overwrites the entry so it becomes the next
//! tick's baseline, whether or not an alert fired.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use market::{Pair, PriceSample};

#[derive(Debug, Default)]
pub struct PairRegistry {
    inner: RwLock<HashMap<Pair, Option<PriceSample>>>,
}

impl PairRegistry {
    pub fn new(pairs: impl IntoIterator<Item = Pair>) -> Self {
        let inner = pairs.into_iter().map(|p| (p, None)).collect();
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Latest sample for `pair`, or `None` before its first observation.
    pub fn get(&self, pair: &Pair) -> Option<PriceSample> {
        self.inner.read().get(pair).cloned().flatten()
    }

    /// Overwrites the baseline. Unknown pairs are registered on first write.
    pub fn update(&self, pair: &Pair, sample: PriceSample) {
        self.replace(pair, sample);
    }

    /// Stores `sample` and returns the baseline it superseded, under a single
    /// write lock so overlapping ticks cannot interleave between read and write.
    pub fn replace(&self, pair: &Pair, sample: PriceSample) -> Option<PriceSample> {
        let mut guard = self.inner.write();
        match guard.get_mut(pair) {
            Some(slot) => slot.replace(sample),
            None => {
                debug!(pair = %pair, "registering pair on first sample");
                guard.insert(pair.clone(), Some(sample));
                None
            }
        }
    }

    pub fn contains(&self, pair: &Pair) -> bool {
        self.inner.read().contains_key(pair)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Copy of every entry, ordered by pair.
    pub fn snapshot(&self) -> Vec<(Pair, Option<PriceSample>)> {
        let mut out: Vec<_> = self
            .inner
            .read()
            .iter()
            .map(|(p, s)| (p.clone(), s.clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}
