use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::registry::{EntryPoint, ENTRY_POINT_COUNT};

use super::observe::{distinct, observers};
use super::{Hook, Layer};

/// Counts the calls of every observed entry point.
pub struct Statistics {
    counts: Box<[AtomicUsize]>,
    entries: Option<Vec<EntryPoint>>,
}

impl Default for Statistics {
    fn default() -> Self {
        Statistics::new()
    }
}

impl Statistics {
    pub const NAME: &'static str = "statistics";

    /// Constructs a layer observing every entry point.
    pub fn new() -> Self {
        Statistics::build(None)
    }

    /// Constructs a layer observing `entries` only. Repeated entries are observed once.
    pub fn with_entries(entries: &[EntryPoint]) -> Self {
        Statistics::build(Some(distinct(entries)))
    }

    fn build(entries: Option<Vec<EntryPoint>>) -> Self {
        let counts: Vec<_> = (0..ENTRY_POINT_COUNT).map(|_| AtomicUsize::new(0)).collect();
        Statistics {
            counts: counts.into_boxed_slice(),
            entries,
        }
    }

    /// Returns the number of calls of `entry`.
    #[inline]
    pub fn count(&self, entry: EntryPoint) -> usize {
        self.counts[entry.index()].load(Ordering::Relaxed)
    }

    /// Returns the number of calls of all the entry points.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|v| v.load(Ordering::Relaxed)).sum()
    }

    pub fn reset(&self) {
        for v in self.counts.iter() {
            v.store(0, Ordering::Relaxed);
        }
    }

    /// Logs the counters of the entry points called at least once, most called
    /// first.
    pub fn report(&self) {
        let mut counts: Vec<_> = EntryPoint::ALL
            .iter()
            .map(|&v| (v, self.count(v)))
            .filter(|&(_, n)| n > 0)
            .collect();

        counts.sort_by(|lhs, rhs| rhs.1.cmp(&lhs.1));

        info!("{} calls.", self.total());
        for (entry, n) in counts {
            info!("{:>10} {}", n, entry);
        }
    }
}

impl Layer for Statistics {
    fn name(&self) -> &str {
        Statistics::NAME
    }

    fn hooks(&self) -> Vec<Hook> {
        observers(self.entries.as_ref().map(|v| &v[..]))
    }

    fn observe(&self, entry: EntryPoint) {
        self.counts[entry.index()].fetch_add(1, Ordering::Relaxed);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
