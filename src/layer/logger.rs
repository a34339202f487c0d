use std::any::Any;

use crate::registry::EntryPoint;

use super::observe::{distinct, observers};
use super::{Hook, Layer};

/// Logs the name of every observed call.
pub struct Log {
    level: ::log::Level,
    entries: Option<Vec<EntryPoint>>,
}

impl Default for Log {
    fn default() -> Self {
        Log::new(::log::Level::Trace)
    }
}

impl Log {
    pub const NAME: &'static str = "log";

    /// Constructs a layer logging every call at `level`.
    pub fn new(level: ::log::Level) -> Self {
        Log {
            level,
            entries: None,
        }
    }

    /// Constructs a layer logging the calls of `entries` only. Repeated entries are
    /// logged once.
    pub fn with_entries(level: ::log::Level, entries: &[EntryPoint]) -> Self {
        Log {
            level,
            entries: Some(distinct(entries)),
        }
    }

    #[inline]
    pub fn level(&self) -> ::log::Level {
        self.level
    }
}

impl Layer for Log {
    fn name(&self) -> &str {
        Log::NAME
    }

    fn hooks(&self) -> Vec<Hook> {
        observers(self.entries.as_ref().map(|v| &v[..]))
    }

    fn observe(&self, entry: EntryPoint) {
        log!(self.level, "{}", entry);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
