//! Layers and the chains built out of them.
//!
//! A `Layer` overrides zero or more entry points with _hooks_. A hook is a plain
//! function with the native arguments, prefixed by a `Dispatch` handle to the next
//! link of the chain:
//!
//! ```rust,ignore
//! unsafe fn clear(next: &Dispatch<'_>, mask: GLbitfield) {
//!     if let Some(layer) = next.layer_as::<Tracer>() {
//!         layer.clears.fetch_add(1, Ordering::Relaxed);
//!     }
//!
//!     next.glClear(mask)
//! }
//!
//! impl Layer for Tracer {
//!     fn name(&self) -> &str { "tracer" }
//!     fn hooks(&self) -> Vec<Hook> { vec![Hook::glClear(clear)] }
//!     fn as_any(&self) -> &dyn Any { self }
//! }
//! ```
//!
//! Calling through `next` reaches the next inner layer overriding the same entry
//! point, or the driver. Not calling it swallows the call.

pub mod chain;
pub mod dispatch;
pub mod logger;
pub mod observe;
pub mod stats;

pub use self::chain::Chain;
pub use self::dispatch::Dispatch;
pub use self::logger::Log;
pub use self::stats::Statistics;

use std::any::Any;
use std::os::raw::c_void;

use crate::registry::EntryPoint;
use crate::table::Proc;

/// An interceptor stacked in front of the driver.
pub trait Layer: Any + Send + Sync {
    /// The name of this layer, unique within a context.
    fn name(&self) -> &str;

    /// The entry points this layer overrides, with their hooks.
    fn hooks(&self) -> Vec<Hook>;

    /// Notified by observer hooks (`Hook::observer`) before the call continues.
    fn observe(&self, _entry: EntryPoint) {}

    fn as_any(&self) -> &dyn Any;
}

/// The override of one entry point by a layer.
///
/// Typed constructors are generated for every entry point, e.g. `Hook::glClear`,
/// so the hook signature is checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hook {
    entry: EntryPoint,
    proc: Option<Proc>,
}

impl Hook {
    #[inline]
    pub(crate) fn new(entry: EntryPoint, ptr: *const c_void) -> Hook {
        Hook {
            entry,
            proc: Proc::new(ptr),
        }
    }

    /// Constructs a hook from a raw address, e.g. a function exported by a layer
    /// living in another module. A null `ptr` is rejected when the chain is built.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point at a function with the `registry::hook`
    /// signature of `entry`.
    pub unsafe fn from_raw(entry: EntryPoint, ptr: *const c_void) -> Hook {
        Hook::new(entry, ptr)
    }

    #[inline]
    pub fn entry(&self) -> EntryPoint {
        self.entry
    }

    #[inline]
    pub fn proc(&self) -> Option<Proc> {
        self.proc
    }
}
