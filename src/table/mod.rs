//! Dispatch tables, the arrays of function pointers keyed by `EntryPoint`.
//!
//! Two flavors share the slot layout. The `GlobalTable` is process-wide and owns the
//! driver bindings, resolved lazily from the platform exactly once per entry point.
//! A `DispatchTable` describes what every slot of one link of a context's layer
//! chain points at.

pub mod dispatch;
pub mod global;
pub mod proc;

pub use self::dispatch::{Binding, DispatchTable};
pub use self::global::{GlobalTable, SymbolResolver};
pub use self::proc::Proc;
