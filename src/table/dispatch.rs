use std::fmt;

use crate::registry::{EntryPoint, ENTRY_POINT_COUNT};

use super::Proc;

/// What a dispatch slot points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// The not-implemented stub of the entry point.
    Missing,
    /// The driver binding held by the `GlobalTable`, resolved on first call.
    Driver,
    /// A layer hook. `stage` is the position of the owning layer in its chain,
    /// counted from the innermost layer.
    Hook { proc: Proc, stage: u32 },
}

/// One dense array of bindings, one slot per `EntryPoint`.
///
/// A table made with `new` has every slot bound to `Binding::Missing`, so calling
/// through a slot nobody bound reports an error instead of jumping to nowhere.
#[derive(Clone, PartialEq, Eq)]
pub struct DispatchTable {
    slots: Box<[Binding]>,
}

impl Default for DispatchTable {
    fn default() -> Self {
        DispatchTable::new()
    }
}

impl DispatchTable {
    /// Constructs a table with every slot bound to the not-implemented stubs.
    pub fn new() -> Self {
        DispatchTable::filled(Binding::Missing)
    }

    /// Constructs a table with every slot forwarding into the driver.
    pub fn driver() -> Self {
        DispatchTable::filled(Binding::Driver)
    }

    fn filled(binding: Binding) -> Self {
        DispatchTable {
            slots: vec![binding; ENTRY_POINT_COUNT].into_boxed_slice(),
        }
    }

    /// Returns the binding of `entry`.
    #[inline]
    pub fn get(&self, entry: EntryPoint) -> Binding {
        self.slots[entry.index()]
    }

    /// Returns the binding at slot `index`, or `Binding::Missing` for an index out
    /// of range.
    #[inline]
    pub fn get_index(&self, index: usize) -> Binding {
        self.slots.get(index).cloned().unwrap_or(Binding::Missing)
    }

    /// Overwrites the binding of `entry`.
    #[inline]
    pub(crate) fn set(&mut self, entry: EntryPoint, binding: Binding) {
        self.slots[entry.index()] = binding;
    }

    /// Returns the number of slots, always `ENTRY_POINT_COUNT`.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns an iterator over the slots in entry-point order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (EntryPoint, Binding)> + 'a {
        EntryPoint::ALL.iter().map(move |&v| (v, self.get(v)))
    }

    /// Returns the entry points whose bindings differ between `self` and `other`.
    pub fn diff(&self, other: &DispatchTable) -> Vec<EntryPoint> {
        EntryPoint::ALL
            .iter()
            .cloned()
            .filter(|&v| self.get(v) != other.get(v))
            .collect()
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hooks = self
            .slots
            .iter()
            .filter(|v| match v {
                Binding::Hook { .. } => true,
                _ => false,
            })
            .count();

        f.debug_struct("DispatchTable")
            .field("slots", &self.slots.len())
            .field("hooks", &hooks)
            .finish()
    }
}
