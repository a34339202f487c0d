use std::sync::Arc;

use crate::errors::*;
use crate::registry::{EntryPoint, ENTRY_POINT_COUNT};
use crate::table::{Binding, DispatchTable, GlobalTable, Proc};

use super::{Dispatch, Layer};

struct Stage {
    layer: Arc<dyn Layer>,
    // The bindings captured right before this layer was installed, which is
    // where its hooks continue.
    next: DispatchTable,
}

/// The resolved layer chain of a context.
///
/// Once built, a chain is immutable and could be shared by every thread the
/// context is current on. Changing the layers produces a new chain.
pub struct Chain {
    global: Arc<GlobalTable>,
    base: DispatchTable,
    front: DispatchTable,
    // Innermost first.
    stages: Vec<Stage>,
}

impl Chain {
    /// Constructs a chain without layers, every slot dispatches straight into the
    /// driver bindings of `global`.
    pub fn direct(global: Arc<GlobalTable>) -> Chain {
        let base = DispatchTable::driver();
        Chain {
            global,
            front: base.clone(),
            base,
            stages: Vec::new(),
        }
    }

    /// Builds the chain of `layers`, which are ordered from the outermost to the
    /// innermost one.
    ///
    /// Starting from the driver bindings, layers are installed innermost first. For
    /// every hook of a layer the current binding of that slot is captured as the
    /// hook's next link, then the slot is pointed at the hook. Afterwards every slot
    /// points at the outermost layer overriding it.
    pub fn build(global: Arc<GlobalTable>, layers: &[Arc<dyn Layer>]) -> Result<Chain> {
        for (i, v) in layers.iter().enumerate() {
            if layers[..i].iter().any(|w| w.name() == v.name()) {
                return Err(Error::DuplicateLayer(v.name().to_owned()));
            }
        }

        let mut chain = Chain::direct(global);
        let mut hooked = vec![false; ENTRY_POINT_COUNT];

        for (stage, layer) in layers.iter().rev().enumerate() {
            let next = chain.front.clone();

            for v in &mut hooked {
                *v = false;
            }

            for hook in layer.hooks() {
                let entry = hook.entry();
                let proc = hook
                    .proc()
                    .ok_or_else(|| Error::NullHook(layer.name().to_owned(), entry.name()))?;

                if hooked[entry.index()] {
                    return Err(Error::DuplicateHook(layer.name().to_owned(), entry.name()));
                }

                hooked[entry.index()] = true;
                chain.front.set(
                    entry,
                    Binding::Hook {
                        proc,
                        stage: stage as u32,
                    },
                );
            }

            chain.stages.push(Stage {
                layer: layer.clone(),
                next,
            });
        }

        Ok(chain)
    }

    /// Returns the dispatch of the outermost link, where application calls enter.
    #[inline]
    pub fn front(&self) -> Dispatch {
        Dispatch::new(self, &self.front, None)
    }

    /// Returns a dispatch bypassing every layer.
    #[inline]
    pub fn driver(&self) -> Dispatch {
        Dispatch::new(self, &self.base, None)
    }

    /// Returns the dispatch a hook of the layer at `stage` continues with.
    #[inline]
    pub(crate) fn stage(&self, stage: u32) -> Dispatch {
        let v = &self.stages[stage as usize];
        Dispatch::new(self, &v.next, Some(&*v.layer))
    }

    /// Returns the bindings of the outermost link.
    #[inline]
    pub fn table(&self) -> &DispatchTable {
        &self.front
    }

    /// Returns the bindings the hooks of the layer at `stage` continue with. Stages
    /// are counted from the innermost layer.
    pub fn next_table(&self, stage: usize) -> Option<&DispatchTable> {
        self.stages.get(stage).map(|v| &v.next)
    }

    /// Returns the layer at `stage`, counted from the innermost layer.
    pub fn layer(&self, stage: usize) -> Option<&Arc<dyn Layer>> {
        self.stages.get(stage).map(|v| &v.layer)
    }

    /// Returns the names of the layers, outermost first.
    pub fn layers(&self) -> Vec<&str> {
        self.stages.iter().rev().map(|v| v.layer.name()).collect()
    }

    #[inline]
    pub fn global(&self) -> &Arc<GlobalTable> {
        &self.global
    }

    /// Returns the function `binding` calls for `entry`. Driver bindings are
    /// resolved on first use.
    #[inline]
    pub fn resolve(&self, entry: EntryPoint, binding: Binding) -> Proc {
        match binding {
            Binding::Missing => entry.stub(),
            Binding::Driver => self.global.resolve(entry),
            Binding::Hook { proc, .. } => proc,
        }
    }
}
