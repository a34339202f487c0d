//! Rendering contexts, their layer configuration and the thread binding.

pub mod binding;
pub mod info;

pub use self::binding::{current, current_chain, make_current};
pub use self::info::{ContextInfo, Limits, Profile, Version};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::thread::ThreadId;

use smallvec::SmallVec;

use crate::errors::*;
use crate::layer::{Chain, Layer};
use crate::table::GlobalTable;

impl_handle!(ContextHandle);

#[derive(Clone)]
struct Attached {
    layer: Arc<dyn Layer>,
    enabled: bool,
}

/// A logical rendering context: the layers configured for it and the chain
/// resolved out of them.
///
/// Every change of the layers rebuilds the chain and publishes the new one with a
/// single pointer swap. Calls already in flight keep the chain they started with,
/// so they run through either the old or the new chain entirely.
pub struct Context {
    global: Arc<GlobalTable>,
    // Outermost first.
    layers: Mutex<Vec<Attached>>,
    chain: RwLock<Arc<Chain>>,
    generation: AtomicUsize,
    threads: Mutex<SmallVec<[ThreadId; 4]>>,
    info: Mutex<Option<Arc<ContextInfo>>>,
}

fn lock<T>(v: &Mutex<T>) -> MutexGuard<T> {
    v.lock().unwrap_or_else(|err| err.into_inner())
}

impl Context {
    /// Constructs a context without layers on top of `global`.
    pub fn new(global: Arc<GlobalTable>) -> Arc<Context> {
        Arc::new(Context {
            chain: RwLock::new(Arc::new(Chain::direct(global.clone()))),
            global,
            layers: Mutex::new(Vec::new()),
            generation: AtomicUsize::new(0),
            threads: Mutex::new(SmallVec::new()),
            info: Mutex::new(None),
        })
    }

    #[inline]
    pub fn global(&self) -> &Arc<GlobalTable> {
        &self.global
    }

    /// Returns the chain currently published.
    pub fn chain(&self) -> Arc<Chain> {
        self.snapshot().0
    }

    /// Returns the number of chains published after the initial one.
    #[inline]
    pub fn generation(&self) -> usize {
        self.generation.load(Ordering::Acquire)
    }

    pub(crate) fn snapshot(&self) -> (Arc<Chain>, usize) {
        let chain = self.chain.read().unwrap_or_else(|err| err.into_inner());
        (chain.clone(), self.generation.load(Ordering::Acquire))
    }

    /// Attaches `layer` as the innermost layer, enabled.
    pub fn attach(&self, layer: Arc<dyn Layer>) -> Result<()> {
        self.update(|layers| {
            if layers.iter().any(|v| v.layer.name() == layer.name()) {
                return Err(Error::DuplicateLayer(layer.name().to_owned()));
            }

            layers.push(Attached {
                layer,
                enabled: true,
            });

            Ok(())
        })
    }

    /// Detaches the layer named `name`.
    pub fn detach(&self, name: &str) -> Result<Arc<dyn Layer>> {
        let mut detached = None;
        self.update(|layers| {
            let index = position(layers, name)?;
            detached = Some(layers.remove(index).layer);
            Ok(())
        })?;

        detached.ok_or_else(|| Error::UnknownLayer(name.to_owned()))
    }

    #[inline]
    pub fn enable(&self, name: &str) -> Result<()> {
        self.set_enabled(name, true)
    }

    #[inline]
    pub fn disable(&self, name: &str) -> Result<()> {
        self.set_enabled(name, false)
    }

    /// Enables or disables the layer named `name`, keeping its position.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        self.update(|layers| {
            let index = position(layers, name)?;
            layers[index].enabled = enabled;
            Ok(())
        })
    }

    /// Reorders the attached layers, `names` lists every one of them from the
    /// outermost to the innermost.
    pub fn reorder(&self, names: &[&str]) -> Result<()> {
        self.update(|layers| {
            if names.len() != layers.len() {
                return Err(Error::LayerOrder(format!(
                    "expects {} layers but got {}",
                    layers.len(),
                    names.len()
                )));
            }

            let mut reordered = Vec::with_capacity(layers.len());
            for (i, name) in names.iter().enumerate() {
                if names[..i].contains(name) {
                    return Err(Error::LayerOrder(format!("'{}' is listed twice", name)));
                }

                reordered.push(layers[position(layers, name)?].clone());
            }

            *layers = reordered;
            Ok(())
        })
    }

    /// Returns the names of the attached layers and whether they are enabled,
    /// outermost first.
    pub fn layers(&self) -> Vec<(String, bool)> {
        lock(&self.layers)
            .iter()
            .map(|v| (v.layer.name().to_owned(), v.enabled))
            .collect()
    }

    /// Returns the attached layer named `name`.
    pub fn layer(&self, name: &str) -> Option<Arc<dyn Layer>> {
        lock(&self.layers)
            .iter()
            .find(|v| v.layer.name() == name)
            .map(|v| v.layer.clone())
    }

    /// Returns the threads this context is current on.
    pub fn threads(&self) -> Vec<ThreadId> {
        lock(&self.threads).to_vec()
    }

    pub(crate) fn add_thread(&self, id: ThreadId) {
        let mut threads = lock(&self.threads);
        if !threads.contains(&id) {
            threads.push(id);
        }
    }

    pub(crate) fn remove_thread(&self, id: ThreadId) {
        lock(&self.threads).retain(|v| *v != id);
    }

    /// Returns the driver information, if it has been queried.
    pub fn info(&self) -> Option<Arc<ContextInfo>> {
        lock(&self.info).clone()
    }

    /// Queries the driver information through the driver bindings, bypassing every
    /// layer. The result is cached.
    ///
    /// # Safety
    ///
    /// The native context behind this context must be current on the calling thread.
    pub unsafe fn query_info(&self) -> Result<Arc<ContextInfo>> {
        let mut info = lock(&self.info);
        if let Some(ref v) = *info {
            return Ok(v.clone());
        }

        let chain = self.chain();
        let v = Arc::new(ContextInfo::query(&chain.driver())?);
        info!("OpenGL vendor    : {}", v.vendor);
        info!("OpenGL renderer  : {}", v.renderer);
        info!("OpenGL version   : {:?}", v.version);
        debug!("OpenGL limits    : {:?}", v.limits);

        *info = Some(v.clone());
        Ok(v)
    }

    fn update<F>(&self, func: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Attached>) -> Result<()>,
    {
        // Holding the layers lock serializes rebuilds.
        let mut layers = lock(&self.layers);

        let mut next = layers.clone();
        func(&mut next)?;

        let enabled: Vec<_> = next
            .iter()
            .filter(|v| v.enabled)
            .map(|v| v.layer.clone())
            .collect();

        let chain = Chain::build(self.global.clone(), &enabled)?;

        {
            let mut current = self.chain.write().unwrap_or_else(|err| err.into_inner());
            debug!(
                "Rebuilt chain [{}], {} slots changed.",
                chain.layers().join(", "),
                current.table().diff(chain.table()).len()
            );

            *current = Arc::new(chain);
            self.generation.fetch_add(1, Ordering::AcqRel);
        }

        *layers = next;
        Ok(())
    }
}

fn position(layers: &[Attached], name: &str) -> Result<usize> {
    layers
        .iter()
        .position(|v| v.layer.name() == name)
        .ok_or_else(|| Error::UnknownLayer(name.to_owned()))
}
