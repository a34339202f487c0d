//! The process-wide dispatch system: the global table, the registry of contexts and
//! the named layer factories.
//!
//! Layer factories live outside of the system, so they could be registered before
//! `setup` and listed in `Settings::layers`.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::context::{self, Context, ContextHandle};
use crate::errors::*;
use crate::layer::{Layer, Log, Statistics};
use crate::settings::Settings;
use crate::table::{GlobalTable, SymbolResolver};
use crate::utils::ObjectPool;

use self::ins::{ctx, CTX, FACTORIES};

type LayerFactory = Box<dyn Fn() -> Arc<dyn Layer> + Send + Sync>;

fn builtin(name: &str) -> Option<Arc<dyn Layer>> {
    match name {
        Log::NAME => Some(Arc::new(Log::default())),
        Statistics::NAME => Some(Arc::new(Statistics::new())),
        _ => None,
    }
}

fn is_builtin(name: &str) -> bool {
    name == Log::NAME || name == Statistics::NAME
}

fn is_registered(name: &str) -> bool {
    is_builtin(name)
        || FACTORIES
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .contains_key(name)
}

fn instantiate(name: &str) -> Result<Arc<dyn Layer>> {
    if let Some(layer) = builtin(name) {
        return Ok(layer);
    }

    let factories = FACTORIES.read().unwrap_or_else(|err| err.into_inner());
    let factory = factories
        .get(name)
        .ok_or_else(|| Error::UnknownLayer(name.to_owned()))?;

    Ok(factory())
}

struct Registry {
    contexts: ObjectPool<ContextHandle, Arc<Context>>,
    natives: HashMap<usize, ContextHandle>,
}

struct System {
    settings: Settings,
    global: Arc<GlobalTable>,
    registry: Mutex<Registry>,
}

impl System {
    fn new(settings: Settings, global: GlobalTable) -> Result<Self> {
        let mut names = HashSet::new();
        for name in &settings.layers {
            if !is_registered(name) {
                return Err(Error::UnknownLayer(name.clone()));
            }

            if !names.insert(name.as_str()) {
                return Err(Error::DuplicateLayer(name.clone()));
            }
        }

        Ok(System {
            settings,
            global: Arc::new(global),
            registry: Mutex::new(Registry {
                contexts: ObjectPool::new(),
                natives: HashMap::new(),
            }),
        })
    }

    fn registry(&self) -> MutexGuard<Registry> {
        self.registry.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn create(&self) -> Result<Arc<Context>> {
        let ctx = Context::new(self.global.clone());
        for name in &self.settings.layers {
            ctx.attach(instantiate(name)?)?;
        }

        Ok(ctx)
    }
}

mod ins {
    use super::{LayerFactory, System};
    use crate::errors::*;
    use std::collections::BTreeMap;
    use std::sync::{Arc, RwLock};

    pub(super) static CTX: RwLock<Option<Arc<System>>> = RwLock::new(None);
    pub(super) static FACTORIES: RwLock<BTreeMap<String, LayerFactory>> =
        RwLock::new(BTreeMap::new());

    #[inline]
    pub(super) fn ctx() -> Result<Arc<System>> {
        CTX.read()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
            .ok_or(Error::NotSetup)
    }
}

/// Setup the dispatch system, driver functions are looked up with `resolver`.
///
/// Every name in `settings.layers` must be a built-in layer or registered with
/// `register_layer` beforehand, and may appear only once.
pub fn setup<T>(settings: Settings, resolver: T) -> Result<()>
where
    T: SymbolResolver + 'static,
{
    let mut slot = CTX.write().unwrap_or_else(|err| err.into_inner());
    if slot.is_some() {
        return Err(Error::DuplicatedSetup);
    }

    let sys = System::new(settings, GlobalTable::with_resolver(resolver))?;
    if sys.settings.eager_resolve {
        let available = sys.global.resolve_all();
        info!(
            "Resolved {} of {} OpenGL functions.",
            available,
            crate::registry::ENTRY_POINT_COUNT
        );
    }

    *slot = Some(Arc::new(sys));
    Ok(())
}

/// Discard the dispatch system.
///
/// The calling thread is left without context. Contexts still current on other
/// threads stay usable until those threads release them.
pub fn discard() {
    context::make_current(None);
    CTX.write().unwrap_or_else(|err| err.into_inner()).take();
}

/// Checks if the dispatch system is enabled.
#[inline]
pub fn valid() -> bool {
    CTX.read().unwrap_or_else(|err| err.into_inner()).is_some()
}

/// Returns the global table of the dispatch system.
pub fn global() -> Result<Arc<GlobalTable>> {
    Ok(ctx()?.global.clone())
}

/// Creates a context with the layers named in the settings attached.
pub fn create_context() -> Result<ContextHandle> {
    let sys = ctx()?;
    let ctx = sys.create()?;
    let handle = sys.registry().contexts.create(ctx);

    info!("Created {}.", handle);
    Ok(handle)
}

/// Deletes a context, unbinding it from the calling thread if it is current.
pub fn delete_context(handle: ContextHandle) -> Result<()> {
    let sys = ctx()?;
    let ctx = {
        let mut registry = sys.registry();
        let ctx = registry
            .contexts
            .free(handle)
            .ok_or_else(|| Error::ContextHandleInvalid(handle))?;

        registry.natives.retain(|_, v| *v != handle);
        ctx
    };

    if context::binding::is_current(&ctx) {
        context::make_current(None);
    }

    let threads = ctx.threads();
    if !threads.is_empty() {
        warn!("{} is deleted while current on {:?}.", handle, threads);
    }

    info!("Deleted {}.", handle);
    Ok(())
}

/// Returns the context of `handle`.
pub fn context(handle: ContextHandle) -> Result<Arc<Context>> {
    ctx()?
        .registry()
        .contexts
        .get(handle)
        .cloned()
        .ok_or_else(|| Error::ContextHandleInvalid(handle))
}

/// Makes the context of `handle` current on the calling thread, `None` releases
/// the current one.
pub fn make_current(handle: Option<ContextHandle>) -> Result<()> {
    let ctx = match handle {
        Some(handle) => Some(context(handle)?),
        None => None,
    };

    context::make_current(ctx);
    Ok(())
}

/// Makes the context associated with the native context `native` current on the
/// calling thread, creating it on first use. `None` releases the current one.
pub fn make_current_native(native: Option<usize>) -> Result<Option<ContextHandle>> {
    let native = match native {
        Some(native) => native,
        None => {
            context::make_current(None);
            return Ok(None);
        }
    };

    let sys = ctx()?;
    let (handle, ctx) = {
        let mut registry = sys.registry();
        let existing = registry
            .natives
            .get(&native)
            .and_then(|&v| registry.contexts.get(v).map(|ctx| (v, ctx.clone())));

        match existing {
            Some(v) => v,
            None => {
                let ctx = sys.create()?;
                let handle = registry.contexts.create(ctx.clone());
                registry.natives.insert(native, handle);
                info!("Created {} for native context {:#x}.", handle, native);
                (handle, ctx)
            }
        }
    };

    context::make_current(Some(ctx));
    Ok(Some(handle))
}

/// Registers a named layer constructor, which could then be listed in `Settings::layers`
/// or instantiated with `create_layer`.
///
/// Registrations are process-wide and outlive `discard`. The names of the built-in
/// layers are taken.
pub fn register_layer<F>(name: &str, factory: F) -> Result<()>
where
    F: Fn() -> Arc<dyn Layer> + Send + Sync + 'static,
{
    if is_builtin(name) {
        return Err(Error::DuplicateLayer(name.to_owned()));
    }

    let mut factories = FACTORIES.write().unwrap_or_else(|err| err.into_inner());
    if factories.contains_key(name) {
        return Err(Error::DuplicateLayer(name.to_owned()));
    }

    factories.insert(name.to_owned(), Box::new(factory));
    Ok(())
}

/// Instantiates the layer registered as `name`.
pub fn create_layer(name: &str) -> Result<Arc<dyn Layer>> {
    instantiate(name)
}
