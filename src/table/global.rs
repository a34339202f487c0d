use std::os::raw::c_void;
use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::registry::{EntryPoint, ENTRY_POINT_COUNT};

use super::Proc;

/// Resolves driver functions by name, e.g. `glXGetProcAddress` or
/// `eglGetProcAddress` behind a window system.
///
/// Any `Fn(&str) -> *const c_void` closure is a resolver, a null address meaning
/// the driver does not provide the function.
pub trait SymbolResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<Proc>;
}

impl<F> SymbolResolver for F
where
    F: Fn(&str) -> *const c_void + Send + Sync,
{
    fn resolve(&self, name: &str) -> Option<Proc> {
        Proc::new(self(name))
    }
}

/// The process-wide table of driver bindings, the innermost link of every chain.
///
/// Each slot is written at most once by resolution. The first caller of `resolve`
/// on an unresolved slot performs the lookup while holding the lock of that slot,
/// then publishes the result with a single atomic store. Concurrent callers of the
/// same slot either wait for its lock and find the published value, or read it
/// directly, never a partial write. Lookups of distinct slots run in parallel, and
/// a resolver may itself resolve other entry points of the table.
///
/// A function the driver does not provide resolves to the entry point's stub, so
/// it is looked up once too.
pub struct GlobalTable {
    slots: Box<[Slot]>,
    resolver: Option<Box<dyn SymbolResolver>>,
    lookups: AtomicUsize,
}

struct Slot {
    // Null marks an unresolved slot, it never leaks out of this type.
    ptr: AtomicPtr<c_void>,
    lock: Mutex<()>,
}

impl Default for GlobalTable {
    fn default() -> Self {
        GlobalTable::new()
    }
}

impl GlobalTable {
    /// Constructs a table without driver, every slot resolves to its stub unless
    /// bound explicitly.
    pub fn new() -> Self {
        GlobalTable::build(None)
    }

    /// Constructs a table resolving slots lazily with `resolver`.
    pub fn with_resolver<T>(resolver: T) -> Self
    where
        T: SymbolResolver + 'static,
    {
        GlobalTable::build(Some(Box::new(resolver)))
    }

    fn build(resolver: Option<Box<dyn SymbolResolver>>) -> Self {
        let slots: Vec<_> = (0..ENTRY_POINT_COUNT)
            .map(|_| Slot {
                ptr: AtomicPtr::new(ptr::null_mut()),
                lock: Mutex::new(()),
            })
            .collect();

        GlobalTable {
            slots: slots.into_boxed_slice(),
            resolver,
            lookups: AtomicUsize::new(0),
        }
    }

    /// Binds `entry` to `proc` explicitly, overriding whatever was resolved before.
    pub fn bind(&self, entry: EntryPoint, proc: Proc) {
        let slot = &self.slots[entry.index()];
        let _guard = slot.lock.lock().unwrap_or_else(|err| err.into_inner());
        slot.ptr.store(proc.as_ptr() as *mut c_void, Ordering::Release);
    }

    /// Returns the current binding of `entry` without resolving it. Unresolved slots
    /// read as the stub.
    #[inline]
    pub fn get(&self, entry: EntryPoint) -> Proc {
        Proc::new(self.slots[entry.index()].ptr.load(Ordering::Acquire)).unwrap_or_else(|| entry.stub())
    }

    /// Returns true if `entry` has been resolved or bound.
    #[inline]
    pub fn is_resolved(&self, entry: EntryPoint) -> bool {
        !self.slots[entry.index()].ptr.load(Ordering::Acquire).is_null()
    }

    /// Returns true if `entry` resolves to something else than its stub.
    pub fn is_available(&self, entry: EntryPoint) -> bool {
        self.resolve(entry) != entry.stub()
    }

    /// Returns the driver binding of `entry`, looking it up on first use.
    #[inline]
    pub fn resolve(&self, entry: EntryPoint) -> Proc {
        match Proc::new(self.slots[entry.index()].ptr.load(Ordering::Acquire)) {
            Some(proc) => proc,
            None => self.resolve_slow(entry),
        }
    }

    #[cold]
    fn resolve_slow(&self, entry: EntryPoint) -> Proc {
        let slot = &self.slots[entry.index()];
        let _guard = slot.lock.lock().unwrap_or_else(|err| err.into_inner());

        if let Some(proc) = Proc::new(slot.ptr.load(Ordering::Acquire)) {
            return proc;
        }

        let proc = match self.resolver {
            Some(ref resolver) => {
                self.lookups.fetch_add(1, Ordering::Relaxed);
                resolver.resolve(entry.name())
            }
            None => None,
        };

        let proc = proc.unwrap_or_else(|| {
            debug!("{} is not provided by the driver.", entry);
            entry.stub()
        });

        slot.ptr.store(proc.as_ptr() as *mut c_void, Ordering::Release);
        proc
    }

    /// Resolves every slot up front, returns the number of entry points the driver
    /// provides.
    pub fn resolve_all(&self) -> usize {
        EntryPoint::ALL
            .iter()
            .filter(|&&v| self.resolve(v) != v.stub())
            .count()
    }

    /// Returns how many lookups have been forwarded to the resolver.
    #[inline]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::{Arc, Barrier, Weak};
    use std::thread;

    extern "system" fn fake() {}

    fn fake_proc() -> Proc {
        Proc::new(fake as *const c_void).unwrap()
    }

    #[test]
    fn unresolved_reads_as_stub() {
        let table = GlobalTable::new();
        assert!(!table.is_resolved(EntryPoint::Clear));
        assert_eq!(table.get(EntryPoint::Clear), EntryPoint::Clear.stub());
        assert_eq!(table.resolve(EntryPoint::Clear), EntryPoint::Clear.stub());
        assert!(table.is_resolved(EntryPoint::Clear));
        assert_eq!(table.lookups(), 0);
    }

    #[test]
    fn resolve_once() {
        let names = Arc::new(Mutex::new(Vec::new()));
        let table = {
            let names = names.clone();
            GlobalTable::with_resolver(move |name: &str| {
                names.lock().unwrap().push(name.to_owned());
                if name == "glClear" {
                    fake as *const c_void
                } else {
                    ptr::null()
                }
            })
        };

        assert_eq!(table.resolve(EntryPoint::Clear), fake_proc());
        assert_eq!(table.resolve(EntryPoint::Clear), fake_proc());
        assert_eq!(table.resolve(EntryPoint::Flush), EntryPoint::Flush.stub());
        assert_eq!(table.resolve(EntryPoint::Flush), EntryPoint::Flush.stub());

        assert_eq!(*names.lock().unwrap(), vec!["glClear", "glFlush"]);
        assert_eq!(table.lookups(), 2);
        assert!(table.is_available(EntryPoint::Clear));
        assert!(!table.is_available(EntryPoint::Flush));
    }

    #[test]
    fn reentrant_resolver() {
        let outer: Arc<Mutex<Option<Weak<GlobalTable>>>> = Arc::new(Mutex::new(None));
        let table = {
            let outer = outer.clone();
            Arc::new(GlobalTable::with_resolver(move |name: &str| {
                if name == "glClear" {
                    let table = outer.lock().unwrap().clone().unwrap().upgrade().unwrap();
                    assert_eq!(table.resolve(EntryPoint::Flush), fake_proc());
                }

                fake as *const c_void
            }))
        };

        *outer.lock().unwrap() = Some(Arc::downgrade(&table));
        assert_eq!(table.resolve(EntryPoint::Clear), fake_proc());
        assert!(table.is_resolved(EntryPoint::Flush));
        assert_eq!(table.lookups(), 2);
    }

    #[test]
    fn parallel_lookups() {
        let barrier = Arc::new(Barrier::new(2));
        let table = {
            let barrier = barrier.clone();
            Arc::new(GlobalTable::with_resolver(move |name: &str| {
                // Holds the lookup of glClear until glFlush has been resolved.
                if name == "glClear" {
                    barrier.wait();
                }

                fake as *const c_void
            }))
        };

        let other = {
            let table = table.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                assert_eq!(table.resolve(EntryPoint::Flush), fake_proc());
                barrier.wait();
            })
        };

        assert_eq!(table.resolve(EntryPoint::Clear), fake_proc());
        other.join().unwrap();
        assert_eq!(table.lookups(), 2);
    }

    #[test]
    fn bind_overrides() {
        let table = GlobalTable::with_resolver(|_: &str| ptr::null());
        table.bind(EntryPoint::Clear, fake_proc());
        assert_eq!(table.resolve(EntryPoint::Clear), fake_proc());
        assert_eq!(table.lookups(), 0);

        assert_eq!(table.resolve_all(), 1);
        assert_eq!(table.lookups(), ENTRY_POINT_COUNT - 1);
    }
}
