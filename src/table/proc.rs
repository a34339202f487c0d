use std::fmt;
use std::os::raw::c_void;

/// An opaque, type-erased function pointer stored in a dispatch slot. It is never
/// null.
///
/// A `Proc` carries no signature, the registry knows which one belongs to each
/// slot and the invocation path casts it back before calling.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Proc(*const c_void);

// Function addresses are immutable code, sharing them across threads is fine.
unsafe impl Send for Proc {}
unsafe impl Sync for Proc {}

impl Proc {
    /// Wraps a raw address, `None` if it is null.
    #[inline]
    pub fn new(ptr: *const c_void) -> Option<Proc> {
        if ptr.is_null() {
            None
        } else {
            Some(Proc(ptr))
        }
    }

    /// Wraps the address of a function we own.
    #[inline]
    pub(crate) fn from_fn(ptr: *const c_void) -> Proc {
        debug_assert!(!ptr.is_null());
        Proc(ptr)
    }

    #[inline]
    pub fn as_ptr(self) -> *const c_void {
        self.0
    }
}

impl fmt::Debug for Proc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Proc({:p})", self.0)
    }
}
