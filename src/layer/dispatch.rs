//! The invocation path.
//!
//! A `Dispatch` looks up a slot, casts the stored `Proc` back to the signature the
//! registry declares for it and calls it, handing the return value back untouched.
//! It does no logging, no locking and no argument copying, anything smarter lives
//! in layers.

use std::mem;
use std::os::raw::c_void;

use gl::types::*;

use crate::registry::{hook, pfn, EntryPoint};
use crate::table::{Binding, DispatchTable, Proc};

use super::{Chain, Hook, Layer};

/// A view of one link of a chain. Calls made through it go to the bindings of
/// that link.
///
/// Applications enter through `Chain::front`. A hook receives the dispatch of the
/// link right behind its layer, and `layer` returns the layer running the hook.
#[derive(Clone, Copy)]
pub struct Dispatch<'a> {
    chain: &'a Chain,
    table: &'a DispatchTable,
    layer: Option<&'a dyn Layer>,
}

impl<'a> Dispatch<'a> {
    #[inline]
    pub(crate) fn new(
        chain: &'a Chain,
        table: &'a DispatchTable,
        layer: Option<&'a dyn Layer>,
    ) -> Self {
        Dispatch {
            chain,
            table,
            layer,
        }
    }

    #[inline]
    pub fn chain(&self) -> &'a Chain {
        self.chain
    }

    #[inline]
    pub fn table(&self) -> &'a DispatchTable {
        self.table
    }

    /// Returns the layer whose hook received this dispatch.
    #[inline]
    pub fn layer(&self) -> Option<&'a dyn Layer> {
        self.layer
    }

    /// Returns the layer whose hook received this dispatch, if it is a `T`.
    #[inline]
    pub fn layer_as<T: Layer>(&self) -> Option<&'a T> {
        self.layer.and_then(|v| v.as_any().downcast_ref::<T>())
    }

    /// Notifies `Layer::observe` of the layer running the current hook.
    #[inline]
    pub fn observe(&self, entry: EntryPoint) {
        if let Some(layer) = self.layer {
            layer.observe(entry);
        }
    }

    /// Returns the binding a call of `entry` would go through.
    #[inline]
    pub fn binding(&self, entry: EntryPoint) -> Binding {
        self.table.get(entry)
    }

    /// Returns the function a call of `entry` would jump into.
    #[inline]
    pub fn proc_address(&self, entry: EntryPoint) -> Proc {
        self.chain.resolve(entry, self.table.get(entry))
    }
}

macro_rules! impl_dispatch {
    ($($variant:ident : fn $name:ident ( $($arg:ident : $ty:ty),* ) $(-> $ret:ty)? ;)+) => {
        #[allow(non_snake_case)]
        impl<'a> Dispatch<'a> {
            $(
                #[inline]
                pub unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)? {
                    let entry = EntryPoint::$variant;
                    match self.table.get(entry) {
                        Binding::Hook { proc, stage } => {
                            let callee = mem::transmute::<*const c_void, hook::$name>(proc.as_ptr());
                            callee(&self.chain.stage(stage), $($arg),*)
                        }
                        binding => {
                            let proc = self.chain.resolve(entry, binding);
                            let callee = mem::transmute::<*const c_void, pfn::$name>(proc.as_ptr());
                            callee($($arg),*)
                        }
                    }
                }
            )+
        }

        #[allow(non_snake_case)]
        impl Hook {
            $(
                #[inline]
                pub fn $name(callee: hook::$name) -> Hook {
                    Hook::new(EntryPoint::$variant, callee as *const c_void)
                }
            )+
        }
    };
}

for_each_entry_point!(impl_dispatch);

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::{take_last_error, Error};
    use crate::table::GlobalTable;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // Tests run in parallel, every test owns its own fake function.
    static DRAWS: AtomicUsize = AtomicUsize::new(0);
    static ERRORS: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "system" fn draw_arrays(_: GLenum, first: GLint, count: GLsizei) {
        DRAWS.fetch_add((first + count) as usize, Ordering::SeqCst);
    }

    unsafe extern "system" fn get_error() -> GLenum {
        ERRORS.fetch_add(1, Ordering::SeqCst);
        gl::INVALID_ENUM
    }

    struct Swallow;

    unsafe fn swallow(_: &Dispatch<'_>) -> GLenum {
        gl::NO_ERROR
    }

    impl Layer for Swallow {
        fn name(&self) -> &str {
            "swallow"
        }

        fn hooks(&self) -> Vec<Hook> {
            vec![Hook::glGetError(swallow)]
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn proc(ptr: *const c_void) -> Proc {
        Proc::new(ptr).unwrap()
    }

    #[test]
    fn forwards_arguments() {
        let global = Arc::new(GlobalTable::new());
        global.bind(EntryPoint::DrawArrays, proc(draw_arrays as *const c_void));

        let chain = Chain::direct(global);
        unsafe { chain.front().glDrawArrays(gl::TRIANGLES, 3, 4) };
        assert_eq!(DRAWS.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn forwards_return_values() {
        let global = Arc::new(GlobalTable::new());
        global.bind(EntryPoint::GetError, proc(get_error as *const c_void));

        let layers: Vec<Arc<dyn Layer>> = vec![Arc::new(Swallow)];
        let chain = Chain::build(global, &layers).unwrap();

        unsafe {
            assert_eq!(chain.front().glGetError(), gl::NO_ERROR);
            assert_eq!(chain.driver().glGetError(), gl::INVALID_ENUM);
        }

        assert_eq!(ERRORS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_reports() {
        let chain = Chain::direct(Arc::new(GlobalTable::new()));
        let _ = take_last_error();

        unsafe {
            assert_eq!(chain.front().glCreateProgram(), 0);
            assert!(chain.front().glGetString(gl::VERSION).is_null());
        }

        assert_eq!(take_last_error(), Some(Error::Unavailable("glGetString")));
        assert_eq!(
            chain.front().proc_address(EntryPoint::GetString),
            EntryPoint::GetString.stub()
        );
    }
}
