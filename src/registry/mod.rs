//! The entry-point registry: a dense, zero-based enumeration of every API function
//! the dispatch layer knows about, plus the compile-time signature of each one.
//!
//! Every dispatch table is indexed by `EntryPoint` and has exactly
//! `ENTRY_POINT_COUNT` slots. Slots store type-erased `Proc`s, the signature
//! aliases in `pfn` (native calling convention) and `hook` (layer hooks) tell the
//! invocation path how to call them back.

#[macro_use]
mod entries;

use std::fmt;
use std::os::raw::c_void;

use crate::errors::*;
use crate::table::Proc;

macro_rules! declare_registry {
    ($($variant:ident : fn $name:ident ( $($arg:ident : $ty:ty),* ) $(-> $ret:ty)? ;)+) => {
        /// Identifies one intercepted API function. The discriminant is the slot
        /// index into every dispatch table.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum EntryPoint {
            $($variant,)+
        }

        const NAMES: &[&str] = &[$(stringify!($name),)+];

        const SIGNATURES: &[&str] = &[$(stringify!(fn $name($($arg: $ty),*) $(-> $ret)?),)+];

        impl EntryPoint {
            /// All the entry points, in slot order.
            pub const ALL: &'static [EntryPoint] = &[$(EntryPoint::$variant,)+];

            /// Returns the not-implemented stub of this entry point. The stub has the
            /// native signature, reports `Error::Unavailable` and returns zero.
            pub fn stub(self) -> Proc {
                match self {
                    $(EntryPoint::$variant => Proc::from_fn(missing::$name as *const c_void),)+
                }
            }
        }

        /// Native signatures, one per entry point.
        #[allow(non_camel_case_types)]
        pub mod pfn {
            use gl::types::*;
            #[allow(unused_imports)]
            use std::os::raw::c_void;

            $(pub type $name = unsafe extern "system" fn($($ty),*) $(-> $ret)?;)+
        }

        /// Signatures of layer hooks. A hook receives the next link of the chain
        /// followed by the native arguments.
        #[allow(non_camel_case_types)]
        pub mod hook {
            use gl::types::*;
            #[allow(unused_imports)]
            use std::os::raw::c_void;

            use crate::layer::Dispatch;

            $(pub type $name = unsafe fn(&Dispatch<'_>, $($ty),*) $(-> $ret)?;)+
        }

        /// Not-implemented stubs bound to every slot without a real binding.
        #[allow(non_snake_case)]
        pub mod missing {
            use gl::types::*;
            #[allow(unused_imports)]
            use std::os::raw::c_void;

            use crate::errors::{report, Error};

            $(
                #[allow(unused_variables)]
                pub unsafe extern "system" fn $name($($arg: $ty),*) $(-> $ret)? {
                    report(Error::Unavailable(stringify!($name)));
                    ::std::mem::zeroed()
                }
            )+
        }
    };
}

for_each_entry_point!(declare_registry);

/// The number of slots of every dispatch table.
pub const ENTRY_POINT_COUNT: usize = NAMES.len();

impl EntryPoint {
    /// Returns the slot index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the entry point at slot `index`.
    #[inline]
    pub fn from_index(index: usize) -> Option<EntryPoint> {
        EntryPoint::ALL.get(index).cloned()
    }

    /// Looks up an entry point by its API name. The `gl` prefix is optional, so
    /// `"glClear"` and `"Clear"` both resolve.
    pub fn from_name(name: &str) -> Result<EntryPoint> {
        NAMES
            .iter()
            .position(|v| *v == name || &v[2..] == name)
            .and_then(EntryPoint::from_index)
            .ok_or_else(|| Error::UnknownEntryPoint(name.to_owned()))
    }

    /// Returns the API name, e.g. `glClear`.
    #[inline]
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// Returns the native signature as written in the registry.
    #[inline]
    pub fn signature(self) -> &'static str {
        SIGNATURES[self.index()]
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dense() {
        assert_eq!(EntryPoint::ALL.len(), ENTRY_POINT_COUNT);
        for (i, v) in EntryPoint::ALL.iter().enumerate() {
            assert_eq!(v.index(), i);
            assert_eq!(EntryPoint::from_index(i), Some(*v));
        }

        assert_eq!(EntryPoint::from_index(ENTRY_POINT_COUNT), None);
    }

    #[test]
    fn names() {
        assert_eq!(EntryPoint::Clear.name(), "glClear");
        assert_eq!(EntryPoint::from_name("glClear").unwrap(), EntryPoint::Clear);
        assert_eq!(EntryPoint::from_name("DrawArrays").unwrap(), EntryPoint::DrawArrays);
        assert_eq!(format!("{}", EntryPoint::GetError), "glGetError");

        for v in EntryPoint::ALL {
            assert_eq!(EntryPoint::from_name(v.name()).unwrap(), *v);
            assert!(v.signature().contains(v.name()));
        }
    }

    #[test]
    fn unknown() {
        match EntryPoint::from_name("glDoesNotExist") {
            Err(Error::UnknownEntryPoint(name)) => assert_eq!(name, "glDoesNotExist"),
            other => panic!("unexpected {:?}", other),
        }

        assert!(EntryPoint::from_name("").is_err());
    }

    #[test]
    fn stubs() {
        let a = EntryPoint::Clear.stub();
        let b = EntryPoint::DrawArrays.stub();
        assert_ne!(a, b);
        assert_eq!(a, EntryPoint::Clear.stub());
    }
}
