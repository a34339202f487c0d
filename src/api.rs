//! The application-facing functions, one per entry point with the native signature
//! and calling convention.
//!
//! Each one goes through the chain of the context current on the calling thread.
//! Without current context the call reports `Error::NoCurrentContext`, reaches no
//! driver function and returns zero.
//!
//! With the `export` feature enabled the functions are exported unmangled, so a
//! program linked against this library instead of the system OpenGL library ends
//! up in the dispatch layer.

#![allow(non_snake_case)]

use gl::types::*;
#[allow(unused_imports)]
use std::os::raw::c_void;

use crate::context::current_chain;
use crate::errors::{report, Error};

macro_rules! declare_api {
    ($($variant:ident : fn $name:ident ( $($arg:ident : $ty:ty),* ) $(-> $ret:ty)? ;)+) => {
        $(
            #[cfg_attr(feature = "export", no_mangle)]
            pub unsafe extern "system" fn $name($($arg: $ty),*) $(-> $ret)? {
                match current_chain() {
                    Some(chain) => chain.front().$name($($arg),*),
                    None => {
                        report(Error::NoCurrentContext);
                        ::std::mem::zeroed()
                    }
                }
            }
        )+
    };
}

for_each_entry_point!(declare_api);
