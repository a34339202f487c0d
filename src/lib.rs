//! # What is This?
//!
//! `gl-dispatch` is a call-routing layer that sits between application code and an
//! OpenGL driver. Any subset of the API calls could be intercepted, logged, counted or
//! rewritten by stacking _layers_ in front of the driver, without the application or
//! the driver being aware of it.
//!
//! The core is made of a few pieces:
//!
//! 1. The [`EntryPoint`](registry/enum.EntryPoint.html) registry, a dense enumeration
//! of every function we know about;
//! 2. The [`GlobalTable`](table/struct.GlobalTable.html), which owns the driver bindings
//! and resolves them lazily, exactly once;
//! 3. The [`Chain`](layer/struct.Chain.html), a per-context dispatch table that routes
//! every entry point to its outermost enabled layer, or straight into the driver;
//! 4. The thread binding, which associates the calling thread with the context it has
//! made current, so `api::glClear(..)` reaches the right chain without extra parameters.
//!
//! ```rust,ignore
//! use gl_dispatch::prelude::*;
//!
//! gl_dispatch::setup(Settings::default(), |name: &str| window.get_proc_address(name))?;
//!
//! let handle = gl_dispatch::create_context()?;
//! gl_dispatch::context(handle)?.attach(Arc::new(Statistics::new()))?;
//! gl_dispatch::make_current(Some(handle))?;
//!
//! unsafe { gl_dispatch::api::glClear(gl::COLOR_BUFFER_BIT) };
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub extern crate gl;

#[macro_use]
pub mod utils;
#[macro_use]
pub mod registry;

pub mod api;
pub mod context;
pub mod errors;
pub mod layer;
pub mod settings;
pub mod table;

mod system;

pub use self::system::{
    context, create_context, create_layer, delete_context, discard, global, make_current,
    make_current_native, register_layer, setup, valid,
};

pub mod prelude {
    pub use crate::context::{Context, ContextHandle, ContextInfo, Limits, Profile, Version};
    pub use crate::errors::{take_last_error, Error, Result};
    pub use crate::layer::{Chain, Dispatch, Hook, Layer, Log, Statistics};
    pub use crate::registry::{EntryPoint, ENTRY_POINT_COUNT};
    pub use crate::settings::Settings;
    pub use crate::table::{Binding, DispatchTable, GlobalTable, Proc, SymbolResolver};
    pub use std::sync::Arc;
}
