//! Errors of the dispatch layer.
//!
//! Configuration and lifecycle failures are returned as `Result`s. Conditions that
//! happen inside a native call (no current context, a missing driver function) have
//! no way back through the native signature, they are _reported_ instead: logged and
//! stored as the last error of the calling thread, see `take_last_error`.

use std::cell::RefCell;

use crate::context::ContextHandle;

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum Error {
    #[fail(display = "Unknown entry point '{}'.", _0)]
    UnknownEntryPoint(String),
    #[fail(display = "Layer '{}' overrides {} with a null implementation.", _0, _1)]
    NullHook(String, &'static str),
    #[fail(display = "Layer '{}' overrides {} more than once.", _0, _1)]
    DuplicateHook(String, &'static str),
    #[fail(display = "Layer '{}' has been attached already.", _0)]
    DuplicateLayer(String),
    #[fail(display = "Layer '{}' is unknown.", _0)]
    UnknownLayer(String),
    #[fail(display = "Invalid layer order, {}.", _0)]
    LayerOrder(String),
    #[fail(display = "Invalid settings, {}.", _0)]
    Settings(String),
    #[fail(display = "No context is current on this thread.")]
    NoCurrentContext,
    #[fail(display = "{} is invalid.", _0)]
    ContextHandleInvalid(ContextHandle),
    #[fail(display = "Dispatch system has been set up already.")]
    DuplicatedSetup,
    #[fail(display = "Dispatch system has not been set up.")]
    NotSetup,
    #[fail(display = "{} not available.", _0)]
    Unavailable(&'static str),
    #[fail(display = "[GL] {}", _0)]
    Driver(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<::serde_json::Error> for Error {
    fn from(err: ::serde_json::Error) -> Self {
        Error::Settings(format!("{}", err))
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<Error>> = RefCell::new(None);
}

/// Reports a condition raised inside a native call. It replaces the last error of
/// the calling thread.
pub fn report(err: Error) {
    warn!("{}", err);

    // The slot is gone while the thread is being torn down, the log line is all
    // we could do then.
    let _ = LAST_ERROR.try_with(|v| *v.borrow_mut() = Some(err));
}

/// Takes the last error reported on the calling thread, leaving `None` in its place.
pub fn take_last_error() -> Option<Error> {
    LAST_ERROR
        .try_with(|v| v.borrow_mut().take())
        .unwrap_or(None)
}
