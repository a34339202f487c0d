//! The association between threads and their current context.
//!
//! Each thread holds at most one current context in thread-local storage, so
//! reading it takes no lock. The chain of the context is cached along with the
//! generation it was published at, and refreshed when the context publishes a
//! newer one.

use std::cell::RefCell;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use crate::errors::*;
use crate::layer::Chain;

use super::Context;

struct Current {
    context: Arc<Context>,
    chain: Arc<Chain>,
    generation: usize,
    thread: ThreadId,
}

impl Drop for Current {
    fn drop(&mut self) {
        self.context.remove_thread(self.thread);
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Current>> = RefCell::new(None);
}

/// Makes `context` current on the calling thread, replacing the previous binding.
/// `None` leaves the thread without context.
pub fn make_current(context: Option<Arc<Context>>) {
    let prev = CURRENT.with(|v| v.borrow_mut().take());
    drop(prev);

    let next = context.map(|context| {
        let thread = thread::current().id();
        context.add_thread(thread);

        let (chain, generation) = context.snapshot();
        Current {
            context,
            chain,
            generation,
            thread,
        }
    });

    CURRENT.with(|v| *v.borrow_mut() = next);
}

/// Returns the context current on the calling thread.
pub fn current() -> Option<Arc<Context>> {
    CURRENT
        .try_with(|v| v.borrow().as_ref().map(|v| v.context.clone()))
        .unwrap_or(None)
}

/// Returns the context current on the calling thread, or `Error::NoCurrentContext`.
pub fn current_or_err() -> Result<Arc<Context>> {
    current().ok_or(Error::NoCurrentContext)
}

/// Returns true if `context` is current on the calling thread.
pub fn is_current(context: &Arc<Context>) -> bool {
    CURRENT
        .try_with(|v| match *v.borrow() {
            Some(ref v) => Arc::ptr_eq(&v.context, context),
            None => false,
        })
        .unwrap_or(false)
}

/// Returns the chain calls from the calling thread should go through.
pub fn current_chain() -> Option<Arc<Chain>> {
    CURRENT
        .try_with(|v| {
            let mut v = v.borrow_mut();
            let current = v.as_mut()?;

            if current.context.generation() != current.generation {
                let (chain, generation) = current.context.snapshot();
                current.chain = chain;
                current.generation = generation;
            }

            Some(current.chain.clone())
        })
        .unwrap_or(None)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::layer::Statistics;
    use crate::table::GlobalTable;

    #[test]
    fn bind() {
        make_current(None);
        assert!(current().is_none());
        assert!(current_chain().is_none());
        assert_eq!(current_or_err().err(), Some(Error::NoCurrentContext));

        let ctx = Context::new(Arc::new(GlobalTable::new()));
        make_current(Some(ctx.clone()));
        assert!(is_current(&ctx));
        assert_eq!(ctx.threads(), vec![thread::current().id()]);

        // Rebinding the same context keeps a single entry.
        make_current(Some(ctx.clone()));
        assert_eq!(ctx.threads().len(), 1);

        let other = Context::new(Arc::new(GlobalTable::new()));
        make_current(Some(other.clone()));
        assert!(ctx.threads().is_empty());
        assert!(is_current(&other));

        make_current(None);
        assert!(other.threads().is_empty());
    }

    #[test]
    fn follows_rebuilds() {
        let ctx = Context::new(Arc::new(GlobalTable::new()));
        make_current(Some(ctx.clone()));

        let before = current_chain().unwrap();
        assert!(before.layers().is_empty());

        ctx.attach(Arc::new(Statistics::new())).unwrap();
        let after = current_chain().unwrap();
        assert_eq!(after.layers(), vec![Statistics::NAME]);

        // The old chain is untouched.
        assert!(before.layers().is_empty());
        make_current(None);
    }
}
