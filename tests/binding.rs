extern crate gl_dispatch;

use std::any::Any;
use std::os::raw::c_void;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;

use gl_dispatch::api;
use gl_dispatch::context::{current, current_chain, make_current};
use gl_dispatch::gl;
use gl_dispatch::gl::types::*;
use gl_dispatch::prelude::*;

static DRAWS: AtomicUsize = AtomicUsize::new(0);
static CLEARS: AtomicUsize = AtomicUsize::new(0);

unsafe extern "system" fn draw_arrays(_: GLenum, _: GLint, _: GLsizei) {
    DRAWS.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "system" fn clear(_: GLbitfield) {
    CLEARS.fetch_add(1, Ordering::SeqCst);
}

fn driver() -> Arc<GlobalTable> {
    let global = Arc::new(GlobalTable::new());
    global.bind(
        EntryPoint::DrawArrays,
        Proc::new(draw_arrays as *const c_void).unwrap(),
    );
    global.bind(
        EntryPoint::Clear,
        Proc::new(clear as *const c_void).unwrap(),
    );
    global
}

#[test]
fn no_current_context() {
    make_current(None);
    let _ = take_last_error();

    unsafe { api::glDrawArrays(gl::TRIANGLES, 0, 3) };
    assert_eq!(take_last_error(), Some(Error::NoCurrentContext));
    assert_eq!(DRAWS.load(Ordering::SeqCst), 0);

    assert_eq!(unsafe { api::glGetError() }, 0);
    assert_eq!(take_last_error(), Some(Error::NoCurrentContext));
}

#[test]
fn contexts_are_per_thread() {
    let ctx = Context::new(driver());
    make_current(Some(ctx.clone()));

    let other = thread::spawn(|| current().is_none()).join().unwrap();
    assert!(other);
    assert!(current_chain().is_some());

    {
        let ctx = ctx.clone();
        thread::spawn(move || {
            make_current(Some(ctx.clone()));
            assert_eq!(ctx.threads().len(), 2);
            make_current(None);
        })
        .join()
        .unwrap();
    }

    assert_eq!(ctx.threads(), vec![thread::current().id()]);
    make_current(None);
}

/// Blocks the first `glClear` going through it until released.
struct Pause {
    armed: AtomicBool,
    entered: Barrier,
    release: Barrier,
}

unsafe fn pause_clear(next: &Dispatch<'_>, mask: GLbitfield) {
    if let Some(pause) = next.layer_as::<Pause>() {
        if pause.armed.swap(false, Ordering::SeqCst) {
            pause.entered.wait();
            pause.release.wait();
        }
    }

    next.glClear(mask)
}

impl Layer for Pause {
    fn name(&self) -> &str {
        "pause"
    }

    fn hooks(&self) -> Vec<Hook> {
        vec![Hook::glClear(pause_clear)]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn rebuild_during_dispatch() {
    let pause = Arc::new(Pause {
        armed: AtomicBool::new(true),
        entered: Barrier::new(2),
        release: Barrier::new(2),
    });

    let ctx = Context::new(driver());
    ctx.attach(pause.clone()).unwrap();

    let worker = {
        let ctx = ctx.clone();
        thread::spawn(move || {
            make_current(Some(ctx));
            unsafe {
                api::glClear(gl::COLOR_BUFFER_BIT);
                api::glClear(gl::COLOR_BUFFER_BIT);
            }
        })
    };

    // The first call is now parked inside the pause layer, with the old chain.
    pause.entered.wait();

    let stats = Arc::new(Statistics::new());
    ctx.attach(stats.clone()).unwrap();
    assert_eq!(ctx.chain().layers(), vec!["pause", Statistics::NAME]);

    pause.release.wait();
    worker.join().unwrap();

    // The call in flight completed through the old chain, the next one went
    // through the new chain.
    assert_eq!(stats.count(EntryPoint::Clear), 1);
    assert_eq!(CLEARS.load(Ordering::SeqCst), 2);
}
