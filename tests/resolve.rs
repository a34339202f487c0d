extern crate gl_dispatch;

use std::os::raw::c_void;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;
use std::time::Duration;

use gl_dispatch::prelude::*;

extern "system" fn viewport() {}

#[test]
fn concurrent_first_use() {
    const THREADS: usize = 8;

    let lookups = Arc::new(AtomicUsize::new(0));
    let global = {
        let lookups = lookups.clone();
        Arc::new(GlobalTable::with_resolver(move |name: &str| {
            lookups.fetch_add(1, Ordering::SeqCst);
            // Widens the window in which other threads find the slot unresolved.
            thread::sleep(Duration::from_millis(10));

            if name == "glViewport" {
                viewport as *const c_void
            } else {
                ptr::null()
            }
        }))
    };

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let global = global.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                global.resolve(EntryPoint::Viewport)
            })
        })
        .collect();

    let resolved: Vec<Proc> = handles.into_iter().map(|v| v.join().unwrap()).collect();
    let expected = Proc::new(viewport as *const c_void).unwrap();

    assert!(resolved.iter().all(|&v| v == expected));
    assert_eq!(lookups.load(Ordering::SeqCst), 1);
    assert_eq!(global.lookups(), 1);
}

#[test]
fn unavailable_functions_resolve_once() {
    let lookups = Arc::new(AtomicUsize::new(0));
    let global = {
        let lookups = lookups.clone();
        Arc::new(GlobalTable::with_resolver(move |_: &str| {
            lookups.fetch_add(1, Ordering::SeqCst);
            ptr::null()
        }))
    };

    let chain = Chain::direct(global.clone());
    let _ = take_last_error();

    for _ in 0..4 {
        assert_eq!(unsafe { chain.front().glCreateProgram() }, 0);
        assert_eq!(
            take_last_error(),
            Some(Error::Unavailable("glCreateProgram"))
        );
    }

    assert_eq!(lookups.load(Ordering::SeqCst), 1);
    assert!(!global.is_available(EntryPoint::CreateProgram));
}
