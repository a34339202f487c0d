extern crate gl_dispatch;
extern crate log;
extern crate rand;

use std::any::Any;
use std::os::raw::c_void;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use gl_dispatch::gl;
use gl_dispatch::gl::types::*;
use gl_dispatch::prelude::*;
use rand::Rng;

static DRAWS: AtomicUsize = AtomicUsize::new(0);
static CLEARS: AtomicUsize = AtomicUsize::new(0);

unsafe extern "system" fn draw_arrays(_: GLenum, _: GLint, _: GLsizei) {
    DRAWS.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "system" fn clear(_: GLbitfield) {
    CLEARS.fetch_add(1, Ordering::SeqCst);
}

fn proc(ptr: *const c_void) -> Proc {
    Proc::new(ptr).unwrap()
}

fn driver() -> Arc<GlobalTable> {
    let global = Arc::new(GlobalTable::new());
    global.bind(EntryPoint::DrawArrays, proc(draw_arrays as *const c_void));
    global.bind(EntryPoint::Clear, proc(clear as *const c_void));
    global
}

/// Appends its name to a shared trace on every `glClear`.
struct Tracer {
    name: String,
    trace: Arc<Mutex<Vec<String>>>,
}

unsafe fn trace_clear(next: &Dispatch<'_>, mask: GLbitfield) {
    if let Some(tracer) = next.layer_as::<Tracer>() {
        tracer.trace.lock().unwrap().push(tracer.name.clone());
    }

    next.glClear(mask)
}

impl Layer for Tracer {
    fn name(&self) -> &str {
        &self.name
    }

    fn hooks(&self) -> Vec<Hook> {
        vec![Hook::glClear(trace_clear)]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn tracers(names: &[String], trace: &Arc<Mutex<Vec<String>>>) -> Vec<Arc<dyn Layer>> {
    names
        .iter()
        .map(|name| {
            Arc::new(Tracer {
                name: name.clone(),
                trace: trace.clone(),
            }) as Arc<dyn Layer>
        })
        .collect()
}

#[test]
fn identity() {
    let global = driver();
    let chain = Chain::build(global.clone(), &[]).unwrap();

    for &entry in EntryPoint::ALL {
        assert_eq!(
            chain.front().proc_address(entry),
            global.resolve(entry),
            "{}",
            entry
        );
    }
}

#[test]
fn outer_layers_run_first() {
    let mut rng = rand::thread_rng();
    let trace = Arc::new(Mutex::new(Vec::new()));

    for _ in 0..16 {
        let len = rng.gen_range(1, 6);
        let mut names: Vec<_> = (0..len).map(|i| format!("tracer-{}", i)).collect();
        rng.shuffle(&mut names);

        let chain = Chain::build(driver(), &tracers(&names, &trace)).unwrap();
        assert_eq!(chain.layers(), names.iter().map(|v| &v[..]).collect::<Vec<_>>());

        trace.lock().unwrap().clear();
        let clears = CLEARS.load(Ordering::SeqCst);
        unsafe { chain.front().glClear(gl::COLOR_BUFFER_BIT) };

        assert_eq!(*trace.lock().unwrap(), names);
        assert!(CLEARS.load(Ordering::SeqCst) > clears);
    }
}

#[test]
fn disable_then_enable_restores_table() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let names: Vec<_> = ["a", "b", "c"].iter().map(|v| v.to_string()).collect();

    let ctx = Context::new(driver());
    for layer in tracers(&names, &trace) {
        ctx.attach(layer).unwrap();
    }

    ctx.attach(Arc::new(Statistics::with_entries(&[EntryPoint::Flush])))
        .unwrap();

    let before = ctx.chain();
    for name in &["a", "b", "c", Statistics::NAME] {
        ctx.disable(name).unwrap();
        assert_ne!(ctx.chain().table(), before.table());

        ctx.enable(name).unwrap();
        assert_eq!(ctx.chain().table(), before.table());
        assert_eq!(ctx.chain().layers(), before.layers());
    }

    for name in &["a", "b", "c", Statistics::NAME] {
        ctx.disable(name).unwrap();
    }

    assert_eq!(ctx.chain().table(), &DispatchTable::driver());
}

#[test]
fn hook_only_overridden_slots() {
    let global = driver();
    let layers: Vec<Arc<dyn Layer>> = vec![Arc::new(Log::with_entries(
        log::Level::Info,
        &[EntryPoint::Clear],
    ))];

    let chain = Chain::build(global.clone(), &layers).unwrap();
    let d0 = proc(draw_arrays as *const c_void);
    let d1 = proc(clear as *const c_void);

    // glDrawArrays still reaches the driver.
    assert_eq!(chain.table().get(EntryPoint::DrawArrays), Binding::Driver);
    assert_eq!(chain.front().proc_address(EntryPoint::DrawArrays), d0);

    // glClear reaches the log layer, which continues into the driver.
    let hook = Hook::observer(EntryPoint::Clear).proc().unwrap();
    assert_eq!(
        chain.table().get(EntryPoint::Clear),
        Binding::Hook {
            proc: hook,
            stage: 0
        }
    );

    let next = chain.next_table(0).unwrap();
    assert_eq!(next.get(EntryPoint::Clear), Binding::Driver);
    assert_eq!(chain.resolve(EntryPoint::Clear, next.get(EntryPoint::Clear)), d1);

    let (draws, clears) = (DRAWS.load(Ordering::SeqCst), CLEARS.load(Ordering::SeqCst));
    unsafe {
        chain.front().glDrawArrays(gl::TRIANGLES, 0, 3);
        chain.front().glClear(gl::COLOR_BUFFER_BIT);
    }

    assert!(DRAWS.load(Ordering::SeqCst) > draws);
    assert!(CLEARS.load(Ordering::SeqCst) > clears);
}

#[test]
fn repeated_entries() {
    let ctx = Context::new(driver());
    let entries = [EntryPoint::Clear, EntryPoint::DrawArrays, EntryPoint::Clear];
    let stats = Arc::new(Statistics::with_entries(&entries));

    ctx.attach(stats.clone()).unwrap();
    ctx.attach(Arc::new(Log::with_entries(log::Level::Trace, &entries)))
        .unwrap();
    assert_eq!(ctx.chain().layers(), vec![Statistics::NAME, Log::NAME]);

    unsafe { ctx.chain().front().glClear(gl::COLOR_BUFFER_BIT) };
    assert_eq!(stats.count(EntryPoint::Clear), 1);
    assert_eq!(stats.count(EntryPoint::DrawArrays), 0);
}
