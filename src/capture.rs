//! Panic output capture while examples run.
//!
//! Failed assertions panic, and the default panic hook would print every one
//! of them to stderr in the middle of the run. The first
//! [`PanicCaptureGuard`] installs a hook that stays for the rest of the
//! process. On a thread that holds a guard, the hook prints nothing and only
//! remembers where the last panic happened, so the failure can carry that
//! location. Panics on every other thread go to the hook that was installed
//! before.

use std::{
    cell::{Cell, RefCell},
    marker::PhantomData,
    panic::{self, PanicHookInfo},
    sync::Once,
};

thread_local! {
    static CAPTURING: Cell<usize> = const { Cell::new(0) };
    static LAST_PANIC_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |panic_hook_info: &PanicHookInfo<'_>| {
            if CAPTURING.get() == 0 {
                return previous(panic_hook_info);
            }

            let location = panic_hook_info
                .location()
                .map(|location| location.to_string());
            LAST_PANIC_LOCATION.with_borrow_mut(|last| *last = location);
        }));
    });
}

/// Captures panics on the current thread until dropped.
///
/// Guards nest. Dropping one never touches the process panic hook, so it is
/// fine for a guard to go out of scope while its thread unwinds.
#[derive(Debug)]
pub struct PanicCaptureGuard {
    // The capture flag is thread local, the guard has to stay on its thread.
    _not_send: PhantomData<*const ()>,
}

impl PanicCaptureGuard {
    pub fn install() -> Self {
        install_hook();
        CAPTURING.set(CAPTURING.get() + 1);

        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for PanicCaptureGuard {
    fn drop(&mut self) {
        CAPTURING.set(CAPTURING.get().saturating_sub(1));
    }
}

pub(crate) fn clear_panic_location() {
    LAST_PANIC_LOCATION.with_borrow_mut(|last| *last = None);
}

pub(crate) fn take_panic_location() -> Option<String> {
    LAST_PANIC_LOCATION.with_borrow_mut(Option::take)
}
