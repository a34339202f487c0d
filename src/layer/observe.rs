//! Observer hooks: for every entry point, a hook that notifies `Layer::observe` of
//! its layer and continues down the chain with the same arguments.

use gl::types::*;
#[allow(unused_imports)]
use std::os::raw::c_void;

use crate::registry::{EntryPoint, ENTRY_POINT_COUNT};

use super::{Dispatch, Hook};

macro_rules! declare_observers {
    ($($variant:ident : fn $name:ident ( $($arg:ident : $ty:ty),* ) $(-> $ret:ty)? ;)+) => {
        #[allow(non_snake_case)]
        mod hooks {
            use super::*;

            $(
                pub unsafe fn $name(next: &Dispatch<'_>, $($arg: $ty),*) $(-> $ret)? {
                    next.observe(EntryPoint::$variant);
                    next.$name($($arg),*)
                }
            )+
        }

        impl Hook {
            /// Returns a hook on `entry` notifying `Layer::observe` of the owning
            /// layer, then continuing to the next link.
            pub fn observer(entry: EntryPoint) -> Hook {
                match entry {
                    $(EntryPoint::$variant => Hook::$name(hooks::$name),)+
                }
            }
        }
    };
}

for_each_entry_point!(declare_observers);

/// Returns observer hooks on `entries`, or on every entry point if `None`.
pub fn observers(entries: Option<&[EntryPoint]>) -> Vec<Hook> {
    entries
        .unwrap_or(EntryPoint::ALL)
        .iter()
        .map(|&v| Hook::observer(v))
        .collect()
}

/// Returns `entries` without repetitions, in order of first appearance.
pub(crate) fn distinct(entries: &[EntryPoint]) -> Vec<EntryPoint> {
    let mut seen = vec![false; ENTRY_POINT_COUNT];
    entries
        .iter()
        .cloned()
        .filter(|v| !std::mem::replace(&mut seen[v.index()], true))
        .collect()
}
