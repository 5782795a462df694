pub mod pagebar;
pub mod shared;

pub use pagebar::*;
pub use shared::{initialize, MountedPageBar};

/// Route `log` output to the browser console and install the panic hook.
pub fn init_logging(level: log::Level) {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();
}
