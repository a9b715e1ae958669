//! Browser side of the wedding site.
//!
//! Pure state (`state`, `util`) compiles everywhere and is tested natively.
//! DOM glue (`dom`, `loader`) and the wasm entry point need the `hydrate`
//! feature.

#[cfg(feature = "hydrate")]
pub mod dom;
#[cfg(feature = "hydrate")]
pub mod loader;
pub mod state;
pub mod util;

/// Wasm entry point: route panics and `tracing` output to the console.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
