//! Storefront application module: favorites cache, persistence, rendering and
//! the interactive browser runtime.

pub mod favorites;
/// Persistence of the favorites cache.
pub mod persist;
pub mod render;
/// Session, workers and event loop of the interactive browser.
pub mod runtime;

// Re-export the public entrypoint so callers keep using `app::run(...)`.
pub use runtime::run;
