#![warn(unused_crate_dependencies)]

#[cfg(target_arch = "wasm32")]
mod suppress_wasm_warnings {
    // Only used in binary and triggers unused warning
    use wasm_bindgen_futures as _;
    use web_sys as _;
}

mod app;
pub mod background_worker;
pub mod cli;
mod pages;
pub mod tracing;
mod ui_helpers;

pub use app::{AdminApp, DataShared};
pub use pages::DisplayablePage;
pub use pages::UiPage;

/// Function is here to ensure lib also uses the log crate to prevent the warning that it is not used
#[cfg(target_arch = "wasm32")]
pub fn wasm_log_level() -> log::LevelFilter {
    log::LevelFilter::Debug
}
