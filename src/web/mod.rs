//! Browser host (WASM only).
//!
//! - `dom` - `Surface`, frame scheduler and theme store over `web-sys`
//! - `logging` - console backend for the `log` facade
//! - `page` - the `PortfolioFx` component exported to JavaScript

mod dom;
mod logging;
mod page;

pub use dom::{element_info, DomSurface, LocalThemeStore, RafScheduler};
pub use page::PortfolioFx;

use wasm_bindgen::prelude::*;

/// Installs the panic hook and console logging when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}
