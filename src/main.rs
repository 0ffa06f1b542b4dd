#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    // Open the desktop preview
    portfolio_fx::run_app()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point is `portfolio_fx::web::start`.
}
