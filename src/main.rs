use log::{error, info};

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(landing_frontend::config::log_level()).expect("error initializing log");

    info!("Starting landing page script");
    if let Err(e) = landing_frontend::start() {
        error!("Landing page failed to start: {}", e);
    }
}
