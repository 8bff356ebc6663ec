mod app;
mod behavior;
mod creature;
mod geometry;
mod input;
mod overlay;
mod render;
mod sim;

fn main() {
    env_logger::init();
    log::info!("Tentacles starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
