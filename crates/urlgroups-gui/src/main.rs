use urlgroups_core::config::{self, AppConfig};
use urlgroups_core::logging;

mod app;
mod dialogs;
mod popup;

fn main() -> Result<(), eframe::Error> {
    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    let cfg = config::load_or_init().unwrap_or_else(|err| {
        tracing::warn!("could not load config, using defaults: {:#}", err);
        AppConfig::default()
    });
    tracing::debug!("loaded config: {:?}", cfg);

    app::run(cfg)
}
