pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod notification;
pub mod processing;
pub mod session;
pub mod state;
pub use error::{AppError, AppResult};
pub use session::{EditorSession, SessionError};

/// Entrypoint used by host UIs: loads `config.json` and installs logging.
pub fn bootstrap() -> config::AppConfig {
    let config = config::load_app_config();
    logging::init(config.debug_logging);
    tracing::info!(api = %config.api_base_url, "starting gallery annotator");
    config
}
