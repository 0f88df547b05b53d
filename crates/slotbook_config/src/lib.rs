// --- File: crates/slotbook_config/src/lib.rs ---
pub mod env_vars;
pub mod loader;
pub mod models;

pub use loader::{ensure_dotenv_loaded, load_config, load_config_from_dir, ConfigLoadError};
pub use models::*;
