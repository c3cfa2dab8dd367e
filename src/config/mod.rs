// Configuration module
// Public interface for configuration loading

mod loader;
pub mod persona;
mod settings;

pub use loader::{load_config, load_from_file};
pub use persona::Persona;
pub use settings::{Config, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PERSONA};
