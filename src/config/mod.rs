pub mod attributes;
pub mod config_load;
pub mod config_types;

pub use attributes::AttrMap;
pub use config_load::{Config, ConfigError};
pub use config_types::{AppConfig, ItemDef, MarqueeDef, StripDef, StyleConfig, WindowConfig};
