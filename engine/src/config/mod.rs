mod config_content_provider;
mod config_manager;
mod config_serializer;
mod engine_config;
mod validate;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider, InMemoryConfigProvider};
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};
pub use engine_config::{AiConfig, EngineConfig, SessionConfig};
pub use validate::Validate;
