mod settings;

pub use settings::{AudioConfig, Config, ConfigError, TimingConfig, EXAMPLE_CONFIG};
