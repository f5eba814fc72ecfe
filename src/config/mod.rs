#[allow(clippy::module_inception)]
pub mod config;

pub use config::{
    load_env_file, Config, DispatchConfig, EmptyTeamsPolicy, LogConfig, NaisApiConfig, Secret, SlackConfig,
};
