//! Layered run configuration: CLI flags, `--set` overrides, the TOML file and
//! built-in defaults, in that order of precedence.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
