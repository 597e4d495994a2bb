//! Tracing setup shared by the binaries.

use tracing_subscriber::{fmt, EnvFilter};

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Install a global fmt subscriber. `RUST_LOG` wins over `default_level` when set.
pub fn init(default_level: &str) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;
    fmt().with_env_filter(filter).with_target(true).try_init()
}
