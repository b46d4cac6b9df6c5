#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

use serde::{Deserialize, Serialize};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use tracing::*;

const DEFAULT_FILTER: &str = "info,sqlx=warn";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Emit one JSON object per event instead of human readable lines.
    #[serde(default = "default_json")]
    pub json: bool,
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json: default_json(),
            filter: default_filter(),
        }
    }
}

fn default_service_name() -> String {
    "satwatch-dev".to_string()
}

fn default_json() -> bool {
    true
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

pub fn init_tracer(config: TracingConfig) -> anyhow::Result<()> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))?;
    let registry = tracing_subscriber::registry().with(filter_layer);
    if config.json {
        registry
            .with(fmt::layer().json().flatten_event(true))
            .try_init()?;
    } else {
        registry.with(fmt::layer().pretty()).try_init()?;
    }
    tracing::info!(service_name = %config.service_name, "tracing initialised");

    Ok(())
}
