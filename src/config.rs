//! Command-line configuration.

use clap::builder::RangedU64ValueParser;
use clap::Parser;

/// Largest store channel capacity the CLI accepts.
pub const MAX_BUFFER_SIZE: u64 = 65_536;

/// In-memory product catalog served over HTTP/JSON.
#[derive(Debug, Clone, Parser)]
#[command(name = "product_service", version, about)]
pub struct ServiceConfig {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Capacity of the store actor's request channel
    #[arg(
        long,
        default_value_t = 32,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_BUFFER_SIZE)
    )]
    pub buffer_size: usize,

    /// Start with an empty catalog
    #[arg(long)]
    pub no_seed: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            buffer_size: 32,
            no_seed: false,
        }
    }
}
