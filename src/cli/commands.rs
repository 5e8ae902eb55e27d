//! CLI argument definitions

use clap::{Parser, ValueEnum};

/// Discover the collection endpoints of a REST API
#[derive(Parser, Debug)]
#[command(name = "restscout", version, about)]
pub struct Cli {
    /// Base URL of the API to discover
    pub base_url: String,

    /// Header sent with every request (KEY=VALUE, repeatable)
    #[arg(long = "header", value_name = "KEY=VALUE")]
    pub headers: Vec<String>,

    /// Query parameter merged into every request (KEY=VALUE, repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Outbound request budget in requests per second (0 disables limiting)
    #[arg(long, default_value_t = 0.0)]
    pub rps: f64,

    /// Output format for the discovery result
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

/// Serialization format for the printed result
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}
