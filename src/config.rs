use std::time::Duration;

use clap::Parser;
use reqwest::Url;

/// Default REST collaborator: the public mock API the directory was built against.
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default capacity of the directory service's request channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Parser)]
#[command(name = "user-directory")]
#[command(about = "Browse, edit and delete users served by a REST endpoint", long_about = None)]
pub struct Config {
    /// Base URL of the REST API; `/users` is appended
    #[arg(long, env = "USER_DIRECTORY_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "USER_DIRECTORY_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Capacity of the directory service's request channel
    #[arg(
        long,
        default_value_t = DEFAULT_CHANNEL_CAPACITY,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub channel_capacity: usize,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
