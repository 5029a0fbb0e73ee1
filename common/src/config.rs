use std::time::Duration;

use crate::network::address::FamilyFilter;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_API_URL: &str = "https://ipinfo.io";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// What to do with already collected results when the run is cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartialPolicy {
    /// Print nothing.
    #[default]
    Discard,
    /// Print what was collected, then report the cancellation.
    Print,
}

pub struct Config {
    /// Restricts the lookup to one address family.
    pub filter: FamilyFilter,

    /// Upper bound for each network sub-lookup (reverse DNS and metadata fetch).
    pub timeout: Duration,

    /// Cancels the whole run once elapsed, like an interrupt would.
    pub deadline: Option<Duration>,

    /// How often the progress line is redrawn.
    pub progress_interval: Duration,

    pub partial: PartialPolicy,

    /// Emit ANSI colors in the report.
    pub colorize: bool,

    /// Base URL of the IP information service.
    pub api_url: String,

    /// Bearer token for the IP information service.
    pub api_token: Option<String>,

    /// Capacity of the result handoff channel. Values below 1 are raised to 1.
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter: FamilyFilter::Both,
            timeout: DEFAULT_TIMEOUT,
            deadline: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            partial: PartialPolicy::Discard,
            colorize: false,
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
