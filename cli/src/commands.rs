pub mod lookup;

use std::time::Duration;

use chk_common::config::{Config, DEFAULT_API_URL, DEFAULT_CHANNEL_CAPACITY, PartialPolicy};
use chk_common::network::address::FamilyFilter;
use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(name = "chk", version)]
#[command(about = "Extended DNS check: A/AAAA, PTR and IP information for a domain or address.")]
pub struct CommandLine {
    /// Domain, subdomain or IP address to check
    pub target: String,

    /// Show only IPv4 (A) records
    #[arg(short = '4', long = "ipv4")]
    pub ipv4: bool,

    /// Show only IPv6 (AAAA) records
    #[arg(short = '6', long = "ipv6")]
    pub ipv6: bool,

    /// Timeout for each reverse lookup and IP info request, in seconds
    #[arg(short, long, default_value = "5", value_parser = parse_seconds)]
    pub timeout: Duration,

    /// Give up on the whole run after this many seconds
    #[arg(long, value_parser = parse_seconds)]
    pub deadline: Option<Duration>,

    /// Progress refresh period, in milliseconds
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    pub progress_interval: u64,

    /// Print the records collected so far when interrupted
    #[arg(long)]
    pub partial: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Base URL of the IP information service
    #[arg(long, env = "CHK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Access token for the IP information service
    #[arg(long, env = "IPINFO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let colorize =
            !self.no_color && std::env::var_os("NO_COLOR").is_none() && console::colors_enabled();

        Config {
            filter: FamilyFilter::from_flags(self.ipv4, self.ipv6),
            timeout: self.timeout,
            deadline: self.deadline,
            progress_interval: Duration::from_millis(self.progress_interval),
            partial: if self.partial {
                PartialPolicy::Print
            } else {
                PartialPolicy::Discard
            },
            colorize,
            api_url: self.api_url.clone(),
            api_token: self.token.clone(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number of seconds"))?;
    if secs <= 0.0 {
        return Err("duration must be greater than zero".to_string());
    }
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}
