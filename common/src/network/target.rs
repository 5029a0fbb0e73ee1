//! # Lookup Target Model
//!
//! Defines the possible inputs for a lookup.
//!
//! A target is either:
//! * A literal IPv4 or IPv6 address.
//! * A domain or subdomain name that still has to be resolved.
//!
//! Parsing only checks syntax. Whether a name actually resolves is decided
//! later by the resolver adapter.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::ChkError;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Represents the single thing the user asked us to check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// A literal address, no resolution needed.
    Literal { addr: IpAddr },
    /// A domain name, kept without the optional trailing dot.
    Name { name: String },
}

impl Target {
    /// Returns `true` if every label of the name is numeric.
    ///
    /// Such names look like a mistyped IPv4 literal (`1.2.3.999`) rather than
    /// a real domain and are never sent to a resolver.
    pub fn is_numeric_name(&self) -> bool {
        match self {
            Target::Literal { .. } => false,
            Target::Name { name } => name
                .split('.')
                .all(|label| label.bytes().all(|b| b.is_ascii_digit())),
        }
    }
}

impl FromStr for Target {
    type Err = ChkError;

    /// Parses a string into a `Target`.
    ///
    /// Supported formats:
    /// * **Literal**: IPv4 or IPv6 address (e.g., "8.8.8.8", "2001:4860::8888").
    /// * **Name**: A hostname made of LDH labels, optionally ending in '.'.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(target) = parse_literal(s) {
            return Ok(target);
        }

        if let Some(target) = parse_name(s) {
            return Ok(target);
        }

        Err(ChkError::InvalidTarget(s.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Literal { addr } => write!(f, "{addr}"),
            Target::Name { name } => f.write_str(name),
        }
    }
}

/// Parses a single IP address.
fn parse_literal(s: &str) -> Option<Target> {
    s.parse::<IpAddr>().ok().map(|addr| Target::Literal { addr })
}

/// Parses a domain name like "example.com" or "www.example.com.".
fn parse_name(s: &str) -> Option<Target> {
    let name = s.strip_suffix('.').unwrap_or(s);

    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return None;
    }

    if !name.split('.').all(is_valid_label) {
        return None;
    }

    Some(Target::Name {
        name: name.to_ascii_lowercase(),
    })
}

// Underscores show up in service names (_dmarc, _sip) and resolvers accept them.
fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
