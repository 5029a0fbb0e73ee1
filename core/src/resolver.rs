//! The address resolver adapter.
//!
//! Turns a [`Target`] into the set of candidate [`Address`]es, and defines the
//! two DNS seams the rest of the pipeline depends on. Concrete resolvers live
//! in submodules ([`hickory`] talks to the system's configured nameservers).

use std::collections::HashSet;
use std::net::IpAddr;

use async_trait::async_trait;
use chk_common::error::{ChkError, FailureCause};
use chk_common::network::address::Address;
use chk_common::network::target::Target;
use tracing::debug;

pub mod hickory;

/// Forward resolution: name to addresses.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Returns every address the name resolves to, or a human readable reason.
    async fn lookup_ip(&self, name: &str) -> Result<Vec<IpAddr>, String>;
}

/// Reverse resolution: address to PTR names.
#[async_trait]
pub trait ReverseResolver: Send + Sync {
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Vec<String>, FailureCause>;
}

/// Resolves the target into candidate addresses.
///
/// A literal address is returned as is, without touching the network.
/// Duplicates are dropped while keeping the resolver's order.
pub async fn resolve_target(
    target: &Target,
    resolver: &dyn NameResolver,
) -> Result<Vec<Address>, ChkError> {
    let name = match target {
        Target::Literal { addr } => return Ok(vec![Address::new(*addr)]),
        Target::Name { name } => name,
    };

    if target.is_numeric_name() {
        return Err(resolution_error(name, "malformed IP address"));
    }

    debug!("Resolving {name}");
    let ips = resolver
        .lookup_ip(name)
        .await
        .map_err(|reason| resolution_error(name, &reason))?;

    let mut seen: HashSet<Address> = HashSet::new();
    let addresses: Vec<Address> = ips
        .into_iter()
        .map(Address::new)
        .filter(|address| seen.insert(*address))
        .collect();

    if addresses.is_empty() {
        return Err(resolution_error(name, "no addresses found"));
    }

    debug!("{name} resolved to {} addresses", addresses.len());
    Ok(addresses)
}

fn resolution_error(name: &str, reason: &str) -> ChkError {
    ChkError::Resolution {
        target: name.to_string(),
        reason: reason.to_string(),
    }
}
