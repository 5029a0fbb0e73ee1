use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use chk_common::error::FailureCause;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{LookupIpStrategy, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::system_conf;
use tracing::warn;

use super::{NameResolver, ReverseResolver};

/// DNS resolver backed by the system's nameserver configuration.
pub struct HickoryResolver {
    inner: TokioAsyncResolver,
    timeout: Duration,
}

impl HickoryResolver {
    /// Builds a resolver from `/etc/resolv.conf` (or the platform equivalent).
    ///
    /// Falls back to hickory's default upstreams if the system configuration
    /// can't be read. `timeout` bounds every single query.
    pub fn from_system_conf(timeout: Duration) -> Self {
        let (config, opts) = match system_conf::read_system_conf() {
            Ok(conf) => conf,
            Err(e) => {
                warn!("Could not read system resolver config, using defaults: {e}");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };

        Self {
            inner: TokioAsyncResolver::tokio(config, resolver_opts(opts, timeout)),
            timeout,
        }
    }

    fn to_cause(&self, e: ResolveError) -> FailureCause {
        match e.kind() {
            ResolveErrorKind::Timeout => FailureCause::TimedOut(self.timeout),
            ResolveErrorKind::NoRecordsFound { .. } => {
                FailureCause::Failed("no PTR records found".to_string())
            }
            _ => FailureCause::Failed(e.to_string()),
        }
    }
}

/// Query A and AAAA together so dual-stack names yield both families.
fn resolver_opts(mut opts: ResolverOpts, timeout: Duration) -> ResolverOpts {
    opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    opts.timeout = timeout;
    opts.attempts = 1;
    opts
}

#[async_trait]
impl NameResolver for HickoryResolver {
    async fn lookup_ip(&self, name: &str) -> Result<Vec<IpAddr>, String> {
        let response = self.inner.lookup_ip(name).await.map_err(|e| e.to_string())?;
        Ok(response.iter().collect())
    }
}

#[async_trait]
impl ReverseResolver for HickoryResolver {
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Vec<String>, FailureCause> {
        let response = self
            .inner
            .reverse_lookup(ip)
            .await
            .map_err(|e| self.to_cause(e))?;
        Ok(response.iter().map(|name| name.to_utf8()).collect())
    }
}
