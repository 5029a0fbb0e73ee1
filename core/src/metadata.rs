//! Third-party IP metadata (geolocation and organization).

use std::net::IpAddr;

use async_trait::async_trait;
use chk_common::error::FailureCause;
use chk_common::record::MetadataRecord;

pub mod ipinfo;

/// A service that knows where an address lives and who owns it.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch(&self, ip: IpAddr) -> Result<MetadataRecord, FailureCause>;
}
