//! Per-address output of a lookup.

use serde::Deserialize;

use crate::error::CompositeError;
use crate::network::address::{Address, Family};

/// Geolocation and ownership data for one address, as served by
/// `GET https://ipinfo.io/<ip>/json`.
///
/// Missing fields decode as empty strings; the service omits most of them
/// for bogon addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MetadataRecord {
    pub ip: String,
    pub hostname: String,
    pub city: String,
    pub region: String,
    pub country: String,
    /// "lat,long"
    pub loc: String,
    pub org: String,
}

/// The aggregated outcome for one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub address: Address,
    pub ptr: Vec<String>,
    pub metadata: Option<MetadataRecord>,
    pub error: Option<CompositeError>,
}

impl LookupResult {
    pub fn family(&self) -> Family {
        self.address.family
    }

    pub fn is_ipv6(&self) -> bool {
        self.address.is_ipv6()
    }
}
