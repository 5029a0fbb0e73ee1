use std::fmt;
use std::net::IpAddr;

/// IP family of a resolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// DNS record type that carries this family.
    pub fn record_type(self) -> &'static str {
        match self {
            Family::V4 => "A",
            Family::V6 => "AAAA",
        }
    }
}

/// A resolved address plus its family flag.
///
/// IPv4-mapped IPv6 addresses are stored in their IPv4 form, so
/// `::ffff:8.8.8.8` and `8.8.8.8` are the same `Address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    pub family: Family,
    pub ip: IpAddr,
}

impl Address {
    pub fn new(ip: IpAddr) -> Self {
        let ip = ip.to_canonical();
        let family = match ip {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        };
        Self { family, ip }
    }

    pub fn is_ipv6(&self) -> bool {
        self.family == Family::V6
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        Address::new(ip)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)
    }
}

/// Which address families should be looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FamilyFilter {
    #[default]
    Both,
    V4Only,
    V6Only,
}

impl FamilyFilter {
    /// Builds a filter from the `-4` / `-6` switches.
    ///
    /// Asking for both families explicitly is the same as asking for neither.
    pub fn from_flags(ipv4: bool, ipv6: bool) -> Self {
        match (ipv4, ipv6) {
            (true, false) => FamilyFilter::V4Only,
            (false, true) => FamilyFilter::V6Only,
            _ => FamilyFilter::Both,
        }
    }

    pub fn selects(self, family: Family) -> bool {
        match self {
            FamilyFilter::Both => true,
            FamilyFilter::V4Only => family == Family::V4,
            FamilyFilter::V6Only => family == Family::V6,
        }
    }
}
