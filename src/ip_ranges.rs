//! Compiled sets of IP addresses and CIDR blocks.

use std::{
    net::{IpAddr, SocketAddr},
    slice,
};

use ipnetwork::IpNetwork;

use crate::{IpWhitelistError, NotAuthorized};

/// An immutable set of IP networks that can be queried for address membership.
///
/// Built from textual entries that are each either a single address (`"10.0.0.1"`, `"::1"`) or a
/// CIDR block (`"10.0.0.0/8"`, `"fd00::/8"`). Single addresses are stored as `/32` or `/128`
/// networks and host bits of CIDR blocks are cleared, so `"10.1.2.3/8"` and `"10.0.0.0/8"` compile
/// to the same network.
///
/// # Examples
/// ```
/// use actix_web_ip_whitelist::IpRanges;
///
/// let ranges = IpRanges::compile(["20.20.20.0/24", "2001:db8::1"]).unwrap();
///
/// assert!(ranges.contains("20.20.20.255".parse().unwrap()));
/// assert!(!ranges.contains("20.20.21.0".parse().unwrap()));
/// assert!(ranges.contains_addr("[2001:db8::1]:443"));
/// assert!(!ranges.contains_addr("not-an-ip"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRanges {
    networks: Vec<IpNetwork>,
}

impl IpRanges {
    /// Parses every entry and collects them into a set.
    ///
    /// Fails on the first entry that is not a valid address or CIDR block, naming that entry in the
    /// error. An empty list of entries is also an error, as is any whitespace around an entry.
    pub fn compile<I, S>(specs: I) -> Result<Self, IpWhitelistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let networks = specs
            .into_iter()
            .map(|spec| parse_range(spec.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if networks.is_empty() {
            return Err(IpWhitelistError::EmptySourceRange);
        }

        Ok(Self { networks })
    }

    /// Returns true if `ip` is inside any of the networks.
    ///
    /// An IPv4 address never matches an IPv6 network, and vice versa. This includes IPv4-mapped
    /// IPv6 addresses like `::ffff:10.0.0.1`.
    pub fn contains(&self, ip: IpAddr) -> bool {
        self.networks.iter().any(|net| net.contains(ip))
    }

    /// Returns true if the address in `addr` is inside any of the networks.
    ///
    /// `addr` may be a bare address or carry a port (`"1.2.3.4:80"`, `"[::1]:80"`). Anything that
    /// does not parse as an IP address is not contained.
    pub fn contains_addr(&self, addr: &str) -> bool {
        parse_host(addr).is_some_and(|ip| self.contains(ip))
    }

    /// Checks `addr` against the set, returning its parsed IP address when contained.
    pub fn is_authorized(&self, addr: &str) -> Result<IpAddr, NotAuthorized> {
        match parse_host(addr) {
            Some(ip) if self.contains(ip) => Ok(ip),
            _ => Err(NotAuthorized::new(addr)),
        }
    }

    /// Returns an iterator over the compiled networks, in configuration order.
    pub fn iter(&self) -> slice::Iter<'_, IpNetwork> {
        self.networks.iter()
    }

    /// Returns number of compiled networks.
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    /// Returns true if there are no networks.
    ///
    /// Always false for sets created with [`compile`](Self::compile).
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

impl<'a> IntoIterator for &'a IpRanges {
    type Item = &'a IpNetwork;
    type IntoIter = slice::Iter<'a, IpNetwork>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parses a single address or CIDR block into a normalized network.
fn parse_range(spec: &str) -> Result<IpNetwork, IpWhitelistError> {
    let invalid = || IpWhitelistError::invalid_spec(spec);

    let (addr, prefix) = match spec.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (spec, None),
    };

    let ip = addr.parse::<IpAddr>().map_err(|_| invalid())?;

    let prefix = match prefix {
        None if ip.is_ipv4() => 32,
        None => 128,

        // u8's FromStr would also accept a leading `+`
        Some(prefix) if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) => {
            prefix.parse::<u8>().map_err(|_| invalid())?
        }

        Some(_) => return Err(invalid()),
    };

    // prefix lengths wider than the address family are rejected here
    let net = IpNetwork::new(ip, prefix).map_err(|_| invalid())?;

    IpNetwork::new(net.network(), prefix).map_err(|_| invalid())
}

/// Extracts the IP address from `host`, `host:port`, `[host]` or `[host]:port` forms.
fn parse_host(addr: &str) -> Option<IpAddr> {
    if let Ok(ip) = addr.parse::<IpAddr>() {
        return Some(ip);
    }

    if let Ok(sock) = addr.parse::<SocketAddr>() {
        return Some(sock.ip());
    }

    addr.strip_prefix('[')?.strip_suffix(']')?.parse().ok()
}
