//! Error types.

use derive_more::{Display, Error};

/// Errors that can occur when building an [`IpWhitelist`](crate::IpWhitelist) or
/// [`IpRanges`](crate::IpRanges).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum IpWhitelistError {
    /// No address ranges were configured.
    #[display("source range is empty, IP whitelist not created")]
    EmptySourceRange,

    /// An entry is neither an IP address nor a CIDR block.
    #[display("invalid IP address or CIDR block: {spec:?}")]
    InvalidRangeSpec {
        /// The offending entry, as configured.
        spec: String,
    },
}

impl IpWhitelistError {
    pub(crate) fn invalid_spec(spec: impl Into<String>) -> Self {
        Self::InvalidRangeSpec { spec: spec.into() }
    }

    /// Returns the configured entry that failed to parse, if that is the cause of this error.
    pub fn spec(&self) -> Option<&str> {
        match self {
            Self::InvalidRangeSpec { spec } => Some(spec),
            Self::EmptySourceRange => None,
        }
    }
}

/// Returned by [`IpRanges::is_authorized`](crate::IpRanges::is_authorized) when an address is not
/// in any of the configured ranges.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{addr} matched none of the trusted IPs")]
pub struct NotAuthorized {
    addr: String,
}

impl NotAuthorized {
    pub(crate) fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    /// Returns the rejected address, as it was given.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}
