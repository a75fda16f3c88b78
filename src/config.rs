use serde::{Deserialize, Serialize};

/// Deserializable configuration for an [`IpWhitelist`](crate::IpWhitelist).
///
/// # Examples
/// ```
/// use actix_web_ip_whitelist::{IpWhitelist, IpWhitelistConfig};
///
/// let config = IpWhitelistConfig::new(["10.0.0.0/8", "192.168.1.7"]);
/// let mw = IpWhitelist::from_config(&config, "internal").unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpWhitelistConfig {
    /// IP addresses and CIDR blocks that are allowed through.
    #[serde(alias = "source_range")]
    pub source_range: Vec<String>,
}

impl IpWhitelistConfig {
    /// Constructs config from a list of addresses and CIDR blocks.
    pub fn new<I, S>(source_range: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_range: source_range.into_iter().map(Into::into).collect(),
        }
    }
}
