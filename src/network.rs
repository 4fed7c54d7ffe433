//! Address enumeration for a CIDR block
//!
//! Thin wrapper around `ipnet` that turns a CIDR string into the ordered
//! address list the scanner consumes, plus the netmask/gateway/broadcast
//! metadata shown in the report header.

use ipnet::Ipv4Net;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::{Result, SweepError};

/// A parsed CIDR block and every address inside it, ascending
#[derive(Debug, Clone)]
pub struct Network {
    cidr: Ipv4Net,
    addresses: Vec<Ipv4Addr>,
}

impl Network {
    /// Parse a CIDR string into a network. A bare address without a prefix is
    /// treated as a /32; host bits in the base address are truncated away.
    pub fn parse(input: &str) -> Result<Self> {
        let spec = if input.contains('/') {
            input.to_string()
        } else {
            format!("{input}/32")
        };

        let net = Ipv4Net::from_str(&spec)
            .map_err(|e| SweepError::invalid_network(input, e.to_string()))?;
        let cidr = net.trunc();

        let start = u32::from(cidr.network());
        let end = u32::from(cidr.broadcast());
        let addresses = (start..=end).map(Ipv4Addr::from).collect();

        Ok(Self { cidr, addresses })
    }

    /// Every address in the block, ascending, network and broadcast included.
    /// The sweep probes all of them.
    pub fn addresses(&self) -> &[Ipv4Addr] {
        &self.addresses
    }

    /// The truncated block, e.g. `172.31.219.80/28`
    pub fn cidr(&self) -> Ipv4Net {
        self.cidr
    }

    pub fn netmask(&self) -> Ipv4Addr {
        self.cidr.netmask()
    }

    /// First usable address (base + 1). /31 and /32 blocks have no
    /// distinguishable gateway.
    pub fn gateway(&self) -> Option<Ipv4Addr> {
        if self.cidr.prefix_len() <= 30 {
            self.addresses.get(1).copied()
        } else {
            None
        }
    }

    /// Broadcast address; /31 and /32 blocks have none
    pub fn broadcast(&self) -> Option<Ipv4Addr> {
        if self.cidr.prefix_len() <= 30 {
            Some(self.cidr.broadcast())
        } else {
            None
        }
    }

    pub fn first_octet(&self) -> u8 {
        self.cidr.network().octets()[3]
    }

    pub fn last_octet(&self) -> u8 {
        self.cidr.broadcast().octets()[3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash28_enumerates_whole_block() {
        let network = Network::parse("172.31.219.80/28").unwrap();
        let addrs = network.addresses();
        assert_eq!(addrs.len(), 16);
        assert_eq!(addrs[0], Ipv4Addr::new(172, 31, 219, 80));
        assert_eq!(addrs[15], Ipv4Addr::new(172, 31, 219, 95));
        assert_eq!(network.first_octet(), 80);
        assert_eq!(network.last_octet(), 95);
        assert_eq!(network.netmask(), Ipv4Addr::new(255, 255, 255, 240));
        assert_eq!(network.gateway(), Some(Ipv4Addr::new(172, 31, 219, 81)));
        assert_eq!(network.broadcast(), Some(Ipv4Addr::new(172, 31, 219, 95)));
    }

    #[test]
    fn test_host_bits_truncated() {
        let network = Network::parse("172.31.219.94/28").unwrap();
        assert_eq!(network.cidr().to_string(), "172.31.219.80/28");
        assert_eq!(network.addresses().len(), 16);
    }

    #[test]
    fn test_bare_address_is_slash32() {
        let network = Network::parse("10.0.0.7").unwrap();
        assert_eq!(network.addresses(), &[Ipv4Addr::new(10, 0, 0, 7)]);
        assert_eq!(network.gateway(), None);
        assert_eq!(network.broadcast(), None);
    }

    #[test]
    fn test_slash31_has_no_gateway_or_broadcast() {
        let network = Network::parse("10.0.0.0/31").unwrap();
        assert_eq!(network.addresses().len(), 2);
        assert_eq!(network.gateway(), None);
        assert_eq!(network.broadcast(), None);
    }

    #[test]
    fn test_invalid_cidr_rejected() {
        let err = Network::parse("not-an-ip/40").unwrap_err();
        assert!(matches!(err, SweepError::InvalidNetwork { .. }));

        assert!(Network::parse("10.0.0.0/33").is_err());
        assert!(Network::parse("").is_err());
    }
}
