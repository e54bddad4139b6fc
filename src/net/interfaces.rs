//! Local network interface inspection.
//!
//! # Responsibilities
//! - Enumerate local interfaces
//! - Select the first address matching a protocol family and internal flag
//!
//! # Design Decisions
//! - Selection is a pure function over an interface list, so it can be tested
//!   against a fixed list without touching the host's NICs
//! - Used only for the human-readable startup banner; never for binding

use std::net::IpAddr;

/// Requested protocol family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    fn matches(self, addr: &IpAddr) -> bool {
        match self {
            Self::V4 => addr.is_ipv4(),
            Self::V6 => addr.is_ipv6(),
        }
    }
}

/// One address of a local network interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iface {
    /// Interface name (e.g. "eth0", "lo").
    pub name: String,
    /// The address assigned to the interface.
    pub addr: IpAddr,
    /// Whether this is a loopback (internal) address.
    pub internal: bool,
}

/// Return the first address in `ifaces` matching the requested family and
/// internal flag.
pub fn first_address(ifaces: &[Iface], family: Family, internal: bool) -> Option<IpAddr> {
    ifaces
        .iter()
        .find(|iface| family.matches(&iface.addr) && iface.internal == internal)
        .map(|iface| iface.addr)
}

/// Enumerate the host's interfaces. Returns an empty list on failure; the
/// banner falls back to the bind host in that case.
pub fn system_interfaces() -> Vec<Iface> {
    if_addrs::get_if_addrs()
        .map(|addrs| {
            addrs
                .into_iter()
                .map(|iface| Iface {
                    internal: iface.is_loopback(),
                    addr: iface.ip(),
                    name: iface.name,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Iface> {
        vec![
            Iface {
                name: "lo".to_string(),
                addr: "127.0.0.1".parse().unwrap(),
                internal: true,
            },
            Iface {
                name: "eth0".to_string(),
                addr: "10.0.0.5".parse().unwrap(),
                internal: false,
            },
            Iface {
                name: "eth0".to_string(),
                addr: "fe80::1".parse().unwrap(),
                internal: false,
            },
        ]
    }

    #[test]
    fn external_ipv4_selected() {
        let addr = first_address(&fixture(), Family::V4, false);
        assert_eq!(addr, Some("10.0.0.5".parse().unwrap()));
    }

    #[test]
    fn internal_ipv4_selected() {
        let addr = first_address(&fixture(), Family::V4, true);
        assert_eq!(addr, Some("127.0.0.1".parse().unwrap()));
    }

    #[test]
    fn family_filter_applies() {
        let addr = first_address(&fixture(), Family::V6, false);
        assert_eq!(addr, Some("fe80::1".parse().unwrap()));
    }

    #[test]
    fn empty_list_yields_none() {
        assert_eq!(first_address(&[], Family::V4, false), None);
    }
}
