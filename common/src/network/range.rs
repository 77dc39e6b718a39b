use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> usize {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if end < start {
            0
        } else {
            (end - start) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Usable host addresses of `network`.
///
/// A `/32` is the single host itself; anything larger drops the network and
/// broadcast addresses. Returns `None` when nothing is left (`/31`).
pub fn host_range(network: Ipv4Network) -> Option<Ipv4Range> {
    if network.prefix() == 32 {
        return Some(Ipv4Range::new(network.ip(), network.ip()));
    }

    let first: u32 = u32::from(network.network()).checked_add(1)?;
    let last: u32 = u32::from(network.broadcast()).checked_sub(1)?;
    if first > last {
        return None;
    }

    Some(Ipv4Range::new(Ipv4Addr::from(first), Ipv4Addr::from(last)))
}

/// True when the bit pattern is a run of leading ones followed only by zeros.
///
/// `0.0.0.0` and `255.255.255.255` both qualify, so an interface address with
/// such a pattern (e.g. `128.0.0.0`) is indistinguishable from a mask.
pub fn is_netmask(addr: Ipv4Addr) -> bool {
    let inverted: u32 = !u32::from(addr);
    inverted & inverted.wrapping_add(1) == 0
}

/// Prefix length of a netmask (count of set bits).
pub fn prefix_len(mask: Ipv4Addr) -> u8 {
    u32::from(mask).count_ones() as u8
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
