use pnet::util::MacAddr;

/// Builds a MAC address from a raw `ifPhysAddress` value.
///
/// Only 6-octet values are hardware addresses; empty values (loopback,
/// tunnels) and other lengths yield `None`.
pub fn mac_from_octets(octets: &[u8]) -> Option<MacAddr> {
    match *octets {
        [a, b, c, d, e, f] => Some(MacAddr::new(a, b, c, d, e, f)),
        _ => None,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_octets_render_lowercase_colon_hex() {
        let mac = mac_from_octets(&[0xAA, 0xBB, 0xCC, 0x00, 0x11, 0x22]).unwrap();
        assert_eq!(mac.to_string(), "aa:bb:cc:00:11:22");
    }

    #[test]
    fn test_other_lengths_are_rejected() {
        assert_eq!(mac_from_octets(&[]), None);
        assert_eq!(mac_from_octets(&[1, 2, 3, 4, 5]), None);
        assert_eq!(mac_from_octets(&[0; 8]), None);
    }
}
