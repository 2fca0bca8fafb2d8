use get_if_addrs::get_if_addrs;
use std::net::UdpSocket;

/// Guesses the local IP address of this machine.
///
/// Binds a UDP socket and "connects" it to a public DNS server, then asks
/// the OS which local address would be used for that route. UDP being
/// connectionless, no packet is actually sent.
///
/// Falls back to the first non-loopback IPv4 interface address, and to
/// `127.0.0.1` when no usable interface exists.
///
/// # Examples
///
/// ```
/// let ip = musoutils::guess_local_ip();
/// assert!(!ip.is_empty());
/// ```
pub fn guess_local_ip() -> String {
    if let Ok(socket) = UdpSocket::bind("0.0.0.0:0") {
        if socket.connect("8.8.8.8:80").is_ok() {
            if let Ok(local_addr) = socket.local_addr() {
                return local_addr.ip().to_string();
            }
        }
    }

    first_interface_ip().unwrap_or_else(|| "127.0.0.1".to_string())
}

/// First non-loopback IPv4 address found on any interface.
fn first_interface_ip() -> Option<String> {
    let interfaces = get_if_addrs().ok()?;
    interfaces
        .into_iter()
        .map(|iface| iface.ip())
        .find(|ip| ip.is_ipv4() && !ip.is_loopback())
        .map(|ip| ip.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn guess_local_ip_is_parseable() {
        let ip = guess_local_ip();
        assert!(ip.parse::<IpAddr>().is_ok(), "not a valid IP: {}", ip);
    }

    #[test]
    fn guess_local_ip_is_ipv4() {
        let ip = guess_local_ip().parse::<IpAddr>().unwrap();
        assert!(ip.is_ipv4());
    }

    #[test]
    fn interface_fallback_skips_loopback() {
        if let Some(ip) = first_interface_ip() {
            let parsed = ip.parse::<IpAddr>().unwrap();
            assert!(!parsed.is_loopback());
        }
    }
}
