//! TCP liveness check
//!
//! The driver retries server selection for a long time before giving up.
//! A plain TCP connect fails fast and gives the operator a clearer error.

use crate::errors::{unreachable, Result};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Port assumed when the host names none
pub const DEFAULT_PORT: u16 = 27017;

/// `host` with the default port appended when it carries none
pub fn with_default_port(host: &str) -> String {
    let has_port = match host.strip_prefix('[') {
        // Bracketed IPv6: a port follows the closing bracket
        Some(rest) => rest.contains("]:"),
        None => host.contains(':'),
    };
    if has_port {
        host.to_string()
    } else {
        format!("{}:{}", host, DEFAULT_PORT)
    }
}

/// Open and close one TCP connection to the host
///
/// Returns the address that accepted the connection.
///
/// # Errors
///
/// `Connectivity` when the host does not resolve or no address accepts a
/// connection within `timeout`.
pub fn probe(host: &str, timeout: Duration) -> Result<SocketAddr> {
    let target = with_default_port(host);
    let addrs = target
        .to_socket_addrs()
        .map_err(|e| unreachable(host, e))?;

    let mut last_error = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(_) => {
                tracing::debug!(host = %host, addr = %addr, "liveness probe succeeded");
                return Ok(addr);
            }
            Err(err) => last_error = Some(err),
        }
    }

    Err(match last_error {
        Some(err) => unreachable(host, err),
        None => unreachable(host, "no address resolved"),
    })
}
