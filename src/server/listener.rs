// Listener construction.
// SO_REUSEADDR allows rebinding a port left in TIME_WAIT. SO_REUSEPORT is
// deliberately not set: a second instance on the same port must fail at bind.

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a bound, listening `TcpListener` for the given address.
pub fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_bind_on_same_port_fails() {
        let addr = "127.0.0.1:0".parse().unwrap();
        let first = create_listener(addr).unwrap();
        let bound = first.local_addr().unwrap();
        assert!(create_listener(bound).is_err());
    }
}
