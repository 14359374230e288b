//! TCP transport with null-byte framing
//!
//! Connection-oriented delivery: the stream is opened once per flush and
//! each encoded event is written followed by a `\0` terminator, the framing
//! GELF collectors expect on TCP inputs. A broken connection surfaces as an
//! error; reconnecting is the exporter's decision on the next flush, never
//! this transport's.

use super::{Transport, TransportConfig};
use crate::core::{GelfError, Result};
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

pub struct TcpTransport {
    addr: String,
    timeout: Duration,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    pub fn new(config: &TransportConfig) -> Self {
        Self {
            addr: config.addr(),
            timeout: config.timeout,
            stream: None,
        }
    }
}

impl Transport for TcpTransport {
    fn open(&mut self) -> Result<()> {
        let addr = self
            .addr
            .to_socket_addrs()
            .map_err(|e| GelfError::transport("tcp", format!("cannot resolve '{}': {}", self.addr, e)))?
            .next()
            .ok_or_else(|| {
                GelfError::transport("tcp", format!("'{}' resolved to no addresses", self.addr))
            })?;

        let stream = TcpStream::connect_timeout(&addr, self.timeout)
            .map_err(|e| GelfError::transport("tcp", format!("connect to '{}' failed: {}", self.addr, e)))?;

        // Bounded writes; a dead collector must not stall the flush
        stream
            .set_write_timeout(Some(self.timeout))
            .map_err(|e| GelfError::transport("tcp", e.to_string()))?;
        stream
            .set_nodelay(true)
            .map_err(|e| GelfError::transport("tcp", e.to_string()))?;

        self.stream = Some(stream);
        Ok(())
    }

    fn send(&mut self, payload: &[u8]) -> Result<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| GelfError::transport("tcp", "stream not connected"))?;

        let result = stream
            .write_all(payload)
            .and_then(|()| stream.write_all(&[0]))
            .and_then(|()| stream.flush());

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                // Drop the broken stream so later sends in this flush fail
                // fast instead of writing into a dead socket
                self.stream = None;
                Err(GelfError::transport("tcp", e.to_string()))
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.flush();
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "tcp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;

    #[test]
    fn test_open_against_closed_port_fails() {
        let config = TransportConfig::tcp("127.0.0.1", 1).with_timeout(Duration::from_millis(200));
        let mut transport = TcpTransport::new(&config);
        assert!(transport.open().is_err());
    }

    #[test]
    fn test_send_before_open_fails() {
        let config = TransportConfig::tcp("127.0.0.1", 12201);
        let mut transport = TcpTransport::new(&config);
        let err = transport.send(b"x").unwrap_err();
        assert!(matches!(err, GelfError::TransportError { .. }));
    }

    #[test]
    fn test_null_terminated_framing() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let config = TransportConfig::tcp("127.0.0.1", port);
        let mut transport = TcpTransport::new(&config);
        transport.open().unwrap();
        transport.send(b"{\"version\":\"1.1\"}").unwrap();
        transport.send(b"second").unwrap();
        transport.close().unwrap();

        let (mut conn, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        conn.read_to_end(&mut received).unwrap();

        let frames: Vec<&[u8]> = received.split(|b| *b == 0).filter(|f| !f.is_empty()).collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], b"{\"version\":\"1.1\"}");
        assert_eq!(frames[1], b"second");
    }
}
