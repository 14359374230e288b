//! Delivery transports
//!
//! A [`Transport`] moves one encoded event to the collector; the per-kind
//! framing and reliability tradeoffs live in the implementations. Selecting
//! a transport is a configuration decision, validated before any send.

pub mod http;
pub mod tcp;
pub mod udp;

pub use http::HttpTransport;
pub use tcp::TcpTransport;
pub use udp::UdpTransport;

use crate::core::{GelfError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default UDP chunk size, sized for LAN-grade MTUs
pub const DEFAULT_CHUNK_SIZE: usize = 8154;

/// Default bound on connect/send for the connection-oriented transports
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Operations every delivery transport must support.
///
/// `open`/`close` bracket one flush cycle; `send` delivers one encoded
/// event. Implementations never retry — a failed send is the caller's to
/// record.
pub trait Transport: Send {
    /// Acquire the connection or socket. Called once per flush.
    fn open(&mut self) -> Result<()>;

    /// Deliver one encoded event
    fn send(&mut self, payload: &[u8]) -> Result<()>;

    /// Release the connection or socket
    fn close(&mut self) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Which delivery backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Udp,
    Tcp,
    Http,
    Https,
}

impl TransportKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            TransportKind::Udp => "udp",
            TransportKind::Tcp => "tcp",
            TransportKind::Http => "http",
            TransportKind::Https => "https",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for TransportKind {
    type Err = GelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "udp" => Ok(TransportKind::Udp),
            "tcp" => Ok(TransportKind::Tcp),
            "http" => Ok(TransportKind::Http),
            "https" => Ok(TransportKind::Https),
            other => Err(GelfError::config(
                "transport",
                format!("unknown transport kind '{}'", other),
            )),
        }
    }
}

/// Basic-auth credentials for the HTTP transports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Peer-verification policy for HTTPS.
///
/// Mirrors the SSL options collectors commonly accept. `cipher_list` is
/// carried for configuration parity but the HTTP client backend does not
/// expose cipher-suite selection, so it is not applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsOptions {
    /// Verify the collector's certificate chain and hostname
    pub verify_peer: bool,
    /// Accept self-signed certificates even when verifying
    pub allow_self_signed: bool,
    /// Additional PEM root certificate for the collector
    pub ca_file: Option<PathBuf>,
    /// Accepted but not applied; see the struct docs
    pub cipher_list: Option<String>,
}

impl Default for TlsOptions {
    fn default() -> Self {
        Self {
            verify_peer: true,
            allow_self_signed: false,
            ca_file: None,
            cipher_list: None,
        }
    }
}

/// Immutable delivery configuration, fixed at exporter construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    pub kind: TransportKind,
    pub host: String,
    pub port: u16,
    /// Maximum UDP datagram size before chunking kicks in
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Connect/send bound for TCP and HTTP(S)
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
    #[serde(default)]
    pub auth: Option<BasicAuth>,
    #[serde(default)]
    pub tls: TlsOptions,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl TransportConfig {
    pub fn new(kind: TransportKind, host: impl Into<String>, port: u16) -> Self {
        Self {
            kind,
            host: host.into(),
            port,
            chunk_size: DEFAULT_CHUNK_SIZE,
            timeout: DEFAULT_TIMEOUT,
            auth: None,
            tls: TlsOptions::default(),
        }
    }

    pub fn udp(host: impl Into<String>, port: u16) -> Self {
        Self::new(TransportKind::Udp, host, port)
    }

    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self::new(TransportKind::Tcp, host, port)
    }

    pub fn http(host: impl Into<String>, port: u16) -> Self {
        Self::new(TransportKind::Http, host, port)
    }

    pub fn https(host: impl Into<String>, port: u16) -> Self {
        Self::new(TransportKind::Https, host, port)
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    #[must_use]
    pub fn with_tls(mut self, tls: TlsOptions) -> Self {
        self.tls = tls;
        self
    }

    /// `host:port` as a socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Build the transport a configuration selects.
///
/// All construction-time validation happens here (or in the per-kind
/// constructors it calls); flush only ever sees delivery failures.
pub fn build_transport(config: &TransportConfig) -> Result<Box<dyn Transport>> {
    match config.kind {
        TransportKind::Udp => Ok(Box::new(UdpTransport::new(config)?)),
        TransportKind::Tcp => Ok(Box::new(TcpTransport::new(config))),
        TransportKind::Http | TransportKind::Https => Ok(Box::new(HttpTransport::new(config)?)),
    }
}
