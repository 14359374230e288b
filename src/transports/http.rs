//! HTTP/HTTPS transport
//!
//! Each encoded event becomes one `POST /gelf` request. Credentials and the
//! TLS policy come from the transport configuration; bad TLS material is a
//! construction-time error, a non-2xx response is a per-event delivery
//! failure.

use super::{BasicAuth, Transport, TransportConfig, TransportKind};
use crate::core::{GelfError, Result};
use reqwest::blocking::Client;

#[derive(Debug)]
pub struct HttpTransport {
    url: String,
    auth: Option<BasicAuth>,
    client: Client,
}

impl HttpTransport {
    /// Build the transport, validating TLS material up front.
    ///
    /// An unreadable or unparseable CA file and an unbuildable client are
    /// configuration errors here, never delivery errors later.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let scheme = match config.kind {
            TransportKind::Https => "https",
            _ => "http",
        };
        let url = format!("{}://{}:{}/gelf", scheme, config.host, config.port);

        let mut builder = Client::builder().timeout(config.timeout);

        if config.kind == TransportKind::Https {
            if !config.tls.verify_peer || config.tls.allow_self_signed {
                builder = builder.danger_accept_invalid_certs(true);
            }
            if let Some(ca_file) = &config.tls.ca_file {
                let pem = std::fs::read(ca_file).map_err(|e| {
                    GelfError::config(
                        "tls",
                        format!("cannot read CA file '{}': {}", ca_file.display(), e),
                    )
                })?;
                let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                    GelfError::config(
                        "tls",
                        format!("invalid CA certificate '{}': {}", ca_file.display(), e),
                    )
                })?;
                builder = builder.add_root_certificate(cert);
            }
        }

        let client = builder
            .build()
            .map_err(|e| GelfError::config("http", format!("cannot build client: {}", e)))?;

        Ok(Self {
            url,
            auth: config.auth.clone(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn open(&mut self) -> Result<()> {
        // Connections are pooled per request; nothing to acquire up front
        Ok(())
    }

    fn send(&mut self, payload: &[u8]) -> Result<()> {
        let mut request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .body(payload.to_vec());

        if let Some(auth) = &self.auth {
            request = request.basic_auth(&auth.username, Some(&auth.password));
        }

        let response = request
            .send()
            .map_err(|e| GelfError::transport("http", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GelfError::HttpStatus {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
