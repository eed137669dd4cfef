//! Transporte de descarga.
//!
//! `ContentCache` sólo conoce el trait; la implementación HTTP usa
//! `reqwest::blocking` con un timeout total por request.
use std::io::{self, Write};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::TransportError;

pub trait Transport {
    /// Descarga `url` escribiendo el cuerpo en `sink`. Devuelve los bytes escritos.
    fn fetch(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        if url.trim().is_empty() {
            return Err(TransportError::Other("empty download url".into()));
        }
        let mut response = self.client.get(url).send()?.error_for_status()?;
        Ok(io::copy(&mut response, sink)?)
    }
}
