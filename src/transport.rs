//! TCP transport carrying IRC lines.

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio_util::codec::Framed;
use tracing::{debug, warn};

use crate::error::ProtocolError;
use crate::line::LineCodec;

/// Errors that can occur when reading from a transport.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportReadError {
    /// An I/O error occurred.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A protocol error occurred.
    #[error(transparent)]
    Protocol(ProtocolError),
}

impl From<ProtocolError> for TransportReadError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Io(e) => Self::Io(e),
            other => Self::Protocol(other),
        }
    }
}

/// A line-framed TCP connection to an IRC server.
pub struct Transport {
    framed: Framed<TcpStream, LineCodec>,
}

impl Transport {
    /// Connect to `addr` and wrap the stream.
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        debug!(peer = ?stream.peer_addr().ok(), "connected");
        Ok(Self::tcp(stream))
    }

    /// Wrap an established TCP stream.
    pub fn tcp(stream: TcpStream) -> Self {
        if let Err(e) = Self::enable_keepalive(&stream) {
            warn!("failed to enable TCP keepalive: {}", e);
        }

        Self {
            framed: Framed::new(stream, LineCodec::new()),
        }
    }

    fn enable_keepalive(stream: &TcpStream) -> Result<()> {
        use socket2::{SockRef, TcpKeepalive};
        use std::time::Duration;

        let sock = SockRef::from(stream);
        let keepalive = TcpKeepalive::new()
            .with_time(Duration::from_secs(120))
            .with_interval(Duration::from_secs(30));

        sock.set_tcp_keepalive(&keepalive)?;
        Ok(())
    }

    /// Read the next line. `Ok(None)` means the server closed the stream.
    pub async fn read_line(&mut self) -> Result<Option<String>, TransportReadError> {
        match self.framed.next().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(e)) => Err(TransportReadError::from(e)),
            None => Ok(None),
        }
    }

    /// Write one line; CRLF is appended by the codec.
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        self.framed
            .send(line.to_string())
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }

    /// Flush and shut down the write half.
    pub async fn close(&mut self) -> Result<()> {
        SinkExt::<String>::close(&mut self.framed)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
