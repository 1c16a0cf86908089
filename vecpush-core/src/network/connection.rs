use std::fmt;
use std::time::Duration;

use futures::SinkExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_util::codec::FramedWrite;
use tracing::{debug, info};

use crate::error::VecpushError;
use crate::{Payload, PayloadCodec};

/// Where a payload goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    host: String,
    port: u16,
    /// `None` leaves the deadline to the OS.
    connect_timeout: Option<Duration>,
}

impl ConnectionInfo {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: None,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// `host:port`, suitable for `TcpStream::connect`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Outcome of a successful [`send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReport {
    pub addr: String,
    pub bytes_written: usize,
}

/// Open one outbound TCP connection to `info`.
pub async fn connect(info: &ConnectionInfo) -> Result<TcpStream, VecpushError> {
    let addr = info.addr();
    debug!("connecting to {addr}");

    let attempt = TcpStream::connect(addr.as_str());
    let result = match info.connect_timeout {
        Some(after) => tokio::time::timeout(after, attempt)
            .await
            .map_err(|_| VecpushError::ConnectTimeout {
                addr: addr.clone(),
                after,
            })?,
        None => attempt.await,
    };

    result.map_err(|source| VecpushError::Connection { addr, source })
}

/// Write `payload` to `io` in one logical write, then shut the writer down.
///
/// `io` is consumed and dropped on every path, which closes the underlying
/// socket whether or not the write succeeded.
pub async fn send_over<T>(io: T, payload: &Payload) -> Result<usize, VecpushError>
where
    T: AsyncWrite + Unpin,
{
    let mut framed = FramedWrite::new(io, PayloadCodec::default());
    framed.send(payload).await?;

    let mut io = framed.into_inner();
    io.shutdown().await?;
    Ok(payload.encoded_len())
}

/// Connect to `info`, write the whole payload, close.
///
/// No response is read and nothing is retried.
pub async fn send(payload: &Payload, info: &ConnectionInfo) -> Result<SendReport, VecpushError> {
    let stream = connect(info).await?;
    let addr = info.addr();
    info!("connected to {addr}");

    let bytes_written = send_over(stream, payload).await?;
    info!("sent {bytes_written} bytes to {addr}; connection closed");

    Ok(SendReport {
        addr,
        bytes_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[test]
    fn connection_info_formats_addr() {
        let info = ConnectionInfo::new("localhost", 3000);
        assert_eq!(info.addr(), "localhost:3000");
        assert_eq!(info.to_string(), "localhost:3000");
        assert_eq!(info.connect_timeout(), None);

        let info = info.with_connect_timeout(Duration::from_secs(2));
        assert_eq!(info.connect_timeout(), Some(Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn send_over_writes_exact_bytes() {
        let payload = Payload::new(1, vec![0.5, -0.5]).unwrap();
        let mock = Builder::new()
            .write(&[0x01, 0x00, 0x00, 0x00, 0x3f, 0x00, 0x00, 0x00, 0xbf])
            .build();

        let written = send_over(mock, &payload).await.unwrap();
        assert_eq!(written, 9);
    }

    #[tokio::test]
    async fn send_over_empty_payload_writes_tag_only() {
        let payload = Payload::new(1, Vec::new()).unwrap();
        let mock = Builder::new().write(&[0x01]).build();
        assert_eq!(send_over(mock, &payload).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn send_over_surfaces_write_failure() {
        let payload = Payload::new(1, vec![0.25]).unwrap();
        let mock = Builder::new()
            .write_error(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
            .build();

        let err = send_over(mock, &payload).await.unwrap_err();
        assert!(matches!(err, VecpushError::Write(_)));
    }
}
