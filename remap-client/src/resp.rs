//! RESP2 transport over TCP.
//!
//! One connection, one in-flight command: `execute` renders the command
//! as a RESP2 array, writes it, and reads exactly one reply. No pooling,
//! no reconnection, no TLS.

use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use bytes::Bytes;
use remap_protocol::{Command, Reply, DEFAULT_PORT};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// Configuration for [`RespTransport`].
#[derive(Debug, Clone)]
pub struct RespConfig {
    /// Store address.
    pub addr: SocketAddr,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Per-command round-trip timeout.
    pub request_timeout: Duration,
}

impl RespConfig {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for RespConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)))
    }
}

/// A [`Transport`] speaking RESP2 over a single TCP connection.
pub struct RespTransport {
    config: RespConfig,
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    line: Vec<u8>,
    buf: Vec<u8>,
}

impl RespTransport {
    /// Connects to the store, bounded by the configured connect timeout.
    ///
    /// Connection failure is a constructible error here; there is no
    /// silently-dead connection state.
    pub async fn connect(config: RespConfig) -> Result<Self, TransportError> {
        tracing::debug!(addr = %config.addr, "connecting");
        let stream = tokio::time::timeout(config.connect_timeout, TcpStream::connect(config.addr))
            .await
            .map_err(|_| TransportError::ConnectTimeout)??;
        stream.set_nodelay(true).ok();
        let (read_half, write_half) = stream.into_split();
        tracing::debug!(addr = %config.addr, "connected");

        Ok(Self {
            config,
            reader: BufReader::new(read_half),
            writer: write_half,
            line: Vec::new(),
            buf: Vec::new(),
        })
    }
}

#[async_trait]
impl Transport for RespTransport {
    async fn execute(&mut self, command: Command<'_>) -> Result<Reply, TransportError> {
        self.buf.clear();
        encode_command(&command, &mut self.buf);
        tracing::debug!(verb = %command.verb(), bytes = self.buf.len(), "round trip");

        let reader = &mut self.reader;
        let writer = &mut self.writer;
        let line = &mut self.line;
        let buf = &self.buf;

        tokio::time::timeout(self.config.request_timeout, async move {
            writer.write_all(buf).await?;
            read_reply(reader, line).await
        })
        .await
        .map_err(|_| TransportError::RequestTimeout)?
    }
}

/// Encodes a command as a RESP2 array of bulk strings.
///
/// Each argument renders per its kind's format token; text stays raw
/// bytes, numeric kinds render in base 10.
fn encode_command(command: &Command<'_>, out: &mut Vec<u8>) {
    let arg_count = 1 + command.args().count();
    out.push(b'*');
    out.extend_from_slice(arg_count.to_string().as_bytes());
    out.extend_from_slice(b"\r\n");

    write_bulk(out, command.verb().as_str().as_bytes());
    for arg in command.args() {
        write_bulk(out, &arg.render());
    }
}

fn write_bulk(out: &mut Vec<u8>, data: &[u8]) {
    out.push(b'$');
    out.extend_from_slice(data.len().to_string().as_bytes());
    out.extend_from_slice(b"\r\n");
    out.extend_from_slice(data);
    out.extend_from_slice(b"\r\n");
}

/// Reads one RESP2 reply.
async fn read_reply<R>(reader: &mut R, line: &mut Vec<u8>) -> Result<Reply, TransportError>
where
    R: AsyncBufRead + Unpin,
{
    read_line(reader, line).await?;
    if line.is_empty() {
        return Err(TransportError::Protocol("empty reply line".to_string()));
    }

    match line[0] {
        b'+' => Ok(Reply::Text(Bytes::copy_from_slice(&line[1..]))),
        b'-' => Err(TransportError::Server(
            String::from_utf8_lossy(&line[1..]).into_owned(),
        )),
        b':' => Ok(Reply::Integer(parse_i64(&line[1..])?)),
        b'$' => {
            let len = parse_i64(&line[1..])?;
            read_bulk(reader, len).await
        }
        other => Err(TransportError::Protocol(format!(
            "unknown reply prefix {:?}",
            other as char
        ))),
    }
}

async fn read_bulk<R>(reader: &mut R, len: i64) -> Result<Reply, TransportError>
where
    R: AsyncBufRead + Unpin,
{
    if len < 0 {
        return Ok(Reply::Nil);
    }

    let mut data = vec![0u8; len as usize];
    reader.read_exact(&mut data).await?;

    let mut crlf = [0u8; 2];
    reader.read_exact(&mut crlf).await?;
    if crlf != *b"\r\n" {
        return Err(TransportError::Protocol(
            "bulk payload not CRLF-terminated".to_string(),
        ));
    }

    Ok(Reply::Text(Bytes::from(data)))
}

async fn read_line<R>(reader: &mut R, line: &mut Vec<u8>) -> Result<(), TransportError>
where
    R: AsyncBufRead + Unpin,
{
    line.clear();
    let n = reader.read_until(b'\n', line).await?;
    if n == 0 {
        return Err(TransportError::ConnectionClosed);
    }
    if line.len() < 2 || line[line.len() - 2] != b'\r' {
        return Err(TransportError::Protocol(
            "reply line not CRLF-terminated".to_string(),
        ));
    }
    line.truncate(line.len() - 2);
    Ok(())
}

fn parse_i64(data: &[u8]) -> Result<i64, TransportError> {
    std::str::from_utf8(data)
        .ok()
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| {
            TransportError::Protocol(format!(
                "invalid integer {:?}",
                String::from_utf8_lossy(data)
            ))
        })
}
