//! The i3 IPC wire protocol.
//!
//! Communicates directly with i3 or Sway through the Unix socket named by
//! `$I3SOCK` (or `$SWAYSOCK`), avoiding any shell command invocation or
//! third-party crate for socket discovery.
//!
//! # Wire format
//!
//! Every message in either direction is framed as:
//!
//! ```text
//! "i3-ipc" <len: u32 le> <type: u32 le> <payload: len bytes of JSON>
//! ```
//!
//! Replies carry the same type code as the request; asynchronous events set
//! the high bit of the type field and are skipped here (this crate never
//! subscribes to events).

use log::debug;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Magic bytes opening every frame.
const MAGIC: &[u8; 6] = b"i3-ipc";

/// Frame header length: magic + payload length + message type.
const HEADER_LEN: usize = 6 + 4 + 4;

/// High bit of the type field, set on event frames.
const EVENT_BIT: u32 = 1 << 31;

/// The subset of i3 IPC message types this crate sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    GetWorkspaces,
    GetOutputs,
    GetTree,
}

impl MessageType {
    /// Wire code of this message type.
    pub fn code(self) -> u32 {
        match self {
            MessageType::GetWorkspaces => 1,
            MessageType::GetOutputs => 3,
            MessageType::GetTree => 4,
        }
    }
}

/// Errors that can occur when talking to i3.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("i3 socket not found: neither I3SOCK nor SWAYSOCK is set")]
    SocketNotFound,
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Resolve the IPC socket path from the environment.
///
/// i3 exports `$I3SOCK`, Sway exports `$SWAYSOCK`; both speak the same
/// protocol for the queries this crate performs.
pub fn socket_path() -> Result<PathBuf, IpcError> {
    std::env::var_os("I3SOCK")
        .or_else(|| std::env::var_os("SWAYSOCK"))
        .map(PathBuf::from)
        .ok_or(IpcError::SocketNotFound)
}

/// Frame a request for the wire.
fn encode_message(msg_type: MessageType, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    buf.extend_from_slice(&msg_type.code().to_le_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Parse a frame header, returning `(payload_len, type_code)`.
fn parse_header(header: &[u8; HEADER_LEN]) -> Result<(usize, u32), IpcError> {
    if &header[..6] != MAGIC {
        return Err(IpcError::Protocol("bad magic in reply header".into()));
    }
    let len = u32::from_le_bytes([header[6], header[7], header[8], header[9]]) as usize;
    let code = u32::from_le_bytes([header[10], header[11], header[12], header[13]]);
    Ok((len, code))
}

/// A persistent connection to the i3 command socket.
///
/// Created once per process (see [`wm::shared`](crate::i3::wm::shared)) and
/// reused for every query; never explicitly closed.
pub struct Connection {
    stream: UnixStream,
}

impl Connection {
    /// Connect to the socket named by the environment.
    pub fn connect() -> Result<Self, IpcError> {
        let path = socket_path()?;
        debug!("connecting to {}", path.display());
        let stream = UnixStream::connect(&path)?;
        Ok(Self { stream })
    }

    /// Wrap an already-connected stream.  Used by tests with a socket pair.
    pub fn from_stream(stream: UnixStream) -> Self {
        Self { stream }
    }

    /// Send one request and return the reply payload.
    ///
    /// Event frames that arrive interleaved are skipped; a reply whose type
    /// does not match the request is a protocol error.
    pub fn request(&mut self, msg_type: MessageType, payload: &[u8]) -> Result<Vec<u8>, IpcError> {
        self.stream.write_all(&encode_message(msg_type, payload))?;

        loop {
            let mut header = [0u8; HEADER_LEN];
            self.stream.read_exact(&mut header)?;
            let (len, code) = parse_header(&header)?;

            let mut body = vec![0u8; len];
            self.stream.read_exact(&mut body)?;

            if code & EVENT_BIT != 0 {
                debug!("skipping event frame 0x{:08x}", code);
                continue;
            }
            if code != msg_type.code() {
                return Err(IpcError::Protocol(format!(
                    "reply type {} does not match request type {}",
                    code,
                    msg_type.code()
                )));
            }
            return Ok(body);
        }
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_message_frames_request() {
        let buf = encode_message(MessageType::GetTree, b"");
        assert_eq!(&buf[..6], b"i3-ipc");
        assert_eq!(&buf[6..10], &0u32.to_le_bytes());
        assert_eq!(&buf[10..14], &4u32.to_le_bytes());
        assert_eq!(buf.len(), HEADER_LEN);
    }

    #[test]
    fn parse_header_rejects_bad_magic() {
        let mut header = [0u8; HEADER_LEN];
        header[..6].copy_from_slice(b"not-i3");
        assert!(matches!(
            parse_header(&header),
            Err(IpcError::Protocol(_))
        ));
    }

    /// Serve one scripted reply on the far end of a socket pair.
    fn serve_reply(mut stream: UnixStream, reply_type: u32, reply: &'static [u8]) {
        std::thread::spawn(move || {
            // Consume the request frame first.
            let mut header = [0u8; HEADER_LEN];
            stream.read_exact(&mut header).unwrap();
            let (len, _) = parse_header(&header).unwrap();
            let mut body = vec![0u8; len];
            stream.read_exact(&mut body).unwrap();

            let mut frame = Vec::new();
            frame.extend_from_slice(MAGIC);
            frame.extend_from_slice(&(reply.len() as u32).to_le_bytes());
            frame.extend_from_slice(&reply_type.to_le_bytes());
            frame.extend_from_slice(reply);
            stream.write_all(&frame).unwrap();
        });
    }

    #[test]
    fn request_round_trip() {
        let (client, server) = UnixStream::pair().unwrap();
        serve_reply(server, 1, br#"[{"name":"1","output":"DP-1"}]"#);

        let mut conn = Connection::from_stream(client);
        let body = conn.request(MessageType::GetWorkspaces, b"").unwrap();
        assert_eq!(body, br#"[{"name":"1","output":"DP-1"}]"#);
    }

    #[test]
    fn mismatched_reply_type_is_protocol_error() {
        let (client, server) = UnixStream::pair().unwrap();
        serve_reply(server, 4, b"{}");

        let mut conn = Connection::from_stream(client);
        let err = conn.request(MessageType::GetWorkspaces, b"").unwrap_err();
        assert!(matches!(err, IpcError::Protocol(_)));
    }

    #[test]
    fn event_frames_are_skipped() {
        let (mut server, client) = {
            let (c, s) = UnixStream::pair().unwrap();
            (s, c)
        };

        std::thread::spawn(move || {
            let mut header = [0u8; HEADER_LEN];
            server.read_exact(&mut header).unwrap();

            // An interleaved workspace event, then the real reply.
            for (code, payload) in [(EVENT_BIT, &b"{}"[..]), (3u32, &b"[]"[..])] {
                let mut frame = Vec::new();
                frame.extend_from_slice(MAGIC);
                frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
                frame.extend_from_slice(&code.to_le_bytes());
                frame.extend_from_slice(payload);
                server.write_all(&frame).unwrap();
            }
        });

        let mut conn = Connection::from_stream(client);
        let body = conn.request(MessageType::GetOutputs, b"").unwrap();
        assert_eq!(body, b"[]");
    }
}
