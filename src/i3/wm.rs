//! [`WindowManager`] implementation backed by the i3 IPC socket.
//!
//! [`I3Wm`] owns one persistent [`Connection`] behind a mutex so the trait
//! can be used through a shared reference.  The process-wide handle lives in
//! [`shared`], which memoizes the first successful connection; it is meant
//! to be called only at the composition root — library code receives the
//! handle by reference.

use crate::i3::ipc::{Connection, IpcError, MessageType};
use crate::segment::{Output, Workspace};
use crate::traits::WindowManager;
use crate::tree::Node;
use serde::de::DeserializeOwned;
use std::sync::{Mutex, OnceLock};

/// i3/Sway-backed window manager.
pub struct I3Wm {
    conn: Mutex<Connection>,
}

impl I3Wm {
    /// Open the IPC connection named by `$I3SOCK` / `$SWAYSOCK`.
    pub fn connect() -> Result<Self, IpcError> {
        Ok(Self::from_connection(Connection::connect()?))
    }

    /// Wrap an existing connection (tests use a socket pair).
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Send one query and deserialize its JSON reply.
    fn query<T: DeserializeOwned>(&self, msg_type: MessageType) -> Result<T, IpcError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| IpcError::Protocol("connection mutex poisoned".into()))?;
        let body = conn.request(msg_type, b"")?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl WindowManager for I3Wm {
    type Error = IpcError;

    fn get_outputs(&self) -> Result<Vec<Output>, IpcError> {
        self.query(MessageType::GetOutputs)
    }

    fn get_workspaces(&self) -> Result<Vec<Workspace>, IpcError> {
        self.query(MessageType::GetWorkspaces)
    }

    fn get_tree(&self) -> Result<Node, IpcError> {
        self.query(MessageType::GetTree)
    }
}

/// The process-wide connection, created on first use and reused for the
/// process lifetime.
static SHARED: OnceLock<I3Wm> = OnceLock::new();

/// Return the shared [`I3Wm`], connecting on first call.
///
/// Renders are single-threaded by design; a concurrent first call would at
/// worst open one extra connection that is immediately dropped.
pub fn shared() -> Result<&'static I3Wm, IpcError> {
    if let Some(wm) = SHARED.get() {
        return Ok(wm);
    }
    let wm = I3Wm::connect()?;
    Ok(SHARED.get_or_init(|| wm))
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::os::unix::net::UnixStream;

    /// Serve scripted replies for any number of requests, echoing the
    /// request type code back in the reply header.
    fn serve(mut stream: UnixStream, replies: Vec<&'static [u8]>) {
        std::thread::spawn(move || {
            for reply in replies {
                let mut header = [0u8; 14];
                if stream.read_exact(&mut header).is_err() {
                    return;
                }
                let len =
                    u32::from_le_bytes([header[6], header[7], header[8], header[9]]) as usize;
                let mut body = vec![0u8; len];
                stream.read_exact(&mut body).unwrap();

                let mut frame = Vec::new();
                frame.extend_from_slice(b"i3-ipc");
                frame.extend_from_slice(&(reply.len() as u32).to_le_bytes());
                frame.extend_from_slice(&header[10..14]);
                frame.extend_from_slice(reply);
                stream.write_all(&frame).unwrap();
            }
        });
    }

    #[test]
    fn get_workspaces_parses_reply() {
        let (client, server) = UnixStream::pair().unwrap();
        serve(
            server,
            vec![br#"[{"name":"1","focused":true,"urgent":false,"visible":true,"output":"DP-1"}]"#],
        );

        let wm = I3Wm::from_connection(Connection::from_stream(client));
        let workspaces = wm.get_workspaces().unwrap();
        assert_eq!(workspaces.len(), 1);
        assert_eq!(workspaces[0].name, "1");
        assert!(workspaces[0].focused);
        assert!(!workspaces[0].dummy);
    }

    #[test]
    fn get_outputs_and_tree_share_the_connection() {
        let (client, server) = UnixStream::pair().unwrap();
        serve(
            server,
            vec![
                br#"[{"name":"DP-1","active":true}]"#,
                br#"{"name":"root","type":"root","nodes":[]}"#,
            ],
        );

        let wm = I3Wm::from_connection(Connection::from_stream(client));
        let outputs = wm.get_outputs().unwrap();
        assert_eq!(outputs[0].name, "DP-1");

        let tree = wm.get_tree().unwrap();
        assert_eq!(tree.name.as_deref(), Some("root"));
    }

    #[test]
    fn malformed_json_reply_is_an_error() {
        let (client, server) = UnixStream::pair().unwrap();
        serve(server, vec![b"not json"]);

        let wm = I3Wm::from_connection(Connection::from_stream(client));
        assert!(matches!(wm.get_workspaces(), Err(IpcError::Json(_))));
    }
}
