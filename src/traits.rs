//! Core trait that decouples segment logic from any specific IPC backend.
//!
//! The concrete implementation lives in [`i3::wm`](crate::i3::wm); tests use
//! in-memory doubles that return canned state.

use crate::segment::{Output, Workspace};
use crate::tree::Node;

/// Abstraction over a window manager that can be queried for its current
/// state.
///
/// Every query is a synchronous round-trip.  Implementations do not retry
/// and do not impose timeouts; a failed query is returned to the caller,
/// which scopes the failure to the single segment being computed.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// List all outputs, active or not, in the window manager's order.
    fn get_outputs(&self) -> Result<Vec<Output>, Self::Error>;

    /// List all workspaces.
    fn get_workspaces(&self) -> Result<Vec<Workspace>, Self::Error>;

    /// Return the root of the layout tree.
    fn get_tree(&self) -> Result<Node, Self::Error>;
}
