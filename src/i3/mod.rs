//! i3/Sway backend.
//!
//! [`ipc`] speaks the i3 IPC wire protocol over a Unix socket; [`wm`]
//! implements [`WindowManager`](crate::traits::WindowManager) on top of it
//! and provides the process-wide shared connection used by the binary.

pub mod ipc;
pub mod wm;

pub use ipc::IpcError;
