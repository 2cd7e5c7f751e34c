//! **i3line** — shell prompt and status-bar segments for i3 and Sway.
//!
//! Segment functions query the window manager over its IPC socket and turn
//! the live state into ordered, styled [`Segment`](segment::Segment)s: the
//! workspace list (with natural sorting, per-window icons, multi-output
//! headers, and synthetic padding entries), the active window title,
//! scratchpad badges, and the binding-mode indicator.
//!
//! # Architecture
//!
//! The crate is organised around one core trait:
//!
//! * [`traits::WindowManager`] — abstracts the state queries (outputs,
//!   workspaces, layout tree) so segment logic is not coupled to any
//!   specific compositor or transport.
//!
//! The concrete implementation lives in [`i3`] (i3 IPC over a Unix socket).
//! [`render`] defines how a target shell escapes segment text; [`segments`]
//! holds the segment functions themselves.

pub mod config;
pub mod i3;
pub mod natsort;
pub mod render;
pub mod segment;
pub mod segments;
pub mod traits;
pub mod tree;
