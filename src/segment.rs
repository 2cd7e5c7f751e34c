//! Shared vocabulary used throughout i3line.
//!
//! This module defines the types that all components exchange:
//! [`Segment`] is the unit of output every segment function produces,
//! [`SegmentInfo`] is the per-render context the driver passes in, and
//! [`Workspace`] / [`Output`] mirror the i3 IPC `GET_WORKSPACES` /
//! `GET_OUTPUTS` replies.

use serde::{Deserialize, Serialize};

/// A styled unit of text — the output granularity of this crate.
///
/// `highlight_groups` is an ordered fallback list: the theme layer picks the
/// first group it has a style for, falling back toward the last (most
/// generic) entry.  The most specific state must therefore come first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Literal text.  Escaping (see [`render`](crate::render)) is applied by
    /// the renderer at final emission, never here.
    pub contents: String,
    /// Ordered style fallback list, most specific first.
    pub highlight_groups: Vec<&'static str>,
}

impl Segment {
    /// Build a segment from text and its ordered style groups.
    pub fn new(contents: impl Into<String>, highlight_groups: Vec<&'static str>) -> Self {
        Self {
            contents: contents.into(),
            highlight_groups,
        }
    }
}

/// Per-render context handed to segment functions by the driver.
///
/// Carries the ambient output hint (set by bar renderers that render one
/// instance per output) and the current binding-mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentInfo {
    /// Output the surrounding bar instance belongs to, if any.
    pub output: Option<String>,
    /// Current binding-mode name.  i3 calls the initial mode `"default"`.
    pub mode: String,
}

impl Default for SegmentInfo {
    fn default() -> Self {
        Self {
            output: None,
            mode: "default".into(),
        }
    }
}

/// One workspace as reported by `GET_WORKSPACES`.
///
/// `dummy` never comes off the wire; it is set only by the aggregator's
/// padding step (see [`segments::workspaces`](crate::segments::workspaces))
/// and marks a synthetic "next free number" entry that does not exist in the
/// window manager.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Workspace {
    pub name: String,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub visible: bool,
    pub output: String,
    #[serde(default)]
    pub dummy: bool,
}

impl Workspace {
    /// Build a synthetic padding workspace on `output` named after the next
    /// free workspace number.  All state flags are off.
    pub fn dummy(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            focused: false,
            urgent: false,
            visible: false,
            output: output.into(),
            dummy: true,
        }
    }
}

/// One output (display surface) as reported by `GET_OUTPUTS`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Output {
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_deserializes_from_ipc_reply() {
        let json = r#"{
            "num": 2,
            "name": "2: web",
            "visible": true,
            "focused": false,
            "urgent": false,
            "rect": { "x": 0, "y": 0, "width": 1920, "height": 1080 },
            "output": "DP-1"
        }"#;
        let ws: Workspace = serde_json::from_str(json).unwrap();
        assert_eq!(ws.name, "2: web");
        assert_eq!(ws.output, "DP-1");
        assert!(ws.visible);
        assert!(!ws.dummy);
    }

    #[test]
    fn output_deserializes_from_ipc_reply() {
        let json = r#"[
            { "name": "DP-1", "active": true, "current_workspace": "1" },
            { "name": "xroot-0", "active": false, "current_workspace": null }
        ]"#;
        let outputs: Vec<Output> = serde_json::from_str(json).unwrap();
        assert_eq!(outputs.len(), 2);
        assert!(outputs[0].active);
        assert!(!outputs[1].active);
    }

    #[test]
    fn dummy_workspace_has_all_flags_off() {
        let ws = Workspace::dummy("3", "DP-1");
        assert!(ws.dummy);
        assert!(!ws.focused && !ws.urgent && !ws.visible);
        assert_eq!(ws.name, "3");
    }
}
