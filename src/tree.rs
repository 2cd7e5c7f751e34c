//! The window-tree snapshot returned by `GET_TREE`.
//!
//! [`Node`] is a plain owned mirror of the JSON layout tree: every container
//! keeps its tiling children in `nodes` and its floating children in
//! `floating_nodes`.  The tree is read-only once deserialized; traversal
//! helpers that need parent or workspace context (scratchpad badges, the
//! focused window) carry that context during the walk instead of storing
//! back-pointers.

use serde::Deserialize;

/// Name of the hidden workspace i3 parks scratchpad windows on.
pub const SCRATCHPAD_WORKSPACE: &str = "__i3_scratch";

/// Container kind, from the tree's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Root,
    Output,
    Workspace,
    #[default]
    Con,
    FloatingCon,
    Dockarea,
    #[serde(other)]
    Unknown,
}

/// Scratchpad membership of a container.
///
/// `Fresh` means the window was moved to the scratchpad and has not been
/// resized since; `Changed` means its geometry was touched.  Everything else
/// is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScratchpadState {
    #[default]
    None,
    Fresh,
    Changed,
}

impl ScratchpadState {
    /// The wire spelling, used as an icon-map key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScratchpadState::None => "none",
            ScratchpadState::Fresh => "fresh",
            ScratchpadState::Changed => "changed",
        }
    }
}

/// X11 window properties (i3 only; Sway clients carry `app_id` instead).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowProperties {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// One container in the layout tree.
///
/// Only the fields this crate consumes are modeled; everything else in the
/// reply is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub scratchpad_state: ScratchpadState,
    /// X11 window id, present only on leaf windows under i3.
    #[serde(default)]
    pub window: Option<u64>,
    #[serde(default)]
    pub window_properties: Option<WindowProperties>,
    /// Wayland application id, present only on leaf windows under Sway.
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub floating_nodes: Vec<Node>,
}

/// A scratchpad window found during a tree walk, with the context the
/// styling rules need.
#[derive(Debug, Clone)]
pub struct ScratchpadWindow<'a> {
    pub node: &'a Node,
    /// Whether the first child of this window's parent container is focused.
    pub focused_in_parent: bool,
    /// Name of the workspace this window currently sits on.
    pub workspace_name: Option<&'a str>,
}

/// The focused window together with its containing workspace.
#[derive(Debug, Clone)]
pub struct FocusedWindow<'a> {
    pub node: &'a Node,
    pub workspace: Option<&'a Node>,
}

impl Node {
    /// Tiling children followed by floating children.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().chain(self.floating_nodes.iter())
    }

    /// Window class: the X11 class under i3, the application id under Sway.
    pub fn window_class(&self) -> Option<&str> {
        self.window_properties
            .as_ref()
            .and_then(|p| p.class.as_deref())
            .or(self.app_id.as_deref())
    }

    /// Whether this container is a leaf holding an actual window.
    pub fn is_window_leaf(&self) -> bool {
        matches!(self.node_type, NodeType::Con | NodeType::FloatingCon)
            && self.nodes.is_empty()
            && self.floating_nodes.is_empty()
            && (self.window.is_some() || self.app_id.is_some())
    }

    /// All nodes below this one, pre-order, excluding `self`.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        fn walk<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
            for child in node.children() {
                out.push(child);
                walk(child, out);
            }
        }
        walk(self, &mut out);
        out
    }

    /// All workspace containers in the tree (including the scratchpad
    /// workspace).
    pub fn workspaces(&self) -> Vec<&Node> {
        let mut out = self.descendants();
        out.retain(|n| n.node_type == NodeType::Workspace);
        out
    }

    /// All window leaves below this node, each paired with its direct
    /// parent container.
    pub fn leaves_with_parent(&self) -> Vec<(&Node, &Node)> {
        let mut out = Vec::new();
        fn walk<'a>(parent: &'a Node, out: &mut Vec<(&'a Node, &'a Node)>) {
            for child in parent.children() {
                if child.is_window_leaf() {
                    out.push((child, parent));
                } else {
                    walk(child, out);
                }
            }
        }
        walk(self, &mut out);
        out
    }

    /// The focused node anywhere in this subtree.  i3 marks at most one.
    pub fn find_focused(&self) -> Option<&Node> {
        if self.focused {
            return Some(self);
        }
        self.children().find_map(|c| c.find_focused())
    }

    /// The focused node together with the workspace it sits on.
    pub fn focused_window(&self) -> Option<FocusedWindow<'_>> {
        fn walk<'a>(node: &'a Node, ws: Option<&'a Node>) -> Option<FocusedWindow<'a>> {
            let ws = if node.node_type == NodeType::Workspace {
                Some(node)
            } else {
                ws
            };
            if node.focused {
                return Some(FocusedWindow { node, workspace: ws });
            }
            node.children().find_map(|c| walk(c, ws))
        }
        walk(self, None)
    }

    /// Every container with a scratchpad state other than `none`, with the
    /// parent/workspace context needed for styling.
    pub fn scratchpad_windows(&self) -> Vec<ScratchpadWindow<'_>> {
        let mut out = Vec::new();
        fn walk<'a>(
            node: &'a Node,
            ws: Option<&'a Node>,
            out: &mut Vec<ScratchpadWindow<'a>>,
        ) {
            let ws = if node.node_type == NodeType::Workspace {
                Some(node)
            } else {
                ws
            };
            for child in node.children() {
                if child.scratchpad_state != ScratchpadState::None {
                    out.push(ScratchpadWindow {
                        node: child,
                        focused_in_parent: node.children().next().is_some_and(|c| c.focused),
                        workspace_name: ws.and_then(|w| w.name.as_deref()),
                    });
                }
                walk(child, ws, out);
            }
        }
        walk(self, None, &mut out);
        out
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    /// A two-output tree shaped like a trimmed `GET_TREE` reply:
    /// workspace "1" holds a focused firefox window, the scratchpad
    /// workspace holds one fresh scratchpad container.
    const TREE_JSON: &str = r#"{
        "id": 1, "name": "root", "type": "root",
        "nodes": [
            {
                "id": 2, "name": "__i3", "type": "output",
                "nodes": [
                    {
                        "id": 3, "name": "content", "type": "con",
                        "nodes": [
                            {
                                "id": 4, "name": "__i3_scratch", "type": "workspace",
                                "floating_nodes": [
                                    {
                                        "id": 5, "name": "wrapper", "type": "floating_con",
                                        "scratchpad_state": "fresh",
                                        "nodes": [
                                            {
                                                "id": 6, "name": "dropdown", "type": "con",
                                                "window": 111,
                                                "window_properties": { "class": "Dropdown" }
                                            }
                                        ]
                                    }
                                ]
                            }
                        ]
                    }
                ]
            },
            {
                "id": 7, "name": "DP-1", "type": "output",
                "nodes": [
                    {
                        "id": 8, "name": "1", "type": "workspace",
                        "nodes": [
                            {
                                "id": 9, "name": "Mozilla Firefox", "type": "con",
                                "focused": true, "window": 222,
                                "window_properties": { "class": "firefox", "instance": "Navigator" }
                            }
                        ]
                    }
                ]
            }
        ]
    }"#;

    fn tree() -> Node {
        serde_json::from_str(TREE_JSON).unwrap()
    }

    #[test]
    fn deserializes_unknown_types_and_defaults() {
        let json = r#"{ "type": "placeholder", "nodes": [] }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.node_type, NodeType::Unknown);
        assert_eq!(node.scratchpad_state, ScratchpadState::None);
        assert!(!node.focused);
    }

    #[test]
    fn workspaces_lists_all_workspace_containers() {
        let t = tree();
        let names: Vec<_> = t
            .workspaces()
            .into_iter()
            .filter_map(|w| w.name.as_deref())
            .collect();
        assert_eq!(names, vec!["__i3_scratch", "1"]);
    }

    #[test]
    fn find_focused_locates_the_window() {
        let t = tree();
        let focused = t.find_focused().unwrap();
        assert_eq!(focused.name.as_deref(), Some("Mozilla Firefox"));
    }

    #[test]
    fn focused_window_carries_its_workspace() {
        let t = tree();
        let fw = t.focused_window().unwrap();
        assert_eq!(fw.node.id, 9);
        assert_eq!(fw.workspace.and_then(|w| w.name.as_deref()), Some("1"));
    }

    #[test]
    fn leaves_with_parent_pairs_leaf_and_container() {
        let t = tree();
        let pairs = t.leaves_with_parent();
        let firefox = pairs
            .iter()
            .find(|(leaf, _)| leaf.window == Some(222))
            .unwrap();
        assert_eq!(firefox.1.name.as_deref(), Some("1"));

        let dropdown = pairs
            .iter()
            .find(|(leaf, _)| leaf.window == Some(111))
            .unwrap();
        assert_eq!(dropdown.1.scratchpad_state, ScratchpadState::Fresh);
    }

    #[test]
    fn scratchpad_windows_report_state_and_workspace() {
        let t = tree();
        let pads = t.scratchpad_windows();
        assert_eq!(pads.len(), 1);
        assert_eq!(pads[0].node.scratchpad_state, ScratchpadState::Fresh);
        assert_eq!(pads[0].workspace_name, Some(SCRATCHPAD_WORKSPACE));
    }

    #[test]
    fn window_class_prefers_x11_class_and_falls_back_to_app_id() {
        let t = tree();
        let focused = t.find_focused().unwrap();
        assert_eq!(focused.window_class(), Some("firefox"));

        let wayland: Node = serde_json::from_str(
            r#"{ "type": "con", "app_id": "org.gnome.Nautilus" }"#,
        )
        .unwrap();
        assert_eq!(wayland.window_class(), Some("org.gnome.Nautilus"));
    }
}
