//! Single-segment inspectors: scratchpad badges, the active window title,
//! the binding-mode indicator, and the static workspaces icon.

use crate::config::{ActiveWindowConfig, ModeConfig, ScratchpadConfig, WorkspacesIconConfig};
use crate::segment::{Segment, SegmentInfo};
use crate::traits::WindowManager;
use crate::tree::{ScratchpadWindow, SCRATCHPAD_WORKSPACE};

/// One badge per window currently tracked by the scratchpad.
///
/// The badge glyph is looked up by scratchpad state; a state missing from
/// the map falls back to the `"changed"` entry, then to nothing.
pub fn scratchpad<W: WindowManager>(
    wm: &W,
    cfg: &ScratchpadConfig,
) -> Result<Vec<Segment>, W::Error> {
    let tree = wm.get_tree()?;
    Ok(tree
        .scratchpad_windows()
        .into_iter()
        .map(|w| {
            let icon = cfg
                .icons
                .get(w.node.scratchpad_state.as_str())
                .or_else(|| cfg.icons.get("changed"))
                .unwrap_or("");
            Segment::new(icon, scratchpad_groups(&w))
        })
        .collect())
}

/// Ordered style groups for one scratchpad badge.
fn scratchpad_groups(w: &ScratchpadWindow<'_>) -> Vec<&'static str> {
    let mut groups = Vec::new();
    if w.node.urgent {
        groups.push("scratchpad:urgent");
    }
    if w.focused_in_parent {
        groups.push("scratchpad:focused");
    }
    if w.workspace_name != Some(SCRATCHPAD_WORKSPACE) {
        groups.push("scratchpad:visible");
    }
    groups.push("scratchpad");
    groups
}

/// The focused window's title, preceded by an optional icon.
///
/// An empty workspace focuses the workspace container itself, whose name
/// equals the workspace name; that case yields nothing.  Titles longer than
/// `cutoff` are replaced by the window class.
pub fn active_window<W: WindowManager>(
    wm: &W,
    cfg: &ActiveWindowConfig,
) -> Result<Vec<Segment>, W::Error> {
    let tree = wm.get_tree()?;
    let Some(focused) = tree.focused_window() else {
        return Ok(Vec::new());
    };

    let title = focused.node.name.clone().unwrap_or_default();
    let workspace_name = focused.workspace.and_then(|w| w.name.as_deref());
    if workspace_name == Some(title.as_str()) {
        return Ok(Vec::new());
    }

    let contents = if title.chars().count() > cfg.cutoff {
        match focused.node.window_class() {
            Some(class) => class.to_string(),
            None => title,
        }
    } else {
        title
    };

    let mut segments = Vec::new();
    if let Some(icon) = &cfg.icon {
        segments.push(Segment::new(icon.clone(), vec!["active_window_icon"]));
    }
    segments.push(Segment::new(contents, vec!["active_window_title"]));
    Ok(segments)
}

/// The current binding mode, mapped through the configured display names.
///
/// A mode mapped to nothing (or an empty string) is suppressed; an unmapped
/// mode is shown verbatim.
pub fn mode(info: &SegmentInfo, cfg: &ModeConfig) -> Vec<Segment> {
    match cfg.names.get(&info.mode) {
        Some(Some(display)) if !display.is_empty() => {
            vec![Segment::new(display.clone(), vec!["mode"])]
        }
        Some(_) => Vec::new(),
        None => vec![Segment::new(info.mode.clone(), vec!["mode"])],
    }
}

/// A constant icon marking the start of the workspace list.
pub fn workspaces_icon(cfg: &WorkspacesIconConfig) -> Vec<Segment> {
    match &cfg.icon {
        Some(icon) => vec![Segment::new(icon.clone(), vec!["workspaces_icon"])],
        None => Vec::new(),
    }
}

//  Tests
