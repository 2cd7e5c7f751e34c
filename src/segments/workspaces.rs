//! The workspace aggregation pipeline.
//!
//! Merges window-manager state (outputs, workspaces, the window tree) into
//! an ordered, styled sequence of segments: output resolution, predicate
//! filtering, per-output natural sort, synthetic "next free number" padding,
//! icon decoration from the live tree, name stripping, style tagging, and
//! multi-output assembly.

use crate::config::{OutputSelector, WorkspacesConfig, MULTIPLE_ICON_KEY};
use crate::natsort::natural_cmp;
use crate::segment::{Segment, SegmentInfo, Workspace};
use crate::traits::WindowManager;
use crate::tree::{Node, ScratchpadState};

/// Highest workspace number probed when looking for a free dummy name.
/// An occupied 1..=99 yields no dummy rather than an unbounded search.
pub const DUMMY_PROBE_MAX: u32 = 99;

/// Render the workspace list.
///
/// Returns one segment per displayed workspace, preceded by one
/// `output`-styled header per output when more than one output is covered.
/// Header order follows the window manager's output listing; workspaces are
/// naturally sorted within their output.
pub fn workspaces<W: WindowManager>(
    wm: &W,
    info: &SegmentInfo,
    cfg: &WorkspacesConfig,
) -> Result<Vec<Segment>, W::Error> {
    // Resolve which outputs this render covers, in listing order.  The
    // active listing is kept around when this step already fetched it, so
    // dummy padding below does not query it twice.
    let (resolved, mut active) = match (&cfg.output, &info.output) {
        (Some(OutputSelector::Named(name)), _) => (vec![name.clone()], None),
        (None, Some(hint)) => (vec![hint.clone()], None),
        (Some(OutputSelector::All), _) | (None, None) => {
            let listing = active_output_names(wm)?;
            (listing.clone(), Some(listing))
        }
    };
    if resolved.is_empty() {
        return Ok(Vec::new());
    }

    // Group workspaces by resolved output.  A name matching no output drops
    // out silently here.  Names are recorded before predicate filtering so
    // dummy numbering never collides with a hidden workspace.
    let mut groups: Vec<(String, Vec<Workspace>)> =
        resolved.into_iter().map(|o| (o, Vec::new())).collect();
    let mut used_names = Vec::new();
    for ws in wm.get_workspaces()? {
        if let Some((_, group)) = groups.iter_mut().find(|(name, _)| *name == ws.output) {
            used_names.push(ws.name.clone());
            if matches_filter(&ws, cfg) {
                group.push(ws);
            }
        }
    }

    for (_, group) in &mut groups {
        group.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    }

    // Dummies are padded onto active outputs only; a selector naming an
    // unknown or inactive output stays empty.
    if cfg.show_dummy {
        let active = match active.take() {
            Some(listing) => listing,
            None => active_output_names(wm)?,
        };
        if let Some(free) = next_free_number(&used_names) {
            for (output, group) in &mut groups {
                if active.iter().any(|name| name == output) {
                    group.push(Workspace::dummy(free.to_string(), output.clone()));
                }
            }
        }
    }

    // One tree snapshot decorates every workspace of this render.  Dummies
    // never consult it.
    let wants_icons =
        !cfg.icons.is_empty() && groups.iter().any(|(_, g)| g.iter().any(|w| !w.dummy));
    let tree = if wants_icons {
        Some(wm.get_tree()?)
    } else {
        None
    };

    let multi_output = groups.len() > 1;
    let mut segments = Vec::new();
    for (output, group) in &groups {
        if multi_output {
            segments.push(Segment::new(output.clone(), vec!["output"]));
        }
        for ws in group {
            segments.push(workspace_segment(ws, tree.as_ref(), cfg));
        }
    }
    Ok(segments)
}

/// Names of the currently active outputs, in listing order.
fn active_output_names<W: WindowManager>(wm: &W) -> Result<Vec<String>, W::Error> {
    Ok(wm
        .get_outputs()?
        .into_iter()
        .filter(|o| o.active)
        .map(|o| o.name)
        .collect())
}

fn matches_filter(ws: &Workspace, cfg: &WorkspacesConfig) -> bool {
    match &cfg.only_show {
        None => true,
        Some(filters) if filters.is_empty() => true,
        Some(filters) => filters.iter().any(|f| f.matches(ws)),
    }
}

/// Smallest positive integer not used as a workspace name, if any within
/// the probe bound.
fn next_free_number(used_names: &[String]) -> Option<u32> {
    (1..=DUMMY_PROBE_MAX).find(|n| !used_names.iter().any(|name| *name == n.to_string()))
}

fn workspace_segment(ws: &Workspace, tree: Option<&Node>, cfg: &WorkspacesConfig) -> Segment {
    let stripped: String = ws.name.chars().skip(cfg.strip).collect();
    let icons = if ws.dummy {
        String::new()
    } else {
        tree.map(|t| icon_text(t, &ws.name, cfg)).unwrap_or_default()
    };
    Segment::new(format!("{}{}", stripped, icons), workspace_groups(ws))
}

/// Ordered style groups: most specific state first, `workspace` last.
fn workspace_groups(ws: &Workspace) -> Vec<&'static str> {
    let mut groups = Vec::new();
    if ws.urgent {
        groups.push("w_urgent");
    }
    if ws.focused {
        groups.push("w_focused");
    }
    if ws.visible {
        groups.push("w_visible");
    }
    groups.push("workspace");
    groups
}

/// Icon suffix for one workspace, from the live tree snapshot.
///
/// Scratchpad windows (parent state not `none`) never contribute icons.
fn icon_text(tree: &Node, ws_name: &str, cfg: &WorkspacesConfig) -> String {
    let Some(ws_node) = tree
        .workspaces()
        .into_iter()
        .find(|n| n.name.as_deref() == Some(ws_name))
    else {
        // The workspace vanished between GET_WORKSPACES and GET_TREE;
        // best effort, no retry.
        return String::new();
    };

    let classes: Vec<&str> = ws_node
        .leaves_with_parent()
        .into_iter()
        .filter(|(_, parent)| parent.scratchpad_state == ScratchpadState::None)
        .filter_map(|(leaf, _)| leaf.window_class())
        .collect();

    let mut text = String::new();
    let mut matched = 0;
    for (class, icon) in cfg.icons.iter() {
        if class == MULTIPLE_ICON_KEY {
            continue;
        }
        if classes.iter().any(|c| *c == class) {
            text.push_str(&cfg.separator);
            text.push_str(icon);
            matched += 1;
        }
    }

    if matched > 1 && !cfg.show_multiple_icons {
        return match cfg.icons.get(MULTIPLE_ICON_KEY) {
            Some(icon) => format!("{}{}", cfg.separator, icon),
            None => String::new(),
        };
    }
    text
}

//  Tests
