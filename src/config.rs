//! Segment configuration.
//!
//! Each segment function takes an immutable configuration record; the binary
//! loads them all from a JSON file at `$XDG_CONFIG_HOME/i3line/config.json`.
//! Every field is optional — a minimal `{}` file is valid and all sections
//! fall back to their compiled-in defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "divider": " | ",
//!   "segments": ["workspaces_icon", "workspaces", "active_window"],
//!   "workspaces": {
//!     "only_show": ["visible", "urgent"],
//!     "strip": 3,
//!     "icons": { "firefox": "", "Alacritty": "", "multiple": "+" },
//!     "show_dummy": true
//!   },
//!   "active_window": { "cutoff": 60 }
//! }
//! ```

use crate::segment::Workspace;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Reserved icon-map key emitted when a workspace matches more than one
/// icon and `show_multiple_icons` is off.
pub const MULTIPLE_ICON_KEY: &str = "multiple";

/// Insertion-ordered `window class -> icon glyph` mapping.
///
/// JSON object key order is preserved, and defines the priority in which
/// icons are matched and appended.  [`MULTIPLE_ICON_KEY`] is reserved and
/// never matched against window classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconMap(Vec<(String, String)>);

impl IconMap {
    /// Build a map from `(class, glyph)` pairs, keeping their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Look up the glyph for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(class, glyph)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for IconMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = IconMap;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "object mapping window classes to icon glyphs")
            }
            fn visit_map<A>(self, mut map: A) -> Result<IconMap, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                // MapAccess yields entries in document order, which is
                // exactly the priority order we keep.
                let mut pairs = Vec::new();
                while let Some((k, v)) = map.next_entry::<String, String>()? {
                    pairs.push((k, v));
                }
                Ok(IconMap(pairs))
            }
        }
        deserializer.deserialize_map(V)
    }
}

/// Workspace state predicates usable in `only_show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceFilter {
    Focused,
    Urgent,
    Visible,
}

impl WorkspaceFilter {
    /// Whether `ws` satisfies this predicate.
    pub fn matches(&self, ws: &Workspace) -> bool {
        match self {
            WorkspaceFilter::Focused => ws.focused,
            WorkspaceFilter::Urgent => ws.urgent,
            WorkspaceFilter::Visible => ws.visible,
        }
    }
}

/// Which outputs the workspaces segment should cover.
///
/// On the wire this is a plain string: `"__all__"` selects every active
/// output, anything else names one output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSelector {
    All,
    Named(String),
}

impl<'de> Deserialize<'de> for OutputSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Err(DeError::custom("output selector must not be empty"));
        }
        Ok(if s == "__all__" {
            OutputSelector::All
        } else {
            OutputSelector::Named(s)
        })
    }
}

/// Parameters of the workspaces segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkspacesConfig {
    /// Keep only workspaces matching at least one predicate.  Empty or
    /// absent keeps all.
    pub only_show: Option<Vec<WorkspaceFilter>>,
    /// Output selection.  Absent falls back to the per-render output hint,
    /// then to all active outputs.
    pub output: Option<OutputSelector>,
    /// How many characters to strip from the front of each workspace name.
    pub strip: usize,
    /// Text inserted before every icon glyph.
    pub separator: String,
    /// Window-class icons, in priority order.
    pub icons: IconMap,
    /// Show every matched icon instead of collapsing multi-matches.
    pub show_multiple_icons: bool,
    /// Append a synthetic workspace named after the next free number.
    pub show_dummy: bool,
}

impl Default for WorkspacesConfig {
    fn default() -> Self {
        Self {
            only_show: None,
            output: None,
            strip: 0,
            separator: " ".into(),
            icons: IconMap::default(),
            show_multiple_icons: false,
            show_dummy: false,
        }
    }
}

/// Parameters of the scratchpad segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScratchpadConfig {
    /// `scratchpad state -> badge glyph`.  A state missing from the map
    /// falls back to the `"changed"` entry.
    pub icons: IconMap,
}

impl Default for ScratchpadConfig {
    fn default() -> Self {
        Self {
            icons: IconMap::from_pairs([("fresh", "O"), ("changed", "X")]),
        }
    }
}

/// Parameters of the active-window segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActiveWindowConfig {
    /// Optional icon emitted before the title.
    pub icon: Option<String>,
    /// Titles longer than this many characters are replaced by the window
    /// class.
    pub cutoff: usize,
}

impl Default for ActiveWindowConfig {
    fn default() -> Self {
        Self {
            icon: None,
            cutoff: 100,
        }
    }
}

/// Parameters of the binding-mode segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// `mode name -> display text`.  A mode mapped to `null` (or `""`) is
    /// suppressed; an unmapped mode is shown verbatim.
    pub names: HashMap<String, Option<String>>,
}

impl Default for ModeConfig {
    fn default() -> Self {
        // The initial i3 mode is hidden unless explicitly mapped.
        let mut names = HashMap::new();
        names.insert("default".into(), None);
        Self { names }
    }
}

/// Parameters of the static workspaces-icon segment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkspacesIconConfig {
    /// Glyph to emit.  Absent suppresses the segment.
    pub icon: Option<String>,
}

/// Top-level configuration for the binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text placed between rendered segments.
    pub divider: String,
    /// Segment names rendered left to right when none are given on the
    /// command line.
    pub segments: Vec<String>,
    pub workspaces: WorkspacesConfig,
    pub scratchpad: ScratchpadConfig,
    pub active_window: ActiveWindowConfig,
    pub mode: ModeConfig,
    pub workspaces_icon: WorkspacesIconConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            divider: " ".into(),
            segments: vec!["workspaces".into(), "active_window".into()],
            workspaces: WorkspacesConfig::default(),
            scratchpad: ScratchpadConfig::default(),
            active_window: ActiveWindowConfig::default(),
            mode: ModeConfig::default(),
            workspaces_icon: WorkspacesIconConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
