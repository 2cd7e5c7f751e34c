//! Entry point for the **i3line** binary.
//!
//! Renders one status line per invocation: connects to i3/Sway (once per
//! process, reused across segments), runs each configured segment function,
//! escapes the results for the chosen shell, and prints the joined line.
//!
//! A failing segment is logged and omitted; the rest of the line still
//! renders.

use i3line::config::Config;
use i3line::i3::wm;
use i3line::i3::IpcError;
use i3line::render::{BashRenderer, PlainRenderer, PromptRenderer, ZshRenderer};
use i3line::segment::{Segment, SegmentInfo};
use i3line::segments::window::{active_window, mode, scratchpad, workspaces_icon};
use i3line::segments::workspaces::workspaces;
use log::{error, info};

/// Resolve the config directory (`$XDG_CONFIG_HOME/i3line`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("i3line")
}

/// Try to load the config from `$XDG_CONFIG_HOME/i3line/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

/// Parsed command line.
struct Args {
    renderer: String,
    output: Option<String>,
    mode: Option<String>,
    segments: Vec<String>,
}

fn print_usage() {
    eprintln!("usage: i3line [--renderer zsh|bash|plain] [--output NAME] [--mode NAME] [SEGMENT...]");
    eprintln!("segments: workspaces, active_window, scratchpad, mode, workspaces_icon");
}

fn parse_args() -> Option<Args> {
    let mut args = Args {
        renderer: "plain".into(),
        output: None,
        mode: None,
        segments: Vec::new(),
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--renderer" => args.renderer = iter.next()?,
            "--output" => args.output = Some(iter.next()?),
            "--mode" => args.mode = Some(iter.next()?),
            "--help" | "-h" => return None,
            flag if flag.starts_with("--") => {
                eprintln!("unknown flag: {}", flag);
                return None;
            }
            segment => args.segments.push(segment.into()),
        }
    }
    Some(args)
}

/// Run one segment function by name.
///
/// The shared connection is only obtained for segments that actually query
/// the window manager, so `mode` and `workspaces_icon` render even when no
/// i3 socket exists.  A connection failure surfaces as this segment's error.
fn run_segment(name: &str, info: &SegmentInfo, config: &Config) -> Result<Vec<Segment>, IpcError> {
    match name {
        "workspaces" => workspaces(wm::shared()?, info, &config.workspaces),
        "active_window" => active_window(wm::shared()?, &config.active_window),
        "scratchpad" => scratchpad(wm::shared()?, &config.scratchpad),
        "mode" => Ok(mode(info, &config.mode)),
        "workspaces_icon" => Ok(workspaces_icon(&config.workspaces_icon)),
        other => {
            error!("unknown segment: {}", other);
            Ok(Vec::new())
        }
    }
}

fn main() {
    env_logger::init();

    let Some(args) = parse_args() else {
        print_usage();
        std::process::exit(2);
    };

    let config = load_config();

    let renderer: Box<dyn PromptRenderer> = match args.renderer.as_str() {
        "zsh" => Box::new(ZshRenderer),
        "bash" => Box::new(BashRenderer),
        "plain" => Box::new(PlainRenderer),
        other => {
            eprintln!("unknown renderer: {}", other);
            print_usage();
            std::process::exit(2);
        }
    };

    let info = SegmentInfo {
        output: args.output,
        mode: args.mode.unwrap_or_else(|| "default".into()),
    };

    let names = if args.segments.is_empty() {
        config.segments.clone()
    } else {
        args.segments.clone()
    };

    let mut parts = Vec::new();
    for name in &names {
        match run_segment(name, &info, &config) {
            Ok(segments) => {
                // Escaping happens exactly once, at final emission.
                parts.extend(segments.iter().map(|s| renderer.escape(&s.contents)));
            }
            Err(e) => error!("segment {} failed: {}", name, e),
        }
    }

    println!("{}", parts.join(&config.divider));
}

//  Tests
