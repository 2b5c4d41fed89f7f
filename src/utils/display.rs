use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::error::{PlotError, Result};

/// When the saved figure is opened for viewing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Open only in an interactive session
    #[default]
    Auto,
    Always,
    Never,
}

/// Whether a graphical session is available to show the image in.
pub fn is_interactive() -> bool {
    let desktop_os = cfg!(any(target_os = "macos", target_os = "windows"));
    session_is_interactive(|var| std::env::var_os(var), desktop_os)
}

/// CI jobs are never interactive. On macOS and Windows a remote shell is not
/// either; elsewhere a forwarded X or Wayland display counts.
fn session_is_interactive<F>(lookup: F, desktop_os: bool) -> bool
where
    F: Fn(&str) -> Option<OsString>,
{
    let is_set = |var: &str| lookup(var).is_some_and(|v| !v.is_empty());

    if is_set("CI") {
        return false;
    }
    if desktop_os {
        return !(is_set("SSH_CONNECTION") || is_set("SSH_TTY"));
    }
    is_set("DISPLAY") || is_set("WAYLAND_DISPLAY")
}

fn viewer_command(viewer: Option<&str>, path: &Path) -> Command {
    if let Some(viewer) = viewer {
        let mut cmd = Command::new(viewer);
        cmd.arg(path);
        return cmd;
    }

    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg("-W").arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "/WAIT", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Open `path` according to `mode` and wait for the viewer process to exit.
///
/// `open -W` on macOS and `start /WAIT` on Windows return once the image is
/// closed. `xdg-open` hands the file to the desktop and returns at once, so
/// on Linux set `viewer` to a program that stays open (e.g. `feh`, `eog`) to
/// block until the figure is dismissed.
///
/// Returns whether a viewer was launched.
pub fn show(path: &Path, mode: DisplayMode, viewer: Option<&str>) -> Result<bool> {
    let launch = match mode {
        DisplayMode::Never => false,
        DisplayMode::Always => true,
        DisplayMode::Auto => is_interactive(),
    };
    if !launch {
        debug!(path = %path.display(), ?mode, "Skipping figure display");
        return Ok(false);
    }

    let mut cmd = viewer_command(viewer, path);
    let program = cmd.get_program().to_string_lossy().into_owned();
    debug!(viewer = %program, path = %path.display(), "Opening figure");

    let status = cmd.status()?;
    if !status.success() {
        return Err(PlotError::Viewer {
            command: program,
            status: status.to_string(),
        });
    }
    Ok(true)
}
