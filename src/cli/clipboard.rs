//! Best-effort system clipboard through the platform's copy utilities

use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::Result;

/// A command that copies its stdin to the clipboard
struct CopyTool {
    program: &'static str,
    args: &'static [&'static str],
}

#[cfg(target_os = "macos")]
const TOOLS: &[CopyTool] = &[CopyTool {
    program: "pbcopy",
    args: &[],
}];

#[cfg(target_os = "windows")]
const TOOLS: &[CopyTool] = &[CopyTool {
    program: "cmd",
    args: &["/c", "clip"],
}];

#[cfg(all(unix, not(target_os = "macos")))]
const TOOLS: &[CopyTool] = &[
    CopyTool {
        program: "wl-copy",
        args: &[],
    },
    CopyTool {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
    CopyTool {
        program: "xsel",
        args: &["--clipboard", "--input"],
    },
];

#[cfg(not(any(unix, target_os = "windows")))]
const TOOLS: &[CopyTool] = &[];

fn pipe_to(tool: &CopyTool, text: &str) -> io::Result<()> {
    let mut child = Command::new(tool.program)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    // Dropping stdin closes the pipe so the tool can finish
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait()?;
    written?;

    if status.success() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} exited with {}", tool.program, status),
        ))
    }
}

/// Copy `text` with the first copy utility that works
pub fn set_clipboard(text: &str) -> Result<()> {
    let mut last_error = io::Error::new(io::ErrorKind::NotFound, "no clipboard utility found");

    for tool in TOOLS {
        match pipe_to(tool, text) {
            Ok(()) => {
                debug!(program = tool.program, "copied to clipboard");
                return Ok(());
            }
            Err(e) => {
                debug!(program = tool.program, error = %e, "clipboard utility failed");
                last_error = e;
            }
        }
    }

    Err(last_error.into())
}
