// UI layer: everything the user sees after the upload, plus the
// best-effort helpers (spinner, clipboard, browser). None of the helpers
// can change the outcome of an invocation.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::api::PasteResult;

/// Run `f` behind a stderr spinner. indicatif hides the spinner by itself
/// when stderr is not a terminal.
pub fn with_spinner<T>(message: &'static str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    out
}

/// Print the result line: `Paste URL: <url>` or `ERROR: <message>`.
pub fn report_result<W: Write>(out: &mut W, result: &PasteResult) -> io::Result<()> {
    match result {
        Ok(url) => writeln!(out, "Paste URL: {}", url),
        Err(e) => writeln!(out, "ERROR: {}", e),
    }
}

/// Where the URL can be copied to.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

pub struct SystemClipboard(arboard::Clipboard);

impl SystemClipboard {
    /// Probe for a usable clipboard. `None` on headless systems (no display
    /// server, no clipboard provider); callers skip copying silently then.
    pub fn probe() -> Option<Self> {
        match arboard::Clipboard::new() {
            Ok(clipboard) => Some(SystemClipboard(clipboard)),
            Err(e) => {
                tracing::debug!(error = %e, "no clipboard available");
                None
            }
        }
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        self.0.set_text(text.to_string()).map_err(|e| e.to_string())
    }
}

/// Copy `url` if a clipboard was found. A copy failure is reported on
/// `out` and otherwise ignored. Returns whether the URL was copied.
pub fn copy_url<C: Clipboard, W: Write>(clipboard: Option<C>, url: &str, out: &mut W) -> bool {
    let Some(mut clipboard) = clipboard else {
        return false;
    };
    match clipboard.set_text(url) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "copying the paste URL failed");
            let _ = writeln!(
                out,
                "The clipboard isn't working properly on your system, bakeit cannot copy \
                 the URL to the clipboard automatically. If you are on Linux, try \
                 installing xclip."
            );
            false
        }
    }
}

/// Something that can show a URL to the user.
pub trait Browser {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// The platform's URL opener (`xdg-open`, `open`, `cmd /C start`).
///
/// The opener is spawned and left running: `xdg-open` can keep the browser
/// in the foreground, and the URL has already been printed by then.
pub struct SystemBrowser {
    program: String,
    args: Vec<String>,
}

impl SystemBrowser {
    /// Run `program args... <url>` instead of the platform default.
    pub fn with_command(program: impl Into<String>, args: &[&str]) -> Self {
        SystemBrowser {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl Default for SystemBrowser {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            SystemBrowser::with_command("open", &[])
        } else if cfg!(target_os = "windows") {
            SystemBrowser::with_command("cmd", &["/C", "start", ""])
        } else {
            SystemBrowser::with_command("xdg-open", &[])
        }
    }
}

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::debug!(pid = child.id(), program = %self.program, "browser launched");
        Ok(())
    }
}

/// Open `url` with `browser`. Failure is reported on `out` and otherwise
/// ignored.
pub fn open_in_browser<B: Browser, W: Write>(browser: &B, url: &str, out: &mut W) {
    if let Err(e) = browser.open(url) {
        tracing::warn!(error = %e, "opening the browser failed");
        let _ = writeln!(out, "Could not open a browser for {}: {}", url, e);
    }
}
