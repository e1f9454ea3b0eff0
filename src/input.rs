// Input resolution: decides what gets uploaded and the title it gets when
// the user did not pass one. Exactly one blocking read happens per call.

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

use crate::api::PasteBody;
use crate::error::InputError;

/// Printed before reading stdin from a terminal.
pub const STDIN_PROMPT: &str = "Type your paste and press Ctrl+D/Ctrl+Z to upload.";

/// Content plus the title to send with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub content: PasteBody,
    pub title: Option<String>,
}

/// Read `filename`, or stdin when it is `None`.
///
/// An explicit `title` always wins. Otherwise a file upload is titled with
/// the file's base name and a stdin upload gets no title.
pub fn resolve(filename: Option<&Path>, title: Option<String>) -> Result<ResolvedInput, InputError> {
    match filename {
        Some(path) => resolve_file(path, title),
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let bytes = read_stream(stdin.lock(), interactive, &mut io::stdout())
                .map_err(InputError::Stdin)?;
            tracing::debug!(bytes = bytes.len(), interactive, "read paste from stdin");
            Ok(ResolvedInput {
                content: decode(bytes),
                title,
            })
        }
    }
}

pub fn resolve_file(path: &Path, title: Option<String>) -> Result<ResolvedInput, InputError> {
    let bytes = fs::read(path).map_err(|source| InputError::File {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read paste from file");
    Ok(ResolvedInput {
        content: decode(bytes),
        title: title.or_else(|| default_title(path)),
    })
}

/// Read everything from `reader`. When `interactive` is set, the prompt is
/// written to `prompt_out` once before blocking on the read.
pub fn read_stream<R: Read, W: Write>(
    mut reader: R,
    interactive: bool,
    prompt_out: &mut W,
) -> io::Result<Vec<u8>> {
    if interactive {
        writeln!(prompt_out, "{}", STDIN_PROMPT)?;
        prompt_out.flush()?;
    }
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Decode raw bytes as UTF-8.
///
/// Invalid UTF-8 is not an error: the bytes are kept exactly as read and
/// uploaded untouched, so a stray Latin-1 file still gets pasted.
pub fn decode(bytes: Vec<u8>) -> PasteBody {
    match String::from_utf8(bytes) {
        Ok(text) => PasteBody::Text(text),
        Err(e) => {
            tracing::warn!(
                valid_up_to = e.utf8_error().valid_up_to(),
                "content is not valid UTF-8, uploading the raw bytes"
            );
            PasteBody::Raw(e.into_bytes())
        }
    }
}

/// The file's base name, e.g. `notes.txt` for `docs/notes.txt`.
///
/// `None` for `/`, `.` and paths ending in `..`. A trailing slash is ignored, so
/// `docs/` yields `docs`; reading such a path fails before the title is used.
pub fn default_title(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
