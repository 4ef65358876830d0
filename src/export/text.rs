//! Markdown file assembly.
//!
//! The document is the book title as a level-1 heading followed by every
//! line, each block followed by one blank line.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::markdown::{Line, markdown_file_name};

/// The Markdown document as a string.
pub fn markdown_document(title: &str, lines: &[Line]) -> String {
    let mut out = format!("# {title}\n\n");
    for line in lines {
        out.push_str(&line.to_string());
        out.push_str("\n\n");
    }
    out
}

/// Write the Markdown document for `title` and `lines` to `writer`.
pub fn write_document<W: Write>(title: &str, lines: &[Line], writer: &mut W) -> io::Result<()> {
    writer.write_all(markdown_document(title, lines).as_bytes())?;
    writer.flush()
}

/// Write `<sanitized title>.md` into `output_dir`, creating the directory if
/// needed, and return the file's path.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the target, so a failure never leaves a truncated file behind.
/// An existing file with the same name is replaced.
pub fn write_markdown(title: &str, lines: &[Line], output_dir: &Path) -> Result<PathBuf> {
    let output_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| Error::Output { path, source }
    };

    fs::create_dir_all(output_dir).map_err(output_error(output_dir))?;

    let path = output_dir.join(markdown_file_name(title));

    let mut tmp = NamedTempFile::new_in(output_dir).map_err(output_error(output_dir))?;
    {
        let mut writer = io::BufWriter::new(tmp.as_file_mut());
        write_document(title, lines, &mut writer).map_err(output_error(&path))?;
    }
    tmp.as_file().sync_all().map_err(output_error(&path))?;
    tmp.persist(&path)
        .map_err(|e| Error::Output {
            path: path.clone(),
            source: e.error,
        })?;

    debug!("wrote {} lines to {}", lines.len(), path.display());
    Ok(path)
}
