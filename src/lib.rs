//! # epubmd
//!
//! Convert an EPUB ebook into a single Markdown document.
//!
//! The conversion reads the archive ([`read_epub`]), extracts headings and
//! paragraphs from every content document in manifest order
//! ([`markdown::render_book`]), and writes them, deduplicated, to
//! `<title>.md` ([`export::write_markdown`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! let written = epubmd::convert(Path::new("book.epub"), None)?;
//! println!("wrote {}", written.display());
//! # Ok::<(), epubmd::Error>(())
//! ```
//!
//! ## Output
//!
//! For a book titled "Sample" whose two chapters read
//! `<h1>Chapter One</h1><p>Hello <b>world</b>.</p>` and
//! `<h1>Chapter One</h1><p>Second line.</p>`, the file `Sample.md` holds:
//!
//! ```text
//! # Sample
//!
//! # Chapter One
//!
//! Hello **world**.
//!
//! Second line.
//!
//! ```

use std::path::{Path, PathBuf};

use log::info;

pub mod book;
pub mod dom;
pub mod epub;
pub mod error;
pub mod export;
pub mod markdown;
pub(crate) mod util;

pub use book::{Book, DocumentPart, Metadata, PartKind};
pub use epub::{read_epub, read_epub_from_reader};
pub use error::{Error, ErrorKind, Result};
pub use markdown::Line;

/// Convert the EPUB at `epub_path` and return the path of the written file.
///
/// Without `output_dir` the file lands next to the EPUB.
pub fn convert(epub_path: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    let book = read_epub(epub_path)?;
    let lines = markdown::render_book(&book)?;

    let output_dir = output_dir.unwrap_or_else(|| default_output_dir(epub_path));
    let written = export::write_markdown(book.title(), &lines, output_dir)?;

    info!("{} -> {}", epub_path.display(), written.display());
    Ok(written)
}

/// The directory containing `epub_path`, or `.` for a bare file name.
pub fn default_output_dir(epub_path: &Path) -> &Path {
    epub_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}
