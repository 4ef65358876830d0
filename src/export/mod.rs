//! Export of rendered lines to Markdown.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use epubmd::export::write_markdown;
//! use epubmd::markdown::render_book;
//! use epubmd::read_epub;
//!
//! let book = read_epub("input.epub")?;
//! let lines = render_book(&book)?;
//! let path = write_markdown(book.title(), &lines, Path::new("out"))?;
//! println!("{}", path.display());
//! # Ok::<(), epubmd::Error>(())
//! ```

mod text;

pub use text::{markdown_document, write_document, write_markdown};
