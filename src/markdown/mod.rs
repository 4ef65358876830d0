//! Pure Markdown generation from content documents.
//!
//! - [`render`]: content documents → [`Line`]s, with cross-document deduplication
//! - [`line`]: the output unit and its Markdown form
//! - [`sanitize`]: file names derived from titles
//!
//! The export layer ([`crate::export`]) assembles lines into a file.
//!
//! ## Design Notes
//!
//! Only headings (`h1`–`h6`) and paragraphs (`p`) produce output, each as one
//! block. Bold (`b`, `strong`) is the only inline formatting carried over, as
//! `**text**`. Text is emitted verbatim without Markdown escaping.

mod line;
mod render;
mod sanitize;

pub use line::Line;
pub use render::{Renderer, render_book};
pub use sanitize::{FALLBACK_STEM, markdown_file_name, sanitize_file_stem};
