//! HTML content documents → Markdown lines.
//!
//! Rendering is pure: it turns markup into [`Line`]s and leaves writing them
//! to the export layer. A [`Renderer`] carries the set of texts already
//! emitted, so one renderer must be used for exactly one book.

use std::collections::HashSet;

use log::{debug, info};

use crate::book::{Book, DocumentPart, XHTML_MEDIA_TYPE};
use crate::dom::{ArenaDom, ArenaNodeId, parse_html, parse_xhtml};
use crate::error::Result;
use crate::util::decode_text;

use super::line::Line;

/// Elements whose content never reaches the output.
const NON_CONTENT_TAGS: &[&str] = &["script", "style"];

/// Inline elements rendered as `**strong emphasis**`.
const BOLD_TAGS: &[&str] = &["b", "strong"];

/// Render every content document of `book` in archive order.
///
/// Texts seen in an earlier document suppress identical texts in later ones.
pub fn render_book(book: &Book) -> Result<Vec<Line>> {
    let mut renderer = Renderer::new();
    let mut lines = Vec::new();
    let mut documents = 0usize;

    for part in book.documents() {
        lines.extend(renderer.render_part(part)?);
        documents += 1;
    }

    info!(
        "rendered {documents} documents of {:?}: {} lines, {} duplicates skipped",
        book.title(),
        lines.len(),
        renderer.duplicates()
    );
    Ok(lines)
}

/// Stateful extractor for one book's conversion.
#[derive(Debug, Default)]
pub struct Renderer {
    seen: HashSet<String>,
    duplicates: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of headings/paragraphs dropped because their text was already emitted.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Decode, parse and render one content document.
    pub fn render_part(&mut self, part: &DocumentPart) -> Result<Vec<Line>> {
        let text = decode_text(&part.data, &part.href)?;
        let before = self.duplicates;
        let lines = if part.media_type.trim().eq_ignore_ascii_case(XHTML_MEDIA_TYPE) {
            self.render_xhtml(&text)
        } else {
            self.render_html(&text)
        };
        debug!(
            "{}: {} lines, {} duplicates skipped",
            part.href,
            lines.len(),
            self.duplicates - before
        );
        Ok(lines)
    }

    /// Render an HTML document. Text that opens with an XML declaration is
    /// XHTML and goes through [`Renderer::render_xhtml`].
    pub fn render_html(&mut self, html: &str) -> Vec<Line> {
        if html.trim_start_matches('\u{feff}').trim_start().starts_with("<?xml") {
            return self.render_xhtml(html);
        }
        let mut dom = parse_html(html);
        self.render_dom(&mut dom)
    }

    /// Render an XHTML document, reparsing it as HTML if the XML parser
    /// finds no root element.
    pub fn render_xhtml(&mut self, xhtml: &str) -> Vec<Line> {
        let mut dom = parse_xhtml(xhtml).unwrap_or_else(|| {
            debug!("no XML root element, parsing as HTML");
            parse_html(xhtml)
        });
        self.render_dom(&mut dom)
    }

    /// Render a parsed document. The tree is modified: non-content elements
    /// are removed and bold elements are replaced by their marked-up text.
    pub fn render_dom(&mut self, dom: &mut ArenaDom) -> Vec<Line> {
        strip_non_content(dom);
        embolden(dom);

        let mut lines = Vec::new();
        let mut stack = vec![dom.document()];

        while let Some(id) = stack.pop() {
            let block = dom.element_name(id).and_then(|name| block_level(name.as_ref()));

            match block {
                Some(level) => {
                    if let Some(line) = self.accept(dom, id, level) {
                        lines.push(line);
                    }
                }
                None => {
                    // Push children in reverse order for left-to-right traversal
                    let start = stack.len();
                    stack.extend(dom.children(id));
                    stack[start..].reverse();
                }
            }
        }

        lines
    }

    /// Turn a heading (`Some(level)`) or paragraph (`None`) into a line unless
    /// its text is blank or already emitted.
    fn accept(&mut self, dom: &ArenaDom, id: ArenaNodeId, level: Option<u8>) -> Option<Line> {
        let raw = dom.text_of(id);
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        if !self.seen.insert(text.to_string()) {
            self.duplicates += 1;
            return None;
        }

        let text = text.to_string();
        Some(match level {
            Some(level) => Line::Heading { level, text },
            None => Line::Paragraph(text),
        })
    }
}

/// `Some(Some(level))` for `h1`..`h6`, `Some(None)` for `p`, `None` otherwise.
fn block_level(tag: &str) -> Option<Option<u8>> {
    match tag {
        "p" => Some(None),
        "h1" => Some(Some(1)),
        "h2" => Some(Some(2)),
        "h3" => Some(Some(3)),
        "h4" => Some(Some(4)),
        "h5" => Some(Some(5)),
        "h6" => Some(Some(6)),
        _ => None,
    }
}

fn has_tag(dom: &ArenaDom, id: ArenaNodeId, tags: &[&str]) -> bool {
    dom.element_name(id)
        .is_some_and(|name| tags.contains(&name.as_ref()))
}

fn strip_non_content(dom: &mut ArenaDom) {
    let doomed: Vec<_> = dom
        .descendants(dom.document())
        .filter(|&id| has_tag(dom, id, NON_CONTENT_TAGS))
        .collect();
    for id in doomed {
        dom.detach(id);
    }
}

/// Replace each outermost bold element with a text node `**text**`.
///
/// Bold elements with blank text stay in place so their whitespace still
/// separates the surrounding words.
fn embolden(dom: &mut ArenaDom) {
    let mut replacements = Vec::new();
    let mut stack = vec![dom.document()];

    while let Some(id) = stack.pop() {
        if has_tag(dom, id, BOLD_TAGS) {
            let text = dom.text_of(id);
            let text = text.trim();
            if !text.is_empty() {
                replacements.push((id, format!("**{text}**")));
                continue;
            }
        }
        let start = stack.len();
        stack.extend(dom.children(id));
        stack[start..].reverse();
    }

    for (id, text) in replacements {
        dom.replace_with_text(id, text);
    }
}
