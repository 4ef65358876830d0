/// An ebook as seen by the converter: metadata plus the manifest items in
/// the order the archive enumerates them.
#[derive(Debug, Clone, Default)]
pub struct Book {
    pub metadata: Metadata,
    pub parts: Vec<DocumentPart>,
}

/// Book metadata (Dublin Core subset)
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub title: String,
    pub authors: Vec<String>,
    pub language: String,
}

/// Media type of XHTML content documents.
pub const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";

/// What a manifest item holds, derived from its media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// XHTML/HTML content document, the EPUB 3 navigation document included.
    /// The only kind that gets rendered.
    Document,
    /// NCX table of contents.
    Navigation,
    Style,
    Image,
    Font,
    Script,
    Other,
}

impl PartKind {
    /// Classify a manifest item by media type.
    pub fn classify(media_type: &str) -> Self {
        let media_type = media_type.trim().to_ascii_lowercase();

        match media_type.as_str() {
            XHTML_MEDIA_TYPE | "text/html" => PartKind::Document,
            "application/x-dtbncx+xml" => PartKind::Navigation,
            "text/css" => PartKind::Style,
            "application/javascript" | "text/javascript" | "application/ecmascript" => {
                PartKind::Script
            }
            "application/vnd.ms-opentype"
            | "application/font-woff"
            | "application/x-font-ttf"
            | "application/x-font-otf" => PartKind::Font,
            t if t.starts_with("image/") => PartKind::Image,
            t if t.starts_with("font/") => PartKind::Font,
            _ => PartKind::Other,
        }
    }
}

/// A manifest item. Only [`PartKind::Document`] parts carry their bytes.
#[derive(Debug, Clone)]
pub struct DocumentPart {
    pub id: String,
    /// Href as written in the manifest (relative to the package document).
    pub href: String,
    pub media_type: String,
    pub kind: PartKind,
    pub data: Vec<u8>,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a manifest item, keeping enumeration order.
    pub fn add_part(
        &mut self,
        id: impl Into<String>,
        href: impl Into<String>,
        media_type: impl Into<String>,
        data: Vec<u8>,
    ) {
        let media_type = media_type.into();
        let kind = PartKind::classify(&media_type);
        self.parts.push(DocumentPart {
            id: id.into(),
            href: href.into(),
            media_type,
            kind,
            data,
        });
    }

    /// Content documents, in archive-enumeration order.
    pub fn documents(&self) -> impl Iterator<Item = &DocumentPart> {
        self.parts.iter().filter(|p| p.kind == PartKind::Document)
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}
