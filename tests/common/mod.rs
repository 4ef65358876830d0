//! Builders for small EPUB archives used as test fixtures.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

/// A manifest entry; `body` is `None` for items that are declared but absent.
pub struct Item {
    pub id: String,
    pub href: String,
    pub media_type: String,
    pub properties: Option<String>,
    pub body: Option<Vec<u8>>,
}

/// Minimal EPUB 3 writer: mimetype, container, OPF and the items in order.
#[derive(Default)]
pub struct EpubBuilder {
    title: Option<String>,
    items: Vec<Item>,
}

impl EpubBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            items: Vec::new(),
        }
    }

    pub fn untitled() -> Self {
        Self::default()
    }

    /// Add an XHTML chapter whose `<body>` is `body`.
    pub fn chapter(mut self, id: &str, body: &str) -> Self {
        self.items.push(Item {
            id: id.to_string(),
            href: format!("text/{id}.xhtml"),
            media_type: "application/xhtml+xml".to_string(),
            properties: None,
            body: Some(xhtml(id, body).into_bytes()),
        });
        self
    }

    pub fn item(mut self, id: &str, href: &str, media_type: &str, body: &[u8]) -> Self {
        self.items.push(Item {
            id: id.to_string(),
            href: href.to_string(),
            media_type: media_type.to_string(),
            properties: None,
            body: Some(body.to_vec()),
        });
        self
    }

    pub fn nav(mut self, body: &str) -> Self {
        self.items.push(Item {
            id: "nav".to_string(),
            href: "nav.xhtml".to_string(),
            media_type: "application/xhtml+xml".to_string(),
            properties: Some("nav".to_string()),
            body: Some(xhtml("nav", body).into_bytes()),
        });
        self
    }

    /// Declare a content document in the manifest without storing it.
    pub fn missing_chapter(mut self, id: &str) -> Self {
        self.items.push(Item {
            id: id.to_string(),
            href: format!("text/{id}.xhtml"),
            media_type: "application/xhtml+xml".to_string(),
            properties: None,
            body: None,
        });
        self
    }

    fn opf(&self) -> String {
        let title = self
            .title
            .as_deref()
            .map(|t| format!("<dc:title>{}</dc:title>", escape(t)))
            .unwrap_or_default();

        let mut manifest = String::new();
        let mut spine = String::new();
        for item in &self.items {
            let props = item
                .properties
                .as_deref()
                .map(|p| format!(r#" properties="{p}""#))
                .unwrap_or_default();
            manifest.push_str(&format!(
                r#"    <item id="{}" href="{}" media-type="{}"{props}/>
"#,
                item.id, item.href, item.media_type
            ));
            if item.media_type == "application/xhtml+xml" {
                spine.push_str(&format!(r#"    <itemref idref="{}"/>
"#, item.id));
            }
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="uid">urn:uuid:00000000-0000-0000-0000-000000000000</dc:identifier>
    {title}
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
{manifest}  </manifest>
  <spine>
{spine}  </spine>
</package>"#
        )
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        let deflated =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file("mimetype", stored).unwrap();
        zip.write_all(b"application/epub+zip").unwrap();
        zip.start_file("META-INF/container.xml", deflated).unwrap();
        zip.write_all(CONTAINER_XML.as_bytes()).unwrap();
        zip.start_file("OEBPS/content.opf", deflated).unwrap();
        zip.write_all(self.opf().as_bytes()).unwrap();

        for item in &self.items {
            if let Some(body) = &item.body {
                zip.start_file(format!("OEBPS/{}", item.href), deflated).unwrap();
                zip.write_all(body).unwrap();
            }
        }

        zip.finish().unwrap().into_inner()
    }

    /// Write the archive as `dir/name` and return its path.
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.to_bytes()).unwrap();
        path
    }
}

pub fn xhtml(title: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>{title}</title></head>
<body>{body}</body>
</html>"#
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// The book used by the end-to-end scenario.
pub fn sample_book() -> EpubBuilder {
    EpubBuilder::new("Sample")
        .chapter("part1", "<h1>Chapter One</h1><p>Hello <b>world</b>.</p>")
        .chapter("part2", "<h1>Chapter One</h1><p>Second line.</p>")
}
