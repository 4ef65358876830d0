//! EPUB parsing utilities (container.xml, OPF)

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::book::Metadata;
use crate::error::{Error, Result};

/// Parsed OPF package data.
pub struct OpfData {
    pub metadata: Metadata,
    /// Manifest items in document order.
    pub manifest: Vec<ManifestItem>,
}

/// One `<item>` of the OPF manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub id: String,
    pub href: String,
    pub media_type: String,
}

/// Parse META-INF/container.xml to find the OPF path.
pub fn parse_container_xml(bytes: &[u8]) -> Result<String> {
    let content = String::from_utf8(strip_bom(bytes).to_vec())?;

    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if local_name(e.name().as_ref()) == b"rootfile" =>
            {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"full-path" {
                        return Ok(String::from_utf8(attr.value.to_vec())?);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    Err(Error::InvalidEpub(
        "No rootfile found in container.xml".into(),
    ))
}

/// Parse OPF package document.
///
/// Text is not trimmed per event: entity references split text into several
/// events and the whitespace around them is significant ("Pride &amp; Prejudice").
pub fn parse_opf(content: &str) -> Result<OpfData> {
    let mut reader = Reader::from_str(content);

    let mut metadata = Metadata::default();
    let mut manifest: Vec<ManifestItem> = Vec::new();

    let mut in_metadata = false;
    let mut in_manifest = false;
    let mut current_element: Option<&'static str> = None;
    let mut buf_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                match local {
                    b"metadata" => in_metadata = true,
                    b"manifest" => in_manifest = true,
                    b"item" if in_manifest => {
                        if let Some(item) = manifest_item(&e)? {
                            manifest.push(item);
                        }
                    }
                    b"title" | b"creator" | b"language" if in_metadata => {
                        current_element = Some(match local {
                            b"title" => "title",
                            b"creator" => "creator",
                            _ => "language",
                        });
                        buf_text.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                let name = e.name();
                if in_manifest
                    && local_name(name.as_ref()) == b"item"
                    && let Some(item) = manifest_item(&e)?
                {
                    manifest.push(item);
                }
            }
            Ok(Event::Text(e)) => {
                if current_element.is_some() {
                    buf_text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::CData(e)) => {
                if current_element.is_some() {
                    buf_text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if current_element.is_some() {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    if let Some(resolved) = resolve_entity(&entity) {
                        buf_text.push_str(&resolved);
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"metadata" => in_metadata = false,
                    b"manifest" => in_manifest = false,
                    _ => {}
                }

                if let Some(elem) = current_element.take() {
                    let text = buf_text.trim();
                    match elem {
                        "title" if metadata.title.is_empty() => metadata.title = text.to_string(),
                        "creator" if !text.is_empty() => metadata.authors.push(text.to_string()),
                        "language" if metadata.language.is_empty() => {
                            metadata.language = text.to_string()
                        }
                        _ => {}
                    }
                    buf_text.clear();
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    Ok(OpfData { metadata, manifest })
}

fn manifest_item(e: &BytesStart<'_>) -> Result<Option<ManifestItem>> {
    let mut id = String::new();
    let mut href = String::new();
    let mut media_type = String::new();

    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"id" => id = attr.unescape_value()?.into_owned(),
            b"href" => href = attr.unescape_value()?.into_owned(),
            b"media-type" => media_type = attr.unescape_value()?.into_owned(),
            _ => {}
        }
    }

    if id.is_empty() || href.is_empty() {
        return Ok(None);
    }

    Ok(Some(ManifestItem {
        id,
        href,
        media_type,
    }))
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

/// Strip UTF-8 BOM if present.
pub fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

/// Extract local name from namespaced XML name (e.g., "dc:title" -> "title").
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bom() {
        let with_bom = &[0xEF, 0xBB, 0xBF, b'h', b'i'];
        assert_eq!(strip_bom(with_bom), b"hi");

        assert_eq!(strip_bom(b"hello"), b"hello");
        assert_eq!(strip_bom(&[]), &[]);

        // Partial BOM (not stripped)
        let partial = &[0xEF, 0xBB, b'x'];
        assert_eq!(strip_bom(partial), partial);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"title"), b"title");
        assert_eq!(local_name(b"dc:title"), b"title");
        assert_eq!(local_name(b"opf:item"), b"item");
        assert_eq!(local_name(b""), b"");
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("apos"), Some("'".to_string()));
        assert_eq!(resolve_entity("amp"), Some("&".to_string()));
        assert_eq!(resolve_entity("#65"), Some("A".to_string()));
        assert_eq!(resolve_entity("#x2019"), Some("\u{2019}".to_string()));
        assert_eq!(resolve_entity("nbsp"), None);
    }

    #[test]
    fn test_manifest_href_entities() {
        let opf = r#"<package><manifest>
  <item id="c1" href="text/fish&amp;chips.xhtml" media-type="application/xhtml+xml"/>
  <item id="c2" href="text/caf&#xE9;.xhtml" media-type="application/xhtml+xml"/>
  <item id="c3" href="text/ch3.xhtml" media-type="application/xhtml+xml"/>
</manifest></package>"#;

        let result = parse_opf(opf).unwrap();
        let hrefs: Vec<_> = result.manifest.iter().map(|i| i.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec!["text/fish&chips.xhtml", "text/caf\u{e9}.xhtml", "text/ch3.xhtml"]
        );
    }

    #[test]
    fn test_manifest_href_unknown_entity() {
        let opf = r#"<package><manifest>
  <item id="c1" href="a&nbsp;b.xhtml" media-type="application/xhtml+xml"/>
</manifest></package>"#;
        assert!(matches!(parse_opf(opf), Err(Error::Xml(_))));
    }

    #[test]
    fn test_parse_container_xml() {
        let container = br#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

        let result = parse_container_xml(container).unwrap();
        assert_eq!(result, "OEBPS/content.opf");
    }

    #[test]
    fn test_parse_container_xml_with_bom() {
        let mut container = vec![0xEF, 0xBB, 0xBF];
        container.extend_from_slice(
            br#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#,
        );

        let result = parse_container_xml(&container).unwrap();
        assert_eq!(result, "content.opf");
    }

    #[test]
    fn test_parse_container_xml_without_rootfile() {
        let container = br#"<container><rootfiles/></container>"#;
        let err = parse_container_xml(container).unwrap_err();
        assert!(matches!(err, Error::InvalidEpub(_)));
    }

    #[test]
    fn test_parse_opf_metadata() {
        let opf = r#"<?xml version="1.0"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Pride &amp; Prejudice</dc:title>
    <dc:title>Subtitle</dc:title>
    <dc:creator>Jane Austen</dc:creator>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
    <item id="chapter1" href="chapter1.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine><itemref idref="chapter1"/></spine>
</package>"#;

        let result = parse_opf(opf).unwrap();

        assert_eq!(result.metadata.title, "Pride & Prejudice");
        assert_eq!(result.metadata.authors, vec!["Jane Austen"]);
        assert_eq!(result.metadata.language, "en");
    }

    #[test]
    fn test_parse_opf_without_title() {
        let opf = r#"<package><metadata><dc:language>en</dc:language></metadata>
  <manifest><item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/></manifest>
</package>"#;

        let result = parse_opf(opf).unwrap();
        assert!(result.metadata.title.is_empty());
        assert_eq!(result.manifest.len(), 1);
    }

    #[test]
    fn test_parse_opf_manifest_order() {
        let opf = r#"<package>
  <metadata><dc:title>T</dc:title></metadata>
  <manifest>
    <item id="z" href="z.xhtml" media-type="application/xhtml+xml"/>
    <item id="css" href="style.css" media-type="text/css"></item>
    <item id="a" href="a.xhtml" media-type="application/xhtml+xml"/>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item href="orphan.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine><itemref idref="a"/><itemref idref="z"/></spine>
</package>"#;

        let result = parse_opf(opf).unwrap();
        let ids: Vec<_> = result.manifest.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "css", "a", "nav"]);
    }

    #[test]
    fn test_parse_opf_malformed() {
        let opf = r#"<package><metadata><dc:title>T</dc:creator></metadata></package>"#;
        assert!(matches!(parse_opf(opf), Err(Error::Xml(_))));
    }
}
