use std::io::{Read, Seek};
use std::path::Path;

use log::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use super::parser::{OpfData, parse_container_xml, parse_opf, strip_bom};
use crate::book::{Book, DocumentPart, PartKind};
use crate::error::{Error, Result};

/// Title used when neither the package metadata nor the caller provide one.
pub const UNTITLED: &str = "untitled";

/// Read an EPUB file from disk into a [`Book`].
///
/// A book without a usable `dc:title` is named after the file stem.
///
/// # Example
///
/// ```no_run
/// use epubmd::read_epub;
///
/// let book = read_epub("path/to/book.epub")?;
/// println!("Title: {}", book.metadata.title);
/// # Ok::<(), epubmd::Error>(())
/// ```
pub fn read_epub<P: AsRef<Path>>(path: P) -> Result<Book> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let stem = path.file_stem().map(|s| s.to_string_lossy());
    read_epub_from_reader(file, stem.as_deref())
}

/// Read an EPUB from any [`Read`] + [`Seek`] source.
///
/// `fallback_title` names the book when its metadata has no title; without
/// one the book is called [`UNTITLED`]. The archive is dropped before
/// returning, on success and on failure alike.
pub fn read_epub_from_reader<R: Read + Seek>(
    reader: R,
    fallback_title: Option<&str>,
) -> Result<Book> {
    let mut archive = ZipArchive::new(reader)?;

    // 1. Find the OPF file path from container.xml
    let container = read_entry(&mut archive, "META-INF/container.xml")?;
    let opf_path = parse_container_xml(&container)?;
    let opf_dir = Path::new(&opf_path)
        .parent()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();

    // 2. Parse the OPF file
    let opf_bytes = read_entry(&mut archive, &opf_path)?;
    let opf_content = String::from_utf8(strip_bom(&opf_bytes).to_vec())?;
    let OpfData {
        mut metadata,
        manifest,
    } = parse_opf(&opf_content)?;

    if metadata.title.trim().is_empty() {
        let fallback = fallback_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED);
        warn!("package document has no title, using {fallback:?}");
        metadata.title = fallback.to_string();
    }

    // 3. Load content documents in manifest order; other items are only recorded
    let mut book = Book::new();
    book.metadata = metadata;

    for item in manifest {
        let kind = PartKind::classify(&item.media_type);
        let data = if kind == PartKind::Document {
            let full_path = resolve_path(&opf_dir, &item.href);
            let data = read_entry(&mut archive, &full_path)?;
            debug!("loaded {full_path} ({} bytes)", data.len());
            data
        } else {
            Vec::new()
        };

        book.parts.push(DocumentPart {
            id: item.id,
            href: item.href,
            media_type: item.media_type,
            kind,
            data,
        });
    }

    Ok(book)
}

/// Read a whole archive entry, retrying with the percent-decoded name.
fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<Vec<u8>> {
    // Try direct lookup first
    match read_entry_exact(archive, path) {
        Err(Error::Zip(ZipError::FileNotFound)) => {}
        other => return other,
    }

    // Fallback: try percent-decoded path (handles malformed EPUBs)
    let decoded = percent_encoding::percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| Error::InvalidEpub(format!("Invalid UTF-8 in path: {}", path)))?;

    if decoded != path {
        match read_entry_exact(archive, &decoded) {
            Err(Error::Zip(ZipError::FileNotFound)) => {}
            other => return other,
        }
    }

    Err(Error::MissingElement(path.to_string()))
}

fn read_entry_exact<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<Vec<u8>> {
    let mut file = archive.by_name(path)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)
        .map_err(|source| Error::Entry {
            entry: path.to_string(),
            source,
        })?;
    Ok(contents)
}

/// Join a manifest href onto the package directory, dropping any fragment
/// and collapsing `.` / `..` segments.
fn resolve_path(base: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or(href);

    let mut segments: Vec<&str> = Vec::new();
    let joined = if base.is_empty() || href.starts_with('/') {
        href.trim_start_matches('/').to_string()
    } else {
        format!("{}/{}", base, href)
    };

    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}
