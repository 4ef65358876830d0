//! Error types for epubmd operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting an ebook.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("cannot read {entry} from archive: {source}")]
    Entry { entry: String, source: io::Error },

    #[error("Invalid EPUB: {0}")]
    InvalidEpub(String),

    #[error("Missing required element: {0}")]
    MissingElement(String),

    #[error("cannot parse {href}: {reason}")]
    Parse { href: String, reason: String },

    #[error("cannot write {}: {source}", path.display())]
    Output { path: PathBuf, source: io::Error },
}

/// Coarse classification of an [`Error`], used by callers to pick an exit
/// status or to assert on failure paths without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The archive is missing, unreadable, corrupted, or lacks required parts.
    Load,
    /// A content document could not be turned into markup.
    Parse,
    /// The output directory or file could not be written.
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open { .. }
            | Error::Zip(_)
            | Error::Xml(_)
            | Error::Utf8(_)
            | Error::Entry { .. }
            | Error::InvalidEpub(_)
            | Error::MissingElement(_) => ErrorKind::Load,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::Output { .. } => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let load = Error::InvalidEpub("no rootfile".into());
        assert_eq!(load.kind(), ErrorKind::Load);

        let parse = Error::Parse {
            href: "ch1.xhtml".into(),
            reason: "unknown encoding".into(),
        };
        assert_eq!(parse.kind(), ErrorKind::Parse);

        let io = Error::Output {
            path: PathBuf::from("out/book.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(io.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_display_names_the_path() {
        let err = Error::Open {
            path: PathBuf::from("missing.epub"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.epub"), "{msg}");
        assert!(msg.contains("not found"), "{msg}");
    }
}
