mod parser;
mod reader;

pub use parser::{ManifestItem, OpfData, parse_container_xml, parse_opf};
pub use reader::{UNTITLED, read_epub, read_epub_from_reader};
