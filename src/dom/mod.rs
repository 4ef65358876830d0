//! Document tree: an index-linked arena that html5ever and xml5ever parse into.

mod arena;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId};
pub use tree_sink::{ArenaSink, NodeHandle, parse_html, parse_xhtml};
