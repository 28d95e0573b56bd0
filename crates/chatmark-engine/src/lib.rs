pub mod markup;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use parsing::{Block, BlockKind, parse_document};
pub use render::{Fragment, Panel, render_blocks, render_document};
