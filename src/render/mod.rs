//! Output helpers for consumers of the final word stream.

mod chunk;
mod json;
mod text;

pub use chunk::{chunk_words, ChunkOptions, TextChunk};
pub use json::{to_json, JsonFormat};
pub use text::to_text;
