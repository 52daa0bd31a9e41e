pub mod document;
pub mod path;

pub use document::{Document, DocumentPair, Side};
pub use path::{FieldPath, PathSegment};
