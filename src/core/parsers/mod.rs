//! Source parsers.
//!
//! - `script`: JS/JSX/TS/TSX parser (uses swc for AST generation)
//! - `comments`: comment spans from parser trivia or a lexical scan
//! - `sfc`: single-file component block splitter

pub mod comments;
pub mod script;
pub mod sfc;

pub use comments::{CommentBlock, CommentSpans};
pub use script::{ParseError, ParsedScript, SourceKind, parse_script};
pub use sfc::{SfcBlock, SfcDocument, split_component};
