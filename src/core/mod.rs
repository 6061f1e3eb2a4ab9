//! Text extraction and source rewriting engine.
//!
//! - `text`: target-script classes, phrase segmentation, the text classifier
//! - `parsers`: script parsing (swc), comment spans, component block splitting
//! - `lookup`: the configured runtime lookup function
//! - `extract`: qualifying-text extraction from scripts and components
//! - `rewrite`: span-based rewriting of key literals into lookup calls
//! - `table`: the in-memory translation table
//! - `file_scanner`: source file discovery
//!
//! Everything here is synchronous and holds no shared mutable state, so
//! callers may process files in parallel.

pub mod extract;
pub mod file_scanner;
pub mod lookup;
pub mod parsers;
pub mod rewrite;
pub mod table;
pub mod text;
