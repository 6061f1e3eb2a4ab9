//! autoi18n - automatic internationalization for JS/TS/JSX/Vue sources
//!
//! Finds human-readable text in the configured target script, collects it into
//! per-locale translation tables, and rewrites the sources so each literal goes
//! through the runtime lookup function.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Pure engine (classifier, extractors, rewriter, translation table)
//! - `locale_store`: Per-locale JSON files on disk
//! - `pipeline`: Scan, extract, translate, persist and rewrite a project
//! - `translator`: Translation backends

pub mod cli;
pub mod config;
pub mod core;
pub mod locale_store;
pub mod pipeline;
pub mod translator;
