//! Text-level primitives shared by the extractors and the rewriter.
//!
//! - `script`: target-script character classes
//! - `segment`: phrase segmentation of mixed-script text
//! - `classify`: the qualifying-text classifier

pub mod classify;
pub mod script;
pub mod segment;

pub use classify::{Classifier, Rejection, Verdict, is_pattern_like};
pub use script::TargetScript;
pub use segment::{collapse_lines, segment_runs, segments};
