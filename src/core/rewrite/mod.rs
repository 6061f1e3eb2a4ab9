//! Rewriting: replace text that is a translation-table key with lookup calls.
//!
//! The rewriter never regenerates code from the syntax tree. Sites are located
//! by byte span and spliced into the original text, so every byte outside a
//! replaced literal survives unchanged.

pub mod edit;
pub mod script;
pub mod template;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use edit::{Edit, apply_edits};
pub use script::ImportAnchor;

use crate::core::lookup::LookupFunction;
use crate::core::parsers::{ParseError, SourceKind, split_component};
use crate::core::text::TargetScript;

/// Quoting of string literals passed to emitted lookup calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteStyle {
    #[default]
    Double,
    Single,
    /// Reuse the original literal's source text.
    Preserve,
}

/// Statement terminator of the inserted import line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemicolonStyle {
    /// Follow the file's first import declaration.
    #[default]
    Preserve,
    Always,
    Never,
}

#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    pub lookup: LookupFunction,
    /// Inserted once at the top when a local lookup call was emitted and the
    /// function is not already imported.
    pub import_statement: Option<String>,
    pub quote_style: QuoteStyle,
    pub semicolon_style: SemicolonStyle,
    /// Script used to segment template literal and JSX text runs.
    pub script: TargetScript,
}

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("overlapping edits at {first:?} and {second:?}")]
    OverlappingEdit {
        first: Range<usize>,
        second: Range<usize>,
    },

    #[error("edit span {0:?} is outside the source")]
    InvalidSpan(Range<usize>),
}

/// A rewritten source and the number of literals replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub code: String,
    pub replacements: usize,
}

impl Rewrite {
    pub fn unchanged(source: &str) -> Self {
        Self {
            code: source.to_string(),
            replacements: 0,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.replacements > 0
    }
}

/// The rewrite decision only needs key membership; the per-locale payload
/// of a translation table is irrelevant here.
pub trait KeySet {
    fn has_key(&self, text: &str) -> bool;
}

impl KeySet for BTreeSet<String> {
    fn has_key(&self, text: &str) -> bool {
        self.contains(text)
    }
}

impl KeySet for HashSet<String> {
    fn has_key(&self, text: &str) -> bool {
        self.contains(text)
    }
}

impl<V> KeySet for BTreeMap<String, V> {
    fn has_key(&self, text: &str) -> bool {
        self.contains_key(text)
    }
}

impl<V> KeySet for HashMap<String, V> {
    fn has_key(&self, text: &str) -> bool {
        self.contains_key(text)
    }
}

pub struct Rewriter {
    options: RewriteOptions,
}

impl Rewriter {
    pub fn new(options: RewriteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Rewrite `source`, returning it verbatim on any failure.
    pub fn transform(&self, source: &str, kind: SourceKind, keys: &dyn KeySet) -> String {
        match self.rewrite(source, kind, keys) {
            Ok(rewrite) => rewrite.code,
            Err(err) => {
                tracing::debug!(error = %err, "rewrite failed, keeping source unchanged");
                source.to_string()
            }
        }
    }

    pub fn rewrite(
        &self,
        source: &str,
        kind: SourceKind,
        keys: &dyn KeySet,
    ) -> Result<Rewrite, RewriteError> {
        if kind.is_component() {
            self.rewrite_component(source, keys)
        } else {
            script::rewrite_script(source, kind, &self.options, keys, ImportAnchor::File)
        }
    }

    /// Rewrite the template and script blocks of a component independently
    /// and splice them back over the original block bodies.
    pub fn rewrite_component(
        &self,
        source: &str,
        keys: &dyn KeySet,
    ) -> Result<Rewrite, RewriteError> {
        let document = split_component(source);
        if document.is_empty() {
            return Ok(Rewrite::unchanged(source));
        }

        let mut edits = Vec::new();
        let mut replacements = 0;

        if let Some(block) = &document.script {
            let kind = SourceKind::from_lang(block.lang());
            let rewrite = script::rewrite_script(
                block.content,
                kind,
                &self.options,
                keys,
                ImportAnchor::Block,
            )?;
            if rewrite.is_changed() {
                replacements += rewrite.replacements;
                edits.push(Edit::replace(block.range.clone(), rewrite.code));
            }
        }

        if let Some(block) = &document.template {
            let rewrite = template::rewrite_template(block.content, &self.options, keys);
            if rewrite.is_changed() {
                replacements += rewrite.replacements;
                edits.push(Edit::replace(block.range.clone(), rewrite.code));
            }
        }

        if replacements == 0 {
            return Ok(Rewrite::unchanged(source));
        }
        Ok(Rewrite {
            code: apply_edits(source, edits)?,
            replacements,
        })
    }
}
