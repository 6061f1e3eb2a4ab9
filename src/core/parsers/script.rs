use std::path::Path;
use std::sync::Arc;

use swc_common::{BytePos, FileName, Globals, SourceMap, comments::SingleThreadedComments};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use thiserror::Error;

use super::comments::CommentSpans;

/// Kind of source document, derived from a file extension or an SFC
/// `<script lang="…">` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Js,
    Jsx,
    Ts,
    Tsx,
    /// Single-file component with `<template>` and `<script>` blocks.
    Vue,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str())? {
            "js" | "mjs" | "cjs" => Some(SourceKind::Js),
            "jsx" => Some(SourceKind::Jsx),
            "ts" | "mts" | "cts" => Some(SourceKind::Ts),
            "tsx" => Some(SourceKind::Tsx),
            "vue" => Some(SourceKind::Vue),
            _ => None,
        }
    }

    /// Kind of an SFC script block given its `lang` attribute.
    pub fn from_lang(lang: Option<&str>) -> Self {
        match lang {
            Some("ts") => SourceKind::Ts,
            Some("tsx") => SourceKind::Tsx,
            Some("jsx") => SourceKind::Jsx,
            _ => SourceKind::Js,
        }
    }

    pub fn is_component(self) -> bool {
        self == SourceKind::Vue
    }

    fn syntax(self) -> Syntax {
        match self {
            SourceKind::Ts | SourceKind::Tsx => Syntax::Typescript(TsSyntax {
                tsx: self == SourceKind::Tsx,
                decorators: true,
                ..Default::default()
            }),
            SourceKind::Js | SourceKind::Jsx | SourceKind::Vue => Syntax::Es(EsSyntax {
                jsx: self == SourceKind::Jsx,
                decorators: true,
                ..Default::default()
            }),
        }
    }
}

/// Parse failure. Never crosses the public extract/transform boundary.
#[derive(Debug, Clone, Error)]
#[error("failed to parse script: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    /// Whether the failure looks like inline non-script content (e.g. a style
    /// block) rather than a genuine script error. Such failures are not logged.
    pub fn is_embedded_content(&self) -> bool {
        let msg = &self.message;
        msg.contains("';'") || msg.contains("':'") || msg.contains("Semi") || msg.contains("Colon")
    }
}

pub struct ParsedScript {
    pub module: Module,
    pub comments: CommentSpans,
    start_pos: BytePos,
}

impl ParsedScript {
    /// Byte offset of `pos` within the parsed source string.
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0 - self.start_pos.0) as usize
    }
}

/// Parse a script source string into an AST with comment spans.
///
/// Every call builds its own source map, so calls are independent and can run
/// in parallel. Recoverable parser errors are treated as failures too: a
/// partially understood file must never be rewritten.
pub fn parse_script(code: &str, kind: SourceKind) -> Result<ParsedScript, ParseError> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_map: Arc<SourceMap> = Default::default();
        let source_file = source_map.new_source_file(FileName::Anon.into(), code.to_string());
        let start_pos = source_file.start_pos;

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            kind.syntax(),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser.parse_module().map_err(|e| ParseError {
            message: format!("{:?}", e.kind()),
        })?;

        if let Some(err) = parser.take_errors().into_iter().next() {
            return Err(ParseError {
                message: format!("{:?}", err.kind()),
            });
        }

        Ok(ParsedScript {
            module,
            comments: CommentSpans::from_swc(&comments, start_pos),
            start_pos,
        })
    })
}
