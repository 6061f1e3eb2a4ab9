//! Orchestration: scan → extract → translate → persist → rewrite.
//!
//! The core engine is pure; this layer owns all I/O. Per-file work (reading,
//! extraction, rewriting) runs in parallel with rayon. Translation and table
//! persistence run once per batch.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::{
    config::Config,
    core::{
        extract::{ExtractionResult, Extractor},
        file_scanner::scan_files,
        parsers::SourceKind,
        rewrite::Rewriter,
        table::TranslationTable,
    },
    locale_store::{LocaleStore, write_if_changed},
    translator::{DictionaryTranslator, PassthroughTranslator, Translator},
};

/// One source file and the qualifying texts found in it.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: SourceKind,
    pub source: String,
    pub texts: ExtractionResult,
}

/// A file that could not be read.
#[derive(Debug, Clone)]
pub struct FileError {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug)]
pub struct ScanReport {
    pub files: Vec<SourceFile>,
    pub errors: Vec<FileError>,
    /// Extracted texts not yet present in the stored table.
    pub new_texts: BTreeSet<String>,
    /// Paths the walk could not access.
    pub skipped_paths: usize,
}

impl ScanReport {
    pub fn all_texts(&self) -> BTreeSet<&str> {
        self.files
            .iter()
            .flat_map(|file| file.texts.iter().map(String::as_str))
            .collect()
    }
}

/// A source file whose rewrite differs from what is on disk.
#[derive(Debug, Clone)]
pub struct FileRewrite {
    pub path: PathBuf,
    pub replacements: usize,
}

#[derive(Debug)]
pub struct RunReport {
    pub files_scanned: usize,
    pub errors: Vec<FileError>,
    pub skipped_paths: usize,
    pub new_texts: BTreeSet<String>,
    /// Translations added to the table, across all target locales.
    pub translated: usize,
    /// (text, locale) pairs the backend had no translation for.
    pub untranslated: usize,
    pub locale_files_written: Vec<PathBuf>,
    pub rewrites: Vec<FileRewrite>,
    pub applied: bool,
}

impl RunReport {
    /// Whether a dry run found work that `--apply` would perform.
    pub fn has_pending_work(&self) -> bool {
        !self.applied && (!self.new_texts.is_empty() || !self.rewrites.is_empty())
    }
}

pub struct Pipeline {
    config: Config,
    source_root: PathBuf,
    extractor: Extractor,
    rewriter: Rewriter,
    store: LocaleStore,
    translator: Box<dyn Translator>,
}

impl Pipeline {
    /// Build a pipeline. `source_root` and `output_dir` are already resolved;
    /// a relative `dictionary` path resolves against `base_dir`.
    pub fn new(config: Config, base_dir: &Path, source_root: PathBuf, output_dir: PathBuf) -> Result<Self> {
        let translator: Box<dyn Translator> = match &config.dictionary {
            Some(path) => Box::new(DictionaryTranslator::from_file(&base_dir.join(path))?),
            None => Box::new(PassthroughTranslator),
        };

        Ok(Self {
            extractor: Extractor::new(config.extract_options()),
            rewriter: Rewriter::new(config.rewrite_options()),
            store: LocaleStore::new(output_dir),
            source_root,
            translator,
            config,
        })
    }

    fn all_locales(&self) -> Vec<String> {
        let mut locales = vec![self.config.source_locale.clone()];
        locales.extend(
            self.config
                .target_locales
                .iter()
                .filter(|l| **l != self.config.source_locale)
                .cloned(),
        );
        locales
    }

    fn load_table(&self) -> Result<TranslationTable> {
        self.store
            .load(&self.all_locales())
            .with_context(|| format!("Failed to load locale files from {}", self.store.dir().display()))
    }

    /// Read and extract every source file.
    pub fn scan(&self) -> Result<ScanReport> {
        let table = self.load_table()?;
        Ok(self.scan_against(&table))
    }

    /// Read and extract every source file; texts missing from `table` are new.
    fn scan_against(&self, table: &TranslationTable) -> ScanReport {
        let scan = scan_files(
            &self.source_root,
            &self.config.includes,
            &self.config.ignores,
            self.config.ignore_test_files,
        );
        if scan.skipped_count > 0 {
            tracing::debug!(skipped = scan.skipped_count, "paths skipped due to access errors");
        }

        let results: Vec<Result<SourceFile, FileError>> = scan
            .files
            .par_iter()
            .filter_map(|path| SourceKind::from_path(path).map(|kind| (path, kind)))
            .map(|(path, kind)| -> Result<SourceFile, FileError> {
                let source = fs::read_to_string(path).map_err(|e| FileError {
                    path: path.clone(),
                    error: e.to_string(),
                })?;
                let texts = self.extractor.extract(&source, kind);
                tracing::debug!(file = %path.display(), texts = texts.len(), "extracted");
                Ok(SourceFile {
                    path: path.clone(),
                    kind,
                    source,
                    texts,
                })
            })
            .collect();

        let mut files = Vec::new();
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(file) => files.push(file),
                Err(err) => {
                    tracing::warn!(file = %err.path.display(), "cannot read file: {}", err.error);
                    errors.push(err);
                }
            }
        }

        let new_texts = files
            .iter()
            .flat_map(|file| file.texts.iter())
            .filter(|text| !table.contains(text))
            .cloned()
            .collect();

        ScanReport {
            files,
            errors,
            new_texts,
            skipped_paths: scan.skipped_count,
        }
    }

    /// Run the full pipeline. Nothing is written unless `apply` is set.
    pub fn run(&self, apply: bool) -> Result<RunReport> {
        let mut table = self.load_table()?;
        let scan = self.scan_against(&table);
        let texts = scan.all_texts();
        let source_locale = self.config.source_locale.as_str();

        for text in &texts {
            table.merge(text, source_locale, text);
        }

        let mut translated = 0;
        let mut untranslated = 0;
        for locale in self.config.target_locales.iter().filter(|l| *l != source_locale) {
            let missing = table.missing(texts.iter().copied(), locale);
            if missing.is_empty() {
                continue;
            }
            let results = self
                .translator
                .translate(&missing, source_locale, locale)
                .with_context(|| {
                    format!("Translator '{}' failed for locale '{}'", self.translator.name(), locale)
                })?;
            for (text, translation) in missing.iter().zip(results) {
                match translation {
                    Some(translation) => {
                        table.merge(text, locale, &translation);
                        translated += 1;
                    }
                    None => untranslated += 1,
                }
            }
        }

        let locale_files_written = if apply {
            self.store
                .save(&table, source_locale, &self.config.target_locales)?
        } else {
            Vec::new()
        };

        let rewritten: Vec<(FileRewrite, String)> = scan
            .files
            .par_iter()
            .filter_map(|file| match self.rewriter.rewrite(&file.source, file.kind, &table) {
                Ok(rewrite) if rewrite.code != file.source => Some((
                    FileRewrite {
                        path: file.path.clone(),
                        replacements: rewrite.replacements,
                    },
                    rewrite.code,
                )),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!(file = %file.path.display(), "left unchanged: {}", err);
                    None
                }
            })
            .collect();

        let mut rewrites = Vec::with_capacity(rewritten.len());
        for (rewrite, code) in rewritten {
            if apply {
                write_if_changed(&rewrite.path, &code)?;
            }
            rewrites.push(rewrite);
        }

        Ok(RunReport {
            files_scanned: scan.files.len(),
            errors: scan.errors,
            skipped_paths: scan.skipped_paths,
            new_texts: scan.new_texts,
            translated,
            untranslated,
            locale_files_written,
            rewrites,
            applied: apply,
        })
    }
}
