use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::args::CommonArgs;
use crate::{config::load_config, pipeline::Pipeline};

/// Resolved project setup for one command invocation.
pub struct ProjectContext {
    pub pipeline: Pipeline,
    pub source_root: PathBuf,
    pub output_dir: PathBuf,
}

impl ProjectContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        let loaded = load_config(&cwd)?;

        if common.verbose && !loaded.from_file {
            eprintln!("Note: No .autoi18nrc.json found, using default configuration");
        }

        // CLI > config file > defaults. CLI paths resolve against the working
        // directory, config paths against the config file's directory.
        let source_root = resolve(&cwd, &loaded.base_dir, common.source_root.as_deref(), &loaded.config.source_root);
        let output_dir = resolve(&cwd, &loaded.base_dir, common.output_dir.as_deref(), &loaded.config.output_dir);

        let pipeline = Pipeline::new(
            loaded.config,
            &loaded.base_dir,
            source_root.clone(),
            output_dir.clone(),
        )?;

        Ok(Self {
            pipeline,
            source_root,
            output_dir,
        })
    }

    /// Path for display, relative to the source root when possible.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.source_root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

fn resolve(cwd: &Path, base_dir: &Path, cli: Option<&Path>, configured: &str) -> PathBuf {
    match cli {
        Some(path) => cwd.join(path),
        None => base_dir.join(configured),
    }
}
