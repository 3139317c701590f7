//! File acquisition and scan orchestration
//!
//! Resolves a target path into `(identifier, text)` pairs and feeds them to
//! the match engine. Directory walks skip hidden directories, filter by
//! configured extensions and exclude globs, and fan out across files with
//! rayon. The engine is side-effect-free per file, so no locking is needed.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::HawkConfig;
use crate::engine::{FileResult, MatchEngine, ScanResult};

/// Scans files and directories with the effective rule set
pub struct ProjectScanner {
    engine: MatchEngine,
    exclude: GlobSet,
    extensions: Vec<String>,
}

impl ProjectScanner {
    /// Build a scanner from configuration, failing fast on invalid rules or
    /// exclude globs
    pub fn from_config(config: &HawkConfig) -> Result<Self> {
        let rules = config.effective_rules()?;
        let engine = MatchEngine::new(rules).with_context_lines(config.scan.context_lines);

        let mut builder = GlobSetBuilder::new();
        for pattern in &config.scan.exclude_patterns {
            let glob = Glob::new(pattern)
                .with_context(|| format!("invalid exclude pattern: {}", pattern))?;
            builder.add(glob);
        }
        let exclude = builder.build().context("failed to build exclude globset")?;

        let extensions = config
            .scan
            .extensions
            .iter()
            .map(|e| e.to_lowercase())
            .collect();

        Ok(Self {
            engine,
            exclude,
            extensions,
        })
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Scan a file or directory.
    ///
    /// An explicitly named file is scanned regardless of extension filters;
    /// a directory is walked with filters applied.
    pub fn scan_path(&self, path: &Path) -> Result<ScanResult> {
        if path.is_file() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read file: {}", path.display()))?;
            let file_result = self.engine.analyze(&path.display().to_string(), &text);
            let mut result = ScanResult {
                files: Vec::new(),
                files_scanned: 1,
            };
            if !file_result.findings.is_empty() {
                result.files.push(file_result);
            }
            Ok(result)
        } else if path.is_dir() {
            let files = self.collect_files(path);
            tracing::debug!("collected {} files under {}", files.len(), path.display());
            Ok(self.scan_files(&files))
        } else {
            bail!("path not found: {}", path.display());
        }
    }

    /// Scan a list of files in parallel.
    ///
    /// Per-file failures are isolated: an unreadable file is logged and
    /// skipped, never aborting the remaining files. Output order follows
    /// input order regardless of thread scheduling.
    pub fn scan_files(&self, paths: &[PathBuf]) -> ScanResult {
        let per_file: Vec<Option<FileResult>> = paths
            .par_iter()
            .map(|path| match fs::read_to_string(path) {
                Ok(text) => Some(self.engine.analyze(&path.display().to_string(), &text)),
                Err(e) => {
                    tracing::warn!("skipping unreadable file {}: {}", path.display(), e);
                    None
                }
            })
            .collect();

        let mut result = ScanResult::default();
        for file_result in per_file.into_iter().flatten() {
            result.files_scanned += 1;
            if !file_result.findings.is_empty() {
                result.files.push(file_result);
            }
        }
        result
    }

    /// Collect scannable files under a directory, in stable name order
    fn collect_files(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| self.should_scan(p))
            .collect()
    }

    /// Extension and exclude-glob filtering for walked files
    fn should_scan(&self, path: &Path) -> bool {
        if self.exclude.is_match(path) {
            return false;
        }
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            }
            None => false,
        }
    }
}

/// Hidden files and directories are never walked (the root itself may be
/// given as "." or a dotted path)
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}
