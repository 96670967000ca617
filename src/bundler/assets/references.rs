//! Files referenced by a notebook.
//!
//! A notebook declares the extra files it needs in markdown cells, either
//! inside an HTML comment or inside a fenced code block:
//!
//! ```text
//! <!--
//! data/*.csv
//! !data/private.csv
//! images/
//! -->
//! ```
//!
//! Patterns without a path separator are globbed in the notebook's directory.
//! Patterns with a separator are matched against every file below it, a
//! trailing `/` selects a whole directory and a leading `!` excludes matches.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    notebook::{Cell, Notebook},
};
use glob::Pattern;
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Reference discovery and copying, injected by the host.
///
/// Hosts without reference support pass no tools at all.
pub trait BundlerTools: Send + Sync {
    /// Lists files referenced by the notebook, relative to its directory.
    fn get_file_references(&self, notebook_path: &Path) -> Result<Vec<PathBuf>>;

    /// Copies `files` (relative to `src`) into `dst`, keeping subpaths.
    fn copy_filelist(&self, src: &Path, dst: &Path, files: &[PathBuf]) -> Result<()>;
}

/// Copies every file the notebook references into the staging directory.
///
/// The tools run on the blocking thread pool. Does nothing when no tools
/// are available.
pub async fn bundle_file_references(
    staging_dir: &Path,
    notebook_path: &Path,
    tools: Option<Arc<dyn BundlerTools>>,
) -> Result<()> {
    let Some(tools) = tools else {
        log::debug!("No bundler tools available, skipping file references");
        return Ok(());
    };

    let staging_dir = staging_dir.to_path_buf();
    let notebook_path = notebook_path.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let references = tools.get_file_references(&notebook_path)?;
        log::debug!(
            "{} references {} file(s)",
            notebook_path.display(),
            references.len()
        );
        let notebook_dir = notebook_path.parent().unwrap_or_else(|| Path::new("."));
        tools.copy_filelist(notebook_dir, &staging_dir, &references)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Reference collection task failed: {e}")))?
}

/// Default [`BundlerTools`] reading reference declarations from markdown cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReferenceTools;

impl BundlerTools for FileReferenceTools {
    fn get_file_references(&self, notebook_path: &Path) -> Result<Vec<PathBuf>> {
        let data = std::fs::read(notebook_path).fs_context("reading notebook", notebook_path)?;
        let notebook = Notebook::parse(&data)?;
        let patterns: Vec<String> = notebook
            .cells
            .iter()
            .flat_map(cell_reference_patterns)
            .collect();

        let root = notebook_path.parent().unwrap_or_else(|| Path::new("."));
        expand_references(root, &patterns)
    }

    fn copy_filelist(&self, src: &Path, dst: &Path, files: &[PathBuf]) -> Result<()> {
        for file in files {
            let from = src.join(file);
            if !from.is_file() {
                continue;
            }
            let to = dst.join(file);
            if let Some(parent) = to.parent() {
                std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
            }
            std::fs::copy(&from, &to).fs_context("copying referenced file", &from)?;
        }
        Ok(())
    }
}

/// Reference patterns declared by one cell.
fn cell_reference_patterns(cell: &Cell) -> Vec<String> {
    if !cell.is_markdown() {
        return Vec::new();
    }
    let source = cell.source.as_str();

    let lines: Vec<&str> = if let Some(comment) = source.strip_prefix("<!--") {
        comment
            .lines()
            .map(|line| line.strip_suffix("-->").unwrap_or(line))
            .collect()
    } else if source.starts_with("```") {
        source
            .lines()
            .skip(1)
            .take_while(|line| !line.starts_with("```"))
            .collect()
    } else {
        return Vec::new();
    };

    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Expands reference patterns against the files below `root`.
fn expand_references(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut included = BTreeSet::new();
    let mut excluded = BTreeSet::new();
    let mut walked = Vec::new();

    for raw in patterns {
        let (negated, pattern) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw.as_str()),
        };
        let target = if negated { &mut excluded } else { &mut included };

        if pattern.contains('/') {
            walked.push((negated, pattern));
            continue;
        }

        let full = format!("{}/{}", Pattern::escape(&root.to_string_lossy()), pattern);
        for entry in glob::glob(&full)? {
            let Ok(path) = entry else { continue };
            if let Ok(rel) = path.strip_prefix(root) {
                target.insert(rel.to_path_buf());
            }
        }
    }

    if !walked.is_empty() {
        let files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
            .collect();

        for (negated, pattern) in walked {
            let target = if negated { &mut excluded } else { &mut included };
            if pattern.ends_with('/') {
                let prefix = Path::new(pattern.trim_end_matches('/'));
                target.extend(files.iter().filter(|f| f.starts_with(prefix)).cloned());
            } else {
                let matcher = Pattern::new(pattern)?;
                target.extend(files.iter().filter(|f| matcher.matches_path(f)).cloned());
            }
        }
    }

    Ok(included.difference(&excluded).cloned().collect())
}
