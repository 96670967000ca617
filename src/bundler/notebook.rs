//! Minimal read-only notebook model.
//!
//! Only the parts bundlers inspect are modelled: the ordered cells with their
//! type and source text. nbformat 3 documents are upconverted while parsing.

use crate::bundler::error::{Context, ErrorExt, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// A notebook document in nbformat 4 shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawNotebook")]
pub struct Notebook {
    /// Cells in document order.
    pub cells: Vec<Cell>,
}

/// A single notebook cell.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    /// `code`, `markdown` or `raw`.
    pub cell_type: String,
    /// Source text, joined when stored as a list of lines.
    pub source: String,
}

/// Notebook as stored on disk.
///
/// nbformat 3 keeps cells in `worksheets`, code in `input` and headings in
/// their own cell type.
#[derive(Deserialize)]
struct RawNotebook {
    #[serde(default)]
    cells: Vec<RawCell>,
    #[serde(default)]
    worksheets: Vec<Worksheet>,
}

#[derive(Deserialize)]
struct Worksheet {
    #[serde(default)]
    cells: Vec<RawCell>,
}

#[derive(Deserialize)]
struct RawCell {
    #[serde(default)]
    cell_type: String,
    #[serde(default, deserialize_with = "multiline")]
    source: String,
    #[serde(default, deserialize_with = "multiline")]
    input: String,
    #[serde(default)]
    level: Option<u8>,
}

impl From<RawNotebook> for Notebook {
    fn from(raw: RawNotebook) -> Self {
        let cells = raw
            .cells
            .into_iter()
            .chain(raw.worksheets.into_iter().flat_map(|sheet| sheet.cells))
            .map(Cell::from)
            .collect();
        Self { cells }
    }
}

impl From<RawCell> for Cell {
    fn from(raw: RawCell) -> Self {
        if raw.cell_type == "heading" {
            let level = usize::from(raw.level.unwrap_or(1).max(1));
            return Self {
                cell_type: "markdown".into(),
                source: format!("{} {}", "#".repeat(level), raw.source),
            };
        }
        let source = if raw.source.is_empty() {
            raw.input
        } else {
            raw.source
        };
        Self {
            cell_type: raw.cell_type,
            source,
        }
    }
}

fn multiline<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Source {
        Text(String),
        Lines(Vec<String>),
    }

    Ok(match Source::deserialize(deserializer)? {
        Source::Text(text) => text,
        Source::Lines(lines) => lines.concat(),
    })
}

impl Notebook {
    /// Reads and parses a notebook file.
    pub async fn read(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path)
            .await
            .fs_context("reading notebook", path)?;
        Self::parse(&data).with_context(|| format!("parsing notebook {}", path.display()))
    }

    /// Parses notebook JSON.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// True if any cell source contains `needle`.
    pub fn any_cell_contains(&self, needle: &str) -> bool {
        self.cells.iter().any(|cell| cell.source.contains(needle))
    }
}

impl Cell {
    /// True for markdown cells.
    pub fn is_markdown(&self) -> bool {
        self.cell_type.starts_with("markdown")
    }
}

/// Notebook file name without its extension, e.g. `no_imports`.
pub fn notebook_name(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))
}

/// Notebook file name with its extension, e.g. `no_imports.ipynb`.
pub fn notebook_basename(path: &Path) -> Result<String> {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))
}
