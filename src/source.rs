//! Notebook loading
//!
//! A notebook is a `.content` JSON file listing its pages, plus one block
//! stream per page. Decoding the device's binary scene files is left to an
//! external tool; [`JsonBlockSource`] reads its already-decoded output.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use crate::error::RendererResult;
use crate::geometry::PageDimensions;
use crate::json_helpers;
use crate::types::{Block, Document, Page};

/// Supplies the decoded blocks of a page.
pub trait BlockSource {
    fn read_blocks(&self, page_id: &str) -> RendererResult<Vec<Block>>;
}

/// Reads `<dir>/<page id>.json`, a JSON array of blocks.
#[derive(Debug, Clone)]
pub struct JsonBlockSource {
    dir: PathBuf,
}

impl JsonBlockSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Page files of a notebook live in a directory named like the content
    /// file without its extension.
    pub fn for_content(content_path: &Path) -> Self {
        Self::new(content_path.with_extension(""))
    }

    pub fn page_path(&self, page_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", page_id))
    }
}

impl BlockSource for JsonBlockSource {
    fn read_blocks(&self, page_id: &str) -> RendererResult<Vec<Block>> {
        let path = self.page_path(page_id);
        debug!("Reading blocks from {}", path.display());
        let reader = BufReader::new(File::open(&path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Page entry of a content file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub id: String,
    pub template: Option<String>,
    pub vertical_scroll: i64,
}

/// List the pages of a parsed content file in document order.
pub fn parse_page_entries(content: &Value) -> RendererResult<Vec<PageEntry>> {
    let Some(pages) = content
        .get("cPages")
        .and_then(|c| json_helpers::get_array_opt(c, "pages"))
    else {
        return Ok(Vec::new());
    };

    pages
        .iter()
        .map(|page| {
            Ok(PageEntry {
                id: json_helpers::get_str(page, "id")?.to_string(),
                template: json_helpers::get_wrapped_str(page, "template").map(str::to_string),
                vertical_scroll: json_helpers::get_wrapped_i64_or(page, "vertical_scroll", 0),
            })
        })
        .collect()
}

impl Document {
    /// Load the notebook described by `content_path`, pulling page blocks
    /// from `source`.
    pub fn load(content_path: &Path, source: &dyn BlockSource) -> RendererResult<Self> {
        let reader = BufReader::new(File::open(content_path)?);
        let content: Value = serde_json::from_reader(reader)?;
        let entries = parse_page_entries(&content)?;
        info!("Loading {} pages from {}", entries.len(), content_path.display());

        let pages = entries
            .into_iter()
            .map(|entry| {
                let blocks = source.read_blocks(&entry.id)?;
                Ok(Page {
                    id: entry.id,
                    blocks,
                    dimensions: PageDimensions::default(),
                    template: entry.template,
                    vertical_scroll: entry.vertical_scroll,
                })
            })
            .collect::<RendererResult<Vec<_>>>()?;

        Ok(Document::new(pages))
    }
}
