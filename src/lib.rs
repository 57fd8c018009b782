//! reMarkable notebook to PDF renderer
//!
//! Turns decoded pen strokes into variable-width vector lines that imitate
//! the device's writing tools, and lays the pages out on top of their
//! background templates in a single PDF built with pdf-writer.

mod canvas;
mod image_registry;
mod image_utils;
mod json_helpers;

pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod pen;
pub mod renderer;
pub mod source;
pub mod surface;
pub mod template;
pub mod types;

use std::path::Path;

pub use color::{Color, ColorIndex};
pub use config::RenderConfig;
pub use document::PdfDocument;
pub use error::{RendererError, RendererResult};
pub use pen::{Pen, PenKind};
pub use renderer::PageRenderer;
pub use source::{BlockSource, JsonBlockSource};
pub use surface::Surface;
pub use types::{Block, Document, Line, Page, Point};

/// Convert the notebook at `content_path` into a PDF at `output_path`.
pub fn convert(content_path: &Path, output_path: &Path, config: RenderConfig) -> RendererResult<()> {
    let source = JsonBlockSource::for_content(content_path);
    let document = Document::load(content_path, &source)?;
    let mut pdf = PdfDocument::new(output_path);
    PageRenderer::new(config).render(&document, &mut pdf)
}
