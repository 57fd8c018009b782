//! Page renderer
//!
//! ## Data Flow
//!
//! ```text
//! Document (pages of decoded blocks) → PageRenderer → Surface → PDF
//! ```
//!
//! For every page the renderer paints the background template (if any),
//! switches into device coordinates and turns each stroke into one line
//! segment per pair of consecutive points, styled by the stroke's [`Pen`].
//! Pages are emitted strictly in document order.

use log::{debug, error, info, warn};

use crate::config::RenderConfig;
use crate::error::{RendererError, RendererResult};
use crate::geometry::{Transform, PDF_WIDTH};
use crate::pen::Pen;
use crate::surface::{with_saved_state, Surface};
use crate::template::{TemplateCache, TemplateResolver};
use crate::types::{Block, Document, Line, LineJoin, Page};

pub struct PageRenderer {
    templates: TemplateResolver,
    strict: bool,
}

impl PageRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            templates: TemplateResolver::new(config.template_dir),
            strict: config.strict,
        }
    }

    /// Render every page of `document` onto `surface` and save it.
    pub fn render<S: Surface + ?Sized>(&self, document: &Document, surface: &mut S) -> RendererResult<()> {
        info!("Rendering {} pages", document.pages.len());
        let mut loaded = TemplateCache::new();
        for page in &document.pages {
            surface.begin_page(document.width(), document.height())?;
            if let Some(name) = page.template.as_deref() {
                self.render_template(name, &mut loaded, surface)?;
            }
            self.render_page(page, surface)?;
            surface.finish_page()?;
        }
        surface.save()
    }

    fn render_template<S: Surface + ?Sized>(
        &self,
        name: &str,
        loaded: &mut TemplateCache,
        surface: &mut S,
    ) -> RendererResult<()> {
        let Some(path) = self.templates.resolve(name) else {
            debug!("No template asset for '{}' in {}", name, self.templates.dir().display());
            return Ok(());
        };
        let template = loaded.get_or_load(&path)?;
        let scale = PDF_WIDTH / template.width();
        debug!("Compositing template {} at scale {:.4}", path.display(), scale);
        surface.draw_template(template, scale)
    }

    fn render_page<S: Surface + ?Sized>(&self, page: &Page, surface: &mut S) -> RendererResult<()> {
        debug!("Page {}: {} blocks", page.id, page.blocks.len());
        with_saved_state(surface, |surface| {
            surface.transform(&Transform::device_to_output())?;
            for block in &page.blocks {
                match block {
                    Block::SceneLineItem { value: Some(line) } => {
                        self.draw_scene_line_item(page, line, surface)?;
                    }
                    Block::SceneLineItem { value: None } => {
                        warn!("Page {}: skipping line item without a stroke", page.id);
                    }
                    Block::RootText => {
                        debug!("Page {}: text blocks are not rendered", page.id);
                    }
                    Block::Unknown => {
                        warn!("Page {}: not converting block of unsupported kind", page.id);
                    }
                }
            }
            Ok(())
        })
    }

    fn draw_scene_line_item<S: Surface + ?Sized>(
        &self,
        page: &Page,
        line: &Line,
        surface: &mut S,
    ) -> RendererResult<()> {
        let pen = match Pen::create(line.tool, line.color, line.thickness_scale) {
            Ok(pen) => pen,
            Err(err @ (RendererError::UnknownTool(_) | RendererError::InvalidColorIndex(_)))
                if !self.strict =>
            {
                error!("Page {}: skipping stroke: {}", page.id, err);
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        for pair in line.points.windows(2) {
            let (point1, point2) = (&pair[0], &pair[1]);
            let segment_color = pen.segment_color(point2.speed, point2.direction, point2.width, point2.pressure);
            let segment_width = pen.segment_width(point2.speed, point2.direction, point2.width, point2.pressure);
            let segment_opacity = pen.segment_opacity(point2.speed, point2.direction, point2.width, point2.pressure);

            let (x1, y1) = page.dimensions.offset(point1.x, point1.y);
            let (x2, y2) = page.dimensions.offset(point2.x, point2.y);

            with_saved_state(surface, |surface| {
                surface.set_line_cap(pen.line_cap())?;
                surface.set_line_join(LineJoin::Round)?;
                surface.set_stroke_color(segment_color, segment_opacity.max(0.0))?;
                surface.set_line_width(segment_width)?;
                surface.line(x1, y1, x2, y2)
            })?;
        }
        Ok(())
    }
}
