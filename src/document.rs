//! PDF output surface
//!
//! Builds the whole document in memory with pdf-writer and only touches the
//! filesystem in [`Surface::save`], so a conversion that fails part-way
//! never leaves a half-written file behind.

use std::collections::HashMap;
use std::path::PathBuf;

use log::{debug, info};
use pdf_writer::{Finish, Name, Pdf, Rect as PdfRect, Ref};

use crate::canvas::PdfCanvas;
use crate::error::{RendererError, RendererResult};
use crate::geometry::Transform;
use crate::image_registry::ImageRegistry;
use crate::surface::Surface;
use crate::template::Template;
use crate::types::{LineCap, LineJoin};

/// Page that is still receiving drawing operations
struct OpenPage {
    page_id: Ref,
    content_id: Ref,
    width: f64,
    height: f64,
    canvas: PdfCanvas,
}

pub struct PdfDocument {
    pdf: Pdf,
    output_path: PathBuf,
    current_page: Option<OpenPage>,
    pages: Vec<Ref>,
    page_tree_id: Ref,
    next_ref_id: i32,
    // quantized alpha → (resource name, ExtGState object)
    ext_graphics_states: HashMap<u32, (String, Ref)>,
    ext_graphics_states_used_on_current_page: HashMap<String, Ref>,
    images_registry: ImageRegistry,
    images_used_on_current_page: HashMap<String, Ref>,
    saved: bool,
}

impl PdfDocument {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        pdf.catalog(catalog_id).pages(page_tree_id);

        Self {
            pdf,
            output_path: output_path.into(),
            current_page: None,
            pages: vec![],
            page_tree_id,
            next_ref_id: 3,
            ext_graphics_states: HashMap::new(),
            ext_graphics_states_used_on_current_page: HashMap::new(),
            images_registry: ImageRegistry::new(),
            images_used_on_current_page: HashMap::new(),
            saved: false,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn next_ref(&mut self) -> Ref {
        let r = Ref::new(self.next_ref_id);
        self.next_ref_id += 1;
        r
    }

    fn ensure_open(&self) -> RendererResult<()> {
        if self.saved {
            return Err(RendererError::DocumentSaved);
        }
        Ok(())
    }

    fn canvas(&mut self) -> RendererResult<&mut PdfCanvas> {
        self.ensure_open()?;
        self.current_page
            .as_mut()
            .map(|page| &mut page.canvas)
            .ok_or(RendererError::NoCurrentPage)
    }

    fn get_or_create_ext_graphics_state(&mut self, alpha: f64) -> (String, Ref) {
        let clamped = alpha.clamp(0.0, 1.0);
        let alpha_key = (clamped * 1000.0).round() as u32;
        if let Some((name, gs_ref)) = self.ext_graphics_states.get(&alpha_key) {
            return (name.clone(), *gs_ref);
        }

        let gs_ref = self.next_ref();
        let name = format!("GS{}", gs_ref.get());
        self.pdf
            .ext_graphics(gs_ref)
            .non_stroking_alpha(clamped as f32)
            .stroking_alpha(clamped as f32);

        self.ext_graphics_states
            .insert(alpha_key, (name.clone(), gs_ref));
        (name, gs_ref)
    }

    /// Write the open page's content stream and page object.
    fn finalize_current_page(&mut self) -> RendererResult<()> {
        let page = self.current_page.take().ok_or(RendererError::NoCurrentPage)?;
        let content_bytes = page.canvas.finish();
        self.pdf.stream(page.content_id, &content_bytes);

        {
            let mut page_writer = self.pdf.page(page.page_id);
            page_writer.media_box(PdfRect::new(0.0, 0.0, page.width as f32, page.height as f32));
            page_writer.parent(self.page_tree_id);
            page_writer.contents(page.content_id);

            {
                let mut resources = page_writer.resources();
                if !self.images_used_on_current_page.is_empty() {
                    let mut xobject_dict = resources.x_objects();
                    for (image_name, image_id) in &self.images_used_on_current_page {
                        xobject_dict.pair(Name(image_name.as_bytes()), *image_id);
                    }
                }
                if !self.ext_graphics_states_used_on_current_page.is_empty() {
                    let mut ext_states = resources.ext_g_states();
                    for (name, gs_ref) in &self.ext_graphics_states_used_on_current_page {
                        ext_states.pair(Name(name.as_bytes()), *gs_ref);
                    }
                }
            }
            page_writer.finish();
        }

        debug!(
            "Finalized page {}: {} bytes of content, {} images, {} graphics states",
            self.pages.len(),
            content_bytes.len(),
            self.images_used_on_current_page.len(),
            self.ext_graphics_states_used_on_current_page.len()
        );

        self.images_used_on_current_page.clear();
        self.ext_graphics_states_used_on_current_page.clear();
        Ok(())
    }
}

impl Surface for PdfDocument {
    fn begin_page(&mut self, width: f64, height: f64) -> RendererResult<()> {
        self.ensure_open()?;
        if self.current_page.is_some() {
            return Err(RendererError::PageAlreadyOpen);
        }

        let page_id = self.next_ref();
        let content_id = self.next_ref();
        self.pages.push(page_id);
        self.current_page = Some(OpenPage {
            page_id,
            content_id,
            width,
            height,
            canvas: PdfCanvas::new(),
        });
        Ok(())
    }

    fn save_state(&mut self) -> RendererResult<()> {
        self.canvas()?.save_state();
        Ok(())
    }

    fn restore_state(&mut self) -> RendererResult<()> {
        self.canvas()?.restore_state();
        Ok(())
    }

    fn transform(&mut self, transform: &Transform) -> RendererResult<()> {
        self.canvas()?.transform(transform);
        Ok(())
    }

    fn set_line_cap(&mut self, cap: LineCap) -> RendererResult<()> {
        self.canvas()?.set_line_cap(cap);
        Ok(())
    }

    fn set_line_join(&mut self, join: LineJoin) -> RendererResult<()> {
        self.canvas()?.set_line_join(join);
        Ok(())
    }

    fn set_stroke_color(&mut self, rgb: (f64, f64, f64), alpha: f64) -> RendererResult<()> {
        self.canvas()?;
        let (name, gs_ref) = self.get_or_create_ext_graphics_state(alpha);
        let canvas = self.canvas()?;
        canvas.set_stroke_color(rgb);
        canvas.set_ext_graphics_state(&name);
        self.ext_graphics_states_used_on_current_page
            .insert(name, gs_ref);
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) -> RendererResult<()> {
        self.canvas()?.set_line_width(width);
        Ok(())
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> RendererResult<()> {
        self.canvas()?.line(x1, y1, x2, y2);
        Ok(())
    }

    fn draw_template(&mut self, template: &Template, scale: f64) -> RendererResult<()> {
        self.canvas()?;
        let (image_id, image_name) =
            self.images_registry
                .get_or_create(&mut self.pdf, &mut self.next_ref_id, template)?;
        let width = template.width() * scale;
        let height = template.height() * scale;
        self.canvas()?.draw_image(&image_name, 0.0, 0.0, width, height);
        self.images_used_on_current_page.insert(image_name, image_id);
        Ok(())
    }

    fn finish_page(&mut self) -> RendererResult<()> {
        self.ensure_open()?;
        self.finalize_current_page()
    }

    fn save(&mut self) -> RendererResult<()> {
        self.ensure_open()?;
        if self.current_page.is_some() {
            self.finalize_current_page()?;
        }

        let page_count = self.pages.len();
        self.pdf
            .pages(self.page_tree_id)
            .kids(self.pages.iter().copied())
            .count(page_count as i32);

        let pdf = std::mem::replace(&mut self.pdf, Pdf::new());
        let pdf_bytes = pdf.finish();
        self.saved = true;

        info!(
            "PDF generated: {} pages, {} bytes ({:.2} MB)",
            page_count,
            pdf_bytes.len(),
            pdf_bytes.len() as f64 / 1_048_576.0
        );

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.output_path, pdf_bytes)?;

        info!("PDF saved to: {}", self.output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn read_output(path: &Path) -> String {
        String::from_utf8_lossy(&std::fs::read(path).unwrap()).into_owned()
    }

    #[test]
    fn test_writes_one_pdf_page_per_begin_page() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("out.pdf");
        let mut doc = PdfDocument::new(&output);

        doc.begin_page(447.0, 596.0).unwrap();
        doc.set_stroke_color((0.0, 0.0, 0.0), 1.0).unwrap();
        doc.line(0.0, 0.0, 10.0, 10.0).unwrap();
        doc.finish_page().unwrap();
        doc.begin_page(447.0, 596.0).unwrap();
        doc.finish_page().unwrap();
        doc.save().unwrap();

        let text = read_output(&output);
        assert!(text.starts_with("%PDF"));
        assert!(text.contains("/Count 2"));
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_drawing_requires_an_open_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = PdfDocument::new(dir.path().join("out.pdf"));
        assert!(matches!(doc.line(0.0, 0.0, 1.0, 1.0), Err(RendererError::NoCurrentPage)));
        assert!(matches!(doc.finish_page(), Err(RendererError::NoCurrentPage)));

        doc.begin_page(10.0, 10.0).unwrap();
        assert!(matches!(doc.begin_page(10.0, 10.0), Err(RendererError::PageAlreadyOpen)));
    }

    #[test]
    fn test_no_pages_after_save() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.pdf");
        let mut doc = PdfDocument::new(&output);
        doc.begin_page(10.0, 10.0).unwrap();
        doc.save().unwrap();

        assert!(output.exists());
        assert!(matches!(doc.begin_page(10.0, 10.0), Err(RendererError::DocumentSaved)));
        assert!(matches!(doc.save_state(), Err(RendererError::DocumentSaved)));
        assert!(matches!(doc.save(), Err(RendererError::DocumentSaved)));
    }

    #[test]
    fn test_opacity_states_are_shared() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = PdfDocument::new(dir.path().join("out.pdf"));
        doc.begin_page(10.0, 10.0).unwrap();
        doc.set_stroke_color((1.0, 0.0, 0.0), 0.2).unwrap();
        doc.set_stroke_color((0.0, 1.0, 0.0), 0.2).unwrap();
        doc.set_stroke_color((0.0, 0.0, 1.0), 1.0).unwrap();
        assert_eq!(doc.ext_graphics_states.len(), 2);
        assert_eq!(doc.ext_graphics_states_used_on_current_page.len(), 2);

        doc.finish_page().unwrap();
        assert!(doc.ext_graphics_states_used_on_current_page.is_empty());
    }

    #[test]
    fn test_template_embedded_once() {
        let dir = tempfile::tempdir().unwrap();
        let svg_path = dir.path().join("Grid.svg");
        std::fs::write(
            &svg_path,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20"><rect width="10" height="20" fill="gray"/></svg>"#,
        )
        .unwrap();
        let template = Template::load(&svg_path).unwrap();

        let output = dir.path().join("out.pdf");
        let mut doc = PdfDocument::new(&output);
        for _ in 0..2 {
            doc.begin_page(447.0, 596.0).unwrap();
            doc.draw_template(&template, 44.7).unwrap();
            doc.finish_page().unwrap();
        }
        doc.save().unwrap();
        let text = read_output(&output);
        assert_eq!(text.matches("/Subtype /Image").count(), 1);
    }

    #[test]
    fn test_unwritable_output_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let mut doc = PdfDocument::new(blocker.join("out.pdf"));
        doc.begin_page(10.0, 10.0).unwrap();
        assert!(matches!(doc.save(), Err(RendererError::Io(_))));
    }
}
