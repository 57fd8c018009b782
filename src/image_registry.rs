//! Image registry for template XObjects shared between pages
use std::collections::HashMap;
use std::path::PathBuf;

use log::debug;
use pdf_writer::{Pdf, Ref};

use crate::error::RendererResult;
use crate::geometry::DISPLAY_WIDTH;
use crate::image_utils;
use crate::template::Template;

pub struct ImageRegistry {
    // template path → (image object id, XObject resource name)
    images: HashMap<PathBuf, (Ref, String)>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
        }
    }

    /// Get or create the Image XObject for `template`. A template is
    /// rasterized and embedded once no matter how many pages use it.
    /// Returns (image_object_id, xobject_name)
    pub fn get_or_create(
        &mut self,
        pdf: &mut Pdf,
        next_ref_id: &mut i32,
        template: &Template,
    ) -> RendererResult<(Ref, String)> {
        if let Some((id, name)) = self.images.get(template.path()) {
            return Ok((*id, name.clone()));
        }

        let rgba = image_utils::rasterize(template.data(), DISPLAY_WIDTH as u32)?;
        let image_id = Ref::new(*next_ref_id);
        *next_ref_id += 1;
        image_utils::add_image_to_pdf(pdf, &rgba, image_id, next_ref_id)?;

        let name = format!("I{}", image_id.get());
        debug!("Embedded template {} as {}", template.path().display(), name);
        self.images
            .insert(template.path().to_path_buf(), (image_id, name.clone()));
        Ok((image_id, name))
    }
}

impl Default for ImageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
