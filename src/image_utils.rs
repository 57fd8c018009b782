//! Image utilities for PDF rendering

use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::{DynamicImage, RgbaImage};
use log::debug;
use pdf_writer::{Filter, Pdf, Ref};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, Options, Tree};

use crate::error::{RendererError, RendererResult};

/// Decoded template artwork
pub enum ImageData {
    Svg(Tree),
    Raster(DynamicImage),
}

impl ImageData {
    /// Intrinsic size (SVG user units or pixels)
    pub fn size(&self) -> (f64, f64) {
        match self {
            ImageData::Svg(tree) => {
                let size = tree.size();
                (f64::from(size.width()), f64::from(size.height()))
            }
            ImageData::Raster(img) => (f64::from(img.width()), f64::from(img.height())),
        }
    }
}

/// Load image from file path. SVG files are parsed, anything else goes
/// through the raster decoders.
pub fn load_image(path: &Path) -> RendererResult<ImageData> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    if ext == "svg" {
        let svg_content = std::fs::read_to_string(path)?;
        let opt = Options {
            resources_dir: path.parent().map(Path::to_path_buf),
            ..Options::default()
        };
        let fontdb = usvg::fontdb::Database::new();
        let tree = Tree::from_str(&svg_content, &opt, &fontdb).map_err(|e| {
            RendererError::Template(format!("Failed to parse SVG {}: {}", path.display(), e))
        })?;
        return Ok(ImageData::Svg(tree));
    }

    let img = image::open(path).map_err(|e| {
        RendererError::Image(format!("Failed to decode image {}: {}", path.display(), e))
    })?;
    Ok(ImageData::Raster(img))
}

/// Produce RGBA pixels for embedding. SVGs are rendered `target_width`
/// pixels wide keeping their aspect ratio; raster images keep their own
/// resolution.
pub fn rasterize(image_data: &ImageData, target_width: u32) -> RendererResult<RgbaImage> {
    let tree = match image_data {
        ImageData::Raster(img) => return Ok(img.to_rgba8()),
        ImageData::Svg(tree) => tree,
    };

    let size = tree.size();
    let scale = target_width as f32 / size.width();
    let target_height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = Pixmap::new(target_width, target_height).ok_or_else(|| {
        RendererError::Image(format!(
            "Failed to create {}x{} pixmap for SVG",
            target_width, target_height
        ))
    })?;
    resvg::render(tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied RGBA
    let mut rgba_data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba_data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba_data)
        .ok_or_else(|| RendererError::Image("Failed to create image from pixmap".to_string()))
}

fn deflate(data: &[u8]) -> RendererResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Write `image` as an image XObject under `image_id`. Translucent images
/// get a soft mask, whose ref is taken from `next_ref_id`.
pub fn add_image_to_pdf(
    pdf: &mut Pdf,
    image: &RgbaImage,
    image_id: Ref,
    next_ref_id: &mut i32,
) -> RendererResult<()> {
    let (width, height) = image.dimensions();

    let mut rgb: Vec<u8> = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha: Vec<u8> = Vec::with_capacity((width * height) as usize);
    for chunk in image.as_raw().chunks_exact(4) {
        rgb.extend_from_slice(&chunk[..3]);
        alpha.push(chunk[3]);
    }
    let has_alpha = alpha.iter().any(|&a| a != u8::MAX);

    debug!(
        "Adding image to PDF: id={}, size={}x{}, alpha={}",
        image_id.get(),
        width,
        height,
        has_alpha
    );

    let mut smask_id_opt: Option<Ref> = None;
    if has_alpha {
        let smask_id = Ref::new(*next_ref_id);
        *next_ref_id += 1;
        let smask_data = deflate(&alpha)?;
        let mut smask = pdf.image_xobject(smask_id, &smask_data);
        smask.filter(Filter::FlateDecode);
        smask.width(width as i32);
        smask.height(height as i32);
        smask.color_space().device_gray();
        smask.bits_per_component(8);
        smask_id_opt = Some(smask_id);
    }

    let rgb_data = deflate(&rgb)?;
    let mut xobject = pdf.image_xobject(image_id, &rgb_data);
    xobject.filter(Filter::FlateDecode);
    xobject.width(width as i32);
    xobject.height(height as i32);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    if let Some(smask_id) = smask_id_opt {
        xobject.s_mask(smask_id);
    }

    Ok(())
}
