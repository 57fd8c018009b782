//! Canvas-like wrapper around a pdf-writer content stream
//!
//! Tracks the graphics state alongside the operators it emits so callers
//! can save and restore it the same way the PDF viewer will.

use pdf_writer::types::{LineCapStyle, LineJoinStyle};
use pdf_writer::{Content, Name};

use crate::geometry::Transform;
use crate::types::{LineCap, LineJoin};

/// Canvas state for graphics operations
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasState {
    pub stroke_color: (f64, f64, f64),
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub ext_graphics_state: Option<String>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            stroke_color: (0.0, 0.0, 0.0),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            ext_graphics_state: None,
        }
    }
}

/// Content stream of one page
pub struct PdfCanvas {
    content: Content,
    state: CanvasState,
    state_stack: Vec<CanvasState>,
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self {
            content: Content::new(),
            state: CanvasState::default(),
            state_stack: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.state_stack.len()
    }

    /// Get content (for finalizing)
    pub fn finish(self) -> Vec<u8> {
        self.content.finish()
    }

    // ===== State Management =====

    pub fn save_state(&mut self) {
        self.state_stack.push(self.state.clone());
        self.content.save_state();
    }

    /// Unbalanced restores are ignored.
    pub fn restore_state(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
            self.content.restore_state();
        }
    }

    // ===== Stroke State =====

    pub fn set_stroke_color(&mut self, rgb: (f64, f64, f64)) {
        self.state.stroke_color = rgb;
        let (r, g, b) = (rgb.0 as f32, rgb.1 as f32, rgb.2 as f32);
        self.content.set_stroke_rgb(r, g, b);
    }

    /// Negative widths from the pen formulas collapse to the thinnest line.
    pub fn set_line_width(&mut self, width: f64) {
        let width = width.max(0.0);
        self.state.line_width = width;
        self.content.set_line_width(width as f32);
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
        self.content.set_line_cap(match cap {
            LineCap::Butt => LineCapStyle::ButtCap,
            LineCap::Round => LineCapStyle::RoundCap,
            LineCap::Square => LineCapStyle::ProjectingSquareCap,
        });
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
        self.content.set_line_join(match join {
            LineJoin::Miter => LineJoinStyle::MiterJoin,
            LineJoin::Round => LineJoinStyle::RoundJoin,
            LineJoin::Bevel => LineJoinStyle::BevelJoin,
        });
    }

    /// Apply a named ExtGState resource (opacity).
    pub fn set_ext_graphics_state(&mut self, name: &str) {
        self.content.set_parameters(Name(name.as_bytes()));
        self.state.ext_graphics_state = Some(name.to_string());
    }

    // ===== Drawing =====

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.content.move_to(x1 as f32, y1 as f32);
        self.content.line_to(x2 as f32, y2 as f32);
        self.content.stroke();
    }

    pub fn transform(&mut self, transform: &Transform) {
        self.content.transform(transform.to_array());
    }

    /// Paint an image XObject into the rectangle with bottom-left corner
    /// (x, y). Images are 1x1 unit in PDF, so the matrix carries the size.
    pub fn draw_image(&mut self, image_name: &str, x: f64, y: f64, width: f64, height: f64) {
        self.content.save_state();
        self.content.transform([width as f32, 0.0, 0.0, height as f32, x as f32, y as f32]);
        self.content.x_object(Name(image_name.as_bytes()));
        self.content.restore_state();
    }
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}
