//! Drawing surface abstraction
//!
//! The page renderer only speaks in these primitives, so the output backend
//! can be swapped (the crate ships [`crate::document::PdfDocument`]).

use crate::error::RendererResult;
use crate::geometry::Transform;
use crate::template::Template;
use crate::types::{LineCap, LineJoin};

pub trait Surface {
    /// Open a new output page. The previous page must have been finished.
    fn begin_page(&mut self, width: f64, height: f64) -> RendererResult<()>;

    fn save_state(&mut self) -> RendererResult<()>;

    fn restore_state(&mut self) -> RendererResult<()>;

    /// Concatenate `transform` onto the current transformation matrix.
    fn transform(&mut self, transform: &Transform) -> RendererResult<()>;

    fn set_line_cap(&mut self, cap: LineCap) -> RendererResult<()>;

    fn set_line_join(&mut self, join: LineJoin) -> RendererResult<()>;

    /// Set the stroke color (normalized RGB) and stroke opacity.
    fn set_stroke_color(&mut self, rgb: (f64, f64, f64), alpha: f64) -> RendererResult<()>;

    fn set_line_width(&mut self, width: f64) -> RendererResult<()>;

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> RendererResult<()>;

    /// Paint `template` with its bottom-left corner at the page origin,
    /// uniformly scaled by `scale`.
    fn draw_template(&mut self, template: &Template, scale: f64) -> RendererResult<()>;

    /// Commit the open page. No further drawing may target it.
    fn finish_page(&mut self) -> RendererResult<()>;

    /// Finalize the document. No pages may be added afterwards.
    fn save(&mut self) -> RendererResult<()>;
}

/// Run `draw` between a save and a restore of the graphics state.
///
/// The state is restored even if `draw` fails; the first error wins.
pub fn with_saved_state<S, F>(surface: &mut S, draw: F) -> RendererResult<()>
where
    S: Surface + ?Sized,
    F: FnOnce(&mut S) -> RendererResult<()>,
{
    surface.save_state()?;
    let drawn = draw(surface);
    let restored = surface.restore_state();
    drawn.and(restored)
}
