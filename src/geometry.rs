//! Device and output geometry

pub const DISPLAY_WIDTH: f64 = 1404.0;
pub const DISPLAY_HEIGHT: f64 = 1872.0;
pub const DISPLAY_DPI: f64 = 226.0;
/// Stroke x coordinates are centered on the page.
pub const DISPLAY_DELTA_X: f64 = 702.0;
pub const DISPLAY_DELTA_Y: f64 = 0.0;

pub const PDF_PT_PER_PX: f64 = 72.0 / DISPLAY_DPI;
pub const PDF_WIDTH: f64 = DISPLAY_WIDTH * PDF_PT_PER_PX;
pub const PDF_HEIGHT: f64 = DISPLAY_HEIGHT * PDF_PT_PER_PX;

/// Page extent in device pixels and the offset baked into stroke coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
    pub delta_x: f64,
    pub delta_y: f64,
}

impl Default for PageDimensions {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            delta_x: DISPLAY_DELTA_X,
            delta_y: DISPLAY_DELTA_Y,
        }
    }
}

impl PageDimensions {
    /// Shift a stroke coordinate into page pixel space.
    pub fn offset(&self, x: f64, y: f64) -> (f64, f64) {
        (x + self.delta_x, y + self.delta_y)
    }
}

/// Transform matrix (6 values: a, b, c, d, e, f)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    /// Device pixels (origin top-left, y down) to output points (origin
    /// bottom-left, y up).
    pub fn device_to_output() -> Self {
        Self {
            a: PDF_PT_PER_PX,
            b: 0.0,
            c: 0.0,
            d: -PDF_PT_PER_PX,
            e: 0.0,
            f: PDF_HEIGHT,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    pub fn to_array(&self) -> [f32; 6] {
        [
            self.a as f32,
            self.b as f32,
            self.c as f32,
            self.d as f32,
            self.e as f32,
            self.f as f32,
        ]
    }
}
