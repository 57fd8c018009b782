//! Pen models
//!
//! A stroke only records which tool drew it plus per-point kinematics. Each
//! [`PenKind`] turns those samples into the width, color and opacity of a
//! single segment, approximating how the tool looks on the device. The
//! constants below come from calibrating against device output and are kept
//! exactly as they are.

use crate::color::Color;
use crate::error::{RendererError, RendererResult};
use crate::types::LineCap;

/// Width hint the device reports for highlighter strokes, regardless of the
/// recorded thickness.
const HIGHLIGHTER_WIDTH: f64 = 15.0;

const DEFAULT_SEGMENT_LENGTH: u32 = 1000;

/// Simulated writing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PenKind {
    Brush,
    Pencil,
    Ballpoint,
    Marker,
    Fineliner,
    Highlighter,
    Eraser,
    MechanicalPencil,
    EraseArea,
    Caligraphy,
}

impl PenKind {
    /// Map a raw tool id to its pen. Later firmware reuses the same pens
    /// under ids 12-18, so both ranges resolve to the same kind.
    pub fn from_tool_id(tool_id: i64) -> RendererResult<Self> {
        Ok(match tool_id {
            0 | 12 => Self::Brush,
            1 | 14 => Self::Pencil,
            2 | 15 => Self::Ballpoint,
            3 | 16 => Self::Marker,
            4 | 17 => Self::Fineliner,
            5 | 18 => Self::Highlighter,
            6 => Self::Eraser,
            7 | 13 => Self::MechanicalPencil,
            8 => Self::EraseArea,
            21 => Self::Caligraphy,
            other => return Err(RendererError::UnknownTool(other)),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Pencil => "Pencil",
            Self::Ballpoint => "Ballpoint",
            Self::Marker => "Marker",
            Self::Fineliner => "Fineliner",
            Self::Highlighter => "Highlighter",
            Self::Eraser => "Eraser",
            Self::MechanicalPencil => "Mechanical Pencil",
            Self::EraseArea => "Erase Area",
            Self::Caligraphy => "Calligraphy",
        }
    }
}

/// Styling parameters for one stroke.
///
/// Everything a segment needs is derived once in [`Pen::create`]; the
/// `segment_*` methods are pure functions of the sample they are given.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    kind: PenKind,
    base_width: f64,
    base_color: Color,
    base_opacity: f64,
    line_cap: LineCap,
    segment_length: u32,
}

impl Pen {
    pub fn create(tool_id: i64, color_index: i64, width: f64) -> RendererResult<Self> {
        let kind = PenKind::from_tool_id(tool_id)?;
        let base_color = Color::from_raw_index(color_index)?;
        let width = if kind == PenKind::Highlighter { HIGHLIGHTER_WIDTH } else { width };

        let mut pen = Self {
            kind,
            base_width: width,
            base_color,
            base_opacity: 1.0,
            line_cap: LineCap::Round,
            segment_length: DEFAULT_SEGMENT_LENGTH,
        };

        match kind {
            PenKind::Fineliner => pen.base_width = width * 1.5,
            PenKind::Ballpoint => pen.segment_length = 5,
            PenKind::Marker => pen.segment_length = 3,
            PenKind::Pencil | PenKind::Brush | PenKind::Caligraphy => pen.segment_length = 2,
            PenKind::MechanicalPencil => {
                pen.base_width = width * width;
                pen.base_opacity = 0.7;
            }
            PenKind::Highlighter => {
                pen.line_cap = LineCap::Square;
                pen.base_width = width * 1.8;
                pen.base_opacity = 0.2;
            }
            PenKind::Eraser => {
                pen.line_cap = LineCap::Square;
                pen.base_width = width * 2.0;
            }
            PenKind::EraseArea => {
                pen.line_cap = LineCap::Square;
                pen.base_opacity = 0.0;
            }
        }

        Ok(pen)
    }

    pub fn kind(&self) -> PenKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn base_width(&self) -> f64 {
        self.base_width
    }

    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    /// Sampling distance the device uses while capturing with this tool.
    /// Not needed for rendering.
    pub fn segment_length(&self) -> u32 {
        self.segment_length
    }

    pub fn segment_width(&self, speed: f64, direction: f64, width: f64, pressure: f64) -> f64 {
        match self.kind {
            PenKind::Ballpoint => pressure / 255.0 + 0.175 * width - 0.125 * speed / 50.0,
            PenKind::Marker => 0.2 * width - 0.4 * direction_to_tilt(direction),
            PenKind::Pencil => {
                let segment_width = 0.06 * self.base_width * width;
                segment_width.min(self.base_width * 10.0)
            }
            PenKind::Brush => 0.1 * width * (1.0 + pressure / 255.0),
            PenKind::Caligraphy => 0.3 * width - 0.3 * direction_to_tilt(direction),
            _ => self.base_width,
        }
    }

    pub fn segment_color(&self, _speed: f64, _direction: f64, _width: f64, _pressure: f64) -> (f64, f64, f64) {
        self.base_color.normalize()
    }

    pub fn segment_opacity(&self, speed: f64, _direction: f64, _width: f64, pressure: f64) -> f64 {
        let opacity = match self.kind {
            PenKind::Ballpoint => (0.1 * -((speed / 4.0) / 35.0)) + (1.2 * pressure / 255.0) + 0.5,
            PenKind::Pencil => (0.1 * -((speed / 4.0) / 35.0)) + pressure / 255.0,
            PenKind::Brush => ((pressure / 255.0).powf(1.5) - 0.2 * (speed / 50.0)) * 1.5,
            _ => self.base_opacity,
        };
        cutoff(opacity)
    }
}

fn direction_to_tilt(direction: f64) -> f64 {
    direction.to_radians()
}

fn cutoff(value: f64) -> f64 {
    0.0_f64.max(1.0_f64.min(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [(f64, f64, f64, f64); 6] = [
        (0.0, 0.0, 0.0, 0.0),
        (0.0, 90.0, 20.0, 255.0),
        (12.5, 45.0, 7.0, 128.0),
        (300.0, 180.0, 30.0, 10.0),
        (1.0e6, 359.0, 1.0, 255.0),
        (35.0, 270.0, 60.0, 200.0),
    ];

    const ALIASES: [(i64, i64); 7] = [(0, 12), (1, 14), (2, 15), (3, 16), (4, 17), (5, 18), (7, 13)];

    #[test]
    fn test_aliased_tool_ids_style_identically() {
        for (a, b) in ALIASES {
            let first = Pen::create(a, 3, 2.0).unwrap();
            let second = Pen::create(b, 3, 2.0).unwrap();
            assert_eq!(first.kind(), second.kind());
            for (speed, direction, width, pressure) in SAMPLES {
                assert_eq!(
                    first.segment_width(speed, direction, width, pressure),
                    second.segment_width(speed, direction, width, pressure)
                );
                assert_eq!(
                    first.segment_opacity(speed, direction, width, pressure),
                    second.segment_opacity(speed, direction, width, pressure)
                );
            }
        }
    }

    #[test]
    fn test_opacity_is_clamped() {
        let tools = [0, 1, 2, 3, 4, 5, 6, 7, 8, 21];
        for tool in tools {
            let pen = Pen::create(tool, 0, 2.0).unwrap();
            for (speed, direction, width, pressure) in SAMPLES {
                let opacity = pen.segment_opacity(speed, direction, width, pressure);
                assert!((0.0..=1.0).contains(&opacity), "{} gave {}", pen.name(), opacity);
            }
        }
    }

    #[test]
    fn test_segment_color_follows_palette() {
        for index in 0..=8 {
            let pen = Pen::create(4, index, 1.0).unwrap();
            let expected = Color::from_raw_index(index).unwrap().normalize();
            assert_eq!(pen.segment_color(1.0, 2.0, 3.0, 4.0), expected);
        }
        let red = Pen::create(2, 7, 1.0).unwrap();
        assert_eq!(red.segment_color(0.0, 0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_highlighter_is_fixed_width_and_translucent() {
        let pen = Pen::create(5, 3, 2.0).unwrap();
        assert_eq!(pen.base_width(), 27.0);
        assert_eq!(pen.line_cap(), LineCap::Square);
        for (speed, direction, width, pressure) in SAMPLES {
            assert_eq!(pen.segment_width(speed, direction, width, pressure), 27.0);
            assert_eq!(pen.segment_opacity(speed, direction, width, pressure), 0.2);
        }
    }

    #[test]
    fn test_erase_area_is_invisible() {
        let pen = Pen::create(8, 0, 2.0).unwrap();
        assert_eq!(pen.line_cap(), LineCap::Square);
        for (speed, direction, width, pressure) in SAMPLES {
            assert_eq!(pen.segment_opacity(speed, direction, width, pressure), 0.0);
        }
    }

    #[test]
    fn test_construction_overrides() {
        assert_eq!(Pen::create(4, 0, 2.0).unwrap().base_width(), 3.0);
        assert_eq!(Pen::create(6, 0, 2.0).unwrap().base_width(), 4.0);

        let mechanical = Pen::create(7, 0, 3.0).unwrap();
        assert_eq!(mechanical.base_width(), 9.0);
        assert_eq!(mechanical.segment_opacity(100.0, 0.0, 5.0, 0.0), 0.7);

        assert_eq!(Pen::create(2, 0, 2.0).unwrap().segment_length(), 5);
        assert_eq!(Pen::create(4, 0, 2.0).unwrap().segment_length(), 1000);
    }

    #[test]
    fn test_kinematic_formulas() {
        let ballpoint = Pen::create(2, 0, 2.0).unwrap();
        let expected = 255.0 / 255.0 + 0.175 * 10.0 - 0.125 * 50.0 / 50.0;
        assert!((ballpoint.segment_width(50.0, 0.0, 10.0, 255.0) - expected).abs() < 1e-12);

        let marker = Pen::create(3, 0, 2.0).unwrap();
        let expected = 0.2 * 10.0 - 0.4 * std::f64::consts::FRAC_PI_2;
        assert!((marker.segment_width(0.0, 90.0, 10.0, 0.0) - expected).abs() < 1e-12);

        let pencil = Pen::create(1, 0, 2.0).unwrap();
        assert!((pencil.segment_width(0.0, 0.0, 10.0, 0.0) - 1.2).abs() < 1e-12);
        assert_eq!(pencil.segment_width(0.0, 0.0, 1000.0, 0.0), 20.0);

        let brush = Pen::create(0, 0, 2.0).unwrap();
        assert!((brush.segment_width(0.0, 0.0, 10.0, 255.0) - 2.0).abs() < 1e-12);
        assert_eq!(brush.segment_opacity(0.0, 0.0, 0.0, 255.0), 1.0);
        assert_eq!(brush.segment_opacity(0.0, 0.0, 0.0, 0.0), 0.0);

        let caligraphy = Pen::create(21, 0, 2.0).unwrap();
        let expected = 0.3 * 10.0 - 0.3 * std::f64::consts::FRAC_PI_2;
        assert!((caligraphy.segment_width(0.0, 90.0, 10.0, 0.0) - expected).abs() < 1e-12);
        assert!((caligraphy.segment_width(0.0, 0.0, 10.0, 0.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_pressure_and_speed_opacity() {
        let ballpoint = Pen::create(2, 0, 2.0).unwrap();
        // -0.025 + 0.12 + 0.5
        assert!((ballpoint.segment_opacity(35.0, 0.0, 0.0, 25.5) - 0.595).abs() < 1e-12);
        assert_eq!(ballpoint.segment_opacity(35.0, 0.0, 0.0, 127.5), 1.0);

        let pencil = Pen::create(1, 0, 2.0).unwrap();
        // -0.025 + 0.5
        assert!((pencil.segment_opacity(35.0, 0.0, 0.0, 127.5) - 0.475).abs() < 1e-12);
        assert!((pencil.segment_opacity(140.0, 0.0, 0.0, 255.0) - 0.9).abs() < 1e-12);
        assert_eq!(pencil.segment_opacity(350.0, 0.0, 0.0, 0.0), 0.0);

        let brush = Pen::create(0, 0, 2.0).unwrap();
        // (0.125 - 0.2) * 1.5 clamps, (0.125 - 0.02) * 1.5 does not
        assert_eq!(brush.segment_opacity(50.0, 0.0, 0.0, 63.75), 0.0);
        assert!((brush.segment_opacity(5.0, 0.0, 0.0, 63.75) - 0.1575).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_tool_fails() {
        assert!(matches!(Pen::create(99, 0, 1.0), Err(RendererError::UnknownTool(99))));
        assert!(matches!(Pen::create(9, 0, 1.0), Err(RendererError::UnknownTool(9))));
        assert!(matches!(Pen::create(-1, 0, 1.0), Err(RendererError::UnknownTool(-1))));
        assert!(matches!(
            Pen::create(4, -3, 1.0),
            Err(RendererError::InvalidColorIndex(-3))
        ));
        assert!(matches!(
            Pen::create(4, 17, 1.0),
            Err(RendererError::InvalidColorIndex(17))
        ));
    }
}
