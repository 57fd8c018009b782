//! Device palette

use crate::error::{RendererError, RendererResult};

pub const MAX_COLOR_VALUE: f64 = 255.0;

/// Palette slots a stroke can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorIndex {
    Black = 0,
    Gray = 1,
    White = 2,
    Yellow = 3,
    Green = 4,
    Pink = 5,
    Blue = 6,
    Red = 7,
    GrayOverlap = 8,
}

impl TryFrom<i64> for ColorIndex {
    type Error = RendererError;

    fn try_from(value: i64) -> RendererResult<Self> {
        Ok(match value {
            0 => Self::Black,
            1 => Self::Gray,
            2 => Self::White,
            3 => Self::Yellow,
            4 => Self::Green,
            5 => Self::Pink,
            6 => Self::Blue,
            7 => Self::Red,
            8 => Self::GrayOverlap,
            other => return Err(RendererError::InvalidColorIndex(other)),
        })
    }
}

/// RGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Components scaled to 0.0-1.0, the form PDF color operators take.
    pub fn normalize(&self) -> (f64, f64, f64) {
        (
            f64::from(self.red) / MAX_COLOR_VALUE,
            f64::from(self.green) / MAX_COLOR_VALUE,
            f64::from(self.blue) / MAX_COLOR_VALUE,
        )
    }

    pub const fn from_index(index: ColorIndex) -> Self {
        match index {
            ColorIndex::Black => Self::rgb(0, 0, 0),
            ColorIndex::Gray | ColorIndex::GrayOverlap => Self::rgb(125, 125, 125),
            ColorIndex::White => Self::rgb(255, 255, 255),
            ColorIndex::Yellow => Self::rgb(255, 255, 0),
            ColorIndex::Green => Self::rgb(0, 255, 0),
            ColorIndex::Pink => Self::rgb(255, 0, 255),
            ColorIndex::Blue => Self::rgb(0, 0, 255),
            ColorIndex::Red => Self::rgb(255, 0, 0),
        }
    }

    /// Look up a raw palette index as stored in a stroke.
    pub fn from_raw_index(index: i64) -> RendererResult<Self> {
        ColorIndex::try_from(index).map(Self::from_index)
    }
}
