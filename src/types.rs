//! Type definitions for decoded notebooks

use serde::{Deserialize, Serialize};

use crate::geometry::{PageDimensions, PDF_HEIGHT, PDF_WIDTH};

/// One captured pen sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub direction: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub pressure: f64,
}

/// A single pen-down to pen-up capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub tool: i64,
    pub color: i64,
    pub thickness_scale: f64,
    #[serde(default)]
    pub points: Vec<Point>,
}

/// Decoded scene block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    SceneLineItem {
        value: Option<Line>,
    },
    RootText,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// Notebook page
#[derive(Debug, Clone)]
pub struct Page {
    pub id: String,
    pub blocks: Vec<Block>,
    pub dimensions: PageDimensions,
    pub template: Option<String>,
    /// Recorded by the device but not applied when rendering.
    pub vertical_scroll: i64,
}

/// Pages of a notebook in reading order
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Output page width in points
    pub fn width(&self) -> f64 {
        PDF_WIDTH
    }

    /// Output page height in points
    pub fn height(&self) -> f64 {
        PDF_HEIGHT
    }
}
