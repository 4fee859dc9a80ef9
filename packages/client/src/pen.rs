//! Pen: turns pointer gestures into stroke segments.
//!
//! While the pen is pressed, every move emits one segment from the previous
//! position to the new one. Segments are emitted immediately, never batched.
//! Eraser mode paints with the canvas background color.

use tegaki_shared::protocol::{BACKGROUND_COLOR, StrokeSegment};

use crate::error::ClientError;

pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_BRUSH_SIZE: f64 = 5.0;
pub const MIN_BRUSH_SIZE: f64 = 1.0;
pub const MAX_BRUSH_SIZE: f64 = 50.0;

/// A position on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone)]
pub struct Pen {
    color: String,
    brush_size: f64,
    eraser: bool,
    /// Last position while pressed
    last: Option<Point>,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            brush_size: DEFAULT_BRUSH_SIZE,
            eraser: false,
            last: None,
        }
    }
}

impl Pen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the drawing color (`#rrggbb`)
    pub fn set_color(&mut self, color: &str) -> Result<(), ClientError> {
        if !is_hex_color(color) {
            return Err(ClientError::InvalidCommand(format!(
                "color must look like #rrggbb, got '{}'",
                color
            )));
        }
        self.color = color.to_ascii_lowercase();
        Ok(())
    }

    /// Set the stroke width
    pub fn set_brush_size(&mut self, size: f64) -> Result<(), ClientError> {
        if !(MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&size) {
            return Err(ClientError::InvalidCommand(format!(
                "brush size must be between {} and {}, got {}",
                MIN_BRUSH_SIZE, MAX_BRUSH_SIZE, size
            )));
        }
        self.brush_size = size;
        Ok(())
    }

    /// Toggle eraser mode, returning the new state
    pub fn toggle_eraser(&mut self) -> bool {
        self.eraser = !self.eraser;
        self.eraser
    }

    pub fn is_eraser(&self) -> bool {
        self.eraser
    }

    pub fn brush_size(&self) -> f64 {
        self.brush_size
    }

    /// Selected drawing color, regardless of eraser mode
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Color actually put on the canvas
    pub fn stroke_color(&self) -> &str {
        if self.eraser {
            BACKGROUND_COLOR
        } else {
            &self.color
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.last.is_some()
    }

    /// Start a stroke
    pub fn press(&mut self, at: Point) {
        self.last = Some(at);
    }

    /// Move the pointer. Emits a segment only while pressed.
    pub fn move_to(&mut self, to: Point) -> Option<StrokeSegment> {
        let from = self.last?;
        self.last = Some(to);
        Some(StrokeSegment {
            x0: from.x,
            y0: from.y,
            x1: to.x,
            y1: to.y,
            color: self.stroke_color().to_string(),
            brush_size: self.brush_size,
        })
    }

    /// End the stroke
    pub fn release(&mut self) {
        self.last = None;
    }

    /// Drag through `points`: press on the first, move through the rest, release.
    pub fn drag(&mut self, points: &[Point]) -> Vec<StrokeSegment> {
        let Some((first, rest)) = points.split_first() else {
            return Vec::new();
        };

        self.press(*first);
        let segments = rest.iter().filter_map(|p| self.move_to(*p)).collect();
        self.release();
        segments
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
