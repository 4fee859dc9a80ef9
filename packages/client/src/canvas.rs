//! Local render surface.
//!
//! The terminal client has no pixels; it records the segments drawn on it so
//! the shared picture can be inspected with the `show` command.

use std::collections::BTreeSet;

use tegaki_shared::protocol::{StrokeSegment, WireEvent};

/// Something strokes can be drawn on
pub trait Surface {
    fn draw_line(&mut self, segment: &StrokeSegment);
    fn clear(&mut self);
}

/// In-memory canvas
#[derive(Debug, Default, Clone)]
pub struct Canvas {
    segments: Vec<StrokeSegment>,
    clear_count: usize,
}

/// Overview of the canvas contents
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSummary {
    pub segments: usize,
    pub colors: Vec<String>,
    /// `(min_x, min_y, max_x, max_y)` of all endpoints
    pub bounds: Option<(f64, f64, f64, f64)>,
    pub clear_count: usize,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event received from the relay
    pub fn apply(&mut self, event: &WireEvent) {
        match event {
            WireEvent::Draw(segment) => self.draw_line(segment),
            WireEvent::Clear => self.clear(),
        }
    }

    pub fn segments(&self) -> &[StrokeSegment] {
        &self.segments
    }

    pub fn summary(&self) -> CanvasSummary {
        let colors: BTreeSet<&str> = self.segments.iter().map(|s| s.color.as_str()).collect();

        let bounds = self.segments.iter().fold(None, |acc, s| {
            let (min_x, min_y, max_x, max_y) = acc.unwrap_or((s.x0, s.y0, s.x0, s.y0));
            Some((
                min_x.min(s.x0).min(s.x1),
                min_y.min(s.y0).min(s.y1),
                max_x.max(s.x0).max(s.x1),
                max_y.max(s.y0).max(s.y1),
            ))
        });

        CanvasSummary {
            segments: self.segments.len(),
            colors: colors.into_iter().map(str::to_string).collect(),
            bounds,
            clear_count: self.clear_count,
        }
    }
}

impl Surface for Canvas {
    fn draw_line(&mut self, segment: &StrokeSegment) {
        self.segments.push(segment.clone());
    }

    fn clear(&mut self) {
        self.segments.clear();
        self.clear_count += 1;
    }
}
