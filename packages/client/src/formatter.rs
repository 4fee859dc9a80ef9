//! Event formatting utilities for client display.

use tegaki_shared::{protocol::StrokeSegment, time::timestamp_to_clock_label};

use crate::{canvas::CanvasSummary, pen::Pen};

/// Event formatter for client display
pub struct EventFormatter;

impl EventFormatter {
    /// Format a segment drawn by another client
    ///
    /// # Arguments
    ///
    /// * `segment` - The received segment
    /// * `received_at` - Unix timestamp when the event was received (milliseconds)
    pub fn format_remote_draw(segment: &StrokeSegment, received_at: i64) -> String {
        format!(
            "\n[{}] ~ draw ({}, {}) -> ({}, {}) {} size {}\n",
            timestamp_to_clock_label(received_at),
            segment.x0,
            segment.y0,
            segment.x1,
            segment.y1,
            segment.color,
            segment.brush_size
        )
    }

    /// Format a clear performed by another client
    pub fn format_remote_clear(received_at: i64) -> String {
        format!(
            "\n[{}] ~ canvas cleared by another user\n",
            timestamp_to_clock_label(received_at)
        )
    }

    /// Format a confirmation after sending local segments
    pub fn format_sent_stroke(segment_count: usize, sent_at: i64) -> String {
        format!(
            "sent {} segment(s) at {}\n",
            segment_count,
            timestamp_to_clock_label(sent_at)
        )
    }

    /// Format a confirmation after sending a clear
    pub fn format_sent_clear(sent_at: i64) -> String {
        format!("canvas cleared at {}\n", timestamp_to_clock_label(sent_at))
    }

    /// Format the current pen settings
    pub fn format_pen(pen: &Pen) -> String {
        let eraser = if pen.is_eraser() { " (eraser on)" } else { "" };
        format!(
            "pen: color {} size {}{}\n",
            pen.color(),
            pen.brush_size(),
            eraser
        )
    }

    /// Format the local canvas summary
    pub fn format_canvas_summary(summary: &CanvasSummary) -> String {
        let mut output = String::new();
        output.push_str("------------------------------------------------------------\n");
        output.push_str(&format!("segments: {}\n", summary.segments));

        if summary.colors.is_empty() {
            output.push_str("colors: (none)\n");
        } else {
            output.push_str(&format!("colors: {}\n", summary.colors.join(", ")));
        }

        if let Some((min_x, min_y, max_x, max_y)) = summary.bounds {
            output.push_str(&format!(
                "bounds: ({}, {}) - ({}, {})\n",
                min_x, min_y, max_x, max_y
            ));
        }

        output.push_str(&format!("cleared {} time(s)\n", summary.clear_count));
        output.push_str("------------------------------------------------------------\n");
        output
    }

    /// Format a frame that is not a known event
    pub fn format_raw_frame(text: &str) -> String {
        format!("\n? {}\n", text)
    }

    /// Format a binary frame notification
    pub fn format_binary_frame(byte_count: usize) -> String {
        format!("\n? binary frame ({} bytes)\n", byte_count)
    }
}
