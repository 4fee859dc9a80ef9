//! Parsing of commands typed at the client prompt.
//!
//! ```text
//! stroke 0,0 10,10 20,5   drag through the points (one draw event per move)
//! clear                   clear the canvas for everyone
//! color #ff0000           pick the drawing color
//! size 12                 pick the brush size (1-50)
//! eraser                  toggle eraser mode
//! show                    print a summary of the local canvas
//! help                    print this help
//! ```

use tegaki_shared::protocol::WireEvent;

use crate::{
    canvas::{Canvas, Surface},
    error::ClientError,
    formatter::EventFormatter,
    pen::{Pen, Point},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Stroke(Vec<Point>),
    Clear,
    Color(String),
    Size(f64),
    Eraser,
    Show,
    Help,
}

pub const HELP: &str = "\
Commands:
  stroke x,y x,y ...   drag through the points (at least two)
  clear                clear the canvas for everyone
  color #rrggbb        pick the drawing color
  size N               pick the brush size (1-50)
  eraser               toggle eraser mode
  show                 print a summary of the local canvas
  help                 print this help
";

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command, ClientError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Err(ClientError::InvalidCommand("empty input".to_string()));
    };
    let args: Vec<&str> = words.collect();

    match (name, args.as_slice()) {
        ("stroke" | "s", points) => {
            if points.len() < 2 {
                return Err(ClientError::InvalidCommand(
                    "stroke needs at least two points".to_string(),
                ));
            }
            points
                .iter()
                .map(|p| parse_point(p))
                .collect::<Result<Vec<_>, _>>()
                .map(Command::Stroke)
        }
        ("clear", []) => Ok(Command::Clear),
        ("color", [color]) => Ok(Command::Color((*color).to_string())),
        ("size", [size]) => size
            .parse::<f64>()
            .map(Command::Size)
            .map_err(|_| ClientError::InvalidCommand(format!("'{}' is not a number", size))),
        ("eraser", []) => Ok(Command::Eraser),
        ("show", []) => Ok(Command::Show),
        ("help" | "?", []) => Ok(Command::Help),
        _ => Err(ClientError::InvalidCommand(format!(
            "unknown command '{}' (type 'help')",
            line.trim()
        ))),
    }
}

/// Result of executing a command locally
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    /// Events to send to the relay, in order
    pub outbound: Vec<WireEvent>,
    /// Text to print
    pub output: String,
}

impl CommandOutcome {
    fn local(output: String) -> Self {
        Self {
            outbound: Vec::new(),
            output,
        }
    }
}

/// Execute a command against the local pen and canvas.
///
/// Strokes and clears are applied to the local canvas immediately and
/// returned as outbound events (one `draw` per segment).
pub fn execute_command(
    command: Command,
    pen: &mut Pen,
    canvas: &mut Canvas,
    now: i64,
) -> Result<CommandOutcome, ClientError> {
    match command {
        Command::Stroke(points) => {
            let segments = pen.drag(&points);
            for segment in &segments {
                canvas.draw_line(segment);
            }
            let output = EventFormatter::format_sent_stroke(segments.len(), now);
            Ok(CommandOutcome {
                outbound: segments.into_iter().map(WireEvent::Draw).collect(),
                output,
            })
        }
        Command::Clear => {
            canvas.clear();
            Ok(CommandOutcome {
                outbound: vec![WireEvent::Clear],
                output: EventFormatter::format_sent_clear(now),
            })
        }
        Command::Color(color) => {
            pen.set_color(&color)?;
            Ok(CommandOutcome::local(EventFormatter::format_pen(pen)))
        }
        Command::Size(size) => {
            pen.set_brush_size(size)?;
            Ok(CommandOutcome::local(EventFormatter::format_pen(pen)))
        }
        Command::Eraser => {
            pen.toggle_eraser();
            Ok(CommandOutcome::local(EventFormatter::format_pen(pen)))
        }
        Command::Show => Ok(CommandOutcome::local(
            EventFormatter::format_canvas_summary(&canvas.summary()),
        )),
        Command::Help => Ok(CommandOutcome::local(HELP.to_string())),
    }
}

fn parse_point(text: &str) -> Result<Point, ClientError> {
    let invalid = || ClientError::InvalidCommand(format!("'{}' is not a point (x,y)", text));

    let (x, y) = text.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<f64>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f64>().map_err(|_| invalid())?;

    // NaN / inf serialize as JSON null, which peers cannot decode
    if !x.is_finite() || !y.is_finite() {
        return Err(ClientError::InvalidCommand(format!(
            "'{}' has a non-finite coordinate",
            text
        )));
    }
    Ok(Point::new(x, y))
}
