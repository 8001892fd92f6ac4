//! Move log text format
//!
//! One move per line, in log order:
//!
//! ```text
//! color [id] [r,g,b,a]
//! cut [id] [x] [coord]
//! cut [id] [y] [coord]
//! cut [id] [x,y]
//! merge [id1] [id2]
//! swap [id1] [id2]
//! ```
//!
//! Line cuts name the axis the cut coordinate lies on: `x` for a vertical
//! cut, `y` for a horizontal one. Blank lines and lines starting with `#` are
//! ignored when parsing.

use std::path::Path;

use crate::io::error::{RasterError, Result, WithPath};
use crate::moves::record::Move;
use crate::moves::request::{MoveRequest, Session};
use crate::spatial::geometry::{Orientation, Point, Shape, Size};
use crate::spatial::partition::{BlockId, Color};

/// Render moves as log text, one line each
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(|record| format!("{record}\n")).collect()
}

/// Write moves to a log file
///
/// # Errors
///
/// Returns [`RasterError::FileSystem`] if the directory or file cannot be written
pub fn write_moves<P: AsRef<Path>>(moves: &[Move], path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }
    std::fs::write(path, format_moves(moves)).with_path(path, "write move log")
}

/// Read and parse a log file into replayable requests
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is malformed
pub fn read_moves<P: AsRef<Path>>(path: P) -> Result<Vec<MoveRequest>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).with_path(path, "read move log")?;
    parse_moves(&text)
}

/// Parse log text into requests
///
/// # Errors
///
/// Returns [`RasterError::Transcript`] for the first malformed line
pub fn parse_moves(text: &str) -> Result<Vec<MoveRequest>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            parse_line(line).map_err(|reason| RasterError::Transcript {
                line: index + 1,
                reason,
            })
        })
        .collect()
}

/// Parse a single log line
///
/// # Errors
///
/// Returns a description of what is wrong with the line
pub fn parse_line(line: &str) -> std::result::Result<MoveRequest, String> {
    let line = line.trim();
    let (name, rest) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("expected arguments after '{line}'"))?;
    let args = bracketed(rest)?;

    match (name, args.as_slice()) {
        ("color", [id, color]) => Ok(MoveRequest::Color {
            block: BlockId::new(*id),
            color: parse_color(color)?,
        }),
        ("cut", [id, axis, offset]) => {
            let orientation =
                Orientation::from_axis(axis).ok_or_else(|| format!("unknown cut axis '{axis}'"))?;
            let offset = parse_int(offset)?;
            // Only the cut-axis coordinate is logged; see anchor_line_cut
            let point = match orientation {
                Orientation::Vertical => Point::new(offset, 0),
                Orientation::Horizontal => Point::new(0, offset),
            };
            Ok(MoveRequest::LineCut {
                block: BlockId::new(*id),
                orientation,
                point,
            })
        }
        ("cut", [id, point]) => {
            let coords = parse_list(point)?;
            let [x, y] = coords.as_slice() else {
                return Err(format!("expected point [x,y], got [{point}]"));
            };
            Ok(MoveRequest::PointCut {
                block: BlockId::new(*id),
                point: Point::new(*x, *y),
            })
        }
        ("merge", [first, second]) => Ok(MoveRequest::Merge {
            first: BlockId::new(*first),
            second: BlockId::new(*second),
        }),
        ("swap", [first, second]) => Ok(MoveRequest::Swap {
            first: BlockId::new(*first),
            second: BlockId::new(*second),
        }),
        _ => Err(format!(
            "unrecognized move '{name}' with {} arguments",
            args.len()
        )),
    }
}

/// Complete a parsed line cut's unlogged coordinate with the block's center
///
/// Other requests are returned unchanged.
pub fn anchor_line_cut(request: MoveRequest, shape: &Shape) -> MoveRequest {
    match request {
        MoveRequest::LineCut {
            block,
            orientation,
            point,
        } => {
            let center = shape.center();
            let point = match orientation {
                Orientation::Vertical => Point::new(point.x, center.y),
                Orientation::Horizontal => Point::new(center.x, point.y),
            };
            MoveRequest::LineCut {
                block,
                orientation,
                point,
            }
        }
        other => other,
    }
}

/// Rebuild a session by applying requests to a fresh canvas
///
/// Line cuts are anchored to the addressed block before applying, so parsed
/// logs replay exactly.
///
/// # Errors
///
/// Returns [`RasterError::Move`] for the first request that fails
pub fn replay(size: Size, requests: &[MoveRequest]) -> Result<Session> {
    let mut session = Session::new(size)?;
    for request in requests {
        let request = match request {
            MoveRequest::LineCut { block, .. } => {
                let shape = session.partition().find(block)?.shape;
                anchor_line_cut(request.clone(), &shape)
            }
            other => other.clone(),
        };
        session.apply(&request)?;
    }
    Ok(session)
}

fn bracketed(text: &str) -> std::result::Result<Vec<&str>, String> {
    let mut args = Vec::new();
    let mut rest = text.trim();
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('[')
            .ok_or_else(|| format!("expected '[' at '{rest}'"))?;
        let (arg, after) = inner
            .split_once(']')
            .ok_or_else(|| format!("unclosed '[' at '{rest}'"))?;
        args.push(arg.trim());
        rest = after.trim_start();
    }
    Ok(args)
}

fn parse_int(text: &str) -> std::result::Result<i32, String> {
    text.trim()
        .parse()
        .map_err(|e| format!("invalid number '{text}': {e}"))
}

fn parse_list(text: &str) -> std::result::Result<Vec<i32>, String> {
    text.split(',').map(parse_int).collect()
}

fn parse_color(text: &str) -> std::result::Result<Color, String> {
    let channels = parse_list(text)?;
    let [r, g, b, a] = channels.as_slice() else {
        return Err(format!("expected four color channels, got [{text}]"));
    };
    Ok(Color::new(*r, *g, *b, *a))
}
