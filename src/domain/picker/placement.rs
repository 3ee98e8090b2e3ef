//! Screen geometry and tooltip placement

use std::fmt;
use std::str::FromStr;

use crate::domain::error::OffsetParseError;

/// Distance kept between the tooltip and the screen edge before flipping
const EDGE_MARGIN: i32 = 4;

/// Gap between the cursor and a flipped tooltip
const FLIP_GAP: i32 = 8;

/// Largest accepted offset on either axis
pub const MAX_OFFSET: i32 = 4096;

/// Point in screen coordinates (origin at the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Tooltip offset from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::new(16, 16)
    }
}

impl FromStr for Offset {
    type Err = OffsetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || OffsetParseError {
            input: s.to_string(),
        };

        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let dx: i32 = x.trim().parse().map_err(|_| err())?;
        let dy: i32 = y.trim().parse().map_err(|_| err())?;

        let range = -MAX_OFFSET..=MAX_OFFSET;
        if !range.contains(&dx) || !range.contains(&dy) {
            return Err(err());
        }
        Ok(Self::new(dx, dy))
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.dx, self.dy)
    }
}

/// Compute the tooltip's top-left corner for a cursor position.
///
/// The tooltip sits at `cursor + offset`. When it would run past the right or
/// bottom edge it flips to the other side of the cursor on that axis. The
/// result never has negative coordinates and, screen size permitting, never
/// covers the cursor: the sampler reads the composed screen, tooltip included.
pub fn place_tooltip(cursor: Point, tooltip: Size, screen: Size, offset: Offset) -> Point {
    let (cx, cy) = (i64::from(cursor.x), i64::from(cursor.y));
    let (w, h) = (i64::from(tooltip.width), i64::from(tooltip.height));
    let (sw, sh) = (i64::from(screen.width), i64::from(screen.height));
    let margin = i64::from(EDGE_MARGIN);
    let gap = i64::from(FLIP_GAP);

    let mut x = cx + i64::from(offset.dx);
    let mut y = cy + i64::from(offset.dy);

    if x + w > sw - margin {
        x = cx - w - gap;
    }
    if y + h > sh - margin {
        y = cy - h - gap;
    }
    x = x.max(0);
    y = y.max(0);

    if spans(x, w, cx) && spans(y, h, cy) {
        x = beside(cx, w, sw);
        if spans(x, w, cx) {
            y = beside(cy, h, sh);
        }
    }

    Point::new(to_coordinate(x), to_coordinate(y))
}

fn spans(start: i64, len: i64, point: i64) -> bool {
    start <= point && point < start + len
}

/// Start of a span of `len` next to `point`, after it if it fits
fn beside(point: i64, len: i64, extent: i64) -> i64 {
    let after = point + i64::from(FLIP_GAP);
    if after + len <= extent - i64::from(EDGE_MARGIN) {
        after
    } else {
        (point - len - i64::from(FLIP_GAP)).max(0)
    }
}

fn to_coordinate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
