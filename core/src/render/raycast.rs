//! Grid raycasting in the style of early first-person games.
//!
//! The world is a 2D [`Grid`] of square cells, each either empty or a
//! solid wall. The screen is drawn one column at a time: a ray is cast
//! from the viewer across the grid with a digital differential analyzer
//! (DDA) until it hits a wall, and a vertical strip is drawn whose height
//! is inversely proportional to the distance of the hit.

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use crate::math::{Angle, Color3, Vec2, Vec3, degs, float, rgb, vec2, vec3};
use crate::util::{Dims, buf::Buf2};

use super::cam::{Pose, Render};
use super::ctx::Context;
use super::stats::Stats;
use super::target::Target;
use super::World;

/// A tile map of empty and solid cells.
///
/// A cell value of zero is empty; any other value is a wall of that kind.
/// Cells outside the grid are solid, so rays never escape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    cells: Buf2<u8>,
}

/// Error constructing a [`Grid`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The number of cells does not match the dimensions.
    Size { dims: Dims, len: usize },
    /// A row of a text map has a different length than the first row.
    RaggedRow(usize),
    /// Unrecognized character in a text map.
    InvalidCell(char),
}

/// A first-person viewer casting rays into a [`Grid`].
///
/// Positions are in cell units: the cell `(i, j)` spans from `(i, j)` to
/// `(i + 1, j + 1)`. A heading of zero looks towards +x and positive
/// angles turn towards +y.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Caster {
    /// Position on the grid.
    pub pos: Vec2,
    /// The direction the viewer is facing.
    pub heading: Angle,
    /// Horizontal field of view.
    pub fov: Angle,
    /// Maximum number of cells a ray may cross before giving up.
    pub max_steps: u32,
}

/// Which kind of grid line a ray crossed when it hit a wall.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Side {
    /// A line of constant x.
    Vertical,
    /// A line of constant y.
    Horizontal,
}

/// A ray hitting a wall.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit {
    /// Euclidean distance from the ray origin, in cell units.
    pub dist: f32,
    /// The side of the cell that was hit.
    pub side: Side,
    /// The coordinates of the cell that was hit.
    pub cell: [i32; 2],
}

pub type Result<T> = core::result::Result<T, Error>;

const PALETTE: [Color3; 4] = [
    rgb(0xA0, 0xA0, 0xA0),
    rgb(0xB0, 0x30, 0x30),
    rgb(0x30, 0x80, 0x30),
    rgb(0x30, 0x40, 0xB0),
];

//
// Inherent impls
//

impl Grid {
    /// Creates a grid of the given size from row-major cell data.
    ///
    /// # Errors
    /// Returns [`Error::Size`] if `cells.len() != w * h`.
    pub fn new(dims: Dims, cells: Vec<u8>) -> Result<Self> {
        let len = cells.len();
        if len != dims.0 as usize * dims.1 as usize {
            return Err(Error::Size { dims, len });
        }
        Ok(Self { cells: Buf2::new_from(dims, cells) })
    }

    /// Parses a grid from a text map, one row per line.
    ///
    /// `.` and space are empty, `#` is a wall of kind 1, and the digits
    /// `1` to `9` walls of that kind. Leading and trailing blank lines are
    /// ignored.
    ///
    /// # Errors
    /// Returns [`Error::RaggedRow`] if the rows are not all the same length,
    /// or [`Error::InvalidCell`] on any other character.
    ///
    /// # Examples
    /// ```
    /// use painter_core::render::raycast::Grid;
    ///
    /// let g = Grid::parse("
    /// 111
    /// 1.2
    /// 111").unwrap();
    /// assert_eq!(g.dims(), (3, 3));
    /// assert!(!g.is_solid(1, 1));
    /// assert_eq!(g.get(2, 1), Some(2));
    /// assert!(g.is_solid(-1, 1));
    ///
    /// // Escaped, as rustdoc would hide lines starting with `#`
    /// let g = Grid::parse("###\n#.#\n###").unwrap();
    /// assert_eq!(g.get(0, 0), Some(1));
    /// ```
    pub fn parse(map: &str) -> Result<Self> {
        let rows: Vec<&str> = map
            .trim_matches(|c| c == '\n' || c == '\r')
            .lines()
            .collect();
        let w = rows.first().map_or(0, |r| r.chars().count());

        let mut cells = Vec::with_capacity(w * rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != w {
                return Err(Error::RaggedRow(i));
            }
            for c in row.chars() {
                cells.push(match c {
                    '.' | ' ' => 0,
                    '#' => 1,
                    '1'..='9' => c as u8 - b'0',
                    _ => return Err(Error::InvalidCell(c)),
                });
            }
        }
        Self::new((w as u32, rows.len() as u32), cells)
    }

    /// Returns the width and height of `self` in cells.
    pub fn dims(&self) -> Dims {
        self.cells.dims()
    }

    /// Returns the value of the cell at `(x, y)`, or `None` if out of
    /// bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        self.cells.get(x, y).copied()
    }

    /// Returns whether the cell at `(x, y)` is a wall. Cells outside the
    /// grid are walls.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(|c| c != 0)
    }

    /// Returns the color of the wall at `(x, y)`.
    pub fn color(&self, x: i32, y: i32) -> Color3 {
        let kind = self.get(x, y).unwrap_or(1).max(1);
        PALETTE[(kind - 1) as usize % PALETTE.len()]
    }
}

impl Caster {
    /// Creates a caster at `pos` facing `heading`, with a 60° field of
    /// view.
    pub fn new(pos: Vec2, heading: Angle) -> Self {
        Self {
            pos,
            heading,
            fov: degs(60.0),
            max_steps: 8,
        }
    }

    /// Returns the unit vector in the direction `angle`.
    pub fn dir(angle: Angle) -> Vec2 {
        vec2(angle.cos(), angle.sin())
    }

    /// Returns the angle of the ray through column `x` of a `w` pixels
    /// wide screen.
    ///
    /// The leftmost column looks half the field of view to the left of
    /// the heading, the rightmost half of it to the right.
    pub fn ray_angle(&self, x: u32, w: u32) -> Angle {
        let t = (x as f32 + 0.5) / w.max(1) as f32;
        self.heading + self.fov * (0.5 - t)
    }

    /// Casts a ray from `self.pos` in the direction `angle`.
    ///
    /// Returns the first wall hit, or `None` if none is hit within
    /// `self.max_steps` cells.
    pub fn cast(&self, grid: &Grid, angle: Angle) -> Option<Hit> {
        let [px, py] = self.pos.0;
        let [dx, dy] = Self::dir(angle).0;

        let floor = |p: f32| float::f32::floor(p) as i32;
        let mut cell = [floor(px), floor(py)];
        // Distance along the ray between successive grid lines
        let delta = |d: f32| {
            if d == 0.0 {
                f32::INFINITY
            } else {
                float::f32::abs(1.0 / d)
            }
        };
        let (ddx, ddy) = (delta(dx), delta(dy));
        // Distance along the ray to the next grid line
        let first = |p: f32, c: i32, d: f32, dd: f32| {
            if d < 0.0 {
                (p - c as f32) * dd
            } else {
                (c as f32 + 1.0 - p) * dd
            }
        };
        let mut sx = first(px, cell[0], dx, ddx);
        let mut sy = first(py, cell[1], dy, ddy);
        let step = [if dx < 0.0 { -1 } else { 1 }, if dy < 0.0 { -1 } else { 1 }];

        for _ in 0..self.max_steps {
            let side = if sx < sy {
                sx += ddx;
                cell[0] += step[0];
                Side::Vertical
            } else {
                sy += ddy;
                cell[1] += step[1];
                Side::Horizontal
            };
            if grid.is_solid(cell[0], cell[1]) {
                let dist = match side {
                    Side::Vertical => sx - ddx,
                    Side::Horizontal => sy - ddy,
                };
                return Some(Hit { dist, side, cell });
            }
        }
        None
    }
}

/// Returns the height in pixels of a wall at distance `dist` on a screen
/// `h` pixels tall. Walls nearer than one cell are clamped to the screen.
pub fn wall_height(dist: f32, h: u32) -> u32 {
    if dist <= 1.0 {
        h
    } else {
        ((h as f32 / dist) as u32).min(h)
    }
}

//
// Local trait impls
//

impl Pose for Caster {
    /// Returns the position as a point on the world xz plane.
    fn pos(&self) -> Vec3<World> {
        vec3(self.pos.x(), 0.0, self.pos.y())
    }

    /// Moves the caster; x is towards the right edge of the screen and
    /// z forward. y is ignored.
    fn translate(&mut self, delta: Vec3) {
        let fwd = Self::dir(self.heading);
        let right = vec2(fwd.y(), -fwd.x());
        self.pos += fwd * delta.z() + right * delta.x();
    }

    /// Turns the caster; the heading is wrapped to `[-180°, 180°)`.
    fn rotate(&mut self, delta: Angle) {
        self.heading =
            (self.heading + delta).wrap(-Angle::STRAIGHT, Angle::STRAIGHT);
    }
}

impl Render<Grid> for Caster {
    /// Draws `grid` as seen by `self` into `target`, one column per pixel.
    ///
    /// Distances are corrected for the fisheye effect. Walls hit on a
    /// vertical side are drawn darker than those hit on a horizontal side.
    fn render(&self, grid: &Grid, target: &mut impl Target, ctx: &Context) {
        let mut stats = Stats::start();
        stats.calls = 1.0;
        stats.frames = 1.0;
        stats.objs.i = 1;

        target.clear(ctx);
        let (w, h) = target.dims();
        stats.prims.i = w as usize;

        for x in 0..w {
            let a = self.ray_angle(x, w);
            let Some(hit) = self.cast(grid, a) else {
                continue;
            };
            stats.prims.o += 1;

            let dist = hit.dist * (a - self.heading).cos();
            let len = wall_height(dist, h);
            let top = (h - len) / 2;

            let [cx, cy] = hit.cell;
            let mut color = grid.color(cx, cy);
            if ctx.shading && hit.side == Side::Vertical {
                color = color.mul(0.6);
            }
            for y in top..top + len {
                target.plot(x as i32, y as i32, color);
            }
            stats.frags.i += len as usize;
            stats.frags.o += len as usize;
        }
        if stats.prims.o > 0 {
            stats.objs.o = 1;
        }
        *ctx.stats.borrow_mut() += stats.finish();
    }
}

//
// Foreign trait impls
//

impl Default for Caster {
    /// Returns a caster at the origin facing +x.
    fn default() -> Self {
        Self::new(vec2(0.0, 0.0), Angle::ZERO)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("invalid grid: ")?;
        match self {
            Error::Size { dims: (w, h), len } => {
                write!(f, "{len} cells do not fill {w}×{h}")
            }
            Error::RaggedRow(i) => write!(f, "row {i} has a different length"),
            Error::InvalidCell(c) => write!(f, "unexpected character {c:?}"),
        }
    }
}

impl core::error::Error for Error {}
