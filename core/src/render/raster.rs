//! Translation of triangles and lines into discrete pixels.
//!
//! Rasterization proceeds by turning a triangle into a sequence of
//! *scanlines*, each corresponding to a horizontal span of pixels covered
//! by the triangle on a given row. The scanlines, in turn, are converted
//! into a series of *fragments* that represent potentially drawn pixels.
//!
//! Texture coordinates arrive in their projected form (u/w, v/w, 1/w),
//! which varies linearly in screen space. Each fragment divides out the
//! interpolated 1/w to recover the perspective-correct (u, v).

use core::mem::swap;
use core::ops::Range;

use crate::geom::Vertex;
use crate::math::{Lerp, Vec3};

use super::Screen;
use super::tex::TexCoord;

/// A vertex in screen space: pixel coordinates plus depth, and a projected
/// texture coordinate.
pub type ScreenVert = Vertex<Vec3<Screen>, TexCoord>;

/// A horizontal, 1-pixel-thick "slice" of a triangle being rasterized.
#[derive(Clone, Debug, PartialEq)]
pub struct Scanline {
    /// The y coordinate of the row.
    pub y: i32,
    /// The range of x coordinates spanned by the row. The end is exclusive.
    pub xs: Range<i32>,
    /// The projected texture coordinates at `xs.start` and `xs.end`.
    pub vs: Range<TexCoord>,
}

/// A fragment, or a single "pixel" in a rasterized triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frag {
    /// The column and row of the pixel.
    pub pos: [i32; 2],
    /// The projected texture coordinate (u/w, v/w, 1/w).
    pub tc: TexCoord,
}

impl Scanline {
    /// Returns an iterator over the fragments of `self`, from left to right.
    ///
    /// The texture coordinate of each fragment is interpolated at
    /// t = (x − x0) / (x1 − x0).
    pub fn fragments(&self) -> impl Iterator<Item = Frag> + '_ {
        let Range { start: x0, end: x1 } = self.xs;
        let step = 1.0 / (x1 - x0) as f32;
        (x0..x1).map(move |x| Frag {
            pos: [x, self.y],
            tc: self.vs.start.lerp(&self.vs.end, (x - x0) as f32 * step),
        })
    }

    /// Returns the number of pixels in `self`.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

impl Frag {
    /// Returns the perspective-correct texture coordinate of `self`.
    #[inline]
    pub fn uv(&self) -> TexCoord {
        self.tc.unproject()
    }

    /// Returns the reciprocal view-space depth of `self`.
    ///
    /// Larger values are closer to the viewer.
    #[inline]
    pub fn depth(&self) -> f32 {
        self.tc.w()
    }
}

/// An edge walker stepping x and the texture coordinate one row at a time.
struct Edge {
    x0: f32,
    y0: i32,
    tc0: TexCoord,
    dx: f32,
    dtc: TexCoord,
}

impl Edge {
    fn new((x0, y0, tc0): Pt, (x1, y1, tc1): Pt) -> Self {
        // A horizontal edge has no slope; it is never walked anyway
        let (dx, dtc) = if y0 == y1 {
            (0.0, TexCoord::zero())
        } else {
            let dy = (y1 - y0).abs() as f32;
            ((x1 - x0) as f32 / dy, (tc1 - tc0) / dy)
        };
        Self { x0: x0 as f32, y0, tc0, dx, dtc }
    }

    fn at(&self, y: i32) -> (i32, TexCoord) {
        let n = (y - self.y0) as f32;
        ((self.x0 + n * self.dx) as i32, self.tc0 + self.dtc * n)
    }
}

type Pt = (i32, i32, TexCoord);

/// Rasterizes a filled triangle defined by three vertices.
///
/// Converts the triangle into [scanlines][Scanline] and invokes
/// `scanline_fn` for each nonempty one. Vertex positions are truncated to
/// integer pixel coordinates and the vertices sorted by y. The triangle
/// is then filled top to bottom in two halves: between the short edge from
/// the top to the middle vertex and the long edge from the top to the
/// bottom vertex, and then between the short edge from the middle to the
/// bottom vertex and the long edge. Each row spans from the left edge up
/// to, but not including, the right edge.
///
/// A triangle with zero height covers no pixels.
pub fn tri_fill(
    verts: [ScreenVert; 3],
    mut scanline_fn: impl FnMut(Scanline),
) {
    let mut vs: [Pt; 3] =
        verts.map(|v| (v.pos.x() as i32, v.pos.y() as i32, v.attrib));
    vs.sort_by_key(|v| v.1);
    let [top, mid, bot] = vs;

    //          top
    //          X
    //        *****         upper half
    //  mid  X*******
    //          *******     lower half
    //             ******
    //                 X
    //                bot
    let long = Edge::new(top, bot);

    let mut half = |ys: Range<i32>, short: &Edge| {
        for y in ys {
            let (mut ax, mut a) = short.at(y);
            let (mut bx, mut b) = long.at(y);
            if ax > bx {
                swap(&mut ax, &mut bx);
                swap(&mut a, &mut b);
            }
            if ax < bx {
                scanline_fn(Scanline { y, xs: ax..bx, vs: a..b });
            }
        }
    };

    // The middle row belongs to the lower half if there is one
    let (y0, y1, y2) = (top.1, mid.1, bot.1);
    if y1 > y0 {
        let end = if y2 > y1 { y1 } else { y1 + 1 };
        half(y0..end, &Edge::new(top, mid));
    }
    if y2 > y1 {
        half(y1..y2 + 1, &Edge::new(mid, bot));
    }
}

/// Rasterizes a one-pixel-thick line between two points using Bresenham's
/// algorithm.
///
/// Invokes `plot` for each pixel on the line, endpoints included.
pub fn line(
    [x0, y0]: [i32; 2],
    [x1, y1]: [i32; 2],
    mut plot: impl FnMut(i32, i32),
) {
    let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
    let (sx, sy) = ((x1 - x0).signum(), (y1 - y0).signum());
    let (mut x, mut y, mut err) = (x0, y0, dx + dy);
    loop {
        plot(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::iter::once;

    use crate::assert_approx_eq;
    use crate::geom::vertex;
    use crate::math::vec3;
    use crate::render::tex::{uv, uvw};
    use crate::util::buf::Buf2;

    use super::*;

    fn coverage(dims: (u32, u32), verts: [(f32, f32); 3]) -> String {
        let mut buf = Buf2::<u8>::new_default(dims);
        let verts = verts.map(|(x, y)| vertex(vec3(x, y, 0.0), uv(0.0, 0.0)));
        tri_fill(verts, |sl| {
            for x in sl.xs {
                buf[[x as u32, sl.y as u32]] += 1;
            }
        });
        buf.rows()
            .flat_map(|r| {
                once("\n".to_string()).chain(r.iter().map(u8::to_string))
            })
            .collect()
    }

    #[test]
    fn upper_half_only() {
        let expected = r"
00000
10000
11000
11100
11110";
        let actual =
            coverage((5, 5), [(0.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn lower_half_only() {
        let expected = r"
1111110
0111100
0011000
0000000";
        let actual =
            coverage((7, 4), [(3.0, 3.0), (0.0, 0.0), (6.0, 0.0)]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn both_halves_without_overdraw() {
        let expected = r"
00000000000
01100000000
01110000000
11111000000
11111100000
00111110000
00000111000
00000001100
00000000000";
        let actual =
            coverage((11, 9), [(10.0, 8.0), (2.0, 0.0), (0.0, 4.0)]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn fractional_coordinates_are_truncated() {
        let a = coverage((5, 5), [(0.9, 0.2), (4.7, 4.9), (0.1, 4.5)]);
        let b = coverage((5, 5), [(0.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_height_covers_nothing() {
        let actual = coverage((5, 3), [(0.0, 1.0), (4.0, 1.0), (2.0, 1.0)]);
        assert_eq!(actual, "\n00000\n00000\n00000");
    }

    #[test]
    fn scanline_fragments_are_perspective_correct() {
        // u = 0 at depth 1 on the left, u = 1 at depth 2 on the right
        let sl = Scanline {
            y: 7,
            xs: 0..4,
            vs: uv(0.0, 0.0)..uvw(0.5, 0.0, 0.5),
        };
        let frags: Vec<_> = sl.fragments().collect();
        assert_eq!(frags.len(), 4);
        assert_eq!(frags[0].pos, [0, 7]);
        assert_eq!(frags[3].pos, [3, 7]);

        assert_eq!(frags[0].uv(), uv(0.0, 0.0));
        assert_eq!(frags[0].depth(), 1.0);
        // Halfway across the screen is only a third of the way in u
        assert_approx_eq!(frags[2].uv().u(), 1.0 / 3.0);
        assert_approx_eq!(frags[2].depth(), 0.75);
    }

    #[test]
    fn vertex_texcoords_are_reproduced() {
        let tcs = [uv(0.0, 0.0), uv(1.0, 0.0), uv(0.0, 1.0)];
        let ws = [1.0, 2.0, 4.0];
        let fill = |verts: [(f32, f32); 3]| {
            let vs = [0, 1, 2].map(|i| {
                let (x, y) = verts[i];
                vertex(vec3(x, y, 0.0), tcs[i].project(ws[i]))
            });
            let mut rows = vec![];
            tri_fill(vs, |sl| rows.push(sl));
            rows
        };
        let check = |tc: TexCoord, i: usize| {
            assert_approx_eq!(tc.unproject(), tcs[i]);
            assert_approx_eq!(tc.w(), 1.0 / ws[i]);
        };

        // The top and bottom rows of a pointed triangle are empty
        let rows = fill([(2.0, 0.0), (0.0, 4.0), (10.0, 8.0)]);
        assert_eq!(rows.first().map(|sl| sl.y), Some(1));
        assert_eq!(rows.last().map(|sl| sl.y), Some(7));

        // The left end of the row through the middle vertex lies on it
        let mid = rows.iter().find(|sl| sl.y == 4).expect("row 4");
        assert_eq!(mid.xs.start, 0);
        check(mid.vs.start, 1);
        let f = mid.fragments().next().expect("nonempty");
        assert_approx_eq!(f.uv(), tcs[1]);
        assert_approx_eq!(f.depth(), 1.0 / ws[1]);

        // Flat top: the top row runs from vertex 0 to vertex 1
        let rows = fill([(0.0, 0.0), (8.0, 0.0), (4.0, 8.0)]);
        let top = &rows[0];
        assert_eq!((top.y, top.xs.clone()), (0, 0..8));
        check(top.vs.start, 0);
        check(top.vs.end, 1);
        assert_approx_eq!(top.fragments().next().expect("nonempty").uv(), tcs[0]);

        // Flat bottom: the bottom row runs from vertex 1 to vertex 2
        let rows = fill([(4.0, 0.0), (0.0, 8.0), (8.0, 8.0)]);
        let bot = rows.last().expect("nonempty");
        assert_eq!((bot.y, bot.xs.clone()), (8, 0..8));
        check(bot.vs.start, 1);
        check(bot.vs.end, 2);
    }

    #[test]
    fn line_horizontal_and_vertical() {
        let mut px = vec![];
        line([1, 2], [4, 2], |x, y| px.push((x, y)));
        assert_eq!(px, [(1, 2), (2, 2), (3, 2), (4, 2)]);

        px.clear();
        line([0, 3], [0, 1], |x, y| px.push((x, y)));
        assert_eq!(px, [(0, 3), (0, 2), (0, 1)]);
    }

    #[test]
    fn line_shallow_slope() {
        let mut px = vec![];
        line([0, 0], [4, 2], |x, y| px.push((x, y)));
        assert_eq!(px, [(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)]);
    }

    #[test]
    fn line_single_point() {
        let mut px = vec![];
        line([5, 5], [5, 5], |x, y| px.push((x, y)));
        assert_eq!(px, [(5, 5)]);
    }
}
