//! Clipping triangles against planes.
//!
//! Clipping means converting a shape into another, such that only the points
//! inside a half-space bounded by a plane remain; "inside" is defined as the
//! half-space that the plane's normal vector points *into*. Points exactly
//! on the plane count as inside.
//!
//! The renderer clips twice: once in view space against the near plane, to
//! avoid dividing by zero or negative depths during projection, and once in
//! screen space against the four edges of the viewport, so that the
//! rasterizer never has to deal with off-screen pixels.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::iter::Chain;
use core::option;

use crate::geom::{Tri, Vertex};
use crate::math::{Lerp, Vec3, vec3};
use crate::util::Dims;

use super::{Screen, View};

/// A plane given by a point on the plane and a unit normal vector.
#[derive(Copy, Clone, PartialEq)]
pub struct Plane<B> {
    pub point: Vec3<B>,
    pub normal: Vec3<B>,
}

/// The result of clipping a triangle against a plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Clipped<T> {
    /// Entirely outside, discarded.
    Hidden,
    /// Entirely inside, passed through as is.
    Visible(T),
    /// One vertex inside; the triangle shrinks into a smaller one.
    One(T),
    /// Two vertices inside; the remaining quad is split into two triangles.
    Two(T, T),
}

impl<B> Plane<B> {
    /// Creates a plane through `point` perpendicular to `normal`.
    ///
    /// The normal is normalized to unit length.
    pub fn new(point: Vec3<B>, normal: Vec3<B>) -> Self {
        Self { point, normal: normal.normalize() }
    }

    /// Returns the signed distance of `pt` from `self`.
    ///
    /// The result is positive if `pt` is on the side the normal points to,
    /// negative if on the opposite side, and zero if on the plane.
    ///
    /// # Examples
    /// ```
    /// use painter_core::math::vec3;
    /// use painter_core::render::clip::Plane;
    ///
    /// let p = Plane::<()>::new(vec3(0.0, 0.0, 1.0), vec3(0.0, 0.0, 2.0));
    /// assert_eq!(p.signed_dist(&vec3(5.0, 0.0, 3.0)), 2.0);
    /// assert_eq!(p.signed_dist(&vec3(0.0, 5.0, -1.0)), -2.0);
    /// ```
    #[inline]
    pub fn signed_dist(&self, pt: &Vec3<B>) -> f32 {
        self.normal.dot(pt) - self.normal.dot(&self.point)
    }

    /// Returns whether `pt` is inside the half-space bounded by `self`.
    #[inline]
    pub fn is_inside(&self, pt: &Vec3<B>) -> bool {
        self.signed_dist(pt) >= 0.0
    }

    /// Returns the vertex where the segment from `a` to `b` intersects
    /// `self`, interpolating the attributes with the same parameter.
    ///
    /// The result is unspecified if the segment is parallel to `self`.
    pub fn intersect<A: Lerp>(
        &self,
        a: &Vertex<Vec3<B>, A>,
        b: &Vertex<Vec3<B>, A>,
    ) -> Vertex<Vec3<B>, A> {
        let n = &self.normal;
        let t = (n.dot(&self.point) - n.dot(&a.pos))
            / (n.dot(&b.pos) - n.dot(&a.pos));
        a.lerp(b, t)
    }
}

impl<B: Debug + Default> Debug for Plane<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plane")
            .field("point", &self.point)
            .field("normal", &self.normal)
            .finish()
    }
}

impl<T> Clipped<T> {
    /// Returns the number of triangles in `self`.
    pub fn len(&self) -> usize {
        match self {
            Clipped::Hidden => 0,
            Clipped::Visible(_) | Clipped::One(_) => 1,
            Clipped::Two(..) => 2,
        }
    }

    /// Returns whether `self` contains no triangles.
    pub fn is_empty(&self) -> bool {
        matches!(self, Clipped::Hidden)
    }
}

impl<T> IntoIterator for Clipped<T> {
    type Item = T;
    type IntoIter = Chain<option::IntoIter<T>, option::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        let (a, b) = match self {
            Clipped::Hidden => (None, None),
            Clipped::Visible(t) | Clipped::One(t) => (Some(t), None),
            Clipped::Two(t, u) => (Some(t), Some(u)),
        };
        a.into_iter().chain(b)
    }
}

/// Clips a triangle against a plane.
///
/// Vertices are partitioned into inside and outside ones, in their original
/// order, and the triangle is handled according to the inside count:
///
/// * 0: discarded.
/// * 3: passed through unchanged.
/// * 1: the inside vertex *a* and the intersections of its edges to the two
///   outside vertices, *ab* and *ac*, form one triangle (*a*, *ab*, *ac*).
/// * 2: with inside vertices *a*, *b*, outside vertex *c*, and intersections
///   *ac* and *bc*, the quad is split into (*a*, *b*, *ac*) and
///   (*b*, *ac*, *bc*).
///
/// Attributes of new vertices are linearly interpolated.
pub fn clip_tri<B, A>(
    plane: &Plane<B>,
    tri: Tri<Vertex<Vec3<B>, A>>,
) -> Clipped<Tri<Vertex<Vec3<B>, A>>>
where
    A: Lerp + Copy,
{
    let vs = tri.0;
    let (mut ins, mut outs) = ([0; 3], [0; 3]);
    let (mut n_in, mut n_out) = (0, 0);
    for (i, v) in vs.iter().enumerate() {
        if plane.is_inside(&v.pos) {
            ins[n_in] = i;
            n_in += 1;
        } else {
            outs[n_out] = i;
            n_out += 1;
        }
    }
    let isect = |i: usize, o: usize| plane.intersect(&vs[i], &vs[o]);

    match n_in {
        0 => Clipped::Hidden,
        1 => {
            let [i, o, p] = [ins[0], outs[0], outs[1]];
            Clipped::One(Tri([vs[i], isect(i, o), isect(i, p)]))
        }
        2 => {
            let [i, j, o] = [ins[0], ins[1], outs[0]];
            let io = isect(i, o);
            Clipped::Two(Tri([vs[i], vs[j], io]), Tri([vs[j], io, isect(j, o)]))
        }
        _ => Clipped::Visible(tri),
    }
}

/// Returns the near clipping plane at view-space depth `near`.
pub fn near_plane(near: f32) -> Plane<View> {
    Plane::new(vec3(0.0, 0.0, near), vec3(0.0, 0.0, 1.0))
}

/// Returns the top, bottom, left, and right edges of a `dims`-sized
/// viewport as inward-facing planes, in that order.
///
/// The bottom and right planes pass through the last row and column of
/// pixels, respectively.
pub fn screen_planes((w, h): Dims) -> [Plane<Screen>; 4] {
    let (right, bottom) = (w as f32 - 1.0, h as f32 - 1.0);
    [
        Plane::new(vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)),
        Plane::new(vec3(0.0, bottom, 0.0), vec3(0.0, -1.0, 0.0)),
        Plane::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)),
        Plane::new(vec3(right, 0.0, 0.0), vec3(-1.0, 0.0, 0.0)),
    ]
}

/// Clips a screen-space triangle against the edges of a `dims`-sized
/// viewport, appending the resulting zero or more triangles to `out`.
///
/// The planes are applied one at a time to a work queue: every triangle
/// produced by the previous plane is clipped against the next one.
pub fn clip_to_screen<A: Lerp + Copy>(
    tri: Tri<Vertex<Vec3<Screen>, A>>,
    dims: Dims,
    out: &mut Vec<Tri<Vertex<Vec3<Screen>, A>>>,
) {
    let mut queue = VecDeque::from([tri]);
    for plane in &screen_planes(dims) {
        for _ in 0..queue.len() {
            let Some(t) = queue.pop_front() else { break };
            queue.extend(clip_tri(plane, t));
        }
    }
    out.extend(queue);
}
