//! Basic geometric primitives.

use crate::math::{Lerp, Mat4, Vec3};
use crate::render::{Model, tex::TexCoord};

pub use mesh::Mesh;

pub mod mesh;

/// Vertex with a position and arbitrary other attributes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex<P, A> {
    pub pos: P,
    pub attrib: A,
}

/// Triangle, defined by three vertices.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(transparent)]
pub struct Tri<V>(pub [V; 3]);

/// A textured triangle: three positions in basis `B`, each paired with
/// a texture coordinate.
pub type Face<B = Model> = Tri<Vertex<Vec3<B>, TexCoord>>;

/// Creates a `Vertex` with the given position and attribute values.
pub const fn vertex<P, A>(pos: P, attrib: A) -> Vertex<P, A> {
    Vertex { pos, attrib }
}

/// Creates a `Tri` with the given vertices.
pub const fn tri<V>(a: V, b: V, c: V) -> Tri<V> {
    Tri([a, b, c])
}

//
// Inherent impls
//

impl<V> Tri<V> {
    /// Returns a triangle with `f` applied to each vertex of `self`.
    pub fn map<U>(self, f: impl FnMut(V) -> U) -> Tri<U> {
        Tri(self.0.map(f))
    }
}

impl<A, B> Tri<Vertex<Vec3<B>, A>> {
    /// Returns the positions of the vertices of `self`.
    pub fn positions(&self) -> [Vec3<B>; 3] {
        self.0.each_ref().map(|v| v.pos)
    }

    /// Given a triangle ABC, returns the vectors [AB, AC].
    pub fn tangents(&self) -> [Vec3<B>; 2] {
        let [a, b, c] = self.positions();
        [b - a, c - a]
    }

    /// Returns the unit normal vector of `self`, or `None` if `self` is
    /// degenerate, ie. has zero area.
    ///
    /// The normal is `AB × AC`; with the left-handed coordinates used
    /// throughout this crate, it points towards a viewer who sees the
    /// vertices in clockwise order.
    ///
    /// # Examples
    /// ```
    /// # use painter_core::geom::{tri, vertex};
    /// # use painter_core::math::vec3;
    /// let t = tri(
    ///     vertex(vec3::<()>(0.0, 0.0, 0.0), ()),
    ///     vertex(vec3(0.0, 1.0, 0.0), ()),
    ///     vertex(vec3(1.0, 0.0, 0.0), ()),
    /// );
    /// assert_eq!(t.normal(), Some(vec3(0.0, 0.0, -1.0)));
    ///
    /// let line = tri(
    ///     vertex(vec3::<()>(0.0, 0.0, 0.0), ()),
    ///     vertex(vec3(1.0, 1.0, 1.0), ()),
    ///     vertex(vec3(2.0, 2.0, 2.0), ()),
    /// );
    /// assert_eq!(line.normal(), None);
    /// ```
    pub fn normal(&self) -> Option<Vec3<B>> {
        let [t, u] = self.tangents();
        t.cross(&u).try_normalize()
    }

    /// Returns the area of `self`.
    pub fn area(&self) -> f32 {
        let [t, u] = self.tangents();
        t.cross(&u).len() / 2.0
    }

    /// Returns the average z coordinate of the vertices of `self`.
    pub fn avg_z(&self) -> f32 {
        self.0.iter().map(|v| v.pos.z()).sum::<f32>() / 3.0
    }

    /// Returns `self` with the vertex positions transformed by `m`.
    ///
    /// The attributes are left as they are.
    pub fn transform<C>(self, m: &Mat4<B, C>) -> Tri<Vertex<Vec3<C>, A>> {
        self.map(|v| vertex(m.apply_pt(&v.pos), v.attrib))
    }
}

//
// Local trait impls
//

impl<P: Lerp, A: Lerp> Lerp for Vertex<P, A> {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        vertex(
            self.pos.lerp(&other.pos, t),
            self.attrib.lerp(&other.attrib, t),
        )
    }
}
