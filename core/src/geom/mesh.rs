//! Triangle meshes.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};

use crate::math::{Angle, Mat4, Vec3, rotate_x, rotate_z, translate};
use crate::render::tex::{TexCoord, Texture};
use crate::render::{Model, World};

use super::{Face, Tri, Vertex, vertex};

/// A textured triangle mesh.
///
/// Faces are stored fully expanded: each face owns copies of its three
/// vertices. All faces of a mesh share the same texture and model-to-world
/// transform.
#[derive(Clone)]
pub struct Mesh {
    /// The faces of the mesh in model space.
    pub faces: Vec<Face<Model>>,
    /// The texture mapped onto every face.
    pub texture: Texture,
    /// Model-to-world transform applied to every face before rendering.
    pub transform: Mat4<Model, World>,
}

/// Builds a [`Mesh`] from a list of shared vertices and index triplets.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    verts: Vec<Vertex<Vec3<Model>, TexCoord>>,
    faces: Vec<Tri<usize>>,
    texture: Option<Texture>,
    transform: Mat4<Model, World>,
}

impl Mesh {
    /// Creates a new mesh with the given faces and texture.
    ///
    /// The transform is initially the identity.
    pub fn new<F>(faces: F, texture: Texture) -> Self
    where
        F: IntoIterator<Item = Face<Model>>,
    {
        Self {
            faces: faces.into_iter().collect(),
            texture,
            transform: Mat4::identity(),
        }
    }

    /// Returns a new mesh builder.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns `self` with its model-to-world transform replaced by `tf`.
    #[must_use]
    pub fn with_transform(self, tf: Mat4<Model, World>) -> Self {
        Self { transform: tf, ..self }
    }

    /// Returns `self` with its texture replaced by `tex`.
    #[must_use]
    pub fn with_texture(self, tex: Texture) -> Self {
        Self { texture: tex, ..self }
    }

    /// Returns `self` with the [`tumbling`] transform installed.
    #[must_use]
    pub fn tumbling(self, theta: Angle, offset: Vec3<World>) -> Self {
        self.with_transform(tumbling(theta, offset))
    }

    /// Returns the number of faces in `self`.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns whether `self` has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Returns the "tumbling cube" transform: a rotation by `theta / 2` about
/// the z axis, then by `theta` about the x axis, then a translation by
/// `offset`.
///
/// Animating `theta` over time makes the object spin on two axes at
/// different rates.
pub fn tumbling(theta: Angle, offset: Vec3<World>) -> Mat4<Model, World> {
    rotate_z(theta / 2.0)
        .then(&rotate_x(theta))
        .then(&translate(offset.to()))
        .to()
}

impl Builder {
    /// Appends a vertex with the given position and texture coordinate.
    ///
    /// Returns the index of the new vertex.
    pub fn push_vert(&mut self, pos: Vec3, uv: TexCoord) -> usize {
        self.verts.push(vertex(pos.to(), uv));
        self.verts.len() - 1
    }

    /// Appends all the vertices yielded by the given iterator.
    pub fn push_verts<Vs>(&mut self, verts: Vs)
    where
        Vs: IntoIterator<Item = (Vec3, TexCoord)>,
    {
        let vs = verts.into_iter().map(|(v, uv)| vertex(v.to(), uv));
        self.verts.extend(vs);
    }

    /// Appends a face with the given vertex indices.
    pub fn push_face(&mut self, a: usize, b: usize, c: usize) {
        self.faces.push(Tri([a, b, c]));
    }

    /// Appends all the faces yielded by the given iterator.
    pub fn push_faces<Fs>(&mut self, faces: Fs)
    where
        Fs: IntoIterator<Item = [usize; 3]>,
    {
        self.faces.extend(faces.into_iter().map(Tri));
    }

    /// Sets the texture of the mesh to be built.
    ///
    /// If no texture is set, the [fallback][Texture::fallback] is used.
    pub fn texture(&mut self, tex: Texture) {
        self.texture = Some(tex);
    }

    /// Sets the model-to-world transform of the mesh to be built.
    pub fn transform(&mut self, tf: Mat4<Model, World>) {
        self.transform = tf;
    }

    /// Returns the finished mesh containing all the added faces.
    ///
    /// # Panics
    /// If any of the vertex indices in `faces` ≥ `verts.len()`.
    pub fn build(self) -> Mesh {
        let Self { verts, faces, texture, transform } = self;
        let faces = faces.into_iter().enumerate().map(|(i, Tri(vs))| {
            assert!(
                vs.iter().all(|&j| j < verts.len()),
                "vertex index out of bounds at faces[{i}]: {vs:?}"
            );
            Tri(vs.map(|j| verts[j]))
        });
        Mesh {
            faces: faces.collect(),
            texture: texture.unwrap_or_else(Texture::fallback),
            transform,
        }
    }
}

impl Debug for Mesh {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("faces", &self.faces.len())
            .field("texture", &self.texture)
            .field("transform", &self.transform)
            .finish()
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new([], Texture::fallback())
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::{degs, vec3};
    use crate::render::tex::uv;

    use super::*;

    fn quad() -> Builder {
        let mut b = Mesh::builder();
        b.push_verts([
            (vec3(0.0, 0.0, 0.0), uv(0.0, 0.0)),
            (vec3(1.0, 0.0, 0.0), uv(1.0, 0.0)),
            (vec3(1.0, 1.0, 0.0), uv(1.0, 1.0)),
            (vec3(0.0, 1.0, 0.0), uv(0.0, 1.0)),
        ]);
        b.push_faces([[0, 3, 2], [0, 2, 1]]);
        b
    }

    #[test]
    fn builder_expands_shared_vertices() {
        let m = quad().build();
        assert_eq!(m.len(), 2);
        assert_eq!(m.faces[0].0[1].pos, vec3(0.0, 1.0, 0.0));
        assert_eq!(m.faces[1].0[0].attrib, uv(0.0, 0.0));
        assert_eq!(m.texture.dims(), (16, 16));
        assert_eq!(m.transform, Mat4::identity());
    }

    #[test]
    fn push_vert_returns_index() {
        let mut b = Mesh::builder();
        assert_eq!(b.push_vert(vec3(0.0, 0.0, 0.0), uv(0.0, 0.0)), 0);
        assert_eq!(b.push_vert(vec3(1.0, 0.0, 0.0), uv(1.0, 0.0)), 1);
    }

    #[test]
    #[should_panic]
    fn builder_panics_if_vertex_index_oob() {
        let mut b = quad();
        b.push_face(1, 2, 4);
        _ = b.build();
    }

    #[test]
    fn tumbling_transform() {
        let offset = vec3(0.0, 0.0, 5.0);
        let tf = tumbling(degs(0.0), offset);
        assert_approx_eq!(tf.apply_pt(&vec3(1.0, 2.0, 3.0)), vec3(1.0, 2.0, 8.0));

        // Half a turn about z, then a full turn about x
        let tf = tumbling(degs(360.0), offset);
        assert_approx_eq!(
            tf.apply_pt(&vec3(1.0, 0.0, 0.0)),
            vec3(-1.0, 0.0, 5.0),
            eps = 1e-5
        );
    }

    #[test]
    fn empty_default() {
        assert!(Mesh::default().is_empty());
    }
}
