//! Boxes and cubes.

use re::geom::Mesh;
use re::math::{Vec3, vec3};
use re::render::tex::{TexCoord, uv};

use super::Build;

/// A rectangular cuboid.
///
/// Defined by the left-bottom-near and right-top-far vertices of the box.
///
/// Assuming the two defining vertices are (l, b, n) and (r, t, f),
/// the vertices of a `Box` are at
/// * (l, b, n)
/// * (l, b, f)
/// * (l, t, n)
/// * (l, t, f)
/// * (r, b, n)
/// * (r, b, f)
/// * (r, t, n)
/// * (r, t, f)
///
/// Each face is mapped to the whole texture, upright when seen from
/// outside the box, except for the top and bottom faces, whose "up" is
/// towards +z and -z respectively.
#[derive(Copy, Clone, Debug)]
pub struct Box {
    /// The left bottom near corner of the box.
    pub left_bot_near: Vec3,
    /// The right top far corner of the box.
    pub right_top_far: Vec3,
}

/// A cube centered at the origin.
#[derive(Copy, Clone, Debug)]
pub struct Cube {
    pub side_len: f32,
}

impl Box {
    /// Corners of the unit box, indexed by the bits (x, y, z), a set bit
    /// meaning the right, top, or far side.
    #[rustfmt::skip]
    const COORDS: [Vec3; 8] = [
        // left
        vec3(0.0, 0.0, 0.0), // 0b000
        vec3(0.0, 0.0, 1.0), // 0b001
        vec3(0.0, 1.0, 0.0), // 0b010
        vec3(0.0, 1.0, 1.0), // 0b011
        // right
        vec3(1.0, 0.0, 0.0), // 0b100
        vec3(1.0, 0.0, 1.0), // 0b101
        vec3(1.0, 1.0, 0.0), // 0b110
        vec3(1.0, 1.0, 1.0), // 0b111
    ];
    /// Bottom-left, top-left, top-right, and bottom-right corners of a face.
    const TEX_COORDS: [TexCoord; 4] =
        [uv(0.0, 1.0), uv(0.0, 0.0), uv(1.0, 0.0), uv(1.0, 1.0)];

    /// The corners of each face in the order of [`Self::TEX_COORDS`],
    /// seen from outside the box.
    #[rustfmt::skip]
    const QUADS: [[usize; 4]; 6] = [
        [0b001, 0b011, 0b010, 0b000], // left
        [0b100, 0b110, 0b111, 0b101], // right
        [0b100, 0b101, 0b001, 0b000], // bottom
        [0b010, 0b011, 0b111, 0b110], // top
        [0b000, 0b010, 0b110, 0b100], // front
        [0b101, 0b111, 0b011, 0b001], // back
    ];

    /// Returns a cube with side length 1 centered at the origin.
    pub const fn unit() -> Self {
        Self {
            left_bot_near: vec3(-0.5, -0.5, -0.5),
            right_top_far: vec3(0.5, 0.5, 0.5),
        }
    }

    fn corner(&self, i: usize) -> Vec3 {
        let [l, b, n] = self.left_bot_near.0;
        let [r, t, f] = self.right_top_far.0;
        let [x, y, z] = Self::COORDS[i].0;
        vec3(l + x * (r - l), b + y * (t - b), n + z * (f - n))
    }
}

impl Build for Box {
    /// Builds a box mesh with twelve triangle faces, two per side, wound
    /// clockwise as seen from outside.
    fn build(self) -> Mesh {
        let mut b = Mesh::builder();
        for (i, quad) in Self::QUADS.iter().enumerate() {
            let verts = quad.map(|c| self.corner(c));
            b.push_verts(verts.into_iter().zip(Self::TEX_COORDS));
            let k = 4 * i;
            b.push_faces([[k, k + 1, k + 2], [k, k + 2, k + 3]]);
        }
        b.build()
    }
}

impl Default for Box {
    fn default() -> Self {
        Self::unit()
    }
}

impl Build for Cube {
    fn build(self) -> Mesh {
        let d = self.side_len / 2.0;
        Box {
            left_bot_near: vec3(-d, -d, -d),
            right_top_far: vec3(d, d, d),
        }
        .build()
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self { side_len: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use re::assert_approx_eq;

    use super::*;

    #[test]
    fn box_faces_point_outwards() {
        let b = Box {
            left_bot_near: vec3(1.0, 2.0, 3.0),
            right_top_far: vec3(2.0, 4.0, 6.0),
        };
        let center = vec3::<()>(1.5, 3.0, 4.5).to();
        let mesh = b.build();
        assert_eq!(mesh.len(), 12);

        for face in &mesh.faces {
            let n = face.normal().expect("box faces are non-degenerate");
            let [p, ..] = face.positions();
            assert!(n.dot(&(p - center)) > 0.0, "face {face:?} points inwards");
        }
    }

    #[test]
    fn box_corners() {
        let mesh = Box::unit().build();
        for face in &mesh.faces {
            for v in face.0 {
                assert!(v.pos.0.iter().all(|c| c.abs() == 0.5));
            }
        }
    }

    #[test]
    fn box_faces_are_textured_upright() {
        let mesh = Box::unit().build();
        // The first triangle of the front face
        let [bl, tl, tr] = mesh.faces[8].0;
        assert_eq!(bl.pos, vec3(-0.5, -0.5, -0.5));
        assert_eq!(tl.pos, vec3(-0.5, 0.5, -0.5));
        assert_eq!(tr.pos, vec3(0.5, 0.5, -0.5));
        assert_eq!(bl.attrib, uv(0.0, 1.0));
        assert_eq!(tl.attrib, uv(0.0, 0.0));
        assert_eq!(tr.attrib, uv(1.0, 0.0));
    }

    #[test]
    fn cube_side_len() {
        let mesh = Cube { side_len: 3.0 }.build();
        let total: f32 = mesh.faces.iter().map(|f| f.area()).sum();
        assert_approx_eq!(total, 6.0 * 9.0);
    }
}
