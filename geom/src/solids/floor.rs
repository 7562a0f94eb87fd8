//! Flat, tiled ground planes.

use alloc::vec::Vec;

use re::geom::Mesh;
use re::math::{Vec3, vec3};
use re::render::tex::uv;

use super::Build;

/// A square grid of tiles in the xz plane, centered at the origin and
/// facing up (+y).
///
/// The texture is repeated once per tile, with its top edge towards +z.
/// Splitting a large floor into several tiles keeps the faces small,
/// which makes the depth sort behave better when other objects stand
/// on the floor.
#[derive(Copy, Clone, Debug)]
pub struct Floor {
    /// The length of each side of the whole floor.
    pub side_len: f32,
    /// The number of tiles along each side.
    pub tiles: u32,
}

impl Build for Floor {
    /// Builds a floor mesh with two triangle faces per tile.
    ///
    /// # Panics
    /// If `self.tiles` is zero.
    fn build(self) -> Mesh {
        assert!(self.tiles > 0, "floor must have at least one tile");

        let n = self.tiles;
        let tile = self.side_len / n as f32;
        let origin = -self.side_len / 2.0;
        let at = |i: u32, j: u32| -> Vec3 {
            vec3(origin + i as f32 * tile, 0.0, origin + j as f32 * tile)
        };

        let mut b = Mesh::builder();
        let mut faces = Vec::new();
        for j in 0..n {
            for i in 0..n {
                let k = b.push_vert(at(i, j), uv(0.0, 1.0));
                b.push_vert(at(i, j + 1), uv(0.0, 0.0));
                b.push_vert(at(i + 1, j + 1), uv(1.0, 0.0));
                b.push_vert(at(i + 1, j), uv(1.0, 1.0));
                faces.push([k, k + 1, k + 2]);
                faces.push([k, k + 2, k + 3]);
            }
        }
        b.push_faces(faces);
        b.build()
    }
}

impl Default for Floor {
    fn default() -> Self {
        Self { side_len: 20.0, tiles: 10 }
    }
}

#[cfg(test)]
mod tests {
    use re::assert_approx_eq;

    use super::*;

    #[test]
    fn floor_faces_up() {
        let mesh = Floor { side_len: 4.0, tiles: 2 }.build();
        assert_eq!(mesh.len(), 8);
        for face in &mesh.faces {
            assert_eq!(face.normal(), Some(vec3(0.0, 1.0, 0.0)));
            assert!(face.0.iter().all(|v| v.pos.y() == 0.0));
        }
    }

    #[test]
    fn floor_extent() {
        let mesh = Floor { side_len: 4.0, tiles: 2 }.build();
        let xs = || mesh.faces.iter().flat_map(|f| f.0).map(|v| v.pos.x());
        assert_eq!(xs().fold(f32::MAX, f32::min), -2.0);
        assert_eq!(xs().fold(f32::MIN, f32::max), 2.0);

        let area: f32 = mesh.faces.iter().map(|f| f.area()).sum();
        assert_approx_eq!(area, 16.0);
    }

    #[test]
    #[should_panic]
    fn floor_without_tiles() {
        Floor { side_len: 1.0, tiles: 0 }.build();
    }
}
