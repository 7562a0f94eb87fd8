//! Mesh approximations of simple geometric shapes.

use re::geom::Mesh;

mod floor;
mod platonic;

pub use floor::*;
pub use platonic::*;

/// Trait for shapes that can be turned into a [`Mesh`].
///
/// The resulting mesh uses the [fallback][re::render::tex::Texture::fallback]
/// texture; use [`Mesh::with_texture`] to replace it.
pub trait Build {
    fn build(self) -> Mesh;
}
