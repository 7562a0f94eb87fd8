//! Visibility and ordering: back-face culling, flat shading, depth sorting.

use crate::geom::{Tri, Vertex};
use crate::math::Vec3;

use super::ctx::{Context, DepthSort};

/// The minimum shade of a face, even if it points away from the light.
pub const AMBIENT: f32 = 0.1;

/// Returns the unit normal of a triangle, or `None` if it is degenerate.
///
/// The normal is computed from two edges, (p1 − p0) × (p2 − p0).
#[inline]
pub fn face_normal<B, A>(tri: &Tri<Vertex<Vec3<B>, A>>) -> Option<Vec3<B>> {
    tri.normal()
}

/// Returns whether a face with normal `normal` faces a viewer looking
/// along `ray`, ie. whether `normal · ray < 0`.
///
/// For a perspective view, `ray` is the vector from the eye to a vertex
/// of the face.
///
/// # Examples
/// ```
/// use painter_core::math::vec3;
/// use painter_core::render::vis::is_facing;
///
/// let n = vec3::<()>(0.0, 0.0, -1.0);
/// assert!(is_facing(&n, &vec3(0.0, 0.0, 5.0)));
/// assert!(!is_facing(&n, &vec3(0.0, 0.0, -5.0)));
/// // Edge-on faces are not facing the viewer
/// assert!(!is_facing(&n, &vec3(1.0, 0.0, 0.0)));
/// ```
#[inline]
pub fn is_facing<B>(normal: &Vec3<B>, ray: &Vec3<B>) -> bool {
    normal.dot(ray) < 0.0
}

/// Culls a triangle according to the face culling setting of `ctx`.
///
/// Returns the normal of `tri` if it survives, `None` if it is culled.
/// Degenerate triangles are always culled.
pub fn cull<B, A>(
    tri: &Tri<Vertex<Vec3<B>, A>>,
    ray: &Vec3<B>,
    ctx: &Context,
) -> Option<Vec3<B>> {
    let n = face_normal(tri)?;
    (!ctx.face_cull(!is_facing(&n, ray))).then_some(n)
}

/// Returns the flat shade of a face with unit normal `normal` lit from
/// the direction `light`.
///
/// This is the cosine of the angle between the two, but never less than
/// [`AMBIENT`].
#[inline]
pub fn shade<B>(normal: &Vec3<B>, light: &Vec3<B>) -> f32 {
    light.dot(normal).max(AMBIENT)
}

/// Sorts `items` by the depth returned by `depth`, in the given `order`.
///
/// The sort is stable: items at equal depths keep their relative order.
/// With [`DepthSort::BackToFront`], the item with the greatest depth comes
/// first.
pub fn depth_sort<T>(
    items: &mut [T],
    order: DepthSort,
    depth: impl Fn(&T) -> f32,
) {
    match order {
        DepthSort::BackToFront => {
            items.sort_by(|a, b| depth(b).total_cmp(&depth(a)))
        }
        DepthSort::FrontToBack => {
            items.sort_by(|a, b| depth(a).total_cmp(&depth(b)))
        }
    }
}
