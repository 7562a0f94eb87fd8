//! Rendering context and parameters.

use core::{cell::RefCell, cmp::Ordering};

use crate::math::{Color3, Vec3, vec3};

use super::{Stats, World};

/// Context and parameters used by the renderer.
#[derive(Clone, Debug)]
pub struct Context {
    /// The color with which to fill the color buffer to clear it, if any.
    ///
    /// If rendered geometry always fills the entire frame, `color_clear`
    /// can be set to `None` to avoid redundant work.
    pub color_clear: Option<Color3>,

    /// The value with which to fill the depth buffer to clear it, if any.
    ///
    /// Depth buffers store reciprocal depth, so 0.0 is infinitely far away.
    pub depth_clear: Option<f32>,

    /// Whether to cull (discard) faces pointing either away from or towards
    /// the camera.
    ///
    /// Faces with no well-defined normal, such as those with all vertices
    /// on the same line, are culled regardless of this setting.
    pub face_cull: Option<FaceCull>,

    /// Whether to sort visible faces by their depth.
    ///
    /// Back-to-front order is the painter's algorithm: farther faces are
    /// drawn first and overwritten by nearer ones. This gives correct
    /// results unless there is intersecting or non-orderable geometry.
    pub depth_sort: Option<DepthSort>,

    /// Whether to do depth testing and which predicate to use.
    ///
    /// If set to `Some(Ordering::Less)`, a fragment passes the depth test
    /// *iff* it is nearer than the one already drawn. If `None`, the
    /// default, no depth test is performed. This setting has no effect
    /// if the render target has no depth buffer.
    pub depth_test: Option<Ordering>,

    /// Direction towards the light, in world space. Should be unit length.
    pub light_dir: Vec3<World>,

    /// Whether to darken faces according to their angle to the light.
    pub shading: bool,

    /// If set, the edges of each rasterized triangle are drawn on top of
    /// it with this color.
    pub wireframe: Option<Color3>,

    /// Collecting rendering statistics.
    pub stats: RefCell<Stats>,
}

/// Whether to sort faces front to back or back to front.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DepthSort {
    FrontToBack,
    BackToFront,
}

/// Whether to cull front faces or backfaces.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FaceCull {
    Front,
    Back,
}

impl Context {
    /// Compares the reciprocal depth value `new` to `curr` and returns
    /// whether `new` passes the depth test specified by `self.depth_test`.
    /// If `self.depth_test` is `None`, always returns `true`.
    #[inline]
    pub fn depth_test(&self, new: f32, curr: f32) -> bool {
        // Reverse comparison because we're comparing reciprocals
        self.depth_test.is_none() || self.depth_test == curr.partial_cmp(&new)
    }

    /// Returns whether a face should be culled based on the current face
    /// culling setting.
    #[inline]
    pub fn face_cull(&self, is_backface: bool) -> bool {
        match self.face_cull {
            Some(FaceCull::Back) => is_backface,
            Some(FaceCull::Front) => !is_backface,
            None => false,
        }
    }
}

impl Default for Context {
    /// Creates a rendering context with default settings.
    ///
    /// The default values are:
    /// * Color clear:   Black
    /// * Depth clear:   0.0 (infinitely far)
    /// * Face culling:  Backfaces
    /// * Depth sorting: Back to front
    /// * Depth testing: Disabled
    /// * Light:         Up and towards the viewer, (0, 1, -1) normalized
    /// * Shading:       Enabled
    /// * Wireframe:     Disabled
    fn default() -> Self {
        Self {
            color_clear: Some(Color3::BLACK),
            depth_clear: Some(0.0),
            face_cull: Some(FaceCull::Back),
            depth_sort: Some(DepthSort::BackToFront),
            depth_test: None,
            light_dir: vec3(0.0, 1.0, -1.0).normalize(),
            shading: true,
            wireframe: None,
            stats: Default::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_on_reciprocals() {
        let ctx = Context {
            depth_test: Some(Ordering::Less),
            ..Context::default()
        };
        // 1/2 is nearer than 1/4
        assert!(ctx.depth_test(0.5, 0.25));
        assert!(!ctx.depth_test(0.25, 0.5));
        assert!(!ctx.depth_test(0.5, 0.5));

        assert!(Context::default().depth_test(0.25, 0.5));
    }

    #[test]
    fn face_culling() {
        let mut ctx = Context::default();
        assert!(ctx.face_cull(true));
        assert!(!ctx.face_cull(false));

        ctx.face_cull = Some(FaceCull::Front);
        assert!(!ctx.face_cull(true));
        assert!(ctx.face_cull(false));

        ctx.face_cull = None;
        assert!(!ctx.face_cull(true));
    }
}
