//! Cameras and camera transforms.
//!
//! Cameras are described by three capabilities, each a trait:
//! * [`Pose`]: the camera can be positioned and turned,
//! * [`Project`]: the camera supplies the matrices that take world-space
//!   geometry to the screen,
//! * [`Render`]: the camera can draw some kind of scene into a target.
//!
//! [`Camera3d`] is a first-person perspective camera and [`Camera2d`]
//! a top-down orthographic one. The [raycaster][super::raycast::Caster]
//! implements `Pose` and `Render` as well.

use core::ops::Range;

use crate::geom::Mesh;
use crate::math::{
    Angle, Mat4, Vec3, degs, orthographic, perspective, point_at, rotate_y,
    rotate_z, vec3,
};
use crate::util::Dims;

use super::{Proj, View, World, ctx::Context, render_to, target::Target};

/// Trait for things that have a position and heading that can be changed.
pub trait Pose {
    /// Returns the current position in **world** space.
    fn pos(&self) -> Vec3<World>;

    /// Moves by `delta` relative to the current heading: x is towards the
    /// right edge of the screen, y up, and z forward.
    ///
    /// Note that the viewport mirrors x, so screen right is **view** -x.
    fn translate(&mut self, delta: Vec3);

    /// Turns by `delta` about the viewing axis of the camera type.
    /// Positive angles turn left (counterclockwise) as seen on screen.
    fn rotate(&mut self, delta: Angle);
}

/// Trait for cameras that project world-space geometry to the screen.
pub trait Project {
    /// Returns the position of the eye in **world** space.
    fn eye(&self) -> Vec3<World>;

    /// Returns the current world-to-view matrix.
    fn world_to_view(&self) -> Mat4<World, View>;

    /// Returns the projection matrix for a viewport of size `dims`.
    fn view_to_proj(&self, dims: Dims) -> Mat4<View, Proj>;

    /// Returns the view-space depth of the near clipping plane.
    fn near(&self) -> f32;

    /// Returns the direction in which the point `pt` is seen from the eye.
    ///
    /// Used for back-face culling.
    fn view_ray(&self, pt: &Vec3<World>) -> Vec3<World> {
        *pt - self.eye()
    }
}

/// Trait for drawing a scene of type `Scene` into a render target.
pub trait Render<Scene: ?Sized> {
    fn render(&self, scene: &Scene, target: &mut impl Target, ctx: &Context);
}

/// First-person perspective camera.
///
/// The camera is always level with the ground: it can turn left and right
/// but not look up or down. Field of view and clipping distances are fixed
/// when it is created.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera3d {
    /// Position in **world** space.
    pub pos: Vec3<World>,
    yaw: Angle,
    fov: Angle,
    near_far: Range<f32>,
}

/// Top-down orthographic camera.
///
/// Looks towards world +z, at the xy plane. The view can be rolled about
/// the viewing axis and zoomed by changing the extent of the visible
/// region.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera2d {
    /// Position in **world** space.
    pub pos: Vec3<World>,
    roll: Angle,
    extent: f32,
    near_far: Range<f32>,
}

//
// Inherent impls
//

impl Camera3d {
    /// Creates a camera at the origin looking towards +z.
    ///
    /// `fov` is the vertical field of view, and `near_far` the distances
    /// of the near and far clipping planes.
    ///
    /// # Panics
    /// If `near_far` is empty or its start is not positive.
    pub fn new(fov: Angle, near_far: Range<f32>) -> Self {
        assert!(
            0.0 < near_far.start && near_far.start < near_far.end,
            "invalid depth range {near_far:?}"
        );
        Self {
            pos: Vec3::zero(),
            yaw: Angle::ZERO,
            fov,
            near_far,
        }
    }

    /// Returns `self` moved to `pos`.
    #[must_use]
    pub fn at(self, pos: Vec3<World>) -> Self {
        Self { pos, ..self }
    }

    /// Returns `self` turned to the absolute heading `yaw`.
    #[must_use]
    pub fn facing(mut self, yaw: Angle) -> Self {
        self.yaw = wrap(yaw);
        self
    }

    /// Returns the heading, in `[-180°, 180°)`.
    ///
    /// Zero is towards world +z; positive angles turn towards +x, which
    /// is to the left on screen.
    pub fn yaw(&self) -> Angle {
        self.yaw
    }

    /// Returns the vertical field of view.
    pub fn fov(&self) -> Angle {
        self.fov
    }

    /// Returns the unit vector the camera is looking along, in **world**
    /// space.
    pub fn look_dir(&self) -> Vec3<World> {
        rotate_y(-self.yaw).apply_dir(&Vec3::Z).to()
    }

    fn view_to_world(&self) -> Mat4<View, World> {
        point_at(self.pos, self.pos + self.look_dir(), Vec3::Y)
    }
}

impl Camera2d {
    /// Creates a camera at `(0, 0, -10)` looking towards +z, seeing `extent`
    /// units above and below the view axis.
    ///
    /// # Panics
    /// If `extent` is not positive or `near_far` is empty.
    pub fn new(extent: f32, near_far: Range<f32>) -> Self {
        assert!(extent > 0.0, "extent must be positive, was {extent}");
        assert!(
            near_far.start < near_far.end,
            "invalid depth range {near_far:?}"
        );
        Self {
            pos: vec3(0.0, 0.0, -10.0),
            roll: Angle::ZERO,
            extent,
            near_far,
        }
    }

    /// Returns `self` moved to `pos`.
    #[must_use]
    pub fn at(self, pos: Vec3<World>) -> Self {
        Self { pos, ..self }
    }

    /// Returns the roll about the view axis, in `[-180°, 180°)`.
    pub fn roll(&self) -> Angle {
        self.roll
    }

    /// Returns half the height of the visible region in world units.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Multiplies the extent of the visible region by `factor`.
    /// Factors less than one zoom in.
    ///
    /// # Panics
    /// If `factor` is not positive.
    pub fn zoom(&mut self, factor: f32) {
        assert!(factor > 0.0, "zoom factor must be positive, was {factor}");
        self.extent *= factor;
    }

    fn view_to_world(&self) -> Mat4<View, World> {
        let up = rotate_z(-self.roll).apply_dir(&Vec3::Y).to();
        point_at(self.pos, self.pos + Vec3::Z, up)
    }
}

fn wrap(a: Angle) -> Angle {
    a.wrap(-Angle::STRAIGHT, Angle::STRAIGHT)
}

/// Maps a motion `delta` to world space given the world-space directions
/// of screen right, up, and forward.
fn motion_to_world(
    delta: Vec3,
    [right, up, fwd]: [Vec3<World>; 3],
) -> Vec3<World> {
    right * delta.x() + up * delta.y() + fwd * delta.z()
}

//
// Local trait impls
//

impl Pose for Camera3d {
    fn pos(&self) -> Vec3<World> {
        self.pos
    }

    /// Moves the camera relative to its heading.
    ///
    /// Forward and right are always parallel to the ground, and up is
    /// always world +y.
    fn translate(&mut self, delta: Vec3) {
        let fwd = self.look_dir();
        let up = Vec3::Y;
        let right = fwd.cross(&up);
        self.pos += motion_to_world(delta, [right, up, fwd]);
    }

    /// Turns the camera about the world y axis. The yaw is wrapped to
    /// `[-180°, 180°)`.
    fn rotate(&mut self, delta: Angle) {
        self.yaw = wrap(self.yaw + delta);
    }
}

impl Pose for Camera2d {
    fn pos(&self) -> Vec3<World> {
        self.pos
    }

    /// Pans the camera in the plane of the screen; z moves it forward.
    fn translate(&mut self, delta: Vec3) {
        let m = self.view_to_world();
        let [left, up, fwd] = [0, 1, 2].map(|i| {
            let [x, y, z, _] = m.row(i);
            vec3(x, y, z)
        });
        self.pos += motion_to_world(delta, [-left, up, fwd]);
    }

    /// Rolls the camera about its viewing axis. The roll is wrapped to
    /// `[-180°, 180°)`.
    fn rotate(&mut self, delta: Angle) {
        self.roll = wrap(self.roll + delta);
    }
}

impl Project for Camera3d {
    fn eye(&self) -> Vec3<World> {
        self.pos
    }

    fn world_to_view(&self) -> Mat4<World, View> {
        self.view_to_world().quick_inverse()
    }

    /// Returns a perspective projection with aspect ratio `h / w`.
    fn view_to_proj(&self, (w, h): Dims) -> Mat4<View, Proj> {
        let aspect = h as f32 / w.max(1) as f32;
        perspective(self.fov, aspect, self.near_far.clone())
    }

    fn near(&self) -> f32 {
        self.near_far.start
    }
}

impl Project for Camera2d {
    fn eye(&self) -> Vec3<World> {
        self.pos
    }

    fn world_to_view(&self) -> Mat4<World, View> {
        self.view_to_world().quick_inverse()
    }

    fn view_to_proj(&self, (w, h): Dims) -> Mat4<View, Proj> {
        let aspect = h as f32 / w.max(1) as f32;
        orthographic(self.extent, aspect, self.near_far.clone())
    }

    fn near(&self) -> f32 {
        self.near_far.start
    }

    /// All points are seen along the viewing axis.
    fn view_ray(&self, _: &Vec3<World>) -> Vec3<World> {
        Vec3::Z
    }
}

impl Render<[Mesh]> for Camera3d {
    fn render(&self, meshes: &[Mesh], target: &mut impl Target, ctx: &Context) {
        render_to(meshes, self, target, ctx);
    }
}

impl Render<[Mesh]> for Camera2d {
    fn render(&self, meshes: &[Mesh], target: &mut impl Target, ctx: &Context) {
        render_to(meshes, self, target, ctx);
    }
}

//
// Foreign trait impls
//

impl Default for Camera3d {
    /// Returns a camera with a 75° field of view and clipping planes at
    /// 0.1 and 1000.
    fn default() -> Self {
        Self::new(degs(75.0), 0.1..1000.0)
    }
}

impl Default for Camera2d {
    /// Returns a camera with extent 1 and clipping planes at 0 and 1000.
    fn default() -> Self {
        Self::new(1.0, 0.0..1000.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn camera3d_defaults() {
        let cam = Camera3d::default();
        assert_eq!(cam.pos(), Vec3::zero());
        assert_eq!(cam.yaw(), Angle::ZERO);
        assert_approx_eq!(cam.fov().to_degs(), 75.0);
        assert_eq!(cam.near(), 0.1);
        assert_approx_eq!(cam.look_dir(), vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn camera3d_turning() {
        let mut cam = Camera3d::default();
        cam.rotate(degs(90.0));
        assert_approx_eq!(cam.look_dir(), vec3(1.0, 0.0, 0.0));

        cam.rotate(degs(110.0));
        assert_approx_eq!(cam.yaw().to_degs(), -160.0, eps = 1e-4);

        let cam = Camera3d::default().facing(degs(-270.0));
        assert_approx_eq!(cam.yaw().to_degs(), 90.0, eps = 1e-4);
    }

    #[test]
    fn camera3d_ground_locked_motion() {
        let mut cam = Camera3d::default().facing(degs(90.0));
        // Forward is now world +x, screen right is world +z
        cam.translate(vec3(0.0, 0.0, 2.0));
        assert_approx_eq!(cam.pos(), vec3(2.0, 0.0, 0.0));
        cam.translate(vec3(1.0, 3.0, 0.0));
        assert_approx_eq!(cam.pos(), vec3(2.0, 3.0, 1.0));
    }

    #[test]
    fn camera3d_world_to_view() {
        let cam = Camera3d::default()
            .at(vec3(1.0, 2.0, 3.0))
            .facing(degs(90.0));
        let m = cam.world_to_view();

        assert_approx_eq!(m.apply_pt(&cam.pos), vec3(0.0, 0.0, 0.0));
        let ahead = cam.pos + cam.look_dir() * 5.0;
        assert_approx_eq!(m.apply_pt(&ahead), vec3(0.0, 0.0, 5.0));
        let above = cam.pos + Vec3::Y;
        assert_approx_eq!(m.apply_pt(&above), vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn camera3d_view_ray() {
        let cam = Camera3d::default().at(vec3(0.0, 0.0, -5.0));
        assert_eq!(cam.view_ray(&vec3(1.0, 0.0, 0.0)), vec3(1.0, 0.0, 5.0));
    }

    #[test]
    fn camera3d_projection() {
        let cam = Camera3d::new(degs(90.0), 1.0..10.0);
        let m = cam.view_to_proj((800, 600));
        let p = m.apply(&vec3(3.0, 3.0, 4.0).to_vec4(1.0));
        // Clip w equals view depth
        assert_approx_eq!(p.w(), 4.0);
        // Horizontal scale is the aspect ratio times the vertical one
        assert_approx_eq!(p.x() / p.w(), 0.75 * 0.75);
        assert_approx_eq!(p.y() / p.w(), 0.75);
    }

    #[test]
    #[should_panic]
    fn camera3d_nonpositive_near_panics() {
        let _ = Camera3d::new(degs(60.0), 0.0..1.0);
    }

    #[test]
    fn camera2d_world_to_view() {
        let cam = Camera2d::default();
        let m = cam.world_to_view();
        assert_approx_eq!(
            m.apply_pt(&vec3(1.0, 2.0, 0.0)),
            vec3(1.0, 2.0, 10.0)
        );
        assert_eq!(cam.view_ray(&vec3(5.0, 5.0, 5.0)), Vec3::Z);
    }

    #[test]
    fn camera2d_roll_and_pan() {
        let mut cam = Camera2d::default();
        cam.rotate(degs(90.0));
        let m = cam.world_to_view();
        // World +x is now up, and world +y the view -x axis, drawn on
        // the right of the screen
        assert_approx_eq!(
            m.apply_pt(&vec3(0.0, 1.0, -9.0)),
            vec3(-1.0, 0.0, 1.0)
        );
        assert_approx_eq!(
            m.apply_pt(&vec3(1.0, 0.0, -9.0)),
            vec3(0.0, 1.0, 1.0)
        );

        // Panning right moves along world +y
        cam.translate(vec3(2.0, 0.0, 0.0));
        assert_approx_eq!(cam.pos(), vec3(0.0, 2.0, -10.0));
    }

    #[test]
    fn camera2d_zoom() {
        let mut cam = Camera2d::new(4.0, 0.0..100.0);
        cam.zoom(0.5);
        assert_eq!(cam.extent(), 2.0);

        let m = cam.view_to_proj((100, 100));
        let p = m.apply_pt(&vec3(2.0, -2.0, 50.0));
        assert_approx_eq!(p, vec3(1.0, -1.0, 0.5));
    }
}
