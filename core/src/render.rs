//! Turning 3D geometry into raster images.
//!
//! This module constitutes the 3D rendering pipeline of `painter`. A frame
//! passes through the following stages:
//!
//! 1. Faces are transformed from model to world space.
//! 2. Faces pointing away from the camera are [culled][vis::cull], and the
//!    rest [flat shaded][vis::shade].
//! 3. Faces are transformed to view space and [clipped][clip] against the
//!    near plane.
//! 4. Faces are [projected][project] to screen space.
//! 5. Faces from all meshes are [sorted][vis::depth_sort] by depth.
//! 6. Faces are clipped against the edges of the screen.
//! 7. Faces are [rasterized][raster] and [textured][tex] into a
//!    [target][target].

use alloc::vec::Vec;

use crate::geom::{Face, Mesh, vertex};
use crate::math::{Color3, Mat4, Vec3, viewport};
use crate::util::{Dims, buf::Buf2};

use cam::Project;
use clip::{clip_to_screen, clip_tri, near_plane};
use ctx::Context;
use raster::{line, tri_fill};
use target::Target;

pub mod cam;
pub mod clip;
pub mod ctx;
pub mod raster;
pub mod raycast;
pub mod stats;
pub mod target;
pub mod tex;
pub mod vis;

pub use stats::Stats;

/// Model space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Model;

/// World space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct World;

/// View (camera) space coordinate basis.
///
/// The camera is at the origin looking towards +z, with +y up. The
/// viewport mirrors x, so +x is drawn on the **left** side of the screen
/// and the camera's right is towards -x.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct View;

/// Projective (clip) space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Proj;

/// NDC space coordinate basis (normalized device coordinates).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Ndc;

/// Screen space coordinate basis.
///
/// x and y are pixel coordinates with the origin in the top-left corner.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Screen;

/// A projected face waiting to be rasterized.
#[derive(Clone, Debug, PartialEq)]
pub struct Prim {
    /// The face in screen space, with projected texture coordinates.
    pub face: Face<Screen>,
    /// Flat shade in 0.0..=1.0.
    pub shade: f32,
    /// Average view-space depth of the face before projection.
    pub depth: f32,
    /// Index of the mesh the face belongs to.
    pub mesh: usize,
}

/// Projects a view-space face to screen space.
///
/// Each vertex is transformed to clip space by `proj` and divided by the
/// resulting `w`, then mapped to pixel coordinates by `vport`. Texture
/// coordinates are divided by `w` as well, so that they can be linearly
/// interpolated in screen space.
///
/// The face must lie in front of the near plane.
pub fn project(
    face: Face<View>,
    proj: &Mat4<View, Proj>,
    vport: &Mat4<Ndc, Screen>,
) -> Face<Screen> {
    face.map(|v| {
        let clip = proj.apply(&v.pos.to_vec4(1.0));
        let w = clip.w();
        let ndc: Vec3<Ndc> = (clip.xyz() / w).to();
        vertex(vport.apply_pt(&ndc), v.attrib.project(w))
    })
}

/// Renders `meshes` as seen by `cam` into a new `dims`-sized buffer, with
/// default [settings][Context::default].
///
/// This never fails: degenerate, hidden, or badly textured geometry is
/// skipped or drawn with whatever information there is.
pub fn render(meshes: &[Mesh], cam: &impl Project, dims: Dims) -> Buf2<Color3> {
    let mut buf = Buf2::new_default(dims);
    render_to(meshes, cam, &mut buf, &Context::default());
    buf
}

/// Renders `meshes` as seen by `cam` into `target`.
///
/// The frame is cleared first as specified by `ctx`. Statistics of the
/// frame are appended to `ctx.stats`.
pub fn render_to(
    meshes: &[Mesh],
    cam: &impl Project,
    target: &mut impl Target,
    ctx: &Context,
) {
    let mut stats = Stats::start();
    stats.calls = 1.0;
    stats.frames = 1.0;

    target.clear(ctx);

    let dims = target.dims();
    let view = cam.world_to_view();
    let proj = cam.view_to_proj(dims);
    let vport = viewport(dims);
    let near = near_plane(cam.near());

    let mut prims = Vec::new();
    for (i, mesh) in meshes.iter().enumerate() {
        stats.objs.i += 1;
        stats.prims.i += mesh.faces.len();
        let before = prims.len();

        for face in &mesh.faces {
            let face = face.transform(&mesh.transform);
            let ray = cam.view_ray(&face.0[0].pos);
            let Some(n) = vis::cull(&face, &ray, ctx) else {
                continue;
            };
            let shade = if ctx.shading {
                vis::shade(&n, &ctx.light_dir)
            } else {
                1.0
            };
            for tri in clip_tri(&near, face.transform(&view)) {
                prims.push(Prim {
                    depth: tri.avg_z(),
                    face: project(tri, &proj, &vport),
                    shade,
                    mesh: i,
                });
            }
        }
        if prims.len() > before {
            stats.objs.o += 1;
        }
    }

    if let Some(order) = ctx.depth_sort {
        vis::depth_sort(&mut prims, order, |p| p.depth);
    }

    let mut visible = Vec::new();
    for prim in prims {
        let tex = &meshes[prim.mesh].texture;
        let shade = prim.shade;

        visible.clear();
        clip_to_screen(prim.face, dims, &mut visible);
        stats.prims.o += visible.len();

        for tri in &visible {
            tri_fill(tri.0, |sl| {
                stats.frags += target.rasterize(
                    sl,
                    |frag| {
                        let uv = frag.uv();
                        tex.sample(uv.u(), uv.v()).map(|c| c.mul(shade))
                    },
                    ctx,
                );
            });
            if let Some(color) = ctx.wireframe {
                let [a, b, c] = tri.0.map(|v| [v.pos.x() as i32, v.pos.y() as i32]);
                for (p, q) in [(a, b), (b, c), (c, a)] {
                    line(p, q, |x, y| target.plot(x, y, color));
                }
            }
        }
    }

    *ctx.stats.borrow_mut() += stats.finish();
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::assert_approx_eq;
    use crate::geom::tri;
    use crate::math::{degs, perspective, vec3};
    use crate::render::tex::uv;

    use super::*;

    #[test]
    fn project_center_and_corners() {
        let proj = perspective(degs(90.0), 1.0, 1.0..100.0);
        let vport = viewport((200, 100));
        let face = tri(
            vertex(vec3(0.0, 0.0, 2.0), uv(0.0, 0.0)),
            vertex(vec3(2.0, 2.0, 2.0), uv(1.0, 0.0)),
            vertex(vec3(-4.0, -4.0, 4.0), uv(0.0, 1.0)),
        );
        let [a, b, c] = project(face, &proj, &vport).0;

        // On the view axis: the center of the screen
        assert_approx_eq!(a.pos.x(), 100.0);
        assert_approx_eq!(a.pos.y(), 50.0);
        // Top-left corner of the frustum: the top-right corner of the
        // screen, as x is mirrored
        assert_approx_eq!(b.pos.x(), 0.0);
        assert_approx_eq!(b.pos.y(), 0.0);
        // Bottom-right corner: the bottom-left corner of the screen
        assert_approx_eq!(c.pos.x(), 200.0);
        assert_approx_eq!(c.pos.y(), 100.0);

        // Texture coordinates divided by the view depth
        assert_approx_eq!(b.attrib, uv(1.0, 0.0).project(2.0));
        assert_approx_eq!(c.attrib.w(), 0.25);
    }

    #[test]
    fn project_depth_range() {
        let proj = perspective(degs(90.0), 1.0, 1.0..100.0);
        let vport = viewport((10, 10));
        let face = tri(
            vertex(vec3(0.0, 0.0, 1.0), uv(0.0, 0.0)),
            vertex(vec3(0.0, 0.0, 100.0), uv(0.0, 0.0)),
            vertex(vec3(0.0, 0.0, 10.0), uv(0.0, 0.0)),
        );
        let [near, far, _] = project(face, &proj, &vport).0;
        assert_approx_eq!(near.pos.z(), 0.0);
        assert_approx_eq!(far.pos.z(), 1.0);
    }

    #[test]
    fn empty_scene_is_cleared() {
        let cam = cam::Camera3d::default();
        let buf = render(&[], &cam, (4, 3));
        assert_eq!(buf.dims(), (4, 3));
        assert!(buf.data().iter().all(|c| *c == Color3::BLACK));

        let ctx = Context {
            color_clear: Some(Color3::RED),
            ..Context::default()
        };
        let mut buf = Buf2::<Color3>::new_default((2, 2));
        render_to(&[], &cam, &mut buf, &ctx);
        assert_eq!(buf.data(), [Color3::RED; 4]);

        let stats = ctx.stats.borrow();
        assert_eq!(stats.frames, 1.0);
        assert_eq!(stats.objs, stats::Throughput::default());
    }

    #[test]
    fn prims_remember_their_mesh() {
        let p = Prim {
            face: tri(
                vertex(vec3(0.0, 0.0, 0.0), uv(0.0, 0.0)),
                vertex(vec3(1.0, 0.0, 0.0), uv(0.0, 0.0)),
                vertex(vec3(0.0, 1.0, 0.0), uv(0.0, 0.0)),
            ),
            shade: 0.5,
            depth: 3.0,
            mesh: 1,
        };
        let mut prims = vec![p.clone(), Prim { depth: 5.0, mesh: 0, ..p }];
        vis::depth_sort(&mut prims, ctx::DepthSort::BackToFront, |p| p.depth);
        assert_eq!(prims[0].mesh, 0);
        assert_eq!(prims[1].mesh, 1);
    }
}
