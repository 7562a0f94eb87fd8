//! ```text
//!                  _       _
//!  _ __   __ _ (_)_ __ | |_ ___ _ __
//! | '_ \ / _` || | '_ \| __/ _ \ '__|
//! | |_) | (_| || | | | | ||  __/ |
//! | .__/ \__,_||_|_| |_|\__\___|_|
//! |_|
//! ```
//!
//! Core functionality of the `painter` project.
//!
//! A small software 3D renderer built around the classic painter's
//! algorithm: triangles are transformed, back-face culled, flat shaded,
//! clipped against the near plane, projected, sorted far-to-near, clipped
//! to the screen edges, and finally filled scanline by scanline with
//! perspective-correct texture mapping. A grid raycaster in the style of
//! early first-person games is included as well.
//!
//! The simplest way in is [`render::render`], which takes a list of
//! [meshes][geom::Mesh] and a [camera][render::cam::Camera3d] and returns
//! a freshly drawn pixel buffer.
//!
//! # Crate features
//!
//! * `std`:
//!   Makes available items requiring I/O or timekeeping, and uses the
//!   floating-point functions of `std`. Enabled by default.
//!
//!   If this feature is disabled, the crate only depends on `alloc`.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate.
//!
//! * `mm`:
//!   Provides fast approximate implementations of floating-point functions
//!   via the [micromath](https://crates.io/crates/micromath) crate.
//!
//! At least one of the above must be enabled.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

#[cfg(not(feature = "fp"))]
compile_error!("one of the features `std`, `libm`, or `mm` must be enabled");

pub mod geom;
pub mod math;
pub mod render;
pub mod util;

pub mod prelude {
    pub use crate::math::{
        Lerp,
        angle::{Angle, degs, rads, turns},
        color::{Color3, gray, rgb},
        mat::{
            Mat4, perspective, rotate_x, rotate_y, rotate_z, scale, translate,
            viewport,
        },
        vec::{Vec2, Vec3, Vec4, Vector, splat, vec2, vec3, vec4},
    };

    pub use crate::geom::{Face, Mesh, Tri, Vertex, tri, vertex};

    pub use crate::render::{
        Model, Screen, View, World,
        cam::{Camera2d, Camera3d, Pose, Project, Render},
        ctx::Context,
        raycast::{Caster, Grid},
        render, render_to,
        target::{Framebuf, Target},
        tex::{TexCoord, Texture, uv, uvw},
    };

    pub use crate::util::{Dims, buf::Buf2};
}
