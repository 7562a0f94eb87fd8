//! Render targets.
//!
//! The typical render target is a plain color buffer, to which triangles
//! are drawn in painter's order. A [`Framebuf`] adds a depth buffer for
//! per-pixel hidden surface removal.

use crate::math::Color3;
use crate::util::{Dims, buf::Buf2};

use super::ctx::Context;
use super::raster::{Frag, Scanline};
use super::stats::Throughput;

/// Trait for types that can be used as render targets.
pub trait Target {
    /// Returns the width and height of `self` in pixels.
    fn dims(&self) -> Dims;

    /// Clears `self` as specified by `ctx`.
    fn clear(&mut self, ctx: &Context);

    /// Writes a single scanline into `self`.
    ///
    /// For each fragment in `scanline`, `frag_fn` is called to compute its
    /// color; `None` means the fragment is discarded. Fragments outside
    /// the bounds of `self` are skipped.
    ///
    /// Returns the count of fragments input and output.
    fn rasterize<F>(
        &mut self,
        scanline: Scanline,
        frag_fn: F,
        ctx: &Context,
    ) -> Throughput
    where
        F: FnMut(Frag) -> Option<Color3>;

    /// Sets a single pixel, if within bounds.
    fn plot(&mut self, x: i32, y: i32, color: Color3);
}

/// Trait for pixel formats that colors can be written as.
pub trait Pixel: Copy + Default {
    fn from_color(c: Color3) -> Self;
}

/// Framebuffer, combining a color (pixel) buffer and a depth buffer.
///
/// The depth buffer holds the *reciprocal* depth of the nearest fragment
/// drawn so far at each pixel.
#[derive(Clone, Debug)]
pub struct Framebuf<P = Color3> {
    pub color: Buf2<P>,
    pub depth: Buf2<f32>,
}

impl Pixel for Color3 {
    #[inline]
    fn from_color(c: Color3) -> Self {
        c
    }
}

/// `0x00_RR_GG_BB`, as used by many windowing libraries.
impl Pixel for u32 {
    #[inline]
    fn from_color(c: Color3) -> Self {
        c.to_rgb_u32()
    }
}

impl<P: Pixel> Framebuf<P> {
    /// Creates a framebuffer of the given size with zeroed buffers.
    pub fn new(dims: Dims) -> Self {
        Self {
            color: Buf2::new_default(dims),
            depth: Buf2::new_default(dims),
        }
    }
}

fn in_bounds((w, h): Dims, x: i32, y: i32) -> Option<(u32, u32)> {
    let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
    (x < w && y < h).then_some((x, y))
}

impl<P: Pixel> Target for Buf2<P> {
    fn dims(&self) -> Dims {
        Buf2::dims(self)
    }

    fn clear(&mut self, ctx: &Context) {
        if let Some(c) = ctx.color_clear {
            self.fill(P::from_color(c));
        }
    }

    /// Rasterizes `scanline` into this color buffer.
    /// Does no z-buffering.
    fn rasterize<F>(&mut self, sl: Scanline, mut frag_fn: F, _: &Context) -> Throughput
    where
        F: FnMut(Frag) -> Option<Color3>,
    {
        let dims = Buf2::dims(self);
        let mut io = Throughput { i: sl.len(), o: 0 };
        for frag in sl.fragments() {
            let [x, y] = frag.pos;
            let Some((x, y)) = in_bounds(dims, x, y) else {
                continue;
            };
            if let Some(c) = frag_fn(frag) {
                self[[x, y]] = P::from_color(c);
                io.o += 1;
            }
        }
        io
    }

    fn plot(&mut self, x: i32, y: i32, color: Color3) {
        if let Some((x, y)) = in_bounds(Buf2::dims(self), x, y) {
            self[[x, y]] = P::from_color(color);
        }
    }
}

impl<P: Pixel> Target for Framebuf<P> {
    fn dims(&self) -> Dims {
        self.color.dims()
    }

    fn clear(&mut self, ctx: &Context) {
        self.color.clear(ctx);
        if let Some(z) = ctx.depth_clear {
            self.depth.fill(z);
        }
    }

    /// Rasterizes `scanline` into this framebuffer.
    ///
    /// If `ctx.depth_test` is set, fragments failing the depth test are
    /// discarded, and the depth of written fragments recorded.
    fn rasterize<F>(&mut self, sl: Scanline, mut frag_fn: F, ctx: &Context) -> Throughput
    where
        F: FnMut(Frag) -> Option<Color3>,
    {
        let dims = self.color.dims();
        let mut io = Throughput { i: sl.len(), o: 0 };
        for frag in sl.fragments() {
            let [x, y] = frag.pos;
            let Some((x, y)) = in_bounds(dims, x, y) else {
                continue;
            };
            let z = frag.depth();
            if !ctx.depth_test(z, self.depth[[x, y]]) {
                continue;
            }
            if let Some(c) = frag_fn(frag) {
                self.color[[x, y]] = P::from_color(c);
                self.depth[[x, y]] = z;
                io.o += 1;
            }
        }
        io
    }

    fn plot(&mut self, x: i32, y: i32, color: Color3) {
        self.color.plot(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;

    use crate::math::rgb;
    use crate::render::tex::uvw;

    use super::*;

    fn span(y: i32, xs: core::ops::Range<i32>, w: f32) -> Scanline {
        let tc = uvw(0.0, 0.0, w);
        Scanline { y, xs, vs: tc..tc }
    }

    #[test]
    fn color_buffer_rasterize() {
        let mut buf = Buf2::<Color3>::new_default((4, 2));
        let ctx = Context::default();
        let io = buf.rasterize(span(1, 1..3, 1.0), |_| Some(Color3::WHITE), &ctx);

        assert_eq!(io, Throughput { i: 2, o: 2 });
        assert_eq!(buf[1usize], [
            Color3::BLACK,
            Color3::WHITE,
            Color3::WHITE,
            Color3::BLACK
        ]);
    }

    #[test]
    fn discarded_and_out_of_bounds_frags_are_skipped() {
        let mut buf = Buf2::<u32>::new_default((4, 2));
        let ctx = Context::default();
        let io = buf.rasterize(
            span(0, -2..6, 1.0),
            |f| (f.pos[0] != 2).then_some(rgb(0x12, 0x34, 0x56)),
            &ctx,
        );
        assert_eq!(io, Throughput { i: 8, o: 3 });
        assert_eq!(buf[0usize], [0x123456, 0x123456, 0, 0x123456]);
    }

    #[test]
    fn clear_and_plot() {
        let mut buf = Buf2::<Color3>::new_default((3, 3));
        let ctx = Context {
            color_clear: Some(Color3::RED),
            ..Context::default()
        };
        buf.clear(&ctx);
        buf.plot(1, 1, Color3::WHITE);
        buf.plot(-1, 5, Color3::WHITE);
        assert_eq!(buf[[0, 0]], Color3::RED);
        assert_eq!(buf[[1, 1]], Color3::WHITE);
    }

    #[test]
    fn framebuf_depth_test() {
        let mut fb = Framebuf::<Color3>::new((4, 1));
        let ctx = Context {
            depth_test: Some(Ordering::Less),
            ..Context::default()
        };
        fb.clear(&ctx);

        // Far span
        fb.rasterize(span(0, 0..4, 0.25), |_| Some(Color3::RED), &ctx);
        // Nearer span over the middle
        fb.rasterize(span(0, 1..3, 0.5), |_| Some(Color3::WHITE), &ctx);
        // Farthest span, fully hidden
        let io = fb.rasterize(span(0, 0..4, 0.1), |_| Some(Color3::BLACK), &ctx);

        assert_eq!(io.o, 0);
        assert_eq!(fb.color[0usize], [
            Color3::RED,
            Color3::WHITE,
            Color3::WHITE,
            Color3::RED
        ]);
        assert_eq!(fb.depth[0usize], [0.25, 0.5, 0.5, 0.25]);
    }

    #[test]
    fn framebuf_without_depth_test_overwrites() {
        let mut fb = Framebuf::<Color3>::new((2, 1));
        let ctx = Context::default();
        fb.clear(&ctx);
        fb.rasterize(span(0, 0..2, 0.5), |_| Some(Color3::RED), &ctx);
        fb.rasterize(span(0, 0..2, 0.1), |_| Some(Color3::WHITE), &ctx);
        assert_eq!(fb.color[[0, 0]], Color3::WHITE);
    }
}
